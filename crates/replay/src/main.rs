use log::error;
use log::info;
use tokio::io::AsyncRead;

use crate::config::Cli;
use crate::config::Parser;
use crate::config::ReplayConfig;
use crate::replay::Replayer;
use crate::replay::format_reply;

mod config;
mod replay;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
	let args = Cli::parse();
	let config = config::setup(args)?;

	let result = match config.input.as_deref() {
		Some(path) => {
			info!("Replaying {} in chunks of {} bytes", path, config.chunk_size);
			let file = tokio::fs::File::open(path).await?;
			replay(file, &config).await
		}
		None => {
			info!("Replaying stdin in chunks of {} bytes", config.chunk_size);
			replay(tokio::io::stdin(), &config).await
		}
	};

	match result {
		Ok(count) => {
			info!("Decoded {} replies", count);
			Ok(())
		}
		Err(e) => {
			error!("Replay failed: {}", e);
			Err(e.into())
		}
	}
}

async fn replay<R: AsyncRead + Unpin>(
	reader: R,
	config: &ReplayConfig,
) -> Result<usize, replay::ReplayError> {
	let mut replayer = Replayer::new(reader, config.chunk_size, config.decoder_config());
	replayer
		.run(|reply| println!("{}", format_reply(&reply)))
		.await
}
