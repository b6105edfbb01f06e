//! Chunked replay of a captured reply stream.

use bytes::BytesMut;
use log::debug;
use reply::DecoderConfig;
use reply::ParseError;
use reply::Reply;
use reply::ReplyDecoder;
use reply::ReplyKind;
use reply::ReplyParseResult;
use thiserror::Error;
use tokio::io::AsyncRead;
use tokio::io::AsyncReadExt;

#[derive(Error, Debug)]
pub enum ReplayError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Reply #{index} is malformed: {source}")]
	Decode {
		index: usize,
		#[source]
		source: ParseError,
	},

	#[error("Stream ended inside reply #{index}")]
	Truncated { index: usize },
}

/// Reads `reader` at most `chunk_size` bytes at a time and decodes
/// consecutive replies, one decoder per reply.
pub struct Replayer<R> {
	reader: R,
	chunk_size: usize,
	config: DecoderConfig,
}

impl<R: AsyncRead + Unpin> Replayer<R> {
	pub fn new(reader: R, chunk_size: usize, config: DecoderConfig) -> Self {
		Self {
			reader,
			chunk_size,
			config,
		}
	}

	/// Runs until end of input, handing every completed reply to
	/// `on_reply`. Returns the number of replies decoded.
	pub async fn run<F>(&mut self, mut on_reply: F) -> Result<usize, ReplayError>
	where
		F: FnMut(Reply),
	{
		let mut buffer = BytesMut::with_capacity(self.chunk_size);
		let mut decoder = ReplyDecoder::with_config(self.config);
		let mut in_progress = false;
		let mut count = 0;

		loop {
			let n = (&mut self.reader)
				.take(self.chunk_size as u64)
				.read_buf(&mut buffer)
				.await?;
			debug!("Read {} bytes from input", n);

			if n == 0 {
				if in_progress {
					return Err(ReplayError::Truncated { index: count });
				}
				return Ok(count);
			}

			while !buffer.is_empty() {
				let before = buffer.len();
				let result = decoder.decode(&mut buffer);
				in_progress |= buffer.len() < before;

				match result {
					ReplyParseResult::Complete => {
						let done =
							std::mem::replace(&mut decoder, ReplyDecoder::with_config(self.config));
						if let Some(reply) = done.into_reply() {
							on_reply(reply);
						}
						count += 1;
						in_progress = false;
					}
					ReplyParseResult::Incomplete => break,
					ReplyParseResult::Error(source) => {
						return Err(ReplayError::Decode {
							index: count,
							source,
						});
					}
				}
			}
		}
	}
}

/// One-line rendering of a reply.
pub fn format_reply(reply: &Reply) -> String {
	let fields: Vec<String> = reply
		.fields()
		.iter()
		.map(|f| match f.as_bytes() {
			Some(_) => format!("{:?}", f.to_string_lossy()),
			None => f.to_string_lossy(),
		})
		.collect();

	match reply.kind() {
		ReplyKind::Error => match reply.error_code() {
			Some(code) => format!("error [{}]: {}", code, fields.join(" ")),
			None => format!("error: {}", fields.join(" ")),
		},
		ReplyKind::MultiBulk if reply.is_null_array() => "multi-bulk: (nil)".to_string(),
		ReplyKind::MultiBulk => format!("multi-bulk: [{}]", fields.join(", ")),
		kind => format!("{}: {}", kind, fields.join(" ")),
	}
}
