//! Configuration for the replay tool
//!
//! Settings come from an optional configuration file (TOML, JSON or YAML),
//! then explicitly passed command-line flags override them. The logger is
//! initialized from the final log level.

use std::path::Path;

pub use clap::Parser;
use reply::DecoderConfig;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("Failed to read config file {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("Config file has no extension")]
	NoExtension,

	#[error("Unsupported config format: {0}")]
	UnsupportedFormat(String),

	#[error("Invalid TOML config: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid JSON config: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Invalid YAML config: {0}")]
	Yaml(#[from] serde_yaml::Error),

	#[error("Chunk size must be greater than zero")]
	InvalidChunkSize,

	#[error(transparent)]
	Telemetry(#[from] telemetry::TelemetryError),
}

/// Command-line arguments for the replay tool
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
	/// Configuration file path (TOML, JSON, or YAML)
	#[arg(short, long)]
	pub config: Option<String>,

	/// File holding the captured reply stream (default: stdin)
	#[arg(short, long)]
	pub input: Option<String>,

	/// Bytes handed to the decoder per read
	#[arg(long)]
	pub chunk_size: Option<usize>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long)]
	pub log_level: Option<String>,

	/// Largest accepted bulk string length
	#[arg(long)]
	pub max_bulk_len: Option<usize>,

	/// Largest accepted multi-bulk element count
	#[arg(long)]
	pub max_elements: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReplayConfig {
	pub input: Option<String>,
	pub chunk_size: usize,
	pub log_level: String,
	pub max_bulk_len: usize,
	pub max_elements: usize,
	pub max_line_len: usize,
}

impl Default for ReplayConfig {
	fn default() -> Self {
		Self {
			input: None,
			chunk_size: 4096,
			log_level: "info".into(),
			max_bulk_len: reply::DEFAULT_MAX_BULK_LEN,
			max_elements: reply::DEFAULT_MAX_ELEMENTS,
			max_line_len: reply::DEFAULT_MAX_LINE_LEN,
		}
	}
}

impl ReplayConfig {
	pub fn decoder_config(&self) -> DecoderConfig {
		DecoderConfig::default()
			.max_bulk_len(self.max_bulk_len)
			.max_elements(self.max_elements)
			.max_line_len(self.max_line_len)
	}
}

/// Resolve the final configuration and initialize the logger.
pub fn setup(args: Cli) -> Result<ReplayConfig, ConfigError> {
	let config = resolve(args)?;
	telemetry::logger::init(&config.log_level)?;
	Ok(config)
}

fn resolve(args: Cli) -> Result<ReplayConfig, ConfigError> {
	let mut config = match args.config.as_deref() {
		Some(p) => load_from_file(p)?,
		None => ReplayConfig::default(),
	};

	// Override with CLI arguments if explicitly provided
	if let Some(input) = args.input {
		config.input = Some(input);
	}
	if let Some(chunk_size) = args.chunk_size {
		config.chunk_size = chunk_size;
	}
	if let Some(log_level) = args.log_level {
		config.log_level = log_level;
	}
	if let Some(len) = args.max_bulk_len {
		config.max_bulk_len = len;
	}
	if let Some(count) = args.max_elements {
		config.max_elements = count;
	}

	if config.chunk_size == 0 {
		return Err(ConfigError::InvalidChunkSize);
	}
	Ok(config)
}

fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ReplayConfig, ConfigError> {
	let path_ref = path.as_ref();
	let content = std::fs::read_to_string(path_ref).map_err(|source| ConfigError::Io {
		path: path_ref.display().to_string(),
		source,
	})?;

	let extension = path_ref
		.extension()
		.and_then(|ext| ext.to_str())
		.ok_or(ConfigError::NoExtension)?;

	match extension.to_lowercase().as_str() {
		"toml" => Ok(toml::from_str(&content)?),
		"json" => Ok(serde_json::from_str(&content)?),
		"yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
		_ => Err(ConfigError::UnsupportedFormat(extension.to_string())),
	}
}
