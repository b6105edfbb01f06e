use thiserror::Error;

#[derive(Error, Debug)]
pub enum TelemetryError {
	#[error("Invalid log level: {0}")]
	InvalidLogLevel(String),

	#[error("Logger is already initialized")]
	AlreadyInitialized,
}
