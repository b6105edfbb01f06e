pub mod error;
pub mod logger;

pub use error::TelemetryError;
pub use logger::init;
