//! Error types for reply decoding.

use thiserror::Error;

/// Errors that can occur while decoding a reply.
///
/// Every variant except [`ParseError::UnexpectedEOF`] means the byte stream
/// is desynchronized and the decoder that produced it is unusable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
	/// Unexpected end of input while parsing
	#[error("Unexpected end of input")]
	UnexpectedEOF,

	/// Invalid type marker encountered
	#[error("Invalid type marker: {0:?}")]
	InvalidTypeMarker(char),

	/// Invalid format for the current type
	#[error("Invalid format: {0}")]
	InvalidFormat(String),

	/// Invalid integer value
	#[error("Invalid integer: {0}")]
	InvalidInteger(String),

	/// Invalid bulk string length
	#[error("Invalid bulk string length: {0}")]
	InvalidBulkStringLength(i64),

	/// Invalid array length
	#[error("Invalid array length: {0}")]
	InvalidArrayLength(i64),

	/// A header line grew past the configured limit without a terminator
	#[error("Line exceeds maximum length of {0} bytes")]
	LineTooLong(usize),

	/// Bulk payload not followed by CRLF
	#[error("Missing CRLF after bulk string")]
	MissingTerminator,

	/// UTF-8 conversion error
	#[error("UTF-8 error: {0}")]
	Utf8Error(String),
}

impl From<std::str::Utf8Error> for ParseError {
	fn from(e: std::str::Utf8Error) -> Self {
		ParseError::Utf8Error(e.to_string())
	}
}

impl From<std::num::ParseIntError> for ParseError {
	fn from(e: std::num::ParseIntError) -> Self {
		ParseError::InvalidInteger(e.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_from_parse_int_error() {
		let err: ParseError = "abc".parse::<i64>().unwrap_err().into();
		assert!(matches!(err, ParseError::InvalidInteger(_)));
	}

	#[test]
	fn test_display() {
		assert_eq!(
			ParseError::InvalidTypeMarker('#').to_string(),
			"Invalid type marker: '#'"
		);
		assert_eq!(
			ParseError::LineTooLong(16).to_string(),
			"Line exceeds maximum length of 16 bytes"
		);
	}
}
