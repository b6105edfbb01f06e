//! Utility functions and constants for the reply wire format.

use crate::error::ParseError;

/// CRLF line ending
pub const CRLF: &[u8] = b"\r\n";

/// Byte the line scanner searches for
pub const LF: u8 = b'\n';

/// Type markers
pub const STATUS: u8 = b'+';
pub const ERROR: u8 = b'-';
pub const INTEGER: u8 = b':';
pub const BULK_STRING: u8 = b'$';
pub const MULTI_BULK: u8 = b'*';

/// Find the first LF in a byte slice
#[inline]
pub fn find_lf(buf: &[u8]) -> Option<usize> {
	memchr::memchr(LF, buf)
}

/// Strip trailing CR and LF bytes from a line
#[inline]
pub fn trim_line_ending(line: &[u8]) -> &[u8] {
	let end = line
		.iter()
		.rposition(|&b| b != b'\r' && b != LF)
		.map_or(0, |pos| pos + 1);
	&line[..end]
}

/// Parse an ASCII-decimal integer from a byte slice.
///
/// Only an optional `-` followed by digits is accepted; a leading `+` or
/// whitespace is rejected.
#[inline]
pub fn parse_integer(buf: &[u8]) -> Result<i64, ParseError> {
	let s = std::str::from_utf8(buf)?;
	let digits = s.strip_prefix('-').unwrap_or(s);
	if !digits.starts_with(|c: char| c.is_ascii_digit()) {
		return Err(ParseError::InvalidInteger(format!("{:?}", s)));
	}
	Ok(s.parse::<i64>()?)
}

/// Split an error line body into its code token and message.
///
/// The code is a run of uppercase ASCII letters, digits or underscores
/// starting with a letter and followed by exactly one space. Without such a
/// prefix the whole body is the message.
pub fn split_error_code(body: &[u8]) -> (Option<&[u8]>, &[u8]) {
	let Some(space) = body.iter().position(|&b| b == b' ') else {
		return (None, body);
	};
	let code = &body[..space];
	let is_code = code.first().is_some_and(u8::is_ascii_uppercase)
		&& code
			.iter()
			.all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || *b == b'_');
	if is_code {
		(Some(code), &body[space + 1..])
	} else {
		(None, body)
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[test]
	fn test_find_lf() {
		assert_eq!(find_lf(b"hello\r\n"), Some(6));
		assert_eq!(find_lf(b"hello"), None);
		assert_eq!(find_lf(b"\n"), Some(0));
	}

	#[rstest]
	#[case(b"OK\r\n", b"OK")]
	#[case(b"OK\n", b"OK")]
	#[case(b"OK", b"OK")]
	#[case(b"\r\n", b"")]
	#[case(b"two words \r\n", b"two words ")]
	fn test_trim_line_ending(#[case] input: &[u8], #[case] expected: &[u8]) {
		assert_eq!(trim_line_ending(input), expected);
	}

	#[test]
	fn test_parse_integer() {
		assert_eq!(parse_integer(b"123").unwrap(), 123);
		assert_eq!(parse_integer(b"-1").unwrap(), -1);
		assert!(parse_integer(b"abc").is_err());
		assert!(parse_integer(b"").is_err());
		assert!(parse_integer(b"99999999999999999999").is_err());
		assert!(parse_integer(b"+5").is_err());
		assert!(parse_integer(b"-").is_err());
		assert!(parse_integer(b"--1").is_err());
		assert!(parse_integer(b" 1").is_err());
		assert_eq!(parse_integer(b"-0").unwrap(), 0);
		assert!(matches!(
			parse_integer(b"\xff"),
			Err(ParseError::Utf8Error(_))
		));
	}

	#[rstest]
	#[case(b"ERR unknown command", Some(&b"ERR"[..]), &b"unknown command"[..])]
	#[case(b"WRONGTYPE Operation against a key", Some(&b"WRONGTYPE"[..]), &b"Operation against a key"[..])]
	#[case(b"NOAUTH2 x", Some(&b"NOAUTH2"[..]), &b"x"[..])]
	#[case(b"ERR", None, &b"ERR"[..])]
	#[case(b"oops something", None, &b"oops something"[..])]
	#[case(b"Err mixed case", None, &b"Err mixed case"[..])]
	#[case(b" leading space", None, &b" leading space"[..])]
	#[case(b"", None, &b""[..])]
	fn test_split_error_code(
		#[case] body: &[u8],
		#[case] code: Option<&[u8]>,
		#[case] message: &[u8],
	) {
		assert_eq!(split_error_code(body), (code, message));
	}
}
