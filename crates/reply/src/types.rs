//! Reply kinds and decoded reply values.

use std::fmt;

use bytes::Bytes;

/// Text rendered in place of a null bulk string.
pub const MISSING_KEY: &str = "**missing-key**";

/// Classification of a reply by its leading type marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReplyKind {
	/// Not classified yet
	#[default]
	None,
	/// Status: `+OK\r\n`
	Status,
	/// Error: `-ERR message\r\n`
	Error,
	/// Integer: `:1000\r\n`
	Integer,
	/// Bulk string: `$6\r\nfoobar\r\n`
	Bulk,
	/// Array of bulk strings: `*2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n`
	MultiBulk,
}

impl fmt::Display for ReplyKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			ReplyKind::None => "none",
			ReplyKind::Status => "status",
			ReplyKind::Error => "error",
			ReplyKind::Integer => "integer",
			ReplyKind::Bulk => "bulk",
			ReplyKind::MultiBulk => "multi-bulk",
		};
		f.write_str(name)
	}
}

/// One decoded payload element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
	/// Payload bytes
	Data(Bytes),
	/// Null bulk string: `$-1\r\n`
	Null,
}

impl Field {
	/// Check if the field is the null sentinel
	pub fn is_null(&self) -> bool {
		matches!(self, Field::Null)
	}

	/// Try to convert to bytes
	pub fn as_bytes(&self) -> Option<&Bytes> {
		match self {
			Field::Data(b) => Some(b),
			Field::Null => None,
		}
	}

	/// Try to convert to a string slice
	pub fn as_str(&self) -> Option<&str> {
		self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
	}

	/// Convert to String with lossy UTF-8 conversion
	pub fn to_string_lossy(&self) -> String {
		match self {
			Field::Data(b) => String::from_utf8_lossy(b).into_owned(),
			Field::Null => MISSING_KEY.to_string(),
		}
	}
}

impl fmt::Display for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_string_lossy())
	}
}

impl From<&str> for Field {
	fn from(s: &str) -> Self {
		Field::Data(Bytes::copy_from_slice(s.as_bytes()))
	}
}

impl From<&[u8]> for Field {
	fn from(b: &[u8]) -> Self {
		Field::Data(Bytes::copy_from_slice(b))
	}
}

impl From<Bytes> for Field {
	fn from(b: Bytes) -> Self {
		Field::Data(b)
	}
}

impl<T: Into<Field>> From<Option<T>> for Field {
	fn from(o: Option<T>) -> Self {
		match o {
			Some(v) => v.into(),
			None => Field::Null,
		}
	}
}

/// A fully decoded reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
	kind: ReplyKind,
	fields: Vec<Field>,
	null: bool,
	error_code: Option<Bytes>,
}

impl Reply {
	pub(crate) fn new(kind: ReplyKind, fields: Vec<Field>) -> Self {
		Self {
			kind,
			fields,
			null: false,
			error_code: None,
		}
	}

	pub(crate) fn error(code: Option<Bytes>, message: Bytes) -> Self {
		Self {
			kind: ReplyKind::Error,
			fields: vec![Field::Data(message)],
			null: false,
			error_code: code,
		}
	}

	pub(crate) fn null_array() -> Self {
		Self {
			kind: ReplyKind::MultiBulk,
			fields: Vec::new(),
			null: true,
			error_code: None,
		}
	}

	pub fn kind(&self) -> ReplyKind {
		self.kind
	}

	pub fn fields(&self) -> &[Field] {
		&self.fields
	}

	pub fn into_fields(self) -> Vec<Field> {
		self.fields
	}

	/// True for `*-1`, distinguishing a null array from an empty one.
	pub fn is_null_array(&self) -> bool {
		self.null
	}

	/// True for `$-1` and `*-1`.
	pub fn is_null(&self) -> bool {
		match self.kind {
			ReplyKind::Bulk => self.fields.first().is_some_and(Field::is_null),
			ReplyKind::MultiBulk => self.null,
			_ => false,
		}
	}

	/// Error code token of an error reply, e.g. `ERR` or `WRONGTYPE`.
	pub fn error_code(&self) -> Option<&str> {
		self.error_code
			.as_ref()
			.and_then(|c| std::str::from_utf8(c).ok())
	}

	/// Value of an integer reply
	pub fn as_integer(&self) -> Option<i64> {
		if self.kind != ReplyKind::Integer {
			return None;
		}
		self.fields.first()?.as_str()?.parse().ok()
	}

	/// First field as a string slice, for single-field replies
	pub fn as_str(&self) -> Option<&str> {
		self.fields.first()?.as_str()
	}
}
