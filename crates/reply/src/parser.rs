//! Incremental reply decoder.
//!
//! A [`ReplyDecoder`] is fed byte chunks as they arrive from the transport
//! and reports how many bytes it consumed on each call. Partial lines and
//! partial bulk payloads are carried over in an owned scratch buffer, so a
//! byte is never scanned twice and never handed back to the caller.

use bytes::Buf;
use bytes::Bytes;
use bytes::BytesMut;
use log::debug;
use log::trace;
use log::warn;

use crate::config::DecoderConfig;
use crate::error::ParseError;
use crate::types::Field;
use crate::types::Reply;
use crate::types::ReplyKind;
use crate::utils::*;

/// Upper bound on capacity reserved from a declared element count.
const MAX_PREALLOCATED_FIELDS: usize = 1024;

/// Result of a feed attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyParseResult {
	/// The reply is fully decoded and available through the accessors.
	Complete,
	/// More bytes are needed.
	Incomplete,
	/// The input is malformed. The decoder will not make further progress.
	Error(ParseError),
}

/// A stateful decoder for exactly one reply.
#[derive(Debug)]
pub struct ReplyDecoder {
	state: State,
	scratch: BytesMut,
	config: DecoderConfig,
}

#[derive(Debug)]
enum State {
	Detecting,
	Bulk {
		// payload plus CRLF
		pending: usize,
	},
	MultiBulk {
		expected: usize,
		fields: Vec<Field>,
		element: Element,
	},
	Done(Reply),
	Malformed {
		kind: ReplyKind,
		error: ParseError,
	},
}

#[derive(Debug, Clone, Copy)]
enum Element {
	Header,
	Payload { pending: usize },
}

impl Default for ReplyDecoder {
	fn default() -> Self {
		Self::new()
	}
}

impl ReplyDecoder {
	pub fn new() -> Self {
		Self::with_config(DecoderConfig::default())
	}

	pub fn with_config(config: DecoderConfig) -> Self {
		Self {
			state: State::Detecting,
			scratch: BytesMut::new(),
			config,
		}
	}

	/// Feed a chunk of bytes.
	///
	/// Returns the number of bytes consumed from `buf` together with the
	/// outcome. Bytes past the end of the reply are never consumed, so the
	/// caller can hand the remainder to the decoder of the next reply.
	pub fn feed(&mut self, buf: &[u8]) -> (usize, ReplyParseResult) {
		let mut pos = 0;
		let result = self.feed_at(buf, &mut pos);
		(pos, result)
	}

	/// Feed `buf` starting at `*pos`, advancing `*pos` over consumed bytes.
	pub fn feed_at(&mut self, buf: &[u8], pos: &mut usize) -> ReplyParseResult {
		if *pos >= buf.len() {
			return self.outcome();
		}

		match self.advance(buf, pos) {
			Ok(()) => self.outcome(),
			Err(error) => {
				let kind = self.kind();
				warn!("Malformed {} reply: {}", kind, error);
				self.scratch.clear();
				self.state = State::Malformed {
					kind,
					error: error.clone(),
				};
				ReplyParseResult::Error(error)
			}
		}
	}

	/// Feed the contents of a `BytesMut`, advancing it past consumed bytes.
	pub fn decode(&mut self, buf: &mut BytesMut) -> ReplyParseResult {
		let (consumed, result) = self.feed(&buf[..]);
		buf.advance(consumed);
		result
	}

	fn outcome(&self) -> ReplyParseResult {
		match &self.state {
			State::Done(_) => ReplyParseResult::Complete,
			State::Malformed { error, .. } => ReplyParseResult::Error(error.clone()),
			_ => ReplyParseResult::Incomplete,
		}
	}

	fn advance(&mut self, buf: &[u8], pos: &mut usize) -> Result<(), ParseError> {
		loop {
			match &mut self.state {
				State::Detecting => {
					let Some(line) =
						read_line(&mut self.scratch, buf, pos, self.config.max_line_len)?
					else {
						return Ok(());
					};
					self.state = classify(line, &self.config)?;
					trace!("Classified reply as {}", self.kind());
				}
				State::Bulk { pending } => {
					let pending = *pending;
					let Some(payload) = read_exact(&mut self.scratch, buf, pos, pending) else {
						trace!("Bulk payload has {}/{} bytes", self.scratch.len(), pending);
						return Ok(());
					};
					let field = strip_terminator(payload)?;
					self.finish(Reply::new(ReplyKind::Bulk, vec![field]));
				}
				State::MultiBulk {
					expected,
					fields,
					element,
				} => {
					while fields.len() < *expected {
						match *element {
							Element::Header => {
								let Some(line) = read_line(
									&mut self.scratch,
									buf,
									pos,
									self.config.max_line_len,
								)?
								else {
									return Ok(());
								};
								match element_len(&line, &self.config)? {
									None => fields.push(Field::Null),
									Some(len) => *element = Element::Payload { pending: len + 2 },
								}
							}
							Element::Payload { pending } => {
								let Some(payload) =
									read_exact(&mut self.scratch, buf, pos, pending)
								else {
									return Ok(());
								};
								fields.push(strip_terminator(payload)?);
								*element = Element::Header;
							}
						}
					}
					let fields = std::mem::take(fields);
					self.finish(Reply::new(ReplyKind::MultiBulk, fields));
				}
				State::Done(_) | State::Malformed { .. } => return Ok(()),
			}
		}
	}

	fn finish(&mut self, reply: Reply) {
		debug!(
			"Decoded {} reply with {} field(s)",
			reply.kind(),
			reply.fields().len()
		);
		self.state = State::Done(reply);
	}

	pub fn kind(&self) -> ReplyKind {
		match &self.state {
			State::Detecting => ReplyKind::None,
			State::Bulk { .. } => ReplyKind::Bulk,
			State::MultiBulk { .. } => ReplyKind::MultiBulk,
			State::Done(reply) => reply.kind(),
			State::Malformed { kind, .. } => *kind,
		}
	}

	pub fn is_done(&self) -> bool {
		matches!(self.state, State::Done(_))
	}

	pub fn is_malformed(&self) -> bool {
		matches!(self.state, State::Malformed { .. })
	}

	pub fn is_error(&self) -> bool {
		self.kind() == ReplyKind::Error
	}

	pub fn is_status(&self) -> bool {
		self.kind() == ReplyKind::Status
	}

	pub fn is_integer(&self) -> bool {
		self.kind() == ReplyKind::Integer
	}

	pub fn is_bulk(&self) -> bool {
		self.kind() == ReplyKind::Bulk
	}

	pub fn is_multi_bulk(&self) -> bool {
		self.kind() == ReplyKind::MultiBulk
	}

	/// Decoded fields. While a multi-bulk reply is in progress this holds the
	/// elements completed so far.
	pub fn fields(&self) -> &[Field] {
		match &self.state {
			State::Done(reply) => reply.fields(),
			State::MultiBulk { fields, .. } => fields,
			_ => &[],
		}
	}

	/// The decoded reply, once complete.
	pub fn reply(&self) -> Option<&Reply> {
		match &self.state {
			State::Done(reply) => Some(reply),
			_ => None,
		}
	}

	pub fn into_reply(self) -> Option<Reply> {
		match self.state {
			State::Done(reply) => Some(reply),
			_ => None,
		}
	}

	/// The error that made this decoder give up, if any.
	pub fn error(&self) -> Option<&ParseError> {
		match &self.state {
			State::Malformed { error, .. } => Some(error),
			_ => None,
		}
	}
}

/// Scan the unread part of `buf` for a line feed.
///
/// On success the completed line is returned without its terminator and
/// `scratch` is emptied. Otherwise every available byte is moved into
/// `scratch` and `None` is returned.
fn read_line(
	scratch: &mut BytesMut,
	buf: &[u8],
	pos: &mut usize,
	max_line_len: usize,
) -> Result<Option<Bytes>, ParseError> {
	let available = &buf[*pos..];
	match find_lf(available) {
		Some(lf) => {
			if scratch.len() + lf > max_line_len.saturating_add(1) {
				return Err(ParseError::LineTooLong(max_line_len));
			}
			scratch.extend_from_slice(&available[..=lf]);
			*pos += lf + 1;
			let line = scratch.split().freeze();
			let end = trim_line_ending(&line).len();
			Ok(Some(line.slice(..end)))
		}
		None => {
			if scratch.len() + available.len() > max_line_len.saturating_add(1) {
				return Err(ParseError::LineTooLong(max_line_len));
			}
			scratch.extend_from_slice(available);
			*pos = buf.len();
			Ok(None)
		}
	}
}

/// Accumulate until `scratch` holds exactly `len` bytes.
fn read_exact(scratch: &mut BytesMut, buf: &[u8], pos: &mut usize, len: usize) -> Option<Bytes> {
	let available = &buf[*pos..];
	let need = len - scratch.len();
	let take = need.min(available.len());
	scratch.extend_from_slice(&available[..take]);
	*pos += take;
	(take == need).then(|| scratch.split().freeze())
}

fn strip_terminator(payload: Bytes) -> Result<Field, ParseError> {
	if !payload.ends_with(CRLF) {
		return Err(ParseError::MissingTerminator);
	}
	Ok(Field::Data(payload.slice(..payload.len() - CRLF.len())))
}

fn classify(line: Bytes, config: &DecoderConfig) -> Result<State, ParseError> {
	let Some(&marker) = line.first() else {
		return Err(ParseError::InvalidFormat("empty reply line".to_string()));
	};
	let body = line.slice(1..);

	let state = match marker {
		STATUS => State::Done(Reply::new(ReplyKind::Status, vec![Field::Data(body)])),
		ERROR => {
			let (code, message) = split_error_code(&body);
			let code = code.map(|c| body.slice_ref(c));
			State::Done(Reply::error(code, body.slice_ref(message)))
		}
		INTEGER => {
			parse_integer(&body)?;
			State::Done(Reply::new(ReplyKind::Integer, vec![Field::Data(body)]))
		}
		BULK_STRING => match bulk_len(&body, config)? {
			None => State::Done(Reply::new(ReplyKind::Bulk, vec![Field::Null])),
			Some(len) => State::Bulk { pending: len + 2 },
		},
		MULTI_BULK => match array_len(&body, config)? {
			None => State::Done(Reply::null_array()),
			Some(0) => State::Done(Reply::new(ReplyKind::MultiBulk, Vec::new())),
			Some(count) => State::MultiBulk {
				expected: count,
				fields: Vec::with_capacity(count.min(MAX_PREALLOCATED_FIELDS)),
				element: Element::Header,
			},
		},
		other => return Err(ParseError::InvalidTypeMarker(other as char)),
	};
	Ok(state)
}

/// Parse a bulk length; `None` is the null bulk string.
fn bulk_len(text: &[u8], config: &DecoderConfig) -> Result<Option<usize>, ParseError> {
	let length = parse_integer(text)?;
	if length == -1 {
		return Ok(None);
	}
	// the payload is read together with its CRLF
	match usize::try_from(length) {
		Ok(len) if len <= config.max_bulk_len && len.checked_add(CRLF.len()).is_some() => {
			Ok(Some(len))
		}
		_ => Err(ParseError::InvalidBulkStringLength(length)),
	}
}

/// Parse a multi-bulk count; `None` is the null array.
fn array_len(text: &[u8], config: &DecoderConfig) -> Result<Option<usize>, ParseError> {
	let length = parse_integer(text)?;
	if length == -1 {
		return Ok(None);
	}
	match usize::try_from(length) {
		Ok(len) if len <= config.max_elements => Ok(Some(len)),
		_ => Err(ParseError::InvalidArrayLength(length)),
	}
}

fn element_len(line: &[u8], config: &DecoderConfig) -> Result<Option<usize>, ParseError> {
	match line.first() {
		Some(&BULK_STRING) => bulk_len(&line[1..], config),
		Some(&MULTI_BULK) => Err(ParseError::InvalidFormat(
			"nested multi-bulk replies are not supported".to_string(),
		)),
		Some(&other) => Err(ParseError::InvalidTypeMarker(other as char)),
		None => Err(ParseError::InvalidFormat("empty element header".to_string())),
	}
}

/// Convenience function for one-off decoding.
///
/// Returns the reply and the number of bytes it occupied. Input that ends
/// before the reply does is reported as [`ParseError::UnexpectedEOF`]. If
/// streaming is needed, use [`ReplyDecoder`] directly.
pub fn parse(buf: &[u8]) -> Result<(Reply, usize), ParseError> {
	let mut decoder = ReplyDecoder::new();
	match decoder.feed(buf) {
		(consumed, ReplyParseResult::Complete) => decoder
			.into_reply()
			.map(|reply| (reply, consumed))
			.ok_or(ParseError::UnexpectedEOF),
		(_, ReplyParseResult::Incomplete) => Err(ParseError::UnexpectedEOF),
		(_, ReplyParseResult::Error(e)) => Err(e),
	}
}
