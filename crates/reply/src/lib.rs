//! # Reply - incremental RESP reply decoder
//!
//! Decodes server replies of the Redis Serialization Protocol from byte
//! chunks of any size, as they arrive from a socket. One [`ReplyDecoder`]
//! decodes one reply: status, error, integer, bulk string, or an array of
//! bulk strings.
//!
//! ## Example
//!
//! ```rust
//! use reply::Field;
//! use reply::ReplyDecoder;
//! use reply::ReplyKind;
//! use reply::ReplyParseResult;
//!
//! let mut decoder = ReplyDecoder::new();
//!
//! let (consumed, result) = decoder.feed(b"$6\r\nfoo");
//! assert_eq!(consumed, 7);
//! assert_eq!(result, ReplyParseResult::Incomplete);
//!
//! let (_, result) = decoder.feed(b"bar\r\n");
//! assert_eq!(result, ReplyParseResult::Complete);
//! assert_eq!(decoder.kind(), ReplyKind::Bulk);
//! assert_eq!(decoder.fields(), &[Field::from("foobar")]);
//! ```

mod config;
mod error;
mod parser;
mod types;
mod utils;

pub use config::DEFAULT_MAX_BULK_LEN;
pub use config::DEFAULT_MAX_ELEMENTS;
pub use config::DEFAULT_MAX_LINE_LEN;
pub use config::DecoderConfig;
pub use error::ParseError;
pub use parser::ReplyDecoder;
pub use parser::ReplyParseResult;
pub use parser::parse;
pub use types::Field;
pub use types::MISSING_KEY;
pub use types::Reply;
pub use types::ReplyKind;
