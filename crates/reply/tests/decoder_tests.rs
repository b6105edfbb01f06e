//! Integration tests for the reply decoder

use reply::Field;
use reply::ParseError;
use reply::ReplyDecoder;
use reply::ReplyKind;
use reply::ReplyParseResult;
use rstest::rstest;

#[rstest]
#[case(b"+OK\r\n", ReplyKind::Status, "OK")]
#[case(b"+PONG\r\n", ReplyKind::Status, "PONG")]
#[case(b"-ERR unknown command 'foobar'\r\n", ReplyKind::Error, "unknown command 'foobar'")]
#[case(b":1000\r\n", ReplyKind::Integer, "1000")]
#[case(b":-42\r\n", ReplyKind::Integer, "-42")]
fn test_single_line_replies(
	#[case] input: &[u8],
	#[case] kind: ReplyKind,
	#[case] field: &str,
) {
	let mut decoder = ReplyDecoder::new();
	let (consumed, result) = decoder.feed(input);

	assert_eq!(result, ReplyParseResult::Complete);
	assert_eq!(consumed, input.len());
	assert!(decoder.is_done());
	assert_eq!(decoder.kind(), kind);
	assert_eq!(decoder.fields(), &[Field::from(field)]);
}

#[test]
fn test_redis_get_nil_response() {
	let mut decoder = ReplyDecoder::new();
	assert_eq!(decoder.feed(b"$-1\r\n").1, ReplyParseResult::Complete);
	assert!(decoder.is_bulk());
	assert_eq!(decoder.fields(), &[Field::Null]);
	assert_eq!(decoder.fields()[0].to_string(), reply::MISSING_KEY);
	assert!(decoder.reply().unwrap().is_null());
}

#[test]
fn test_null_array() {
	let mut decoder = ReplyDecoder::new();
	assert_eq!(decoder.feed(b"*-1\r\n").1, ReplyParseResult::Complete);
	assert!(decoder.is_multi_bulk());
	assert!(decoder.fields().is_empty());

	let reply = decoder.into_reply().unwrap();
	assert!(reply.is_null_array());
	assert!(reply.is_null());
}

#[test]
fn test_empty_array() {
	let mut decoder = ReplyDecoder::new();
	assert_eq!(decoder.feed(b"*0\r\n").1, ReplyParseResult::Complete);
	assert!(decoder.is_multi_bulk());
	assert!(decoder.fields().is_empty());

	let reply = decoder.into_reply().unwrap();
	assert!(!reply.is_null_array());
	assert!(!reply.is_null());
}

#[test]
fn test_array_with_null_element() {
	let mut decoder = ReplyDecoder::new();
	let input = b"*2\r\n$3\r\nfoo\r\n$-1\r\n";
	assert_eq!(
		decoder.feed(input),
		(input.len(), ReplyParseResult::Complete)
	);
	assert_eq!(decoder.fields(), &[Field::from("foo"), Field::Null]);
}

#[test]
fn test_redis_lrange_response() {
	let (reply, _) = reply::parse(b"*3\r\n$1\r\na\r\n$0\r\n\r\n$5\r\nhello\r\n").unwrap();
	let fields: Vec<String> = reply.fields().iter().map(Field::to_string_lossy).collect();
	assert_eq!(fields, vec!["a", "", "hello"]);
}

#[test]
fn test_kind_stays_none_until_first_line() {
	let mut decoder = ReplyDecoder::new();
	decoder.feed(b"*2");
	assert_eq!(decoder.kind(), ReplyKind::None);
	assert!(!decoder.is_done());
	decoder.feed(b"\r\n");
	assert_eq!(decoder.kind(), ReplyKind::MultiBulk);
	assert!(!decoder.is_done());
}

#[test]
fn test_unknown_marker_is_never_a_silent_completion() {
	let mut decoder = ReplyDecoder::new();
	let (_, result) = decoder.feed(b"#t\r\n");
	assert_eq!(
		result,
		ReplyParseResult::Error(ParseError::InvalidTypeMarker('#'))
	);
	assert!(!decoder.is_done());
	assert!(decoder.reply().is_none());
}

#[test]
fn test_oversized_bulk_is_rejected_before_payload() {
	let mut decoder = ReplyDecoder::new();
	let (consumed, result) = decoder.feed(b"$536870913\r\nxyz");
	assert_eq!(
		result,
		ReplyParseResult::Error(ParseError::InvalidBulkStringLength(536870913))
	);
	// the payload bytes were never taken
	assert_eq!(consumed, 12);
}

#[test]
fn test_max_bulk_len_is_accepted() {
	let mut decoder = ReplyDecoder::new();
	let (_, result) = decoder.feed(b"$536870912\r\n");
	assert_eq!(result, ReplyParseResult::Incomplete);
	assert!(decoder.is_bulk());
}

#[test]
fn test_oversized_array_is_rejected() {
	let mut decoder = ReplyDecoder::new();
	let (_, result) = decoder.feed(b"*1048577\r\n");
	assert_eq!(
		result,
		ReplyParseResult::Error(ParseError::InvalidArrayLength(1048577))
	);
}
