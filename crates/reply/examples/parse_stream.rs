use bytes::BytesMut;
use reply::ReplyDecoder;
use reply::ReplyParseResult;

fn main() {
	println!("--- Reply Streaming Decode Example ---");

	// Simulate a TCP stream with fragmented data
	// We are receiving:
	// - A Status: "+OK\r\n"
	// - An Integer: ":1000\r\n"
	// - An Array: "*2\r\n$3\r\nfoo\r\n$-1\r\n"
	// - But split into random chunks.
	let data_chunks = vec![
		b"+O".as_slice(),
		b"K\r\n:1".as_slice(),
		b"00".as_slice(),
		b"0\r\n*2\r\n$3\r\nfo".as_slice(),
		b"o\r\n$-".as_slice(),
		b"1\r\n".as_slice(),
	];

	let mut decoder = ReplyDecoder::new();
	let mut buffer = BytesMut::new();

	for (i, chunk) in data_chunks.iter().enumerate() {
		println!(
			"\n[Stream] Received Chunk {}: {:?}",
			i,
			String::from_utf8_lossy(chunk)
		);

		buffer.extend_from_slice(chunk);

		while !buffer.is_empty() {
			match decoder.decode(&mut buffer) {
				ReplyParseResult::Complete => {
					let done = std::mem::take(&mut decoder);
					if let Some(reply) = done.into_reply() {
						println!("[Decoder] Complete {}: {:?}", reply.kind(), reply.fields());
					}
				}
				ReplyParseResult::Incomplete => {
					println!("[Decoder] Incomplete, waiting for more data...");
				}
				ReplyParseResult::Error(e) => {
					eprintln!("[Decoder] Error: {:?}", e);
					return;
				}
			}
		}
	}
}
