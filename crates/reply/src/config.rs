//! Decoder limits.

/// Largest bulk string accepted by default, matching Redis `proto-max-bulk-len`.
pub const DEFAULT_MAX_BULK_LEN: usize = 512 * 1024 * 1024;

/// Largest multi-bulk element count accepted by default.
pub const DEFAULT_MAX_ELEMENTS: usize = 1024 * 1024;

/// Longest header or status line accepted by default.
pub const DEFAULT_MAX_LINE_LEN: usize = 64 * 1024;

/// Bounds applied to declared sizes before anything is buffered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
	pub max_bulk_len: usize,
	pub max_elements: usize,
	pub max_line_len: usize,
}

impl Default for DecoderConfig {
	fn default() -> Self {
		Self {
			max_bulk_len: DEFAULT_MAX_BULK_LEN,
			max_elements: DEFAULT_MAX_ELEMENTS,
			max_line_len: DEFAULT_MAX_LINE_LEN,
		}
	}
}

impl DecoderConfig {
	pub fn max_bulk_len(mut self, len: usize) -> Self {
		self.max_bulk_len = len;
		self
	}

	pub fn max_elements(mut self, count: usize) -> Self {
		self.max_elements = count;
		self
	}

	pub fn max_line_len(mut self, len: usize) -> Self {
		self.max_line_len = len;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builder_overrides() {
		let config = DecoderConfig::default().max_bulk_len(16).max_elements(2);
		assert_eq!(config.max_bulk_len, 16);
		assert_eq!(config.max_elements, 2);
		assert_eq!(config.max_line_len, DEFAULT_MAX_LINE_LEN);
	}
}
