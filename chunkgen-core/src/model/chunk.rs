use serde::{Deserialize, Serialize};

/// A contiguous fragment of one sample.
///
/// The positional flags are relative to the chunk's own sample. The sole
/// chunk of a single-fragment sample is both start and end, never middle.
/// Two chunks with the same `text` are the same node once aggregated.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
	pub text: String,
	pub is_start: bool,
	pub is_middle: bool,
	pub is_end: bool,
}

impl Chunk {
	/// Turns ordered fragments of one sample into flagged chunks.
	pub(crate) fn from_fragments(fragments: Vec<String>) -> Vec<Chunk> {
		let last = fragments.len().saturating_sub(1);
		fragments
			.into_iter()
			.enumerate()
			.map(|(i, text)| {
				let is_start = i == 0;
				let is_end = i == last;
				Chunk { text, is_start, is_middle: !is_start && !is_end, is_end }
			})
			.collect()
	}
}
