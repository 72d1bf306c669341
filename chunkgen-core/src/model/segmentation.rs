use serde::{Deserialize, Serialize};

use super::chunk::Chunk;
use crate::error::{GenError, Result};

/// Cuts samples into ordered, position-flagged chunks.
///
/// Implementations only need `segment_sample`; the order of chunks within
/// one sample is meaningful and must be preserved.
pub trait Segmenter: Send + Sync {
	/// Stable identifier of the strategy.
	fn id(&self) -> &'static str;

	fn segment_sample(&self, sample: &str) -> Vec<Chunk>;

	fn segment_set(&self, samples: &[String]) -> Vec<Vec<Chunk>> {
		samples.iter().map(|sample| self.segment_sample(sample)).collect()
	}
}

fn normalize_case(fragment: &str, preserve_case: bool) -> String {
	if preserve_case { fragment.to_owned() } else { fragment.to_lowercase() }
}

/// Non-overlapping windows of `depth` characters.
///
/// The last window is shorter when the sample length is not a multiple of
/// `depth`. Windows are lower-cased unless `preserve_case` is set.
#[derive(Clone, Debug)]
pub struct FixedWidth {
	depth: usize,
	preserve_case: bool,
}

impl FixedWidth {
	pub const ID: &'static str = "fixed-width";

	/// # Errors
	/// Returns a configuration error if `depth < 1`.
	pub fn new(depth: usize, preserve_case: bool) -> Result<Self> {
		if depth < 1 {
			return Err(GenError::configuration("Segmentation depth must be >= 1"));
		}
		Ok(Self { depth, preserve_case })
	}
}

impl Segmenter for FixedWidth {
	fn id(&self) -> &'static str {
		Self::ID
	}

	fn segment_sample(&self, sample: &str) -> Vec<Chunk> {
		let chars: Vec<char> = sample.chars().collect();
		let fragments = chars
			.chunks(self.depth)
			.map(|window| normalize_case(&window.iter().collect::<String>(), self.preserve_case))
			.collect();
		Chunk::from_fragments(fragments)
	}
}

/// Splits samples on a delimiter, dropping empty pieces.
#[derive(Clone, Debug)]
pub struct Delimiter {
	delimiter: String,
	preserve_case: bool,
}

impl Delimiter {
	pub const ID: &'static str = "delimiter";

	/// # Errors
	/// Returns a configuration error if the delimiter is empty.
	pub fn new(delimiter: &str, preserve_case: bool) -> Result<Self> {
		if delimiter.is_empty() {
			return Err(GenError::configuration("Segmentation delimiter must not be empty"));
		}
		Ok(Self { delimiter: delimiter.to_owned(), preserve_case })
	}
}

impl Segmenter for Delimiter {
	fn id(&self) -> &'static str {
		Self::ID
	}

	fn segment_sample(&self, sample: &str) -> Vec<Chunk> {
		let fragments = sample
			.split(self.delimiter.as_str())
			.filter(|piece| !piece.is_empty())
			.map(|piece| normalize_case(piece, self.preserve_case))
			.collect();
		Chunk::from_fragments(fragments)
	}
}

/// Serializable selection of a segmentation strategy.
///
/// Tagged by the strategy id, e.g. `{"kind":"fixed-width","depth":2}`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SegmentationConfig {
	FixedWidth {
		#[serde(default = "default_depth")]
		depth: usize,
		#[serde(default)]
		preserve_case: bool,
	},
	Delimiter {
		delimiter: String,
		#[serde(default)]
		preserve_case: bool,
	},
}

fn default_depth() -> usize {
	1
}

impl Default for SegmentationConfig {
	fn default() -> Self {
		Self::FixedWidth { depth: default_depth(), preserve_case: false }
	}
}

impl SegmentationConfig {
	/// Validates the configuration and instantiates the strategy.
	pub fn build(&self) -> Result<Box<dyn Segmenter>> {
		let segmenter: Box<dyn Segmenter> = match self {
			Self::FixedWidth { depth, preserve_case } => Box::new(FixedWidth::new(*depth, *preserve_case)?),
			Self::Delimiter { delimiter, preserve_case } => Box::new(Delimiter::new(delimiter, *preserve_case)?),
		};
		Ok(segmenter)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn texts(chunks: &[Chunk]) -> Vec<&str> {
		chunks.iter().map(|c| c.text.as_str()).collect()
	}

	#[test]
	fn fixed_width_lowercases_by_default() {
		let seg = FixedWidth::new(1, false).unwrap();
		let chunks = seg.segment_sample("Bob");
		assert_eq!(texts(&chunks), ["b", "o", "b"]);
		assert!(chunks[0].is_start);
		assert!(chunks[1].is_middle);
		assert!(chunks[2].is_end);
	}

	#[test]
	fn fixed_width_last_window_may_be_short() {
		let seg = FixedWidth::new(2, true).unwrap();
		assert_eq!(texts(&seg.segment_sample("Bobby")), ["Bo", "bb", "y"]);
	}

	#[test]
	fn fixed_width_is_utf8_aware() {
		let seg = FixedWidth::new(2, true).unwrap();
		assert_eq!(texts(&seg.segment_sample("éàü")), ["éà", "ü"]);
	}

	#[test]
	fn fixed_width_rejects_zero_depth() {
		assert!(matches!(FixedWidth::new(0, false), Err(GenError::Configuration { .. })));
	}

	#[test]
	fn empty_sample_yields_no_chunks() {
		let seg = FixedWidth::new(3, false).unwrap();
		assert!(seg.segment_sample("").is_empty());
	}

	#[test]
	fn delimiter_drops_empty_splits() {
		let seg = Delimiter::new("-", false).unwrap();
		let chunks = seg.segment_sample("-Ka--ra-MEL-");
		assert_eq!(texts(&chunks), ["ka", "ra", "mel"]);
		assert!(chunks[0].is_start && chunks[2].is_end);
	}

	#[test]
	fn delimiter_single_fragment() {
		let seg = Delimiter::new("-", true).unwrap();
		let chunks = seg.segment_sample("Solo");
		assert_eq!(chunks.len(), 1);
		assert!(chunks[0].is_start && chunks[0].is_end && !chunks[0].is_middle);
		assert_eq!(chunks[0].text, "Solo");
	}

	#[test]
	fn delimiter_rejects_empty() {
		assert!(Delimiter::new("", false).is_err());
	}

	#[test]
	fn segment_set_keeps_sample_order() {
		let seg = FixedWidth::new(1, false).unwrap();
		let set = seg.segment_set(&["ab".to_owned(), "c".to_owned()]);
		assert_eq!(set.len(), 2);
		assert_eq!(texts(&set[0]), ["a", "b"]);
		assert_eq!(texts(&set[1]), ["c"]);
	}

	#[test]
	fn config_builds_strategy() {
		let config = SegmentationConfig::Delimiter { delimiter: "'".to_owned(), preserve_case: false };
		let seg = config.build().unwrap();
		assert_eq!(seg.id(), "delimiter");
		assert_eq!(SegmentationConfig::default().build().unwrap().id(), "fixed-width");
		assert!(SegmentationConfig::FixedWidth { depth: 0, preserve_case: false }.build().is_err());
	}
}
