use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, trace, warn};
use rand::Rng;

use super::concatenator::Concatenator;
use super::parameters::GenerationParameters;
use super::sampling::SampleProvider;
use super::segmentation::{SegmentationConfig, Segmenter};
use super::spelling::{Identity, Spelling};
use super::transition_model::TransitionModel;
use crate::error::{GenError, Result};
use crate::rng::SeededRng;

/// Attempts allowed per requested word before giving up.
pub const MAX_ATTEMPTS: usize = 1000;

/// High-level generator producing batches of distinct words.
///
/// # Responsibilities
/// - Pull samples from a `SampleProvider` and segment them
/// - Build a fresh `TransitionModel` on every call
/// - Drive the `Concatenator` with one seeded RNG per call
/// - Reject duplicates within a batch, with a bounded retry budget
/// - Apply the configured `Spelling` to every accepted word
///
/// All parameters are validated once, when the generator is built.
pub struct Generator {
	provider: Box<dyn SampleProvider>,
	segmenter: Box<dyn Segmenter>,
	spelling: Arc<dyn Spelling>,
	params: GenerationParameters,
}

impl Generator {
	pub fn builder() -> GeneratorBuilder {
		GeneratorBuilder::default()
	}

	pub fn spelling_id(&self) -> &str {
		self.spelling.id()
	}

	/// Builds the transition model of the current sample set.
	///
	/// # Errors
	/// Returns a configuration error if the provider is not fully
	/// configured, or the provider's own error if reading samples fails.
	pub fn model(&self) -> Result<TransitionModel> {
		if !self.provider.is_fully_configured() {
			return Err(GenError::configuration("Sample provider is not fully configured"));
		}
		let samples = self.provider.samples()?;
		let model = TransitionModel::build(&self.segmenter.segment_set(&samples));
		debug!(
			"model built from {} samples: {} chunks, {} starts, {} endings, {} branches",
			samples.len(),
			model.chunk_count(),
			model.starts().len(),
			model.endings().len(),
			model.branch_count()
		);
		Ok(model)
	}

	/// Generates `count` distinct words, in generation order.
	///
	/// # Parameters
	/// - `count`: Number of words wanted. Memory grows with accepted words
	///   only, so an unreachable `count` ends in `RetryExhausted`.
	///
	/// # Behavior
	/// - Uses the configured seed, or a fresh random one when unset.
	/// - Each slot gets up to `MAX_ATTEMPTS` attempts; spelling is applied
	///   before the duplicate check.
	///
	/// # Errors
	/// - Configuration or I/O errors from `model`
	/// - `RetryExhausted` when one slot gets no distinct word within
	///   `MAX_ATTEMPTS` attempts; the last attempt's failure is attached
	pub fn generate(&self, count: usize) -> Result<Vec<String>> {
		let model = self.model()?;

		let seed = match &self.params.seed {
			Some(seed) => seed.clone(),
			None => rand::rng().random::<u32>().to_string(),
		};
		debug!("generating {count} words with seed '{seed}'");

		let mut rng = SeededRng::new(&seed);
		let concatenator = Concatenator::new(&model, &self.params);

		// `count` is caller controlled, grow as words are accepted
		let mut words = Vec::new();
		let mut accepted = HashSet::new();
		for slot in 0..count {
			let word = self.fill_slot(slot, &concatenator, &mut rng, &accepted)?;
			accepted.insert(word.clone());
			words.push(word);
		}
		Ok(words)
	}

	fn fill_slot(
		&self,
		slot: usize,
		concatenator: &Concatenator<'_>,
		rng: &mut SeededRng,
		accepted: &HashSet<String>,
	) -> Result<String> {
		let mut last_error = None;

		for attempt in 0..MAX_ATTEMPTS {
			match concatenator.generate(rng) {
				Ok(raw) => {
					let word = self.spelling.apply(&raw);
					if !accepted.contains(&word) {
						return Ok(word);
					}
					last_error = Some(GenError::duplicate(word));
				}
				Err(e) if e.is_attempt_failure() => {
					trace!("slot {slot} attempt {attempt} failed: {e}");
					last_error = Some(e);
				}
				Err(e) => return Err(e),
			}
		}

		warn!("slot {slot}: no distinct word after {MAX_ATTEMPTS} attempts");
		let source = last_error.unwrap_or_else(|| GenError::lookup("no attempt was made"));
		Err(GenError::RetryExhausted { slot, attempts: MAX_ATTEMPTS, source: Box::new(source) })
	}
}

/// Collects the capabilities of a `Generator` before validating them.
#[derive(Default)]
pub struct GeneratorBuilder {
	provider: Option<Box<dyn SampleProvider>>,
	segmenter: Option<Box<dyn Segmenter>>,
	segmentation: Option<SegmentationConfig>,
	spelling: Option<Arc<dyn Spelling>>,
	params: GenerationParameters,
}

impl GeneratorBuilder {
	pub fn samples<P: SampleProvider + 'static>(mut self, provider: P) -> Self {
		self.provider = Some(Box::new(provider));
		self
	}

	pub fn segmenter<S: Segmenter + 'static>(mut self, segmenter: S) -> Self {
		self.segmenter = Some(Box::new(segmenter));
		self.segmentation = None;
		self
	}

	/// Selects the segmentation by configuration; validated in `build`.
	pub fn segmentation(mut self, config: SegmentationConfig) -> Self {
		self.segmentation = Some(config);
		self.segmenter = None;
		self
	}

	/// Optional: defaults to `Identity`.
	pub fn spelling(mut self, spelling: Arc<dyn Spelling>) -> Self {
		self.spelling = Some(spelling);
		self
	}

	pub fn parameters(mut self, params: GenerationParameters) -> Self {
		self.params = params;
		self
	}

	/// Validates everything and builds the generator.
	///
	/// # Errors
	/// Returns a configuration error if the sample provider or the
	/// segmentation is missing, if the segmentation is invalid, or if the
	/// parameters break their invariants.
	pub fn build(self) -> Result<Generator> {
		self.params.validate()?;

		let provider = self.provider.ok_or_else(|| GenError::configuration("A sample provider is required"))?;
		let segmenter = match (self.segmenter, self.segmentation) {
			(Some(segmenter), _) => segmenter,
			(None, Some(config)) => config.build()?,
			(None, None) => return Err(GenError::configuration("A segmentation strategy is required")),
		};
		let spelling = self.spelling.unwrap_or_else(|| Arc::new(Identity));

		Ok(Generator { provider, segmenter, spelling, params: self.params })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::parameters::EndingPickMode;
	use crate::model::sampling::StaticSamples;
	use crate::model::segmentation::FixedWidth;
	use crate::model::spelling::Capitalize;

	fn params(min: u32, max: u32, mode: EndingPickMode) -> GenerationParameters {
		GenerationParameters {
			target_length_min: min,
			target_length_max: max,
			seed: Some("Test".to_owned()),
			ending_pick_mode: mode,
			..Default::default()
		}
	}

	fn generator(samples: &[&str], params: GenerationParameters) -> Generator {
		Generator::builder()
			.samples(StaticSamples::new(samples.iter().copied()))
			.segmenter(FixedWidth::new(1, false).unwrap())
			.parameters(params)
			.build()
			.unwrap()
	}

	#[test]
	fn inverted_lengths_fail_at_build() {
		let result = Generator::builder()
			.samples(StaticSamples::new(["Bob"]))
			.segmentation(SegmentationConfig::default())
			.parameters(params(5, 2, EndingPickMode::Random))
			.build();
		assert!(matches!(result, Err(GenError::Configuration { .. })));
	}

	#[test]
	fn missing_capabilities_fail_at_build() {
		let no_samples = Generator::builder().segmentation(SegmentationConfig::default()).build();
		assert!(matches!(no_samples, Err(GenError::Configuration { .. })));

		let no_segmentation = Generator::builder().samples(StaticSamples::new(["Bob"])).build();
		assert!(matches!(no_segmentation, Err(GenError::Configuration { .. })));

		let bad_segmentation = Generator::builder()
			.samples(StaticSamples::new(["Bob"]))
			.segmentation(SegmentationConfig::Delimiter { delimiter: String::new(), preserve_case: false })
			.build();
		assert!(matches!(bad_segmentation, Err(GenError::Configuration { .. })));
	}

	#[test]
	fn unconfigured_provider_fails_generation() {
		let generator = generator(&[], params(3, 3, EndingPickMode::None));
		assert!(matches!(generator.generate(1), Err(GenError::Configuration { .. })));
	}

	#[test]
	fn bob_scenario() {
		let generator = generator(&["Bob", "Bobby"], params(3, 3, EndingPickMode::None));
		let words = generator.generate(1).unwrap();
		assert_eq!(words.len(), 1);
		let word = &words[0];
		assert_eq!(word.chars().count(), 3);
		assert!(word.starts_with('b'));
		assert!(word.chars().all(|c| "boy".contains(c)));
		assert_eq!(*word, word.to_lowercase());
	}

	#[test]
	fn single_sample_single_word() {
		for mode in [EndingPickMode::None, EndingPickMode::Random, EndingPickMode::FollowBranch] {
			let generator = generator(&["a"], params(1, 1, mode));
			assert_eq!(generator.generate(1).unwrap(), ["a"]);
		}
	}

	#[test]
	fn exhausted_on_third_slot() {
		// Only "ab" and "ba" can ever be produced
		let generator = generator(&["ab", "ba"], params(2, 2, EndingPickMode::None));
		match generator.generate(5) {
			Err(GenError::RetryExhausted { slot, attempts, source }) => {
				assert_eq!(slot, 2);
				assert_eq!(attempts, MAX_ATTEMPTS);
				assert!(matches!(*source, GenError::Duplicate { .. }));
			}
			other => panic!("expected exhaustion, got {other:?}"),
		}
	}

	#[test]
	fn huge_count_exhausts_instead_of_allocating() {
		let generator = generator(&["ab", "ba"], params(2, 2, EndingPickMode::None));
		match generator.generate(usize::MAX / 8) {
			Err(GenError::RetryExhausted { slot, .. }) => assert_eq!(slot, 2),
			other => panic!("expected exhaustion, got {other:?}"),
		}
	}

	fn case_sensitive(spelling: Arc<dyn Spelling>) -> Generator {
		Generator::builder()
			.samples(StaticSamples::new(["Ab", "ab"]))
			.segmenter(FixedWidth::new(2, true).unwrap())
			.spelling(spelling)
			.parameters(params(2, 2, EndingPickMode::None))
			.build()
			.unwrap()
	}

	#[test]
	fn uniqueness_is_case_sensitive() {
		let mut words = case_sensitive(Arc::new(Identity)).generate(2).unwrap();
		words.sort();
		assert_eq!(words, ["Ab", "ab"]);
	}

	#[test]
	fn capitalize_folds_case_variants() {
		let generator = case_sensitive(Arc::new(Capitalize));
		assert_eq!(generator.generate(1).unwrap(), ["Ab"]);
		match generator.generate(2) {
			Err(GenError::RetryExhausted { slot, source, .. }) => {
				assert_eq!(slot, 1);
				assert!(matches!(*source, GenError::Duplicate { ref word } if word == "Ab"));
			}
			other => panic!("expected exhaustion, got {other:?}"),
		}
	}

	#[test]
	fn batch_is_unique_and_deterministic() {
		let samples = ["Karamel", "Caramel", "Amelie", "Melina", "Lina", "Camille", "Emile"];
		let generator = generator(&samples, params(3, 8, EndingPickMode::Random));
		let first = generator.generate(20).unwrap();
		let second = generator.generate(20).unwrap();
		assert_eq!(first, second);
		let distinct: HashSet<&String> = first.iter().collect();
		assert_eq!(distinct.len(), first.len());
	}

	#[test]
	fn spelling_applied_to_accepted_words() {
		let generator = Generator::builder()
			.samples(StaticSamples::new(["Karamel", "Caramel", "Amelie"]))
			.segmentation(SegmentationConfig::default())
			.spelling(Arc::new(Capitalize))
			.parameters(params(3, 6, EndingPickMode::Random))
			.build()
			.unwrap();
		assert_eq!(generator.spelling_id(), "capitalize");
		for word in generator.generate(5).unwrap() {
			let first = word.chars().next().unwrap();
			assert!(first.is_uppercase(), "{word}");
		}
	}

	#[test]
	fn random_seed_when_unset() {
		let params = GenerationParameters { seed: None, ..params(3, 6, EndingPickMode::Random) };
		let generator = generator(&["Karamel", "Caramel", "Amelie"], params);
		assert_eq!(generator.generate(3).unwrap().len(), 3);
	}
}
