use log::trace;

use super::parameters::{EndingPickMode, GenerationParameters};
use super::transition_model::TransitionModel;
use super::weighted::WeightedTable;
use crate::error::{GenError, Result};
use crate::rng::SeededRng;

/// Assembles one word by walking a `TransitionModel`.
///
/// A word is built as Start -> Middle* -> End:
/// - one chunk is drawn from the start table
/// - middle chunks follow the branch of the previous chunk until the
///   target length is reached
/// - the end is resolved once, according to `EndingPickMode`
///
/// The concatenator owns no randomness; every draw comes from the `rng`
/// handed to `generate`, so a call sequence is reproducible.
pub struct Concatenator<'a> {
	model: &'a TransitionModel,
	params: &'a GenerationParameters,
}

impl<'a> Concatenator<'a> {
	pub fn new(model: &'a TransitionModel, params: &'a GenerationParameters) -> Self {
		Self { model, params }
	}

	/// Generates one word.
	///
	/// # Parameters
	/// - `rng`: Source of every draw made for this word.
	///
	/// # Behavior
	/// - Draws a target length in `[target_length_min, target_length_max]`.
	/// - Picks a start chunk, then middle chunks until the target is reached.
	/// - `Random` picks one ending; if it would overshoot, the last chunk is
	///   removed first (once) unless the word is a lone start that already
	///   ended a sample, in which case nothing is appended.
	/// - `FollowBranch` walks branches until an ending chunk is met.
	///
	/// # Returns
	/// The concatenated chunks. The length is a tendency, not a guarantee.
	///
	/// # Errors
	/// Returns a lookup error if a required table is empty, or if a
	/// `FollowBranch` walk never reaches an ending.
	pub fn generate(&self, rng: &mut SeededRng) -> Result<String> {
		let target = rng
			.range(self.params.target_length_min as f64, self.params.target_length_max as f64)
			.round() as usize;
		trace!("target length {target}");

		let start = self.pick_from(self.model.starts(), self.params.start_entropy(), rng)?;
		let mut word: Vec<&str> = vec![start];
		let mut length = char_len(start);

		while length < target {
			let previous = word[word.len() - 1];
			match self.next_chunk(previous, rng)? {
				Some(next) => {
					word.push(next);
					length += char_len(next);
				}
				// No branch anywhere in the graph
				None => break,
			}
		}

		match self.params.ending_pick_mode {
			EndingPickMode::None => (),
			EndingPickMode::Random => {
				let ending = self.pick_from(self.model.endings(), self.params.end_entropy(), rng)?;
				let mut append = true;
				if length + char_len(ending) > target {
					if word.len() > 1 {
						if let Some(removed) = word.pop() {
							length -= char_len(removed);
						}
					} else if self.model.is_ending(word[0]) {
						// The lone start already terminates a sample
						append = false;
					}
				}
				if append {
					word.push(ending);
				}
			}
			EndingPickMode::FollowBranch => {
				if let Some(ending) = self.follow_branch(word[word.len() - 1], rng)? {
					word.push(ending);
				}
			}
		}

		Ok(word.concat())
	}

	/// Walks branches from `last` until an ending chunk is picked.
	///
	/// Returns `None` when `last` is itself an ending with nowhere to go.
	/// The walk is bounded by the number of distinct chunks: a longer walk
	/// has necessarily cycled.
	fn follow_branch(&self, last: &'a str, rng: &mut SeededRng) -> Result<Option<&'a str>> {
		if self.model.branch(last).is_none() && self.model.is_ending(last) {
			return Ok(None);
		}

		let bound = self.model.chunk_count().max(1);
		let mut current = last;
		for _ in 0..bound {
			let next = self
				.next_chunk(current, rng)?
				.ok_or_else(|| GenError::lookup(format!("no continuation after '{current}'")))?;
			if self.model.is_ending(next) {
				return Ok(Some(next));
			}
			current = next;
		}

		Err(GenError::lookup(format!("no ending reached from '{last}' within {bound} steps")))
	}

	/// Picks the chunk following `previous`.
	///
	/// Falls back to the set of all branch sources when `previous` has no
	/// branch of its own. Returns `None` only when the model has no branch
	/// at all.
	fn next_chunk(&self, previous: &str, rng: &mut SeededRng) -> Result<Option<&'a str>> {
		let table = match self.model.branch(previous) {
			Some(branch) => branch,
			None if self.model.sources().is_empty() => return Ok(None),
			None => self.model.sources(),
		};
		self.pick_from(table, self.params.middle_entropy(), rng).map(Some)
	}

	/// Weighted pick with an entropy override.
	///
	/// With probability `entropy` the pick is made from the global chunk
	/// set instead of `table`. Two values are drawn either way.
	fn pick_from(&self, table: &'a WeightedTable, entropy: f64, rng: &mut SeededRng) -> Result<&'a str> {
		if table.is_empty() {
			return Err(GenError::lookup("cannot pick from an empty table"));
		}
		let r1 = rng.next_f64();
		let r2 = rng.next_f64();
		if r1 <= entropy {
			self.model.chunks().pick(r2)
		} else {
			table.pick(r2)
		}
	}
}

fn char_len(text: &str) -> usize {
	text.chars().count()
}
