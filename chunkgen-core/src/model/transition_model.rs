use std::collections::HashMap;

use super::chunk::Chunk;
use super::weighted::{FrequencySet, WeightedTable};

/// Weighted transition graph aggregated from segmented samples.
///
/// Built once per generation call and never mutated afterwards.
///
/// # Invariants
/// - Every table is either empty or stacked up to exactly `1.0`
/// - Every key of `branches` owns a non-empty table
/// - `sources` holds exactly the keys of `branches`
#[derive(Clone, Debug, Default)]
pub struct TransitionModel {
	starts: WeightedTable,
	endings: WeightedTable,
	branches: HashMap<String, WeightedTable>,
	/// Branch sources weighted by their outgoing edge counts.
	sources: WeightedTable,
	/// Every distinct chunk, uniformly weighted.
	chunks: WeightedTable,
}

impl TransitionModel {
	/// Aggregates a whole segmented sample set.
	pub fn build(segmented: &[Vec<Chunk>]) -> Self {
		let mut builder = TransitionModelBuilder::new();
		for sample in segmented {
			builder.add_sample(sample);
		}
		builder.build()
	}

	pub fn starts(&self) -> &WeightedTable {
		&self.starts
	}

	pub fn endings(&self) -> &WeightedTable {
		&self.endings
	}

	/// Chunks observed right after `text`, if any.
	pub fn branch(&self, text: &str) -> Option<&WeightedTable> {
		self.branches.get(text).filter(|table| !table.is_empty())
	}

	pub fn branches(&self) -> impl Iterator<Item = (&str, &WeightedTable)> {
		self.branches.iter().map(|(source, table)| (source.as_str(), table))
	}

	pub fn sources(&self) -> &WeightedTable {
		&self.sources
	}

	pub fn chunks(&self) -> &WeightedTable {
		&self.chunks
	}

	pub fn is_ending(&self, text: &str) -> bool {
		self.endings.contains(text)
	}

	pub fn branch_count(&self) -> usize {
		self.branches.len()
	}

	/// Number of distinct chunk texts.
	pub fn chunk_count(&self) -> usize {
		self.chunks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.chunks.is_empty()
	}
}

/// Single-pass aggregation of chunk frequencies.
///
/// Tracks, in first-seen order:
/// - how often each text started / ended a sample
/// - for each text, what followed it and how often
/// - every distinct text
#[derive(Debug, Default)]
pub struct TransitionModelBuilder {
	starts: FrequencySet,
	endings: FrequencySet,
	branches: HashMap<String, FrequencySet>,
	sources: Vec<String>,
	chunks: FrequencySet,
}

impl TransitionModelBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds the chunks of one sample.
	///
	/// # Parameters
	/// - `chunks`: One segmented sample, in order.
	///
	/// # Behavior
	/// - Every chunk is counted in the global chunk set.
	/// - A chunk flagged `is_start` / `is_end` is counted as a start / ending.
	/// - Each adjacent pair contributes one edge; the last chunk has no
	///   outgoing edge.
	/// - New branch sources are remembered in first-seen order.
	pub fn add_sample(&mut self, chunks: &[Chunk]) {
		for chunk in chunks {
			self.chunks.add(&chunk.text);
			if chunk.is_start {
				self.starts.add(&chunk.text);
			}
			if chunk.is_end {
				self.endings.add(&chunk.text);
			}
		}

		for pair in chunks.windows(2) {
			let (from, to) = (&pair[0].text, &pair[1].text);
			if !self.branches.contains_key(from) {
				self.sources.push(from.clone());
			}
			self.branches.entry(from.clone()).or_default().add(to);
		}
	}

	/// Stacks every tally into its probability table.
	pub fn build(self) -> TransitionModel {
		let mut sources = FrequencySet::new();
		for source in &self.sources {
			if let Some(branch) = self.branches.get(source) {
				sources.add_many(source, branch.total());
			}
		}

		let branches = self
			.branches
			.iter()
			.map(|(source, branch)| (source.clone(), WeightedTable::from_frequencies(branch)))
			.collect();

		TransitionModel {
			starts: WeightedTable::from_frequencies(&self.starts),
			endings: WeightedTable::from_frequencies(&self.endings),
			branches,
			sources: WeightedTable::from_frequencies(&sources),
			chunks: WeightedTable::uniform(self.chunks.iter().map(|(text, _)| text)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::segmentation::{FixedWidth, Segmenter};
	use crate::model::weighted::WeightedEntry;

	fn model_of(samples: &[&str]) -> TransitionModel {
		let seg = FixedWidth::new(1, false).unwrap();
		let samples: Vec<String> = samples.iter().map(|s| s.to_string()).collect();
		TransitionModel::build(&seg.segment_set(&samples))
	}

	fn entry(value: &str, p: f64) -> WeightedEntry {
		WeightedEntry { value: value.to_owned(), cumulative_probability: p }
	}

	#[test]
	fn single_chunk_sample() {
		let model = model_of(&["a"]);
		assert_eq!(model.starts().entries(), [entry("a", 1.0)]);
		assert_eq!(model.endings().entries(), [entry("a", 1.0)]);
		assert_eq!(model.branch_count(), 0);
		assert!(model.sources().is_empty());
		assert_eq!(model.chunk_count(), 1);
	}

	#[test]
	fn bob_and_bobby() {
		let model = model_of(&["Bob", "Bobby"]);
		assert_eq!(model.starts().entries(), [entry("b", 1.0)]);
		assert_eq!(model.endings().entries(), [entry("b", 0.5), entry("y", 1.0)]);

		// b -> o twice, b -> b once, b -> y once
		let b = model.branch("b").unwrap();
		assert_eq!(b.entries(), [entry("b", 0.25), entry("y", 0.5), entry("o", 1.0)]);
		assert_eq!(model.branch("o").unwrap().entries(), [entry("b", 1.0)]);
		assert!(model.branch("y").is_none());

		assert_eq!(model.branch_count(), 2);
		assert_eq!(model.chunk_count(), 3);
		assert!(model.is_ending("y"));
		assert!(!model.is_ending("o"));
	}

	#[test]
	fn sources_weighted_by_outgoing_edges() {
		let model = model_of(&["Bob", "Bobby"]);
		// o has 2 outgoing edges, b has 4
		assert_eq!(model.sources().entries(), [entry("o", 2.0 / 6.0), entry("b", 1.0)]);
	}

	#[test]
	fn every_table_ends_at_one() {
		let model = model_of(&["Karamel", "Caramel", "Amelie", "Melina", "Lina"]);
		let tables = [model.starts(), model.endings(), model.sources(), model.chunks()];
		for table in tables.into_iter().chain(model.branches().map(|(_, t)| t)) {
			assert!(!table.is_empty());
			assert_eq!(table.entries().last().unwrap().cumulative_probability, 1.0);
		}
	}

	#[test]
	fn empty_set_gives_empty_model() {
		let model = TransitionModel::build(&[]);
		assert!(model.is_empty());
		assert!(model.starts().is_empty());
	}
}
