use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};

/// Occurrence counts of distinct values, in first-seen order.
///
/// Conceptually one node of the chain with its weighted outgoing edges, or
/// the tally of starts / endings. Insertion order is kept so that building
/// a table from it is deterministic.
#[derive(Clone, Debug, Default)]
pub struct FrequencySet {
	counts: Vec<(String, usize)>,
	index: HashMap<String, usize>,
}

impl FrequencySet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one more occurrence of `value`.
	pub fn add(&mut self, value: &str) {
		self.add_many(value, 1);
	}

	/// Records `occurrences` more occurrences of `value`.
	pub fn add_many(&mut self, value: &str, occurrences: usize) {
		if occurrences == 0 {
			return;
		}
		match self.index.get(value) {
			Some(&i) => self.counts[i].1 += occurrences,
			None => {
				self.index.insert(value.to_owned(), self.counts.len());
				self.counts.push((value.to_owned(), occurrences));
			}
		}
	}

	pub fn count(&self, value: &str) -> usize {
		self.index.get(value).map_or(0, |&i| self.counts[i].1)
	}

	pub fn total(&self) -> usize {
		self.counts.iter().map(|(_, occurrence)| occurrence).sum()
	}

	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Iterates `(value, count)` in first-seen order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
		self.counts.iter().map(|(value, count)| (value.as_str(), *count))
	}
}

/// One candidate of a stacked table.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WeightedEntry {
	pub value: String,
	pub cumulative_probability: f64,
}

/// Cumulative ("stacked") probability table.
///
/// # Invariants
/// - Entries are sorted by non-decreasing `cumulative_probability`
/// - The last entry of a non-empty table is exactly `1.0`
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct WeightedTable {
	entries: Vec<WeightedEntry>,
}

impl WeightedTable {
	/// Stacks the relative frequencies of `set`.
	///
	/// # Parameters
	/// - `set`: Occurrence counts to normalize.
	///
	/// # Behavior
	/// - Candidates are ordered by ascending frequency. The sort is stable,
	///   so equal frequencies keep first-seen order.
	/// - Each entry carries the running sum of relative frequencies.
	///
	/// # Returns
	/// An empty table for an empty set, otherwise a table whose last entry
	/// is exactly `1.0`.
	pub fn from_frequencies(set: &FrequencySet) -> Self {
		let total = set.total();
		if total == 0 {
			return Self::default();
		}

		let mut counts: Vec<(&str, usize)> = set.iter().collect();
		counts.sort_by_key(|&(_, count)| count);

		let mut cumulative = 0.0;
		let mut entries: Vec<WeightedEntry> = counts
			.into_iter()
			.map(|(value, count)| {
				cumulative += count as f64 / total as f64;
				WeightedEntry { value: value.to_owned(), cumulative_probability: cumulative }
			})
			.collect();

		// Absorb floating-point drift
		if let Some(last) = entries.last_mut() {
			last.cumulative_probability = 1.0;
		}

		Self { entries }
	}

	/// Table giving every value the same weight.
	pub fn uniform<'a, I>(values: I) -> Self
	where
		I: IntoIterator<Item = &'a str>,
	{
		let mut set = FrequencySet::new();
		for value in values {
			if set.count(value) == 0 {
				set.add(value);
			}
		}
		Self::from_frequencies(&set)
	}

	/// Returns the first value whose cumulative probability is `>= r`.
	///
	/// # Errors
	/// Returns a lookup error when no entry matches, which can only happen
	/// on an empty table or with `r > 1.0`.
	pub fn pick(&self, r: f64) -> Result<&str> {
		self.entries
			.iter()
			.find(|entry| entry.cumulative_probability >= r)
			.map(|entry| entry.value.as_str())
			.ok_or_else(|| GenError::lookup(format!("no entry for draw {r} in a table of {} entries", self.entries.len())))
	}

	pub fn contains(&self, value: &str) -> bool {
		self.entries.iter().any(|entry| entry.value == value)
	}

	pub fn entries(&self) -> &[WeightedEntry] {
		&self.entries
	}

	pub fn values(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|entry| entry.value.as_str())
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
