use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};

/// Policy used to pick the final chunk of a word.
///
/// # Variants
/// - `None`: the last middle chunk ends the word.
/// - `Random`: pick any recorded ending, independently of the chain.
/// - `FollowBranch`: keep following branches until an ending is reached.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EndingPickMode {
	None,
	#[default]
	Random,
	FollowBranch,
}

impl EndingPickMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Random => "random",
			Self::FollowBranch => "follow-branch",
		}
	}
}

impl fmt::Display for EndingPickMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for EndingPickMode {
	type Err = GenError;

	fn from_str(s: &str) -> Result<Self> {
		match s.to_lowercase().as_str() {
			"none" => Ok(Self::None),
			"random" => Ok(Self::Random),
			"follow-branch" | "follow_branch" | "followbranch" => Ok(Self::FollowBranch),
			other => Err(GenError::configuration(format!(
				"Ending pick mode must be 'none', 'random' or 'follow-branch', got '{other}'"
			))),
		}
	}
}

/// Numeric and policy knobs of a generation.
///
/// # Invariants (checked by `validate`)
/// - `1 <= target_length_min <= target_length_max`
/// - every entropy lies in `[0.0, 1.0]`
///
/// `entropy` is a floor applied to all three phases: each phase uses the
/// larger of `entropy` and its own value.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GenerationParameters {
	/// Lower bound of the target length, in characters.
	pub target_length_min: u32,

	/// Upper bound of the target length, in characters.
	pub target_length_max: u32,

	/// Seed of the RNG. `None` draws a fresh seed per generation call.
	pub seed: Option<String>,

	pub entropy: f64,
	pub entropy_start: f64,
	pub entropy_middle: f64,
	pub entropy_end: f64,

	pub ending_pick_mode: EndingPickMode,
}

impl Default for GenerationParameters {
	fn default() -> Self {
		Self {
			target_length_min: 3,
			target_length_max: 10,
			seed: None,
			entropy: 0.0,
			entropy_start: 0.0,
			entropy_middle: 0.0,
			entropy_end: 0.0,
			ending_pick_mode: EndingPickMode::Random,
		}
	}
}

impl GenerationParameters {
	/// Checks every invariant.
	///
	/// # Errors
	/// Returns a configuration error naming the first invalid field.
	pub fn validate(&self) -> Result<()> {
		if self.target_length_min < 1 {
			return Err(GenError::configuration("target_length_min must be >= 1"));
		}
		if self.target_length_max < 1 {
			return Err(GenError::configuration("target_length_max must be >= 1"));
		}
		if self.target_length_min > self.target_length_max {
			return Err(GenError::configuration(format!(
				"target_length_min ({}) must be <= target_length_max ({})",
				self.target_length_min, self.target_length_max
			)));
		}

		let entropies = [
			("entropy", self.entropy),
			("entropy_start", self.entropy_start),
			("entropy_middle", self.entropy_middle),
			("entropy_end", self.entropy_end),
		];
		for (name, value) in entropies {
			if !(0.0..=1.0).contains(&value) {
				return Err(GenError::configuration(format!("{name} must be between 0.0 and 1.0, got {value}")));
			}
		}
		Ok(())
	}

	pub(crate) fn start_entropy(&self) -> f64 {
		self.entropy.max(self.entropy_start)
	}

	pub(crate) fn middle_entropy(&self) -> f64 {
		self.entropy.max(self.entropy_middle)
	}

	pub(crate) fn end_entropy(&self) -> f64 {
		self.entropy.max(self.entropy_end)
	}
}
