use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GenError>;

/// Errors raised while configuring or running a generation.
///
/// - `Configuration` is raised at construction and never retried.
/// - `Lookup` and `Duplicate` only ever fail a single attempt; the
///   generator counts them against the retry budget of the current slot.
/// - `RetryExhausted` is the one failure surfaced during normal operation.
#[derive(Error, Debug)]
pub enum GenError {
	/// Missing capability or invalid numeric parameter.
	#[error("Invalid configuration: {message}")]
	Configuration { message: String },

	/// A weighted pick found no entry for the drawn value.
	#[error("Lookup failed: {message}")]
	Lookup { message: String },

	/// The attempt produced a word already accepted in the batch.
	#[error("Duplicate word: {word}")]
	Duplicate { word: String },

	/// Every attempt for one slot of the batch failed.
	#[error("No distinct word for slot {slot} after {attempts} attempts")]
	RetryExhausted {
		slot: usize,
		attempts: usize,
		#[source]
		source: Box<GenError>,
	},

	/// Reading samples from disk failed.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

impl GenError {
	pub fn configuration(message: impl Into<String>) -> Self {
		Self::Configuration { message: message.into() }
	}

	pub fn lookup(message: impl Into<String>) -> Self {
		Self::Lookup { message: message.into() }
	}

	pub fn duplicate(word: impl Into<String>) -> Self {
		Self::Duplicate { word: word.into() }
	}

	/// Whether the error only invalidates one attempt.
	pub fn is_attempt_failure(&self) -> bool {
		matches!(self, Self::Lookup { .. } | Self::Duplicate { .. })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::error::Error as _;

	#[test]
	fn retry_exhausted_exposes_cause() {
		let err = GenError::RetryExhausted {
			slot: 2,
			attempts: 1000,
			source: Box::new(GenError::duplicate("bob")),
		};
		assert_eq!(err.to_string(), "No distinct word for slot 2 after 1000 attempts");
		let cause = err.source().map(|e| e.to_string());
		assert_eq!(cause.as_deref(), Some("Duplicate word: bob"));
	}

	#[test]
	fn attempt_failures() {
		assert!(GenError::lookup("empty").is_attempt_failure());
		assert!(GenError::duplicate("a").is_attempt_failure());
		assert!(!GenError::configuration("bad").is_attempt_failure());
	}
}
