use std::collections::HashMap;
use std::sync::Arc;

/// Pure post-processing applied to every accepted word.
pub trait Spelling: Send + Sync {
	/// Stable identifier used by `SpellingRegistry`.
	fn id(&self) -> &str;

	fn apply(&self, word: &str) -> String;
}

/// Leaves words untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl Identity {
	pub const ID: &'static str = "none";
}

impl Spelling for Identity {
	fn id(&self) -> &str {
		Self::ID
	}

	fn apply(&self, word: &str) -> String {
		word.to_owned()
	}
}

/// Upper-cases the first character, keeps the rest.
#[derive(Clone, Copy, Debug, Default)]
pub struct Capitalize;

impl Capitalize {
	pub const ID: &'static str = "capitalize";
}

impl Spelling for Capitalize {
	fn id(&self) -> &str {
		Self::ID
	}

	fn apply(&self, word: &str) -> String {
		let mut chars = word.chars();
		match chars.next() {
			Some(first) => first.to_uppercase().chain(chars).collect(),
			None => String::new(),
		}
	}
}

/// Spelling strategies available to a host, keyed by id.
///
/// An explicit value handed to whoever builds generators; nothing is
/// registered globally.
#[derive(Clone)]
pub struct SpellingRegistry {
	spellings: HashMap<String, Arc<dyn Spelling>>,
}

impl Default for SpellingRegistry {
	/// Registry holding `none` and `capitalize`.
	fn default() -> Self {
		let mut registry = Self::empty();
		registry.register(Arc::new(Identity));
		registry.register(Arc::new(Capitalize));
		registry
	}
}

impl SpellingRegistry {
	pub fn empty() -> Self {
		Self { spellings: HashMap::new() }
	}

	/// Adds a strategy, replacing any with the same id.
	pub fn register(&mut self, spelling: Arc<dyn Spelling>) {
		self.spellings.insert(spelling.id().to_owned(), spelling);
	}

	pub fn get(&self, id: &str) -> Option<Arc<dyn Spelling>> {
		self.spellings.get(id).cloned()
	}

	/// Registered ids, sorted.
	pub fn ids(&self) -> Vec<String> {
		let mut ids: Vec<String> = self.spellings.keys().cloned().collect();
		ids.sort();
		ids
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Shout;

	impl Spelling for Shout {
		fn id(&self) -> &str {
			"capitalize"
		}

		fn apply(&self, word: &str) -> String {
			word.to_uppercase()
		}
	}

	#[test]
	fn capitalize_first_character() {
		assert_eq!(Capitalize.apply("karamel"), "Karamel");
		assert_eq!(Capitalize.apply("éloise"), "Éloise");
		assert_eq!(Capitalize.apply("already Up"), "Already Up");
		assert_eq!(Capitalize.apply(""), "");
	}

	#[test]
	fn identity_is_noop() {
		assert_eq!(Identity.apply("bOb"), "bOb");
	}

	#[test]
	fn default_registry() {
		let registry = SpellingRegistry::default();
		assert_eq!(registry.ids(), ["capitalize", "none"]);
		assert!(registry.get("unknown").is_none());
		let spelling = registry.get("capitalize").unwrap();
		assert_eq!(spelling.apply("bob"), "Bob");
	}

	#[test]
	fn register_replaces_same_id() {
		let mut registry = SpellingRegistry::default();
		registry.register(Arc::new(Shout));
		assert_eq!(registry.get("capitalize").unwrap().apply("bob"), "BOB");
		assert_eq!(registry.ids().len(), 2);
	}
}
