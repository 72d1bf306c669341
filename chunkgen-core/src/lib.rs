//! Chunk-based pronounceable word generation library.
//!
//! This crate generates strings that statistically resemble a set of
//! samples:
//! - Samples are cut into chunks (fixed-width or delimiter based)
//! - Chunks are aggregated into a weighted start / branch / ending graph
//! - Words are assembled by walking the graph with a seeded RNG, with
//!   per-phase entropy overriding the weighted choice
//! - Batches are kept unique and optionally post-processed
//!
//! Generation is deterministic for a given seed.

/// Core pipeline (segmentation, transition model, generation).
pub mod model;

/// Seeded pseudo-random source.
pub mod rng;

/// Error type and result alias.
pub mod error;

/// File and path helpers used by file-backed sample providers.
pub mod io;

pub use error::{GenError, Result};
pub use model::generator::{Generator, GeneratorBuilder, MAX_ATTEMPTS};
pub use model::parameters::{EndingPickMode, GenerationParameters};
pub use model::sampling::{FileSamples, SampleProvider, StaticSamples};
pub use model::segmentation::{Delimiter, FixedWidth, SegmentationConfig, Segmenter};
pub use model::spelling::{Capitalize, Identity, Spelling, SpellingRegistry};
pub use model::transition_model::TransitionModel;
pub use rng::SeededRng;
