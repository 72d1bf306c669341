//! Word generation pipeline.
//!
//! Leaves first:
//! - Position-flagged fragments of samples (`Chunk`)
//! - Pluggable segmentation (`FixedWidth`, `Delimiter`)
//! - Stacked probability tables (`WeightedTable`)
//! - The aggregated transition graph (`TransitionModel`)
//! - Single word assembly (`Concatenator`)
//! - Batch generation with uniqueness and post-processing (`Generator`)

/// Fragment of a sample with its positional flags.
pub mod chunk;

/// Segmentation strategies turning samples into chunks.
pub mod segmentation;

/// Frequency tallies and their cumulative probability tables.
pub mod weighted;

/// Start / ending / branch tables built from segmented samples.
pub mod transition_model;

/// Generation parameters and ending policies.
pub mod parameters;

/// State machine assembling one word from a transition model.
pub mod concatenator;

/// Sample providers (in memory, text file).
pub mod sampling;

/// Post-processing strategies and their registry.
pub mod spelling;

/// High-level batch generator.
///
/// Validates the configuration once, then produces batches of distinct
/// words with a bounded retry budget.
pub mod generator;
