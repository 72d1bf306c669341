use std::env;

use chunkgen_core::{
    EndingPickMode, FileSamples, GenError, GenerationParameters, Generator, SegmentationConfig, SpellingRegistry,
    StaticSamples,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let spellings = SpellingRegistry::default();

    // Every knob has a default; only override what matters here
    let params = GenerationParameters {
        target_length_min: 4,
        target_length_max: 8,
        // Same seed, same words. Use 'None' for a fresh seed on every call
        seed: Some("exemple".to_owned()),
        // Small chance to pick a middle chunk from anywhere in the graph
        entropy_middle: 0.05,
        // Keep following branches until a chunk that ended a sample is found
        ending_pick_mode: EndingPickMode::FollowBranch,
        ..Default::default()
    };

    // Chunks of two characters, lower-cased
    let segmentation = SegmentationConfig::FixedWidth { depth: 2, preserve_case: false };

    let builder = Generator::builder()
        .segmentation(segmentation)
        .spelling(spellings.get("capitalize").ok_or("missing 'capitalize' spelling")?)
        .parameters(params.clone());

    // Samples come from the file given as first argument, or an inline list
    let generator = match env::args().nth(1) {
        Some(path) => builder.samples(FileSamples::new(path)).build()?,
        None => builder
            .samples(StaticSamples::new([
                "Karamel", "Caramel", "Amelie", "Melina", "Lina", "Camille", "Emile", "Leonie",
            ]))
            .build()?,
    };

    // The start table stacks up to exactly 1.0
    let model = generator.model()?;
    for entry in model.starts().entries() {
        println!("start '{}': {:.3}", entry.value, entry.cumulative_probability);
    }

    // Generate 10 distinct words using the settings above
    for (i, word) in generator.generate(10)?.iter().enumerate() {
        println!("Generated word {}: {}", i + 1, word);
    }

    // An inverted length range is refused before any generation
    let inverted = GenerationParameters { target_length_min: 5, target_length_max: 2, ..params };
    match Generator::builder()
        .samples(StaticSamples::new(["Bob", "Bobby"]))
        .segmentation(SegmentationConfig::default())
        .spelling(spellings.get("none").ok_or("missing 'none' spelling")?)
        .parameters(inverted)
        .build()
    {
        Ok(_) => println!("Should not happen"),
        Err(GenError::Configuration { message }) => println!("Refused: {message}"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
