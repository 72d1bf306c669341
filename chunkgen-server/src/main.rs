use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{get, middleware, web, App, HttpResponse, HttpServer, Responder};
use log::{error, info};

use serde::Deserialize;
use chunkgen_core::io::{list_files, normalize_folder};
use chunkgen_core::{
	EndingPickMode, FileSamples, GenError, GenerationParameters, Generator, SegmentationConfig, SpellingRegistry,
};

/// Largest batch a single request may ask for.
const MAX_COUNT: usize = 1000;
/// Largest target length a single request may ask for.
const MAX_LENGTH: u32 = 256;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	source: Option<String>,
	count: Option<usize>,
	min: Option<u32>,
	max: Option<u32>,
	seed: Option<String>,
	entropy: Option<f64>,
	entropy_start: Option<f64>,
	entropy_middle: Option<f64>,
	entropy_end: Option<f64>,
	ending: Option<String>, // none, random or follow-branch
	segmentation: Option<String>, // fixed-width or delimiter
	depth: Option<usize>,
	delimiter: Option<String>,
	preserve_case: Option<bool>,
	spelling: Option<String>
}

/// Server settings read from the environment at startup.
struct ServerConfig {
	bind: String,
	port: u16,
	data: PathBuf,
}

impl ServerConfig {
	fn from_env() -> Result<Self, String> {
		let bind = env::var("CHUNKGEN_BIND").unwrap_or_else(|_| "127.0.0.1".to_owned());
		let port = match env::var("CHUNKGEN_PORT") {
			Ok(p) => p.parse::<u16>().map_err(|_| format!("CHUNKGEN_PORT must be a port number, got '{p}'"))?,
			Err(_) => 5000,
		};
		let data = normalize_folder(&env::var("CHUNKGEN_DATA").unwrap_or_else(|_| "./data".to_owned()));
		Ok(Self { bind, port, data })
	}
}

struct SharedData {
	data: PathBuf,
	spellings: SpellingRegistry
}

impl GenerateParams {
	/// Batch size, at most `MAX_COUNT`.
	fn count(&self) -> Result<usize, String> {
		match self.count.unwrap_or(1) {
			count if count > MAX_COUNT => Err(format!("Count must be at most {MAX_COUNT}, got {count}")),
			count => Ok(count),
		}
	}

	/// Generation parameters, defaults filled in for missing values.
	fn parameters(&self) -> Result<GenerationParameters, String> {
		let defaults = GenerationParameters::default();
		let ending_pick_mode = match &self.ending {
			Some(s) => s.parse::<EndingPickMode>().map_err(|e| e.to_string())?,
			None => defaults.ending_pick_mode,
		};
		let target_length_min = self.min.unwrap_or(defaults.target_length_min);
		let target_length_max = self.max.unwrap_or(defaults.target_length_max);
		if target_length_max > MAX_LENGTH {
			return Err(format!("Max length must be at most {MAX_LENGTH}, got {target_length_max}"));
		}
		Ok(GenerationParameters {
			target_length_min,
			target_length_max,
			seed: self.seed.clone().filter(|s| !s.is_empty()),
			entropy: self.entropy.unwrap_or(defaults.entropy),
			entropy_start: self.entropy_start.unwrap_or(defaults.entropy_start),
			entropy_middle: self.entropy_middle.unwrap_or(defaults.entropy_middle),
			entropy_end: self.entropy_end.unwrap_or(defaults.entropy_end),
			ending_pick_mode,
		})
	}

	/// Determines the segmentation strategy.
	fn segmentation(&self) -> Result<SegmentationConfig, String> {
		let preserve_case = self.preserve_case.unwrap_or(false);
		match self.segmentation.as_deref() {
			None | Some("fixed-width") => Ok(SegmentationConfig::FixedWidth { depth: self.depth.unwrap_or(1), preserve_case }),
			Some("delimiter") => match &self.delimiter {
				Some(d) if !d.is_empty() => Ok(SegmentationConfig::Delimiter { delimiter: d.clone(), preserve_case }),
				_ => Err("Delimiter segmentation requires a non-empty 'delimiter'".into()),
			},
			Some(other) => Err(format!("Segmentation must be 'fixed-width' or 'delimiter', got '{other}'")),
		}
	}

	/// Source file name, rejecting anything that could escape the data folder.
	fn source(&self) -> Result<String, String> {
		match self.source.as_deref().map(str::trim) {
			Some(s) if !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') => Ok(s.to_owned()),
			Some(_) => Err("Source must only contain letters, digits, '_' or '-'".into()),
			None => Err("Missing source".into()),
		}
	}
}

fn error_response(e: &GenError) -> HttpResponse {
	match e {
		GenError::Configuration { .. } => HttpResponse::BadRequest().body(e.to_string()),
		GenError::RetryExhausted { .. } => HttpResponse::UnprocessableEntity().body(e.to_string()),
		GenError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => HttpResponse::NotFound().body(e.to_string()),
		_ => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Builds a generator over `<data>/<source>.txt` from the query parameters
/// and returns the generated words, one per line.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let (source, count, params, segmentation) =
		match (query.source(), query.count(), query.parameters(), query.segmentation()) {
			(Ok(source), Ok(count), Ok(params), Ok(segmentation)) => (source, count, params, segmentation),
			(Err(e), ..) | (_, Err(e), ..) | (_, _, Err(e), _) | (.., Err(e)) => return HttpResponse::BadRequest().body(e),
		};

	let spelling_id = query.spelling.as_deref().unwrap_or("none");
	let spelling = match data.spellings.get(spelling_id) {
		Some(s) => s,
		None => return HttpResponse::BadRequest().body(format!("Unknown spelling '{spelling_id}'")),
	};

	let path = data.data.join(format!("{source}.txt"));
	if !path.is_file() {
		return HttpResponse::NotFound().body(format!("Unknown source '{source}'"));
	}

	let generator = match Generator::builder()
		.samples(FileSamples::new(path))
		.segmentation(segmentation)
		.spelling(Arc::clone(&spelling))
		.parameters(params)
		.build()
	{
		Ok(g) => g,
		Err(e) => return error_response(&e),
	};

	// Generation is CPU bound, keep it off the event loop
	match web::block(move || generator.generate(count)).await {
		Ok(Ok(words)) => HttpResponse::Ok().body(words.join("\n")),
		Ok(Err(e)) => {
			info!("generation from '{source}' failed: {e}");
			error_response(&e)
		}
		Err(e) => {
			error!("generation worker failed: {e}");
			HttpResponse::InternalServerError().body("Generation worker failed")
		}
	}
}

#[get("/v1/sources")]
async fn get_sources(data: web::Data<SharedData>) -> impl Responder {
	match list_files(&data.data, "txt") {
		Ok(files) => {
			let names: Vec<String> = files
				.iter()
				.filter_map(|file| Path::new(file).file_stem())
				.map(|stem| stem.to_string_lossy().into_owned())
				.collect();
			HttpResponse::Ok().body(names.join("\n"))
		}
		Err(_) => HttpResponse::InternalServerError().body("Failed to list sources")
	}
}

#[get("/v1/spellings")]
async fn get_spellings(data: web::Data<SharedData>) -> impl Responder {
	HttpResponse::Ok().body(data.spellings.ids().join("\n"))
}

/// Main entry point for the server.
///
/// Reads the configuration from the environment and starts an
/// Actix-web HTTP server with one worker per CPU.
///
/// # Notes
/// - `CHUNKGEN_BIND` / `CHUNKGEN_PORT` default to 127.0.0.1:5000.
/// - `CHUNKGEN_DATA` (default `./data`) holds the `.txt` sample files.
/// - Logging is controlled by `RUST_LOG`.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let config = ServerConfig::from_env().map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
	info!("serving samples from {} on {}:{}", config.data.display(), config.bind, config.port);

	let shared_data = web::Data::new(SharedData {
		data: config.data,
		spellings: SpellingRegistry::default(),
	});

	HttpServer::new(move || {
		App::new()
			.wrap(middleware::Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.service(get_generated)
			.service(get_sources)
			.service(get_spellings)
	})
		.workers(num_cpus::get())
		.bind((config.bind.as_str(), config.port))?
		.run()
		.await
}
