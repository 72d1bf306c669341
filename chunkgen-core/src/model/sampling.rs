use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::io;

/// Source of the example strings a generator learns from.
pub trait SampleProvider: Send + Sync {
	/// Returns the current sample set.
	fn samples(&self) -> Result<Vec<String>>;

	/// Whether the provider can be asked for samples.
	fn is_fully_configured(&self) -> bool;
}

/// In-memory sample list.
#[derive(Clone, Debug, Default)]
pub struct StaticSamples {
	samples: Vec<String>,
}

impl StaticSamples {
	pub fn new<I, S>(samples: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { samples: samples.into_iter().map(Into::into).collect() }
	}
}

impl SampleProvider for StaticSamples {
	fn samples(&self) -> Result<Vec<String>> {
		Ok(self.samples.clone())
	}

	fn is_fully_configured(&self) -> bool {
		!self.samples.is_empty()
	}
}

/// Text file read on every request, one sample per non-blank line.
#[derive(Clone, Debug)]
pub struct FileSamples {
	path: PathBuf,
}

impl FileSamples {
	pub fn new<P: AsRef<Path>>(path: P) -> Self {
		Self { path: path.as_ref().to_path_buf() }
	}
}

impl SampleProvider for FileSamples {
	fn samples(&self) -> Result<Vec<String>> {
		Ok(io::read_lines(&self.path)?)
	}

	fn is_fully_configured(&self) -> bool {
		self.path.is_file()
	}
}
