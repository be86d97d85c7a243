use std::path::PathBuf;

use fftkern_specialize::{GeometryError, UnsupportedConfiguration};
use fftkern_types::{DecompositionScheme, ManifestError};

/// Catalog loading and validation failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
	#[error("failed to read catalog {}: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to parse catalog: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("{list}[{index}]: transform length must be positive")]
	ZeroLength { list: &'static str, index: usize },
	#[error("{list}: duplicate entry {entry}")]
	Duplicate { list: &'static str, entry: String },
	#[error("{list}: scheme {scheme} is not accepted here")]
	WrongScheme { list: &'static str, scheme: DecompositionScheme },
	#[error("fused_2d[{index}]: empty precision list")]
	EmptyPrecisions { index: usize },
	#[error("platform: {0}")]
	Platform(#[source] GeometryError),
}

/// Failure reported by a kernel codegen engine.
#[derive(Debug, thiserror::Error)]
#[error("codegen engine failed for {kernel}: {message}")]
pub struct CodegenError {
	pub kernel: String,
	pub message: String,
}

/// Fatal emission failures.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
	#[error(transparent)]
	Catalog(#[from] CatalogError),
	#[error("small kernel group count {groups} outside 1..={max}")]
	GroupCount { groups: usize, max: usize },
	#[error("geometry for {scheme} length {length}: {source}")]
	Geometry {
		length: usize,
		scheme: DecompositionScheme,
		#[source]
		source: GeometryError,
	},
	#[error(transparent)]
	Unsupported(#[from] UnsupportedConfiguration),
	#[error(transparent)]
	Codegen(#[from] CodegenError),
	#[error("kernel body {kernel} does not define device entry point {entry}")]
	MissingEntryPoint { kernel: String, entry: String },
}

/// One artifact the sink failed to write.
#[derive(Debug, thiserror::Error)]
#[error("{name}: {source}")]
pub struct ArtifactFailure {
	pub name: String,
	#[source]
	pub source: std::io::Error,
}

/// Persisting emitted artifacts failed; the manifest blob was not written.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
	#[error("failed to persist {} of {total} artifacts: {}", .failed.len(), failed_names(.failed))]
	Artifacts { failed: Vec<ArtifactFailure>, total: usize },
	#[error(transparent)]
	Manifest(#[from] ManifestError),
	#[error("failed to write manifest blob: {0}")]
	ManifestWrite(#[source] std::io::Error),
}

fn failed_names(failed: &[ArtifactFailure]) -> String {
	failed.iter().map(|f| f.name.as_str()).collect::<Vec<_>>().join(", ")
}
