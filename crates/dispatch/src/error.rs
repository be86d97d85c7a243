use std::path::PathBuf;

use fftkern_types::{ManifestError, SpecializationKey};

use crate::SubTable;

/// Expected lookup miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
	#[error("no kernel registered for {key}")]
	NotFound { key: SpecializationKey },
}

/// Fatal registry construction and validation failures.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
	#[error("duplicate key {key}: {first} and {second}")]
	DuplicateKey {
		key: SpecializationKey,
		first: String,
		second: String,
	},
	#[error("key {key} ({symbol}) routes to no sub-table")]
	Unroutable { key: SpecializationKey, symbol: String },
	#[error("{table}: null entry for {key} ({symbol})")]
	NullEntry {
		table: SubTable,
		key: SpecializationKey,
		symbol: String,
	},
	#[error(transparent)]
	Manifest(#[from] ManifestError),
	#[error("failed to load launcher library {}: {source}", .path.display())]
	Load {
		path: PathBuf,
		#[source]
		source: libloading::Error,
	},
}

/// Launch attempted through a null entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("launcher {symbol} is not resolved")]
pub struct NullEntry {
	pub symbol: String,
}
