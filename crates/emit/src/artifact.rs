//! Emitted artifacts and the sinks that persist them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fftkern_types::KernelManifest;
use indexmap::IndexMap;
use tracing::{debug, error, info};

use crate::naming::MANIFEST_BLOB;
use crate::{ArtifactFailure, PersistError};

/// A named generated file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
	pub name: String,
	pub contents: Vec<u8>,
}

impl Artifact {
	pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			contents: text.into().into_bytes(),
		}
	}

	/// Contents as text; artifacts other than the manifest blob are always UTF-8.
	pub fn as_text(&self) -> Option<&str> {
		std::str::from_utf8(&self.contents).ok()
	}
}

/// Destination for named artifacts.
pub trait ArtifactSink {
	fn write(&mut self, name: &str, contents: &[u8]) -> io::Result<()>;
}

/// Writes artifacts as files under a directory.
#[derive(Clone, Debug)]
pub struct DirSink {
	root: PathBuf,
}

impl DirSink {
	/// Creates the sink, creating `root` if needed.
	pub fn create(root: impl Into<PathBuf>) -> io::Result<Self> {
		let root = root.into();
		fs::create_dir_all(&root)?;
		Ok(Self { root })
	}

	pub fn root(&self) -> &Path {
		&self.root
	}
}

impl ArtifactSink for DirSink {
	fn write(&mut self, name: &str, contents: &[u8]) -> io::Result<()> {
		fs::write(self.root.join(name), contents)
	}
}

/// Keeps artifacts in memory, in write order.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
	files: IndexMap<String, Vec<u8>>,
}

impl MemorySink {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, name: &str) -> Option<&[u8]> {
		self.files.get(name).map(Vec::as_slice)
	}

	pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
		self.files.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.files.len()
	}

	pub fn is_empty(&self) -> bool {
		self.files.is_empty()
	}
}

impl ArtifactSink for MemorySink {
	fn write(&mut self, name: &str, contents: &[u8]) -> io::Result<()> {
		self.files.insert(name.to_string(), contents.to_vec());
		Ok(())
	}
}

/// Writes every artifact, then the manifest blob.
///
/// Every artifact is attempted even after a failure, and each failure is logged as it happens.
/// If any artifact failed the manifest blob is not written, so no registry can be built from a
/// partial emission.
pub fn persist(artifacts: &[Artifact], manifest: &KernelManifest, sink: &mut dyn ArtifactSink) -> Result<(), PersistError> {
	let mut failed = Vec::new();
	for artifact in artifacts {
		match sink.write(&artifact.name, &artifact.contents) {
			Ok(()) => debug!(name = %artifact.name, bytes = artifact.contents.len(), "wrote artifact"),
			Err(source) => {
				error!(name = %artifact.name, error = %source, "failed to write artifact");
				failed.push(ArtifactFailure {
					name: artifact.name.clone(),
					source,
				});
			}
		}
	}
	if !failed.is_empty() {
		return Err(PersistError::Artifacts {
			failed,
			total: artifacts.len(),
		});
	}

	let blob = manifest.to_blob()?;
	sink.write(MANIFEST_BLOB, &blob).map_err(PersistError::ManifestWrite)?;
	info!(artifacts = artifacts.len(), launchers = manifest.len(), "persisted kernel sources");
	Ok(())
}
