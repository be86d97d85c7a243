//! Kernel manifest and its binary blob format.
//!
//! The manifest is the ordered list of `(key, symbol)` pairs the emitter actually generated. It is
//! the only population source of the dispatch registry, which keeps registry content and emitted
//! launchers in lockstep.
//!
//! Blob layout: [`MAGIC`], little-endian `u32` [`SCHEMA_VERSION`], postcard payload.

use std::mem::size_of;

use serde::{Deserialize, Serialize};

use crate::SpecializationKey;

/// Magic bytes identifying a kernel manifest blob.
pub const MAGIC: &[u8; 8] = b"FFTKMNFT";

/// Schema version for blob format compatibility.
pub const SCHEMA_VERSION: u32 = 1;

/// Total header size in bytes (magic + version).
pub const HEADER_SIZE: usize = MAGIC.len() + size_of::<u32>();

/// Blob encoding and decoding failures.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
	#[error("manifest blob truncated: {len} bytes, header needs {}", HEADER_SIZE)]
	Truncated { len: usize },
	#[error("manifest blob has wrong magic bytes")]
	BadMagic,
	#[error("manifest schema version mismatch: found {found}, expected {}", SCHEMA_VERSION)]
	VersionMismatch { found: u32 },
	#[error("failed to encode manifest: {0}")]
	Encode(#[source] postcard::Error),
	#[error("failed to decode manifest payload: {0}")]
	Decode(#[source] postcard::Error),
}

/// One generated launcher.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
	pub key: SpecializationKey,
	pub symbol: String,
}

/// Launchers generated for one build, in emission order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelManifest {
	entries: Vec<ManifestEntry>,
}

impl KernelManifest {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, key: SpecializationKey, symbol: impl Into<String>) {
		self.entries.push(ManifestEntry { key, symbol: symbol.into() });
	}

	pub fn entries(&self) -> &[ManifestEntry] {
		&self.entries
	}

	pub fn iter(&self) -> impl Iterator<Item = &ManifestEntry> + '_ {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns the symbol generated for `key`, if any.
	pub fn symbol_for(&self, key: &SpecializationKey) -> Option<&str> {
		self.entries.iter().find(|e| e.key == *key).map(|e| e.symbol.as_str())
	}

	/// Serializes the manifest into a headered blob.
	pub fn to_blob(&self) -> Result<Vec<u8>, ManifestError> {
		let payload = postcard::to_stdvec(self).map_err(ManifestError::Encode)?;
		let mut blob = Vec::with_capacity(HEADER_SIZE + payload.len());
		blob.extend_from_slice(MAGIC);
		blob.extend_from_slice(&SCHEMA_VERSION.to_le_bytes());
		blob.extend_from_slice(&payload);
		Ok(blob)
	}

	/// Validates the blob header and decodes the payload.
	pub fn from_blob(data: &[u8]) -> Result<Self, ManifestError> {
		let payload = validate_blob(data)?;
		postcard::from_bytes(payload).map_err(ManifestError::Decode)
	}
}

impl<'a> IntoIterator for &'a KernelManifest {
	type Item = &'a ManifestEntry;
	type IntoIter = std::slice::Iter<'a, ManifestEntry>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

/// Validates blob header and returns the payload slice.
pub fn validate_blob(data: &[u8]) -> Result<&[u8], ManifestError> {
	if data.len() < HEADER_SIZE {
		return Err(ManifestError::Truncated { len: data.len() });
	}
	if &data[..MAGIC.len()] != MAGIC {
		return Err(ManifestError::BadMagic);
	}
	let mut version = [0u8; 4];
	version.copy_from_slice(&data[MAGIC.len()..HEADER_SIZE]);
	let found = u32::from_le_bytes(version);
	if found != SCHEMA_VERSION {
		return Err(ManifestError::VersionMismatch { found });
	}
	Ok(&data[HEADER_SIZE..])
}
