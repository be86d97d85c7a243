//! Symbol name to launcher resolution.

use std::path::{Path, PathBuf};

use libloading::Library;
use rustc_hash::FxHashMap as HashMap;
use tracing::debug;

use crate::{LaunchFn, RegistryError};

/// Resolves launcher symbols named by a kernel manifest.
pub trait KernelResolver {
	/// Returns the launcher for `symbol`, or `None` when it is not available.
	fn resolve(&self, symbol: &str) -> Option<LaunchFn>;
}

/// In-memory symbol table for statically linked launchers.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
	symbols: HashMap<String, LaunchFn>,
}

impl SymbolTable {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, symbol: impl Into<String>, launcher: LaunchFn) -> Option<LaunchFn> {
		self.symbols.insert(symbol.into(), launcher)
	}

	pub fn with(mut self, symbol: impl Into<String>, launcher: LaunchFn) -> Self {
		self.insert(symbol, launcher);
		self
	}

	pub fn len(&self) -> usize {
		self.symbols.len()
	}

	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}
}

impl<S: Into<String>> FromIterator<(S, LaunchFn)> for SymbolTable {
	fn from_iter<I: IntoIterator<Item = (S, LaunchFn)>>(iter: I) -> Self {
		Self {
			symbols: iter.into_iter().map(|(s, f)| (s.into(), f)).collect(),
		}
	}
}

impl KernelResolver for SymbolTable {
	fn resolve(&self, symbol: &str) -> Option<LaunchFn> {
		self.symbols.get(symbol).copied()
	}
}

/// Resolves launchers from a compiled shared library.
///
/// The library stays loaded for as long as the resolver lives; a registry built from it owns it.
#[derive(Debug)]
pub struct DylibResolver {
	lib: Library,
	path: PathBuf,
}

impl DylibResolver {
	/// Loads the launcher library at `path`.
	///
	/// # Safety
	///
	/// Loading runs the library's initialization routines; the library must be a launcher library
	/// built from the emitted sources.
	pub unsafe fn open(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
		let path = path.as_ref().to_path_buf();
		let lib = unsafe { Library::new(&path) }.map_err(|source| RegistryError::Load { path: path.clone(), source })?;
		debug!(path = %path.display(), "loaded launcher library");
		Ok(Self { lib, path })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl KernelResolver for DylibResolver {
	fn resolve(&self, symbol: &str) -> Option<LaunchFn> {
		let mut name = Vec::with_capacity(symbol.len() + 1);
		name.extend_from_slice(symbol.as_bytes());
		name.push(0);
		// Launchers are declared with exactly this signature in the generated header.
		let launcher = unsafe { self.lib.get::<LaunchFn>(&name) }.ok()?;
		Some(*launcher)
	}
}
