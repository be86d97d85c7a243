use std::ops::Deref;
use std::sync::OnceLock;

use tracing::{debug, info};

use crate::{DispatchRegistry, RegistryError};

/// Registry builder run on first access.
pub type BuildFn = fn() -> Result<DispatchRegistry, RegistryError>;

/// Builds a [`DispatchRegistry`] on first access.
///
/// Concurrent first callers block until the single build finishes and then all observe the same
/// registry. The build also runs [`DispatchRegistry::validate_complete`]; a failure of either is
/// unrecoverable and panics with the offending table and key.
///
/// ```ignore
/// static KERNELS: LazyRegistry = LazyRegistry::new(load_kernels);
///
/// let entry = KERNELS.lookup(&key)?;
/// ```
pub struct LazyRegistry<F = BuildFn> {
	cell: OnceLock<DispatchRegistry>,
	init: F,
}

impl<F> LazyRegistry<F>
where
	F: Fn() -> Result<DispatchRegistry, RegistryError>,
{
	pub const fn new(init: F) -> Self {
		Self {
			cell: OnceLock::new(),
			init,
		}
	}

	pub fn get(&self) -> &DispatchRegistry {
		self.cell.get_or_init(|| {
			let registry = (self.init)().unwrap_or_else(|e| panic!("kernel registry build failed: {e}"));
			if let Err(e) = registry.validate_complete() {
				panic!("kernel registry incomplete: {e}");
			}
			for stats in registry.stats().iter().filter(|s| s.len > 0) {
				debug!(table = %stats.table, entries = stats.len, "registry table");
			}
			info!(entries = registry.len(), "kernel registry ready");
			registry
		})
	}

	/// Returns the registry if it was already built.
	pub fn get_if_built(&self) -> Option<&DispatchRegistry> {
		self.cell.get()
	}
}

impl<F> Deref for LazyRegistry<F>
where
	F: Fn() -> Result<DispatchRegistry, RegistryError>,
{
	type Target = DispatchRegistry;

	fn deref(&self) -> &DispatchRegistry {
		self.get()
	}
}

#[cfg(test)]
mod tests {
	use std::ffi::c_void;
	use std::sync::atomic::{AtomicUsize, Ordering};

	use fftkern_types::{KernelManifest, Precision, SpecializationKey};

	use super::*;
	use crate::SymbolTable;

	unsafe extern "C" fn noop(_data: *const c_void, _back: *mut c_void) {}

	static BUILDS: AtomicUsize = AtomicUsize::new(0);

	fn counted_build() -> Result<DispatchRegistry, RegistryError> {
		BUILDS.fetch_add(1, Ordering::SeqCst);
		let mut manifest = KernelManifest::new();
		manifest.push(SpecializationKey::stockham(64, Precision::Single), "fftkern_dfn_sp_ci_ci_stoc_64");
		DispatchRegistry::build(&manifest, SymbolTable::new().with("fftkern_dfn_sp_ci_ci_stoc_64", noop))
	}

	static SHARED: LazyRegistry = LazyRegistry::new(counted_build);

	/// Concurrent first callers observe exactly one build and the same registry.
	#[test]
	fn test_concurrent_first_access_builds_once() {
		assert!(SHARED.get_if_built().is_none());
		let addrs: Vec<usize> = std::thread::scope(|s| {
			let handles: Vec<_> = (0..8).map(|_| s.spawn(|| SHARED.get() as *const DispatchRegistry as usize)).collect();
			handles.into_iter().map(|h| h.join().unwrap()).collect()
		});
		assert!(addrs.windows(2).all(|w| w[0] == w[1]));
		assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
		assert!(SHARED.exists(Precision::Single, &SpecializationKey::stockham(64, Precision::Single)));
	}

	#[test]
	#[should_panic(expected = "kernel registry incomplete")]
	fn test_null_entry_panics_on_first_access() {
		let lazy = LazyRegistry::new(|| {
			let mut manifest = KernelManifest::new();
			manifest.push(SpecializationKey::stockham(8, Precision::Double), "fftkern_dfn_dp_ci_ci_stoc_8");
			DispatchRegistry::build(&manifest, SymbolTable::new())
		});
		lazy.get();
	}

	#[test]
	#[should_panic(expected = "kernel registry build failed")]
	fn test_build_failure_panics_on_first_access() {
		let lazy = LazyRegistry::new(|| DispatchRegistry::from_blob(b"garbage", SymbolTable::new()));
		lazy.get();
	}
}
