use std::ffi::c_void;
use std::sync::Arc;

use crate::NullEntry;

/// C-ABI launcher matching the generated declaration `void name(const void *data_p, void *back_p)`.
pub type LaunchFn = unsafe extern "C" fn(data: *const c_void, back: *mut c_void);

/// A registered launcher, addressed by its symbol name.
///
/// An entry whose launcher did not resolve is kept as a null entry so that
/// [`DispatchRegistry::validate_complete`](crate::DispatchRegistry::validate_complete) can report it.
#[derive(Clone, Debug)]
pub struct KernelEntry {
	symbol: Arc<str>,
	launcher: Option<LaunchFn>,
}

impl KernelEntry {
	pub fn new(symbol: impl Into<Arc<str>>, launcher: Option<LaunchFn>) -> Self {
		Self {
			symbol: symbol.into(),
			launcher,
		}
	}

	pub fn symbol(&self) -> &str {
		&self.symbol
	}

	pub fn launcher(&self) -> Option<LaunchFn> {
		self.launcher
	}

	pub fn is_null(&self) -> bool {
		self.launcher.is_none()
	}

	/// Calls the launcher.
	///
	/// # Safety
	///
	/// `data` and `back` must be the argument blocks the launcher's generated glue expects.
	pub unsafe fn launch(&self, data: *const c_void, back: *mut c_void) -> Result<(), NullEntry> {
		let launcher = self.launcher.ok_or_else(|| NullEntry {
			symbol: self.symbol.to_string(),
		})?;
		unsafe { launcher(data, back) };
		Ok(())
	}
}
