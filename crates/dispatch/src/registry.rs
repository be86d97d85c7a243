//! The dispatch registry: specialization key to launcher.
//!
//! Built once from a [`KernelManifest`] and immutable afterwards. Lookups take `&self` and need
//! no locking.

use fftkern_types::{KernelManifest, Precision, SpecializationKey, TransposeMode};
use rustc_hash::FxHashMap as HashMap;
use tracing::{debug, info};

use crate::{KernelEntry, KernelResolver, LookupError, RegistryError};

mod table;

pub use table::SubTable;

/// Entry counts of one sub-table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableStats {
	pub table: SubTable,
	pub len: usize,
	pub null: usize,
}

/// Partitioned map from [`SpecializationKey`] to [`KernelEntry`].
pub struct DispatchRegistry {
	tables: [HashMap<SpecializationKey, KernelEntry>; SubTable::COUNT],
	/// Owns whatever the resolved launchers point into.
	_resolver: Box<dyn KernelResolver + Send + Sync>,
}

impl DispatchRegistry {
	/// Builds the registry from the launchers a manifest names.
	///
	/// A symbol the resolver cannot find is stored as a null entry, reported later by
	/// [`validate_complete`](Self::validate_complete). Duplicate or unroutable keys fail the build.
	pub fn build<R>(manifest: &KernelManifest, resolver: R) -> Result<Self, RegistryError>
	where
		R: KernelResolver + Send + Sync + 'static,
	{
		let mut tables: [HashMap<SpecializationKey, KernelEntry>; SubTable::COUNT] = Default::default();
		for entry in manifest {
			let index = SubTable::route(&entry.key)
				.and_then(SubTable::index)
				.ok_or_else(|| RegistryError::Unroutable {
					key: entry.key,
					symbol: entry.symbol.clone(),
				})?;
			let launcher = resolver.resolve(&entry.symbol);
			if launcher.is_none() {
				debug!(key = %entry.key, symbol = %entry.symbol, "launcher not resolved");
			}
			let slot = &mut tables[index];
			if let Some(existing) = slot.get(&entry.key) {
				return Err(RegistryError::DuplicateKey {
					key: entry.key,
					first: existing.symbol().to_string(),
					second: entry.symbol.clone(),
				});
			}
			slot.insert(entry.key, KernelEntry::new(entry.symbol.as_str(), launcher));
		}

		let registry = Self {
			tables,
			_resolver: Box::new(resolver),
		};
		info!(entries = registry.len(), "built kernel dispatch registry");
		Ok(registry)
	}

	/// Decodes a manifest blob and builds the registry from it.
	pub fn from_blob<R>(blob: &[u8], resolver: R) -> Result<Self, RegistryError>
	where
		R: KernelResolver + Send + Sync + 'static,
	{
		let manifest = KernelManifest::from_blob(blob)?;
		Self::build(&manifest, resolver)
	}

	/// Returns the entry for `key`, if it was populated.
	pub fn find(&self, key: &SpecializationKey) -> Option<&KernelEntry> {
		self.slot(SubTable::route(key)?)?.get(key)
	}

	pub fn lookup(&self, key: &SpecializationKey) -> Result<&KernelEntry, LookupError> {
		self.find(key).ok_or(LookupError::NotFound { key: *key })
	}

	/// Returns true when `key` is populated for `precision`; the key's own precision is ignored.
	pub fn exists(&self, precision: Precision, key: &SpecializationKey) -> bool {
		self.find(&key.with_precision(precision)).is_some()
	}

	/// Looks `key` up in the transpose sub-table of `mode`.
	///
	/// `key` names the orientation scheme; its own transpose field is replaced by `mode`.
	/// [`TransposeMode::None`] names no transpose sub-table and is never found.
	pub fn lookup_transpose(&self, key: &SpecializationKey, mode: TransposeMode) -> Result<&KernelEntry, LookupError> {
		let keyed = key.with_transpose(mode);
		let not_found = LookupError::NotFound { key: keyed };
		SubTable::transpose(key.precision, mode)
			.and_then(|table| self.slot(table))
			.and_then(|entries| entries.get(&keyed))
			.ok_or(not_found)
	}

	/// Fails on the first populated entry whose launcher is null, in sub-table order.
	pub fn validate_complete(&self) -> Result<(), RegistryError> {
		for table in SubTable::ALL {
			let mut nulls: Vec<_> = self.table(table).filter(|(_, e)| e.is_null()).collect();
			nulls.sort_by_key(|(key, _)| **key);
			if let Some((key, entry)) = nulls.first() {
				return Err(RegistryError::NullEntry {
					table,
					key: **key,
					symbol: entry.symbol().to_string(),
				});
			}
		}
		Ok(())
	}

	/// Entries of one sub-table, in no particular order. `Transpose(_, TransposeMode::None)` is
	/// always empty.
	pub fn table(&self, table: SubTable) -> impl Iterator<Item = (&SpecializationKey, &KernelEntry)> + '_ {
		self.slot(table).into_iter().flatten()
	}

	fn slot(&self, table: SubTable) -> Option<&HashMap<SpecializationKey, KernelEntry>> {
		table.index().map(|index| &self.tables[index])
	}

	pub fn stats(&self) -> Vec<TableStats> {
		SubTable::ALL
			.iter()
			.map(|&table| TableStats {
				table,
				len: self.table(table).count(),
				null: self.table(table).filter(|(_, e)| e.is_null()).count(),
			})
			.collect()
	}

	pub fn len(&self) -> usize {
		self.tables.iter().map(HashMap::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.tables.iter().all(HashMap::is_empty)
	}
}

impl std::fmt::Debug for DispatchRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DispatchRegistry").field("stats", &self.stats()).finish_non_exhaustive()
	}
}
