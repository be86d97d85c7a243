//! Run-time dispatch from kernel specializations to compiled launchers.
//!
//! # Purpose
//!
//! A [`DispatchRegistry`] maps every [`SpecializationKey`] of a kernel manifest to the launcher
//! the emitted sources define for it. It is populated from the same manifest the emitter
//! returned, so registered keys and compiled launchers cannot drift apart.
//!
//! # Partitioning
//!
//! Entries are split by precision into a plain 1-D table, a fused 2-D table and three
//! fused-transpose tables ([`SubTable`]). Transpose tables are keyed by the orientation scheme.
//!
//! # Invariants
//!
//! - A key is stored at most once across all sub-tables.
//!   - Enforced in: [`DispatchRegistry::build`].
//!   - Tested by: `registry::tests::test_duplicate_key_is_fatal`
//!   - Failure symptom: a lookup returns a launcher for a different specialization.
//!
//! - First access builds the registry exactly once, even under concurrent callers.
//!   - Enforced in: [`LazyRegistry::get`].
//!   - Tested by: `lazy::tests::test_concurrent_first_access_builds_once`
//!   - Failure symptom: duplicated library loads or lookups against a partially built registry.
//!
//! [`SpecializationKey`]: fftkern_types::SpecializationKey

mod entry;
mod error;
mod lazy;
mod registry;
mod resolver;

pub use entry::{KernelEntry, LaunchFn};
pub use error::{LookupError, NullEntry, RegistryError};
pub use lazy::{BuildFn, LazyRegistry};
pub use registry::{DispatchRegistry, SubTable, TableStats};
pub use resolver::{DylibResolver, KernelResolver, SymbolTable};
