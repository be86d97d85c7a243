//! Specialization data model for the FFT kernel generator.
//!
//! Everything the generator decides and the dispatch registry looks up is expressed with the
//! types in this crate:
//!
//! | Type | Role |
//! |------|------|
//! | [`TransformLength`] | One length, or an ordered pair for fused 2-D kernels. |
//! | [`DecompositionScheme`] | How a transform is computed (single kernel, blocked, fused 2-D). |
//! | [`Precision`] | Single or double; every specialization exists once per precision. |
//! | [`TransposeMode`] | Fused-transpose strategy of a blocked row-column kernel. |
//! | [`RadixFamilyBucket`] | Shard a 2-D length pair is routed to. |
//! | [`SpecializationKey`] | Full identity of one dispatchable kernel variant. |
//! | [`KernelManifest`] | The `(key, symbol)` pairs actually generated for a build. |
//!
//! # Invariants
//!
//! - Key equality and hashing are structural over every field.
//!   - Enforced in: `#[derive(PartialEq, Eq, Hash)]` on [`SpecializationKey`] and its fields.
//!   - Tested by: `key::tests::prop_distinct_keys_never_equal`
//!   - Failure symptom: two specializations resolve to the same launcher.

mod bucket;
mod key;
mod length;
pub mod manifest;
mod scheme;

pub use bucket::RadixFamilyBucket;
pub use key::SpecializationKey;
pub use length::{TransformLength, is_pow2, is_pow_of};
pub use manifest::{KernelManifest, ManifestEntry, ManifestError};
pub use scheme::{DecompositionScheme, Precision, TransposeMode};
