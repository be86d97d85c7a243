//! Specialization decisions for generated FFT kernels.
//!
//! # Purpose
//!
//! Turns a transform length (or 2-D length pair) and a decomposition scheme into the metadata the
//! emitter needs: a work-group geometry, the fused-transpose modes a row-column kernel is
//! generated in, and the radix family bucket that shards fused 2-D launchers.
//!
//! Everything here is a pure function of its inputs and the [`PlatformLimits`].
//!
//! # Invariants
//!
//! - Every selected geometry satisfies `nt * len >= wgs` and `(nt * len) % wgs == 0`, both positive.
//!   - Enforced in: [`GeometryParams::new`].
//!   - Tested by: `geometry::tests::prop_selected_geometry_satisfies_invariants`
//!   - Failure symptom: work-group lanes index past the batch or leave transforms unprocessed.
//!
//! - Diagonal transpose fusion is offered exactly for power-of-two lengths.
//!   - Enforced in: [`is_diagonal_eligible`].
//!   - Tested by: `classify::tests::prop_diagonal_iff_pow2`
//!   - Failure symptom: a diagonal launcher is registered for a length the kernel cannot tile.

mod classify;
mod error;
mod geometry;

pub use classify::{classify_2d, is_diagonal_eligible, transpose_modes};
pub use error::{GeometryError, UnsupportedConfiguration};
pub use geometry::{CURATED_TABLE_MIN_WORK_GROUP, GeometryParams, GeometrySource, MAX_PLATFORM_WORK_GROUP, MAX_TRANSFORMS_PER_GROUP, PlatformLimits, Selection, select};
