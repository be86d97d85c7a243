//! Code partitioning and emission for generated FFT kernels.
//!
//! # Purpose
//!
//! Turns a validated [`Catalog`] into named source artifacts and the [`KernelManifest`] of
//! launchers those artifacts define:
//!
//! | Artifact | Contents |
//! |----------|----------|
//! | `fftkern_kernel_*.h` | Kernel bodies from the [`KernelCodegen`] engine. |
//! | `kernel_launch_{precision}_{j}.cpp[.h]` | Small-kernel launchers, split across groups. |
//! | `kernel_launch_{precision}_large.cpp[.h]` | Blocked-kernel launchers incl. fused transposes. |
//! | `kernel_launch_{precision}_2D_{bucket}.cpp[.h]` | Fused 2-D launchers, one unit per radix bucket. |
//! | `kernel_launch_generator.h` | C declarations of every launcher. |
//! | `kernel_registry.cpp[.h]` | Registration of every launcher under its key. |
//! | `kernel_manifest.bin` | The manifest blob, written last by [`persist`]. |
//!
//! [`KernelManifest`]: fftkern_types::KernelManifest

mod artifact;
mod catalog;
pub mod codegen;
mod emitter;
mod error;
mod glue;
pub mod naming;
mod partition;

pub use artifact::{Artifact, ArtifactSink, DirSink, MemorySink, persist};
pub use catalog::{Catalog, Fused2dEntry, LargeEntry};
pub use codegen::{BlockComputeType, KernelCodegen, KernelParams, KernelSource, SkeletonCodegen};
pub use emitter::{DEFAULT_GROUP_COUNT, EmitOptions, EmitOutput, Emitter, MAX_GROUP_COUNT};
pub use error::{ArtifactFailure, CatalogError, CodegenError, EmitError, PersistError};
pub use partition::{PartitionRefused, partition};
