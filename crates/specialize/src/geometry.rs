//! Work-group geometry selection.
//!
//! A geometry is accepted only when the transforms of one work-group cover every lane an exact
//! number of times. Known-good geometries for common lengths live in a curated table; everything
//! else is derived.

use fftkern_types::{DecompositionScheme, is_pow_of, is_pow2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::GeometryError;

/// Platform work-group limit below which the curated table is not trusted.
pub const CURATED_TABLE_MIN_WORK_GROUP: usize = 256;

/// Upper bound on transforms per group accepted by the exhaustive search.
pub const MAX_TRANSFORMS_PER_GROUP: usize = 64;

/// Largest work-group limit a platform may declare.
pub const MAX_PLATFORM_WORK_GROUP: usize = 1 << 16;

/// Curated `(length, work_group_size, transforms_per_group)` entries.
const CURATED: &[(usize, usize, usize)] = &[
	(1, 64, 64),
	(2, 64, 64),
	(4, 64, 32),
	(8, 64, 32),
	(16, 64, 16),
	(32, 64, 16),
	(64, 64, 4),
	(128, 64, 4),
	(256, 64, 1),
	(512, 64, 1),
	(1024, 128, 1),
	(2048, 256, 1),
	(4096, 256, 1),
	(81, 108, 4),
	(243, 81, 4),
	(729, 243, 1),
	(125, 125, 2),
	(625, 125, 1),
];

/// Target platform constraints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlatformLimits {
	pub max_work_group_size: usize,
}

impl Default for PlatformLimits {
	fn default() -> Self {
		Self { max_work_group_size: 1024 }
	}
}

impl PlatformLimits {
	/// Rejects a zero limit or one above [`MAX_PLATFORM_WORK_GROUP`].
	pub fn validate(&self) -> Result<(), GeometryError> {
		match self.max_work_group_size {
			0 => Err(GeometryError::NoLanes),
			max if max > MAX_PLATFORM_WORK_GROUP => Err(GeometryError::LimitTooLarge {
				max_work_group_size: max,
				ceiling: MAX_PLATFORM_WORK_GROUP,
			}),
			_ => Ok(()),
		}
	}
}

/// Work-group size and number of transforms one work-group processes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeometryParams {
	work_group_size: usize,
	transforms_per_group: usize,
}

impl GeometryParams {
	/// Builds a geometry for `length`, rejecting any pair that breaks the lane invariants.
	pub fn new(length: usize, work_group_size: usize, transforms_per_group: usize) -> Result<Self, GeometryError> {
		let params = Self {
			work_group_size,
			transforms_per_group,
		};
		params.check(length)?;
		Ok(params)
	}

	/// Re-checks the invariants against `length`.
	pub fn check(&self, length: usize) -> Result<(), GeometryError> {
		let covered = self.transforms_per_group.checked_mul(length);
		let valid = self.work_group_size > 0
			&& self.transforms_per_group > 0
			&& covered.is_some_and(|c| c >= self.work_group_size && c % self.work_group_size == 0);
		if valid {
			Ok(())
		} else {
			Err(GeometryError::Invariant {
				length,
				work_group_size: self.work_group_size,
				transforms_per_group: self.transforms_per_group,
			})
		}
	}

	pub fn work_group_size(&self) -> usize {
		self.work_group_size
	}

	pub fn transforms_per_group(&self) -> usize {
		self.transforms_per_group
	}
}

/// Where a selected geometry came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometrySource {
	Table,
	Derived,
}

/// Result of [`select`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
	pub params: GeometryParams,
	pub source: GeometrySource,
}

/// Selects the geometry for one transform dimension.
///
/// The curated table is consulted for every scheme unless the platform limit is below
/// [`CURATED_TABLE_MIN_WORK_GROUP`] or the tabulated size exceeds it.
pub fn select(length: usize, scheme: DecompositionScheme, limits: &PlatformLimits) -> Result<Selection, GeometryError> {
	if length == 0 {
		return Err(GeometryError::ZeroLength);
	}
	limits.validate()?;

	let selection = match curated(length, limits) {
		Some(params) => Selection {
			params,
			source: GeometrySource::Table,
		},
		None => Selection {
			params: derive(length, limits.max_work_group_size)?,
			source: GeometrySource::Derived,
		},
	};

	debug!(
		length,
		%scheme,
		wgs = selection.params.work_group_size,
		nt = selection.params.transforms_per_group,
		source = ?selection.source,
		"selected geometry"
	);
	Ok(selection)
}

fn curated(length: usize, limits: &PlatformLimits) -> Option<GeometryParams> {
	if limits.max_work_group_size < CURATED_TABLE_MIN_WORK_GROUP {
		return None;
	}
	let &(_, wgs, nt) = CURATED.iter().find(|(len, _, _)| *len == length)?;
	if wgs > limits.max_work_group_size {
		return None;
	}
	GeometryParams::new(length, wgs, nt).ok()
}

fn derive(length: usize, max: usize) -> Result<GeometryParams, GeometryError> {
	let candidate = family_candidate(length, max)
		.filter(|&(wgs, _)| wgs <= max)
		.and_then(|(wgs, nt)| GeometryParams::new(length, wgs, nt).ok());
	match candidate {
		Some(params) => Ok(params),
		None => search(length, max),
	}
}

/// Closed-form candidate for single-radix lengths.
fn family_candidate(length: usize, max: usize) -> Option<(usize, usize)> {
	if length == 1 {
		return Some((64, 64));
	}
	if is_pow2(length) {
		return Some(match length {
			l if l >= 1024 => (max.min(256), 1),
			512 => (64, 1),
			l if l >= 16 => (64, 256 / l),
			l => (64, 128 / l),
		});
	}
	let (radix, wgs) = if is_pow_of(length, 3) {
		(3, if max >= 256 { 243 } else { 27 })
	} else if is_pow_of(length, 5) {
		(5, if max >= 128 { 125 } else { 25 })
	} else if is_pow_of(length, 7) {
		(7, 49)
	} else {
		return None;
	};
	let span = radix * wgs;
	let nt = if length >= span { 1 } else { span / length };
	Some((wgs, nt))
}

/// Largest work-group size whose smallest covering batch stays within
/// [`MAX_TRANSFORMS_PER_GROUP`].
///
/// `wgs / gcd(length, wgs) <= 64` needs `wgs <= 64 * length`, which bounds the walk.
fn search(length: usize, max: usize) -> Result<GeometryParams, GeometryError> {
	let start = max.min(MAX_TRANSFORMS_PER_GROUP.saturating_mul(length));
	(1..=start)
		.rev()
		.map(|wgs| (wgs, wgs / gcd(length, wgs)))
		.find(|&(_, nt)| nt <= MAX_TRANSFORMS_PER_GROUP)
		.and_then(|(wgs, nt)| GeometryParams::new(length, wgs, nt).ok())
		.ok_or(GeometryError::NotFound {
			length,
			max_work_group_size: max,
		})
}

fn gcd(mut a: usize, mut b: usize) -> usize {
	while b != 0 {
		(a, b) = (b, a % b);
	}
	a
}
