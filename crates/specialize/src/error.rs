use fftkern_types::{DecompositionScheme, TransformLength};

/// No work-group geometry satisfies the divisibility invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
	#[error("transform length must be positive")]
	ZeroLength,
	#[error("platform allows no work-group lanes")]
	NoLanes,
	#[error("invalid geometry for length {length}: wgs={work_group_size} nt={transforms_per_group}")]
	Invariant {
		length: usize,
		work_group_size: usize,
		transforms_per_group: usize,
	},
	#[error("platform work-group limit {max_work_group_size} exceeds {ceiling}")]
	LimitTooLarge { max_work_group_size: usize, ceiling: usize },
	#[error("no geometry found for length {length} within {max_work_group_size} lanes")]
	NotFound { length: usize, max_work_group_size: usize },
}

/// A scheme or classification combination the generator has no routing rule for.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported configuration: {scheme} {length}: {reason}")]
pub struct UnsupportedConfiguration {
	pub length: TransformLength,
	pub scheme: DecompositionScheme,
	pub reason: &'static str,
}
