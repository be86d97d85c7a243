use fftkern_types::{DecompositionScheme, RadixFamilyBucket, TransformLength, TransposeMode, is_pow_of};
use tracing::debug;

use crate::UnsupportedConfiguration;

/// Radix pairs in the order they are tried; a pure-radix pair wins over any mixed bucket.
const BUCKET_RULES: [(usize, usize, RadixFamilyBucket); 9] = [
	(2, 2, RadixFamilyBucket::Pow2),
	(3, 3, RadixFamilyBucket::Pow3),
	(5, 5, RadixFamilyBucket::Pow5),
	(2, 3, RadixFamilyBucket::MixPow2Pow3),
	(3, 2, RadixFamilyBucket::MixPow3Pow2),
	(3, 5, RadixFamilyBucket::MixPow3Pow5),
	(5, 3, RadixFamilyBucket::MixPow5Pow3),
	(2, 5, RadixFamilyBucket::MixPow2Pow5),
	(5, 2, RadixFamilyBucket::MixPow5Pow2),
];

/// Returns true when a row-column kernel of `length` may fuse a diagonal transpose.
///
/// Every caller deciding diagonal generation or registration goes through this predicate.
pub fn is_diagonal_eligible(length: usize) -> bool {
	length.is_power_of_two()
}

/// Fused-transpose modes generated for a row-column kernel of `length`.
pub fn transpose_modes(length: usize) -> &'static [TransposeMode] {
	if is_diagonal_eligible(length) {
		&[TransposeMode::TileAligned, TransposeMode::Diagonal]
	} else {
		&[TransposeMode::TileAligned]
	}
}

/// Classifies a fused 2-D length pair into the bucket that shards its launcher.
pub fn classify_2d(len1: usize, len2: usize) -> Result<RadixFamilyBucket, UnsupportedConfiguration> {
	let bucket = BUCKET_RULES
		.iter()
		.find(|(r1, r2, _)| is_pow_of(len1, *r1) && is_pow_of(len2, *r2))
		.map(|&(_, _, bucket)| bucket)
		.ok_or(UnsupportedConfiguration {
			length: TransformLength::two(len1, len2),
			scheme: DecompositionScheme::Fused2D,
			reason: "length pair belongs to no radix family bucket",
		})?;
	debug!(len1, len2, %bucket, "classified 2D pair");
	Ok(bucket)
}
