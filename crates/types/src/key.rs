use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DecompositionScheme, Precision, TransformLength, TransposeMode};

/// Identity of one dispatchable kernel entry.
///
/// Every field takes part in equality and hashing independently; no field is folded into
/// another's bit range, so lengths of any width never alias a different scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpecializationKey {
	pub length: TransformLength,
	pub scheme: DecompositionScheme,
	pub precision: Precision,
	pub transpose: TransposeMode,
}

impl SpecializationKey {
	pub const fn new(length: TransformLength, scheme: DecompositionScheme, precision: Precision, transpose: TransposeMode) -> Self {
		Self {
			length,
			scheme,
			precision,
			transpose,
		}
	}

	/// Key of a 1-D kernel without transpose fusion.
	pub const fn plain(len: usize, scheme: DecompositionScheme, precision: Precision) -> Self {
		Self::new(TransformLength::one(len), scheme, precision, TransposeMode::None)
	}

	pub const fn stockham(len: usize, precision: Precision) -> Self {
		Self::plain(len, DecompositionScheme::Stockham, precision)
	}

	/// Key of a row-column kernel fused with a 3-D transpose in the given orientation.
	pub const fn transpose(len: usize, orientation: DecompositionScheme, mode: TransposeMode, precision: Precision) -> Self {
		Self::new(TransformLength::one(len), orientation, precision, mode)
	}

	pub const fn fused_2d(len1: usize, len2: usize, precision: Precision) -> Self {
		Self::new(TransformLength::two(len1, len2), DecompositionScheme::Fused2D, precision, TransposeMode::None)
	}

	pub fn with_precision(self, precision: Precision) -> Self {
		Self { precision, ..self }
	}

	pub fn with_transpose(self, transpose: TransposeMode) -> Self {
		Self { transpose, ..self }
	}
}

impl fmt::Display for SpecializationKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {} {}", self.precision, self.scheme, self.length)?;
		if self.transpose.is_fused() {
			write!(f, " {}", self.transpose)?;
		}
		Ok(())
	}
}
