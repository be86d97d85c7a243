use std::fmt;

use fftkern_types::{DecompositionScheme, Precision, SpecializationKey, TransposeMode};

/// Registry partition a key lives in.
///
/// Every precision owns a plain 1-D table, a fused 2-D table and one table per fused-transpose
/// mode. Keys never cross precision partitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubTable {
	Plain(Precision),
	Fused2D(Precision),
	Transpose(Precision, TransposeMode),
}

impl SubTable {
	pub const COUNT: usize = 10;

	pub const ALL: [Self; Self::COUNT] = [
		Self::Plain(Precision::Single),
		Self::Fused2D(Precision::Single),
		Self::Transpose(Precision::Single, TransposeMode::TileAligned),
		Self::Transpose(Precision::Single, TransposeMode::TileUnaligned),
		Self::Transpose(Precision::Single, TransposeMode::Diagonal),
		Self::Plain(Precision::Double),
		Self::Fused2D(Precision::Double),
		Self::Transpose(Precision::Double, TransposeMode::TileAligned),
		Self::Transpose(Precision::Double, TransposeMode::TileUnaligned),
		Self::Transpose(Precision::Double, TransposeMode::Diagonal),
	];

	/// Sub-table `key` belongs in, or `None` when its fields do not describe a dispatchable kernel.
	pub fn route(key: &SpecializationKey) -> Option<Self> {
		let p = key.precision;
		match (key.scheme, key.transpose, key.length.is_2d()) {
			(DecompositionScheme::Stockham | DecompositionScheme::BlockCC | DecompositionScheme::BlockRC, TransposeMode::None, false) => {
				Some(Self::Plain(p))
			}
			(DecompositionScheme::Fused2D, TransposeMode::None, true) => Some(Self::Fused2D(p)),
			(DecompositionScheme::TransposeXyZ | DecompositionScheme::TransposeZXy, mode, false) if mode.is_fused() => {
				Some(Self::Transpose(p, mode))
			}
			_ => None,
		}
	}

	/// Transpose sub-table of `mode`; `None` for [`TransposeMode::None`].
	pub fn transpose(precision: Precision, mode: TransposeMode) -> Option<Self> {
		mode.is_fused().then_some(Self::Transpose(precision, mode))
	}

	pub fn precision(self) -> Precision {
		match self {
			Self::Plain(p) | Self::Fused2D(p) | Self::Transpose(p, _) => p,
		}
	}

	/// Storage slot of the sub-table; `None` for `Transpose(_, TransposeMode::None)`, which names
	/// no table.
	pub(crate) fn index(self) -> Option<usize> {
		let kind = match self {
			Self::Plain(_) => 0,
			Self::Fused2D(_) => 1,
			Self::Transpose(_, TransposeMode::None) => return None,
			Self::Transpose(_, TransposeMode::TileAligned) => 2,
			Self::Transpose(_, TransposeMode::TileUnaligned) => 3,
			Self::Transpose(_, TransposeMode::Diagonal) => 4,
		};
		Some(match self.precision() {
			Precision::Single => kind,
			Precision::Double => 5 + kind,
		})
	}
}

impl fmt::Display for SubTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "kernel_map_{}", self.precision())?;
		match self {
			Self::Plain(_) => Ok(()),
			Self::Fused2D(_) => f.write_str("_2D"),
			Self::Transpose(_, mode) => write!(f, "_transpose_{mode}"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_indices_match_all_order() {
		for (idx, table) in SubTable::ALL.iter().enumerate() {
			assert_eq!(table.index(), Some(idx));
		}
		for p in Precision::ALL {
			assert_eq!(SubTable::Transpose(p, TransposeMode::None).index(), None);
		}
	}

	#[test]
	fn test_routing() {
		let p = Precision::Double;
		assert_eq!(SubTable::route(&SpecializationKey::stockham(64, p)), Some(SubTable::Plain(p)));
		assert_eq!(SubTable::route(&SpecializationKey::fused_2d(64, 81, p)), Some(SubTable::Fused2D(p)));
		assert_eq!(
			SubTable::route(&SpecializationKey::transpose(
				128,
				DecompositionScheme::TransposeXyZ,
				TransposeMode::Diagonal,
				p
			)),
			Some(SubTable::Transpose(p, TransposeMode::Diagonal))
		);
		// Orientation without a mode, a mode on a plain scheme, and a 1-D fused key are unroutable.
		assert_eq!(
			SubTable::route(&SpecializationKey::plain(128, DecompositionScheme::TransposeZXy, p)),
			None
		);
		assert_eq!(
			SubTable::route(&SpecializationKey::plain(128, DecompositionScheme::BlockRC, p).with_transpose(TransposeMode::TileAligned)),
			None
		);
		assert_eq!(SubTable::route(&SpecializationKey::plain(64, DecompositionScheme::Fused2D, p)), None);
	}

	#[test]
	fn test_table_names() {
		assert_eq!(SubTable::Plain(Precision::Single).to_string(), "kernel_map_single");
		assert_eq!(SubTable::Fused2D(Precision::Double).to_string(), "kernel_map_double_2D");
		assert_eq!(
			SubTable::Transpose(Precision::Single, TransposeMode::TileUnaligned).to_string(),
			"kernel_map_single_transpose_tile_unaligned"
		);
	}
}
