use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Strategy used to compute a transform.
///
/// Catalog inputs only ever name [`Stockham`](Self::Stockham), [`BlockCC`](Self::BlockCC),
/// [`BlockRC`](Self::BlockRC) and [`Fused2D`](Self::Fused2D). The two transpose orientations key
/// the fused-transpose sub-tables of a blocked row-column kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum DecompositionScheme {
	/// Whole transform in one kernel (small sizes).
	#[serde(rename = "stockham")]
	#[strum(serialize = "stockham")]
	Stockham,
	/// Column-column blocked kernel for large 1-D transforms.
	#[serde(rename = "block_cc")]
	#[strum(serialize = "block_cc")]
	BlockCC,
	/// Row-column blocked kernel for large 1-D transforms; supports transpose fusion.
	#[serde(rename = "block_rc")]
	#[strum(serialize = "block_rc")]
	BlockRC,
	/// Row-column kernel fused with an XY→Z transpose of a 3-D transform.
	#[serde(rename = "transpose_xy_z")]
	#[strum(serialize = "transpose_xy_z")]
	TransposeXyZ,
	/// Row-column kernel fused with a Z→XY transpose of a 3-D transform.
	#[serde(rename = "transpose_z_xy")]
	#[strum(serialize = "transpose_z_xy")]
	TransposeZXy,
	/// Single kernel covering both dimensions of a 2-D transform.
	#[serde(rename = "fused_2d")]
	#[strum(serialize = "fused_2d")]
	Fused2D,
}

impl DecompositionScheme {
	/// Orientations a fused-transpose `BlockRC` kernel is generated in.
	pub const TRANSPOSE_ORIENTATIONS: [Self; 2] = [Self::TransposeXyZ, Self::TransposeZXy];

	/// Scheme part of a launcher symbol.
	pub fn shortcode(self) -> &'static str {
		match self {
			Self::Stockham => "stoc",
			Self::BlockCC => "sbcc",
			Self::BlockRC => "sbrc",
			Self::TransposeXyZ => "sbrc3d_fft_trans_xy_z",
			Self::TransposeZXy => "sbrc3d_fft_trans_z_xy",
			Self::Fused2D => "2D",
		}
	}

	/// Variant argument the large-kernel launcher macro receives for row-column kernels.
	pub fn sbrc_variant(self) -> Option<&'static str> {
		match self {
			Self::BlockRC => Some("SBRC_2D"),
			Self::TransposeXyZ => Some("SBRC_3D_FFT_TRANS_XY_Z"),
			Self::TransposeZXy => Some("SBRC_3D_FFT_TRANS_Z_XY"),
			_ => None,
		}
	}

	/// Suffix appended to kernel-body file and device entry names of blocked kernels.
	pub fn name_suffix(self) -> &'static str {
		match self {
			Self::BlockCC => "_sbcc",
			Self::BlockRC | Self::TransposeXyZ | Self::TransposeZXy => "_sbrc",
			Self::Stockham | Self::Fused2D => "",
		}
	}

	/// Returns true for the fused-transpose orientations.
	pub fn is_transpose_orientation(self) -> bool {
		matches!(self, Self::TransposeXyZ | Self::TransposeZXy)
	}

	/// Returns true when launchers of this scheme run out-of-place.
	pub fn is_out_of_place(self) -> bool {
		matches!(self, Self::BlockRC | Self::TransposeXyZ | Self::TransposeZXy)
	}
}

/// Arithmetic precision of a kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString, EnumIter, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Precision {
	Single,
	Double,
}

impl Precision {
	pub const ALL: [Self; 2] = [Self::Single, Self::Double];

	/// Precision part of a launcher symbol.
	pub fn shortcode(self) -> &'static str {
		match self {
			Self::Single => "sp",
			Self::Double => "dp",
		}
	}

	/// Device complex type the launcher glue is instantiated with.
	pub fn complex_type(self) -> &'static str {
		match self {
			Self::Single => "float2",
			Self::Double => "double2",
		}
	}

	/// Lowercase name used in artifact names and generated comments.
	pub fn name(self) -> &'static str {
		self.into()
	}
}

/// Fused-transpose strategy of a row-column kernel.
///
/// Diagonal transposes are the fastest but need power-of-two cube sizes; tile-aligned
/// transposes need the row count to be a multiple of the tile; tile-unaligned ones have no
/// structural requirement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransposeMode {
	#[default]
	None,
	TileAligned,
	TileUnaligned,
	Diagonal,
}

impl TransposeMode {
	/// Modes backed by a transpose sub-table in the registry.
	pub const FUSED: [Self; 3] = [Self::TileAligned, Self::TileUnaligned, Self::Diagonal];

	/// Transpose part of a launcher symbol; empty for [`TransposeMode::None`].
	pub fn shortcode(self) -> &'static str {
		match self {
			Self::None => "",
			mode => mode.into(),
		}
	}

	/// Argument the large-kernel launcher macro receives.
	///
	/// Plain row-column kernels still pass `TILE_ALIGNED`; the macro ignores it for them.
	pub fn macro_arg(self) -> &'static str {
		match self {
			Self::None | Self::TileAligned => "TILE_ALIGNED",
			Self::TileUnaligned => "TILE_UNALIGNED",
			Self::Diagonal => "DIAGONAL",
		}
	}

	pub fn is_fused(self) -> bool {
		self != Self::None
	}
}
