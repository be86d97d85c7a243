use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

/// Radix family of a fused 2-D length pair.
///
/// Buckets only decide which compilation unit a 2-D launcher lands in. Mixed buckets keep the
/// order of the pair: `mix_pow2_3` holds `(2^a, 3^b)` and `mix_pow3_2` holds `(3^a, 2^b)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter, IntoStaticStr)]
pub enum RadixFamilyBucket {
	#[strum(serialize = "pow2")]
	Pow2,
	#[strum(serialize = "pow3")]
	Pow3,
	#[strum(serialize = "pow5")]
	Pow5,
	#[strum(serialize = "mix_pow2_3")]
	MixPow2Pow3,
	#[strum(serialize = "mix_pow3_2")]
	MixPow3Pow2,
	#[strum(serialize = "mix_pow3_5")]
	MixPow3Pow5,
	#[strum(serialize = "mix_pow5_3")]
	MixPow5Pow3,
	#[strum(serialize = "mix_pow2_5")]
	MixPow2Pow5,
	#[strum(serialize = "mix_pow5_2")]
	MixPow5Pow2,
}

impl RadixFamilyBucket {
	/// Name used in 2-D unit artifact names.
	pub fn name(self) -> &'static str {
		self.into()
	}

	pub fn is_mixed(self) -> bool {
		!matches!(self, Self::Pow2 | Self::Pow3 | Self::Pow5)
	}
}
