use std::fmt;

use serde::{Deserialize, Serialize};

/// Transform length of a specialization.
///
/// 1-D kernels carry a single length; fused 2-D kernels carry an ordered pair, so `64×128` and
/// `128×64` are distinct specializations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransformLength {
	pub primary: usize,
	pub secondary: Option<usize>,
}

impl TransformLength {
	pub const fn one(len: usize) -> Self {
		Self { primary: len, secondary: None }
	}

	pub const fn two(len1: usize, len2: usize) -> Self {
		Self {
			primary: len1,
			secondary: Some(len2),
		}
	}

	pub fn is_2d(&self) -> bool {
		self.secondary.is_some()
	}

	/// Returns true when every component is non-zero.
	pub fn is_positive(&self) -> bool {
		self.primary > 0 && self.secondary.is_none_or(|l| l > 0)
	}

	/// Length part of generated names: `64` or `64_128`.
	pub fn name_part(&self) -> String {
		match self.secondary {
			None => self.primary.to_string(),
			Some(len2) => format!("{}_{}", self.primary, len2),
		}
	}
}

impl fmt::Display for TransformLength {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.secondary {
			None => write!(f, "{}", self.primary),
			Some(len2) => write!(f, "{}x{}", self.primary, len2),
		}
	}
}

/// Returns true when `n` is an exact power of two (`1` included).
pub fn is_pow2(n: usize) -> bool {
	n.is_power_of_two()
}

/// Returns true when `n` is an exact power of `base` (`base^0 = 1` included).
pub fn is_pow_of(n: usize, base: usize) -> bool {
	debug_assert!(base >= 2);
	if n == 0 {
		return false;
	}
	let mut n = n;
	while n % base == 0 {
		n /= base;
	}
	n == 1
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_pow_predicates() {
		assert!(is_pow2(1));
		assert!(is_pow2(4096));
		assert!(!is_pow2(0));
		assert!(!is_pow2(4095));
		assert!(is_pow_of(243, 3));
		assert!(is_pow_of(1, 5));
		assert!(!is_pow_of(0, 3));
		assert!(!is_pow_of(250, 5));
		assert!(is_pow_of(3125, 5));
	}

	#[test]
	fn test_name_part_and_display() {
		assert_eq!(TransformLength::one(64).name_part(), "64");
		assert_eq!(TransformLength::two(64, 243).name_part(), "64_243");
		assert_eq!(TransformLength::two(64, 243).to_string(), "64x243");
		assert!(!TransformLength::two(64, 0).is_positive());
	}
}
