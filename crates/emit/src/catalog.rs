//! Generation catalog: which lengths and schemes to emit kernels for.
//!
//! Loaded from TOML. Top-level arrays must precede the `[platform]` table:
//!
//! ```toml
//! small = [1, 2, 4, 8, 4096]
//! large_1d = [{ length = 8192, scheme = "block_cc" }, { length = 16384, scheme = "block_rc" }]
//! fused_2d = [{ length1 = 64, length2 = 243, scheme = "fused_2d", precisions = ["single"] }]
//!
//! [platform]
//! max_work_group_size = 1024
//! ```

use std::collections::HashSet;
use std::path::Path;

use fftkern_specialize::PlatformLimits;
use fftkern_types::{DecompositionScheme, Precision};
use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// A large 1-D entry decomposed by a blocked scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LargeEntry {
	pub length: usize,
	pub scheme: DecompositionScheme,
}

/// A fused 2-D length pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fused2dEntry {
	pub length1: usize,
	pub length2: usize,
	pub scheme: DecompositionScheme,
	/// Restricts the entry to the listed precisions; absent means both.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub precisions: Option<Vec<Precision>>,
}

impl Fused2dEntry {
	pub fn new(length1: usize, length2: usize) -> Self {
		Self {
			length1,
			length2,
			scheme: DecompositionScheme::Fused2D,
			precisions: None,
		}
	}

	pub fn precisions(&self) -> &[Precision] {
		self.precisions.as_deref().unwrap_or(&Precision::ALL)
	}

	pub fn generates(&self, precision: Precision) -> bool {
		self.precisions().contains(&precision)
	}
}

/// Ordered input lists plus the platform they are generated for.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Catalog {
	pub small: Vec<usize>,
	pub large_1d: Vec<LargeEntry>,
	pub fused_2d: Vec<Fused2dEntry>,
	pub platform: PlatformLimits,
}

impl Catalog {
	/// Parses and validates a TOML catalog.
	pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
		let catalog: Self = toml::from_str(text)?;
		catalog.validate()?;
		Ok(catalog)
	}

	pub fn load(path: &Path) -> Result<Self, CatalogError> {
		let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&text)
	}

	pub fn validate(&self) -> Result<(), CatalogError> {
		self.platform.validate().map_err(CatalogError::Platform)?;

		let mut seen = HashSet::new();
		for (index, &len) in self.small.iter().enumerate() {
			if len == 0 {
				return Err(CatalogError::ZeroLength { list: "small", index });
			}
			if !seen.insert(len) {
				return Err(CatalogError::Duplicate {
					list: "small",
					entry: len.to_string(),
				});
			}
		}

		let mut seen = HashSet::new();
		for (index, entry) in self.large_1d.iter().enumerate() {
			if entry.length == 0 {
				return Err(CatalogError::ZeroLength { list: "large_1d", index });
			}
			if !matches!(entry.scheme, DecompositionScheme::BlockCC | DecompositionScheme::BlockRC) {
				return Err(CatalogError::WrongScheme {
					list: "large_1d",
					scheme: entry.scheme,
				});
			}
			if !seen.insert(*entry) {
				return Err(CatalogError::Duplicate {
					list: "large_1d",
					entry: format!("{} {}", entry.scheme, entry.length),
				});
			}
		}

		let mut seen = HashSet::new();
		for (index, entry) in self.fused_2d.iter().enumerate() {
			if entry.length1 == 0 || entry.length2 == 0 {
				return Err(CatalogError::ZeroLength { list: "fused_2d", index });
			}
			if entry.scheme != DecompositionScheme::Fused2D {
				return Err(CatalogError::WrongScheme {
					list: "fused_2d",
					scheme: entry.scheme,
				});
			}
			if entry.precisions().is_empty() {
				return Err(CatalogError::EmptyPrecisions { index });
			}
			let unique: HashSet<_> = entry.precisions().iter().collect();
			if !seen.insert((entry.length1, entry.length2)) || unique.len() != entry.precisions().len() {
				return Err(CatalogError::Duplicate {
					list: "fused_2d",
					entry: format!("{}x{}", entry.length1, entry.length2),
				});
			}
		}
		Ok(())
	}
}
