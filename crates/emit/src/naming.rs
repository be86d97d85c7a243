//! Deterministic names of everything the emitter produces.
//!
//! Launcher symbols are an injective function of the specialization key: every key field maps to
//! its own name segment and scheme shortcodes are pairwise distinct.

use fftkern_types::{DecompositionScheme, Precision, SpecializationKey, TransformLength};

/// Prefix of every launcher symbol.
pub const SYMBOL_PREFIX: &str = "fftkern_dfn";

/// Declaration header listing every launcher.
pub const DECLARATION_HEADER: &str = "kernel_launch_generator.h";

/// Stem of the registration unit.
pub const REGISTRY_STEM: &str = "kernel_registry";

/// Binary manifest consumed by the dispatch registry.
pub const MANIFEST_BLOB: &str = "kernel_manifest.bin";

/// Header providing the launcher generator macros.
pub const LAUNCH_MACROS_HEADER: &str = "kernel_launch.h";

/// Launcher symbol of `key`, e.g. `fftkern_dfn_sp_op_ci_ci_sbrc3d_fft_trans_xy_z_diagonal_128`.
pub fn launcher_symbol(key: &SpecializationKey) -> String {
	let layout = if key.scheme.is_out_of_place() { "op_ci_ci" } else { "ci_ci" };
	let mut symbol = format!("{SYMBOL_PREFIX}_{}_{layout}_{}", key.precision.shortcode(), key.scheme.shortcode());
	if key.transpose.is_fused() {
		symbol.push('_');
		symbol.push_str(key.transpose.shortcode());
	}
	symbol.push('_');
	symbol.push_str(&key.length.name_part());
	symbol
}

/// Kernel body header of a catalog entry, e.g. `fftkern_kernel_8192_sbcc.h`.
pub fn kernel_body_name(length: TransformLength, scheme: DecompositionScheme) -> String {
	match length.secondary {
		Some(len2) => format!("fftkern_kernel_2D_{}_{len2}.h", length.primary),
		None => format!("fftkern_kernel_{}{}.h", length.primary, scheme.name_suffix()),
	}
}

/// Device entry points the launcher glue of `scheme` references for `length`.
///
/// Order: forward before backward, in-place before out-of-place. Row-column kernels only run
/// out-of-place.
pub fn device_entry_points(length: TransformLength, scheme: DecompositionScheme) -> Vec<String> {
	let tail = match length.secondary {
		Some(len2) => format!("_2D_{}_{len2}", length.primary),
		None => format!("_len{}{}", length.primary, scheme.name_suffix()),
	};
	let placements: &[&str] = if scheme.is_out_of_place() { &["op"] } else { &["ip", "op"] };
	let mut entries = Vec::with_capacity(placements.len() * 2);
	for placement in placements {
		for direction in ["fwd", "back"] {
			entries.push(format!("fft_{direction}_{placement}{tail}"));
		}
	}
	entries
}

/// `kernel_launch_{precision}_{suffix}` stem of a launcher unit.
pub fn unit_stem(precision: Precision, suffix: &str) -> String {
	format!("kernel_launch_{}_{suffix}", precision.name())
}

/// Header and source artifact names of a unit stem.
pub fn unit_files(stem: &str) -> (String, String) {
	(format!("{stem}.cpp.h"), format!("{stem}.cpp"))
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use fftkern_types::TransposeMode;
	use proptest::prelude::*;

	use super::*;

	/// Every key shape the emitter can produce for `len1` (and `len2` for 2-D).
	fn all_keys(len1: usize, len2: usize) -> Vec<SpecializationKey> {
		let mut keys = Vec::new();
		for precision in Precision::ALL {
			keys.push(SpecializationKey::stockham(len1, precision));
			keys.push(SpecializationKey::plain(len1, DecompositionScheme::BlockCC, precision));
			keys.push(SpecializationKey::plain(len1, DecompositionScheme::BlockRC, precision));
			for orientation in DecompositionScheme::TRANSPOSE_ORIENTATIONS {
				for mode in TransposeMode::FUSED {
					keys.push(SpecializationKey::transpose(len1, orientation, mode, precision));
				}
			}
			keys.push(SpecializationKey::fused_2d(len1, len2, precision));
		}
		keys
	}

	#[test]
	fn test_launcher_symbols() {
		assert_eq!(launcher_symbol(&SpecializationKey::stockham(4096, Precision::Single)), "fftkern_dfn_sp_ci_ci_stoc_4096");
		assert_eq!(
			launcher_symbol(&SpecializationKey::plain(8192, DecompositionScheme::BlockCC, Precision::Double)),
			"fftkern_dfn_dp_ci_ci_sbcc_8192"
		);
		assert_eq!(
			launcher_symbol(&SpecializationKey::plain(16384, DecompositionScheme::BlockRC, Precision::Single)),
			"fftkern_dfn_sp_op_ci_ci_sbrc_16384"
		);
		assert_eq!(
			launcher_symbol(&SpecializationKey::transpose(
				128,
				DecompositionScheme::TransposeZXy,
				TransposeMode::TileAligned,
				Precision::Double
			)),
			"fftkern_dfn_dp_op_ci_ci_sbrc3d_fft_trans_z_xy_tile_aligned_128"
		);
		assert_eq!(
			launcher_symbol(&SpecializationKey::fused_2d(64, 243, Precision::Single)),
			"fftkern_dfn_sp_ci_ci_2D_64_243"
		);
	}

	#[test]
	fn test_device_entry_points() {
		assert_eq!(
			device_entry_points(TransformLength::one(64), DecompositionScheme::Stockham),
			["fft_fwd_ip_len64", "fft_back_ip_len64", "fft_fwd_op_len64", "fft_back_op_len64"]
		);
		assert_eq!(
			device_entry_points(TransformLength::one(8192), DecompositionScheme::BlockCC),
			["fft_fwd_ip_len8192_sbcc", "fft_back_ip_len8192_sbcc", "fft_fwd_op_len8192_sbcc", "fft_back_op_len8192_sbcc"]
		);
		assert_eq!(
			device_entry_points(TransformLength::one(128), DecompositionScheme::BlockRC),
			["fft_fwd_op_len128_sbrc", "fft_back_op_len128_sbrc"]
		);
		assert_eq!(
			device_entry_points(TransformLength::two(64, 128), DecompositionScheme::Fused2D),
			["fft_fwd_ip_2D_64_128", "fft_back_ip_2D_64_128", "fft_fwd_op_2D_64_128", "fft_back_op_2D_64_128"]
		);
	}

	#[test]
	fn test_artifact_names() {
		assert_eq!(kernel_body_name(TransformLength::one(64), DecompositionScheme::Stockham), "fftkern_kernel_64.h");
		assert_eq!(kernel_body_name(TransformLength::one(64), DecompositionScheme::BlockRC), "fftkern_kernel_64_sbrc.h");
		assert_eq!(
			kernel_body_name(TransformLength::two(64, 81), DecompositionScheme::Fused2D),
			"fftkern_kernel_2D_64_81.h"
		);
		let stem = unit_stem(Precision::Double, "2D_mix_pow2_3");
		assert_eq!(
			unit_files(&stem),
			("kernel_launch_double_2D_mix_pow2_3.cpp.h".to_string(), "kernel_launch_double_2D_mix_pow2_3.cpp".to_string())
		);
	}

	proptest! {
		/// Distinct keys never share a launcher symbol.
		#[test]
		fn prop_symbols_are_injective(a in 1usize..100_000, b in 1usize..100_000, c in 1usize..4096) {
			let mut keys = all_keys(a, c);
			keys.extend(all_keys(b, c));
			keys.extend(all_keys(c, a));
			keys.sort();
			keys.dedup();
			let symbols: HashSet<String> = keys.iter().map(launcher_symbol).collect();
			prop_assert_eq!(symbols.len(), keys.len());
		}
	}
}
