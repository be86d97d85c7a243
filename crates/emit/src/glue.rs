//! Text of launcher units, the declaration header and the registration unit.

use std::fmt::Write as _;

use fftkern_types::{DecompositionScheme, KernelManifest, Precision, SpecializationKey};

use crate::Artifact;
use crate::naming::{DECLARATION_HEADER, LAUNCH_MACROS_HEADER, REGISTRY_STEM, device_entry_points, unit_files};

/// Launcher generator macro invocation binding `symbol` to the device entries of `key`.
pub fn launcher_line(key: &SpecializationKey, symbol: &str) -> String {
	let entries = device_entry_points(key.length, key.scheme).join(", ");
	let complex = key.precision.complex_type();
	match key.scheme {
		DecompositionScheme::Stockham | DecompositionScheme::Fused2D => {
			format!("POWX_SMALL_GENERATOR( {symbol}, {entries}, {complex})")
		}
		DecompositionScheme::BlockCC => format!("POWX_LARGE_SBCC_GENERATOR( {symbol}, {entries}, {complex})"),
		DecompositionScheme::BlockRC | DecompositionScheme::TransposeXyZ | DecompositionScheme::TransposeZXy => {
			let variant = key.scheme.sbrc_variant().unwrap_or("SBRC_2D");
			format!(
				"POWX_LARGE_SBRC_GENERATOR( {symbol}, {entries}, {complex}, {variant}, {})",
				key.transpose.macro_arg()
			)
		}
	}
}

/// Accumulates one launcher unit header.
#[derive(Debug)]
pub struct UnitBuilder {
	text: String,
}

impl UnitBuilder {
	pub fn new() -> Self {
		Self {
			text: format!("#include \"{LAUNCH_MACROS_HEADER}\"\n"),
		}
	}

	pub fn include(&mut self, header: &str) {
		let _ = writeln!(self.text, "#include \"{header}\"");
	}

	pub fn precision_comment(&mut self, precision: Precision) {
		let _ = writeln!(self.text, "\n// {precision} precision");
	}

	pub fn line(&mut self, line: &str) {
		self.text.push_str(line);
		self.text.push('\n');
	}

	/// Header and the source file that includes it.
	pub fn finish(self, stem: &str) -> [Artifact; 2] {
		let (header, source) = unit_files(stem);
		let include = format!("#include \"{header}\"\n");
		[Artifact::text(header, self.text), Artifact::text(source, include)]
	}
}

impl Default for UnitBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// C declarations of every launcher in the manifest.
pub fn declaration_header(manifest: &KernelManifest) -> Artifact {
	let guard = DECLARATION_HEADER.replace('.', "_");
	let mut text = format!("#pragma once\n#if !defined({guard})\n#define {guard}\n\n// generated launchers, one per kernel specialization\n\nextern \"C\"\n{{\n");
	for entry in manifest {
		let _ = writeln!(text, "void {}(const void *data_p, void *back_p);", entry.symbol);
	}
	text.push_str("}\n\n#endif\n");
	Artifact::text(DECLARATION_HEADER, text)
}

/// Registry table a key is registered in, e.g. `kernel_map_double_transpose_diagonal`.
pub fn registry_table(key: &SpecializationKey) -> String {
	let mut table = format!("kernel_map_{}", key.precision.name());
	if key.length.is_2d() {
		table.push_str("_2D");
	}
	if key.transpose.is_fused() {
		table.push_str("_transpose_");
		table.push_str(key.transpose.shortcode());
	}
	table
}

fn registry_key_expr(key: &SpecializationKey) -> String {
	let scheme = format!("KS_{}", key.scheme.to_string().to_uppercase());
	match key.length.secondary {
		Some(len2) => format!("std::make_tuple({}, {len2}, {scheme})", key.length.primary),
		None => format!("std::make_pair({}, {scheme})", key.length.primary),
	}
}

/// Registration unit binding every manifest key to its launcher.
pub fn registration_unit(manifest: &KernelManifest) -> [Artifact; 2] {
	let mut text = format!("#include \"{DECLARATION_HEADER}\"\n#include \"{REGISTRY_STEM}.h\"\n\n");
	text.push_str("void fftkern_register_kernels(kernel_registry& registry)\n{\n");
	for entry in manifest {
		let _ = writeln!(
			text,
			"\tregistry.{}[{}] = &{};",
			registry_table(&entry.key),
			registry_key_expr(&entry.key),
			entry.symbol
		);
	}
	text.push_str("}\n");

	let (header, source) = unit_files(REGISTRY_STEM);
	let include = format!("#include \"{header}\"\n");
	[Artifact::text(header, text), Artifact::text(source, include)]
}
