//! Catalog to artifacts.
//!
//! Emission is pure: every decision and every generated text lands in an in-memory
//! [`EmitOutput`]. Writing it anywhere is a separate [`persist`](crate::persist) step.
//!
//! # Invariants
//!
//! - The manifest holds exactly the launchers the emitted units define, one entry per key.
//!   - Enforced in: `EmitRun::launcher`, the only place launcher lines and manifest entries are
//!     produced.
//!   - Tested by: `emitter::tests::test_manifest_matches_declarations`
//!   - Failure symptom: the registry resolves a symbol no unit compiles, or misses one.
//!
//! - A refused small-kernel partition contributes no launcher units and no manifest entries.
//!   - Enforced in: [`Emitter::emit`].
//!   - Tested by: `emitter::tests::test_short_small_catalog_refused`
//!   - Failure symptom: registry entries for launchers that were never compiled.

use std::collections::HashSet;

use fftkern_specialize::{GeometryParams, PlatformLimits, classify_2d, select, transpose_modes};
use fftkern_types::{DecompositionScheme, KernelManifest, Precision, RadixFamilyBucket, SpecializationKey, TransformLength};
use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::codegen::{KernelCodegen, KernelParams, KernelSource};
use crate::glue::{UnitBuilder, declaration_header, launcher_line, registration_unit};
use crate::naming::{device_entry_points, kernel_body_name, launcher_symbol, unit_stem};
use crate::partition::{PartitionRefused, partition};
use crate::{Artifact, ArtifactSink, Catalog, EmitError, PersistError, persist};

/// Small-kernel unit count used when the caller does not choose one.
pub const DEFAULT_GROUP_COUNT: usize = 8;

/// Largest accepted small-kernel unit count.
pub const MAX_GROUP_COUNT: usize = 1024;

/// Emission settings not carried by the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmitOptions {
	/// Number of units small kernels are split across, per precision.
	pub group_count: usize,
	/// Emit surplus small units empty instead of refusing a short catalog.
	pub allow_empty_groups: bool,
}

impl Default for EmitOptions {
	fn default() -> Self {
		Self {
			group_count: DEFAULT_GROUP_COUNT,
			allow_empty_groups: false,
		}
	}
}

/// Everything one emission produced.
#[derive(Clone, Debug)]
pub struct EmitOutput {
	pub artifacts: Vec<Artifact>,
	pub manifest: KernelManifest,
	/// Set when the small-kernel list was refused.
	pub small_refused: Option<PartitionRefused>,
}

impl EmitOutput {
	pub fn artifact(&self, name: &str) -> Option<&Artifact> {
		self.artifacts.iter().find(|a| a.name == name)
	}

	pub fn persist(&self, sink: &mut dyn ArtifactSink) -> Result<(), PersistError> {
		persist(&self.artifacts, &self.manifest, sink)
	}
}

/// Drives a codegen engine over a catalog.
pub struct Emitter<'c, C: ?Sized> {
	codegen: &'c C,
	options: EmitOptions,
}

impl<'c, C: KernelCodegen + ?Sized> Emitter<'c, C> {
	pub fn new(codegen: &'c C, options: EmitOptions) -> Self {
		Self { codegen, options }
	}

	pub fn emit(&self, catalog: &Catalog) -> Result<EmitOutput, EmitError> {
		catalog.validate()?;
		if !(1..=MAX_GROUP_COUNT).contains(&self.options.group_count) {
			return Err(EmitError::GroupCount {
				groups: self.options.group_count,
				max: MAX_GROUP_COUNT,
			});
		}

		let (groups, small_refused) = match partition(&catalog.small, self.options.group_count, self.options.allow_empty_groups) {
			Ok(groups) => (Some(groups), None),
			Err(refused) => {
				warn!(
					kernels = refused.items,
					groups = refused.groups,
					"not enough small kernels to fill every group, skipping small kernels"
				);
				(None, Some(refused))
			}
		};

		let mut run = EmitRun {
			codegen: self.codegen,
			limits: catalog.platform,
			artifacts: Vec::new(),
			manifest: KernelManifest::new(),
			bodies: HashSet::new(),
		};

		if groups.is_some() {
			for &len in &catalog.small {
				run.body_1d(len, DecompositionScheme::Stockham)?;
			}
		}
		for entry in &catalog.large_1d {
			run.body_1d(entry.length, entry.scheme)?;
		}
		for entry in &catalog.fused_2d {
			run.body_2d(entry.length1, entry.length2)?;
		}

		for precision in Precision::ALL {
			if let Some(groups) = &groups {
				for (j, group) in groups.iter().enumerate() {
					run.small_unit(precision, j, group);
				}
			}
			if !catalog.large_1d.is_empty() {
				run.large_unit(precision, catalog);
			}
			run.fused_units(precision, catalog)?;
		}

		let EmitRun {
			mut artifacts, manifest, ..
		} = run;
		artifacts.push(declaration_header(&manifest));
		artifacts.extend(registration_unit(&manifest));

		info!(
			artifacts = artifacts.len(),
			launchers = manifest.len(),
			small_refused = small_refused.is_some(),
			"emitted kernel sources"
		);
		Ok(EmitOutput {
			artifacts,
			manifest,
			small_refused,
		})
	}
}

struct EmitRun<'c, C: ?Sized> {
	codegen: &'c C,
	limits: PlatformLimits,
	artifacts: Vec<Artifact>,
	manifest: KernelManifest,
	bodies: HashSet<String>,
}

impl<C: KernelCodegen + ?Sized> EmitRun<'_, C> {
	fn geometry(&self, length: usize, scheme: DecompositionScheme) -> Result<GeometryParams, EmitError> {
		let to_err = |source| EmitError::Geometry { length, scheme, source };
		let selection = select(length, scheme, &self.limits).map_err(to_err)?;
		selection.params.check(length).map_err(to_err)?;
		Ok(selection.params)
	}

	fn body_1d(&mut self, length: usize, scheme: DecompositionScheme) -> Result<(), EmitError> {
		let name = kernel_body_name(TransformLength::one(length), scheme);
		if self.bodies.contains(&name) {
			return Ok(());
		}
		let params = KernelParams::new(length, scheme, self.geometry(length, scheme)?);
		let source = self.codegen.generate(&params)?;
		let expected = device_entry_points(TransformLength::one(length), scheme);
		self.push_body(name, source, &expected, "")
	}

	/// Generates a fused 2-D body and the 1-D bodies it includes.
	fn body_2d(&mut self, len1: usize, len2: usize) -> Result<(), EmitError> {
		let length = TransformLength::two(len1, len2);
		let name = kernel_body_name(length, DecompositionScheme::Fused2D);
		if self.bodies.contains(&name) {
			return Ok(());
		}

		let mut includes = String::new();
		for dim in if len1 == len2 { vec![len1] } else { vec![len1, len2] } {
			self.body_1d(dim, DecompositionScheme::Stockham)?;
			includes.push_str(&format!(
				"#include \"{}\"\n",
				kernel_body_name(TransformLength::one(dim), DecompositionScheme::Stockham)
			));
		}

		let rows = KernelParams::new(len1, DecompositionScheme::Fused2D, self.geometry(len1, DecompositionScheme::Fused2D)?);
		let columns = KernelParams::new(len2, DecompositionScheme::Fused2D, self.geometry(len2, DecompositionScheme::Fused2D)?).column();
		let source = self.codegen.generate_2d(&rows, &columns)?;
		let expected = device_entry_points(length, DecompositionScheme::Fused2D);
		self.push_body(name, source, &expected, &includes)
	}

	fn push_body(&mut self, name: String, source: KernelSource, expected: &[String], includes: &str) -> Result<(), EmitError> {
		if let Some(missing) = expected.iter().find(|e| !source.entry_points.contains(e)) {
			return Err(EmitError::MissingEntryPoint {
				kernel: name,
				entry: missing.clone(),
			});
		}
		debug!(name = %name, entry_points = source.entry_points.len(), "generated kernel body");
		let text = format!("#pragma once\n{includes}{}", source.body);
		self.bodies.insert(name.clone());
		self.artifacts.push(Artifact::text(name, text));
		Ok(())
	}

	/// Adds the launcher line for `key` to `unit` and records it in the manifest.
	fn launcher(&mut self, unit: &mut UnitBuilder, key: SpecializationKey) {
		let symbol = launcher_symbol(&key);
		unit.line(&launcher_line(&key, &symbol));
		debug!(%key, symbol = %symbol, "emitted launcher");
		self.manifest.push(key, symbol);
	}

	fn small_unit(&mut self, precision: Precision, index: usize, lengths: &[usize]) {
		let mut unit = UnitBuilder::new();
		for &len in lengths {
			unit.include(&kernel_body_name(TransformLength::one(len), DecompositionScheme::Stockham));
		}
		unit.precision_comment(precision);
		for &len in lengths {
			self.launcher(&mut unit, SpecializationKey::stockham(len, precision));
		}
		self.artifacts.extend(unit.finish(&unit_stem(precision, &index.to_string())));
	}

	fn large_unit(&mut self, precision: Precision, catalog: &Catalog) {
		let mut unit = UnitBuilder::new();
		unit.precision_comment(precision);
		for entry in &catalog.large_1d {
			unit.include(&kernel_body_name(TransformLength::one(entry.length), entry.scheme));
			self.launcher(&mut unit, SpecializationKey::plain(entry.length, entry.scheme, precision));
			if entry.scheme != DecompositionScheme::BlockRC {
				continue;
			}
			for &mode in transpose_modes(entry.length) {
				for orientation in DecompositionScheme::TRANSPOSE_ORIENTATIONS {
					self.launcher(&mut unit, SpecializationKey::transpose(entry.length, orientation, mode, precision));
				}
			}
		}
		self.artifacts.extend(unit.finish(&unit_stem(precision, "large")));
	}

	/// One unit per radix bucket, opened on the bucket's first pair.
	fn fused_units(&mut self, precision: Precision, catalog: &Catalog) -> Result<(), EmitError> {
		let mut units: IndexMap<RadixFamilyBucket, UnitBuilder> = IndexMap::new();
		for entry in catalog.fused_2d.iter().filter(|e| e.generates(precision)) {
			let bucket = classify_2d(entry.length1, entry.length2)?;
			let unit = units.entry(bucket).or_default();
			let length = TransformLength::two(entry.length1, entry.length2);
			unit.include(&kernel_body_name(length, DecompositionScheme::Fused2D));
			self.launcher(unit, SpecializationKey::fused_2d(entry.length1, entry.length2, precision));
		}
		for (bucket, unit) in units {
			self.artifacts.extend(unit.finish(&unit_stem(precision, &format!("2D_{}", bucket.name()))));
		}
		Ok(())
	}
}
