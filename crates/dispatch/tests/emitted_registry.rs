//! Registries built from real emitter output.

use std::ffi::c_void;
use std::sync::atomic::{AtomicUsize, Ordering};

use fftkern_dispatch::{DispatchRegistry, LaunchFn, LookupError, SubTable, SymbolTable};
use fftkern_emit::{Catalog, EmitOptions, EmitOutput, Emitter, Fused2dEntry, LargeEntry, MemorySink, SkeletonCodegen};
use fftkern_types::{DecompositionScheme, KernelManifest, Precision, SpecializationKey, TransposeMode};
use proptest::prelude::*;

unsafe extern "C" fn noop(_data: *const c_void, _back: *mut c_void) {}

static LAUNCHES: AtomicUsize = AtomicUsize::new(0);

unsafe extern "C" fn counting(data: *const c_void, back: *mut c_void) {
	assert!(!data.is_null());
	assert!(back.is_null());
	LAUNCHES.fetch_add(1, Ordering::SeqCst);
}

fn emit(catalog: Catalog) -> EmitOutput {
	let options = EmitOptions {
		group_count: 1,
		allow_empty_groups: false,
	};
	Emitter::new(&SkeletonCodegen, options).emit(&catalog).unwrap()
}

fn linked(manifest: &KernelManifest) -> SymbolTable {
	manifest.iter().map(|e| (e.symbol.clone(), noop as LaunchFn)).collect()
}

fn large(length: usize, scheme: DecompositionScheme) -> Catalog {
	Catalog {
		large_1d: vec![LargeEntry { length, scheme }],
		..Default::default()
	}
}

/// A column-column entry registers one plain entry per precision and no transpose entries.
#[test]
fn test_block_cc_catalog() {
	let out = emit(large(8192, DecompositionScheme::BlockCC));
	let registry = DispatchRegistry::build(&out.manifest, linked(&out.manifest)).unwrap();
	registry.validate_complete().unwrap();

	for precision in Precision::ALL {
		let key = SpecializationKey::plain(8192, DecompositionScheme::BlockCC, precision);
		assert!(!registry.lookup(&key).unwrap().is_null());
	}
	for stats in registry.stats() {
		if matches!(stats.table, SubTable::Transpose(..)) {
			assert_eq!(stats.len, 0, "{}", stats.table);
		}
	}
	assert_eq!(registry.len(), 2);
}

/// A power-of-two row-column entry registers tile-aligned and diagonal transposes in both
/// orientations; tile-unaligned lookups miss.
#[test]
fn test_block_rc_catalog() {
	let out = emit(large(16384, DecompositionScheme::BlockRC));
	let registry = DispatchRegistry::build(&out.manifest, linked(&out.manifest)).unwrap();
	registry.validate_complete().unwrap();

	for precision in Precision::ALL {
		assert!(registry.exists(precision, &SpecializationKey::plain(16384, DecompositionScheme::BlockRC, precision)));
		for orientation in DecompositionScheme::TRANSPOSE_ORIENTATIONS {
			let key = SpecializationKey::plain(16384, orientation, precision);
			assert!(registry.lookup_transpose(&key, TransposeMode::TileAligned).is_ok());
			assert!(registry.lookup_transpose(&key, TransposeMode::Diagonal).is_ok());
			assert_eq!(
				registry.lookup_transpose(&key, TransposeMode::TileUnaligned).unwrap_err(),
				LookupError::NotFound {
					key: key.with_transpose(TransposeMode::TileUnaligned)
				}
			);
		}
	}
	let symbol = registry
		.lookup_transpose(
			&SpecializationKey::plain(16384, DecompositionScheme::TransposeZXy, Precision::Double),
			TransposeMode::Diagonal,
		)
		.unwrap()
		.symbol()
		.to_string();
	assert_eq!(symbol, "fftkern_dfn_dp_op_ci_ci_sbrc3d_fft_trans_z_xy_diagonal_16384");
}

/// 2-D pairs in different radix buckets are emitted into different units but share the
/// per-precision 2-D tables.
#[test]
fn test_fused_2d_catalog() {
	let out = emit(Catalog {
		fused_2d: vec![Fused2dEntry::new(64, 128), Fused2dEntry::new(64, 243)],
		..Default::default()
	});
	assert!(out.artifact("kernel_launch_single_2D_pow2.cpp.h").is_some());
	assert!(out.artifact("kernel_launch_single_2D_mix_pow2_3.cpp.h").is_some());

	let registry = DispatchRegistry::build(&out.manifest, linked(&out.manifest)).unwrap();
	for precision in Precision::ALL {
		assert!(registry.exists(precision, &SpecializationKey::fused_2d(64, 128, precision)));
		assert!(registry.exists(precision, &SpecializationKey::fused_2d(64, 243, precision)));
		assert!(!registry.exists(precision, &SpecializationKey::fused_2d(243, 64, precision)));
	}
	let stats = registry.stats();
	let single_2d = stats.iter().find(|s| s.table == SubTable::Fused2D(Precision::Single)).unwrap();
	assert_eq!(single_2d.len, 2);
}

/// `exists` answers for populated and unpopulated keys alike without failing.
#[test]
fn test_exists_never_fails() {
	let out = emit(Catalog {
		small: vec![64, 128],
		..Default::default()
	});
	let registry = DispatchRegistry::build(&out.manifest, linked(&out.manifest)).unwrap();
	let key = SpecializationKey::stockham(64, Precision::Single);
	assert!(registry.exists(Precision::Single, &key));
	assert!(registry.exists(Precision::Double, &key));
	assert!(!registry.exists(Precision::Single, &SpecializationKey::stockham(256, Precision::Single)));
	assert!(!registry.exists(
		Precision::Single,
		&SpecializationKey::plain(64, DecompositionScheme::BlockCC, Precision::Single)
	));
	assert!(!registry.exists(Precision::Single, &SpecializationKey::plain(64, DecompositionScheme::Fused2D, Precision::Single)));
}

/// The persisted manifest blob rebuilds the same registry, and entries launch through their
/// resolved launchers.
#[test]
fn test_registry_from_persisted_blob() {
	let out = emit(Catalog {
		small: vec![8, 16],
		large_1d: vec![LargeEntry {
			length: 81,
			scheme: DecompositionScheme::BlockRC,
		}],
		fused_2d: vec![Fused2dEntry::new(27, 125)],
		..Default::default()
	});
	let mut sink = MemorySink::new();
	out.persist(&mut sink).unwrap();
	let blob = sink.get(fftkern_emit::naming::MANIFEST_BLOB).unwrap();

	let mut table = linked(&out.manifest);
	table.insert("fftkern_dfn_sp_ci_ci_stoc_16", counting);
	let registry = DispatchRegistry::from_blob(blob, table).unwrap();
	registry.validate_complete().unwrap();
	assert_eq!(registry.len(), out.manifest.len());

	for entry in &out.manifest {
		assert_eq!(registry.lookup(&entry.key).unwrap().symbol(), entry.symbol);
	}

	let entry = registry.lookup(&SpecializationKey::stockham(16, Precision::Single)).unwrap();
	let data = 7u32;
	unsafe { entry.launch(&data as *const u32 as *const c_void, std::ptr::null_mut()) }.unwrap();
	assert_eq!(LAUNCHES.load(Ordering::SeqCst), 1);
}

/// A launcher missing from the linked library surfaces as a null entry at validation.
#[test]
fn test_partial_link_is_incomplete() {
	let out = emit(large(64, DecompositionScheme::BlockRC));
	let table: SymbolTable = out
		.manifest
		.iter()
		.filter(|e| !e.symbol.contains("diagonal"))
		.map(|e| (e.symbol.clone(), noop as LaunchFn))
		.collect();
	let registry = DispatchRegistry::build(&out.manifest, table).unwrap();
	let err = registry.validate_complete().unwrap_err();
	assert!(err.to_string().contains("kernel_map_single_transpose_diagonal"), "{err}");

	let entry = registry
		.lookup_transpose(
			&SpecializationKey::plain(64, DecompositionScheme::TransposeXyZ, Precision::Single),
			TransposeMode::Diagonal,
		)
		.unwrap();
	assert!(unsafe { entry.launch(std::ptr::null(), std::ptr::null_mut()) }.is_err());
}

proptest! {
	/// After a full build every manifest key resolves to a non-null entry with its own symbol.
	#[test]
	fn prop_every_emitted_key_resolves(
		small in proptest::collection::btree_set(1usize..5000, 1..12),
		rc in proptest::collection::btree_set(1usize..1 << 16, 0..4),
	) {
		let catalog = Catalog {
			small: small.into_iter().collect(),
			large_1d: rc.into_iter().map(|length| LargeEntry { length, scheme: DecompositionScheme::BlockRC }).collect(),
			..Default::default()
		};
		let out = emit(catalog);
		let registry = DispatchRegistry::build(&out.manifest, linked(&out.manifest)).unwrap();
		prop_assert!(registry.validate_complete().is_ok());
		prop_assert_eq!(registry.len(), out.manifest.len());
		for entry in &out.manifest {
			let found = registry.find(&entry.key).unwrap();
			prop_assert_eq!(found.symbol(), entry.symbol.as_str());
			prop_assert!(!found.is_null());
		}
	}
}
