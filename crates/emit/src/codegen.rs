//! Seam to the kernel codegen engine that writes butterfly and twiddle code.

use fftkern_specialize::GeometryParams;
use fftkern_types::{DecompositionScheme, TransformLength};

use crate::CodegenError;
use crate::naming::device_entry_points;

/// Data layout a blocked kernel computes on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockComputeType {
	/// Complex to complex, column blocks.
	C2C,
	/// Row to column blocks.
	R2C,
}

/// Everything the engine needs to generate one transform dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct KernelParams {
	pub length: usize,
	pub scheme: DecompositionScheme,
	pub geometry: GeometryParams,
	pub block_compute: Option<BlockComputeType>,
	pub three_step_twiddle: bool,
	/// Suffix of device entry names, `_sbcc` or `_sbrc` for blocked kernels.
	pub name_suffix: &'static str,
	pub forward_scale: f64,
	pub backward_scale: f64,
	/// Set for the second dimension of a fused 2-D kernel, which walks columns.
	pub force_non_unit_stride: bool,
}

impl KernelParams {
	pub fn new(length: usize, scheme: DecompositionScheme, geometry: GeometryParams) -> Self {
		let (block_compute, three_step_twiddle) = match scheme {
			DecompositionScheme::BlockCC => (Some(BlockComputeType::C2C), true),
			DecompositionScheme::BlockRC => (Some(BlockComputeType::R2C), false),
			_ => (None, false),
		};
		Self {
			length,
			scheme,
			geometry,
			block_compute,
			three_step_twiddle,
			name_suffix: scheme.name_suffix(),
			forward_scale: 1.0,
			backward_scale: 1.0,
			force_non_unit_stride: false,
		}
	}

	/// Parameters of the column dimension of a fused 2-D kernel.
	pub fn column(mut self) -> Self {
		self.force_non_unit_stride = true;
		self
	}
}

/// Generated kernel body and the device entry points it defines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KernelSource {
	pub body: String,
	pub entry_points: Vec<String>,
}

/// A kernel codegen engine.
///
/// Bodies are precision-generic; the launcher glue instantiates them per precision.
pub trait KernelCodegen {
	fn generate(&self, params: &KernelParams) -> Result<KernelSource, CodegenError>;

	/// Generates a fused 2-D body over a row dimension and a column dimension.
	fn generate_2d(&self, rows: &KernelParams, columns: &KernelParams) -> Result<KernelSource, CodegenError>;
}

/// Engine that emits empty device functions with the expected entry points.
///
/// Used by the build driver when no butterfly generator is plugged in, so the launcher
/// and registration layers can be built and checked on their own.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkeletonCodegen;

impl SkeletonCodegen {
	fn render(header: String, entry_points: Vec<String>) -> KernelSource {
		let mut body = header;
		for entry in &entry_points {
			body.push_str(&format!(
				"template <typename T, StrideBin sb>\n__global__ void {entry}(const T* __restrict__ twiddles, T* __restrict__ buffer)\n{{\n}}\n\n"
			));
		}
		KernelSource { body, entry_points }
	}
}

impl KernelCodegen for SkeletonCodegen {
	fn generate(&self, params: &KernelParams) -> Result<KernelSource, CodegenError> {
		let header = format!(
			"// skeleton {} kernel, length {}, wgs {}, nt {}\n\n",
			params.scheme,
			params.length,
			params.geometry.work_group_size(),
			params.geometry.transforms_per_group()
		);
		Ok(Self::render(header, device_entry_points(TransformLength::one(params.length), params.scheme)))
	}

	fn generate_2d(&self, rows: &KernelParams, columns: &KernelParams) -> Result<KernelSource, CodegenError> {
		let header = format!(
			"// skeleton fused 2D kernel, {}x{}, row wgs {}, column wgs {}\n\n",
			rows.length,
			columns.length,
			rows.geometry.work_group_size(),
			columns.geometry.work_group_size()
		);
		let length = TransformLength::two(rows.length, columns.length);
		Ok(Self::render(header, device_entry_points(length, DecompositionScheme::Fused2D)))
	}
}
