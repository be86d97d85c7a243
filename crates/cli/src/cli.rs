use std::path::PathBuf;

use clap::Parser;
use fftkern_emit::DEFAULT_GROUP_COUNT;

#[derive(Parser, Debug)]
#[command(name = "fftkern-gen")]
#[command(about = "Generate FFT kernel launcher sources and the dispatch manifest")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Kernel catalog (TOML)
	#[arg(long, short = 'c', value_name = "FILE")]
	pub catalog: PathBuf,

	/// Directory receiving the generated sources and manifest
	#[arg(long, short = 'o', value_name = "DIR")]
	pub out: PathBuf,

	/// Number of translation units the small kernels are split across (1 to 1024)
	#[arg(long, short = 'g', default_value_t = DEFAULT_GROUP_COUNT)]
	pub groups: usize,

	/// Emit preamble-only units when there are fewer small kernels than groups
	#[arg(long)]
	pub allow_empty_groups: bool,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,
}
