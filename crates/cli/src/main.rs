//! `fftkern-gen`: loads a kernel catalog, emits launcher sources and persists them.

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use fftkern_emit::{Catalog, DirSink, EmitOptions, Emitter, SkeletonCodegen};
use tracing::info;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if cli.verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::INFO
		})
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;

	let catalog = Catalog::load(&cli.catalog).with_context(|| format!("loading catalog {}", cli.catalog.display()))?;
	info!(
		small = catalog.small.len(),
		large = catalog.large_1d.len(),
		fused_2d = catalog.fused_2d.len(),
		"loaded kernel catalog"
	);

	let options = EmitOptions {
		group_count: cli.groups,
		allow_empty_groups: cli.allow_empty_groups,
	};
	let output = Emitter::new(&SkeletonCodegen, options).emit(&catalog).context("emitting kernel sources")?;

	let mut sink = DirSink::create(&cli.out).with_context(|| format!("creating output directory {}", cli.out.display()))?;
	output
		.persist(&mut sink)
		.with_context(|| format!("writing artifacts to {}", sink.root().display()))?;

	info!(
		out = %sink.root().display(),
		artifacts = output.artifacts.len(),
		launchers = output.manifest.len(),
		"kernel sources generated"
	);
	Ok(())
}
