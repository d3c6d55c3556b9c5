//! `protoreg` binary.
//!
//! Scans the handler directory and writes the registry artifact. Progress is
//! logged to stderr; any failure exits non-zero naming the failed stage.

mod cli;

use clap::Parser;
use cli::Cli;
use protoreg_gen::{GenerateError, generate};
use tracing::info;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let config = cli.resolve_config().map_err(with_stage)?;
	let report = generate(&config).map_err(with_stage)?;

	info!(handlers = report.handlers.len(), capacity = report.capacity, "done");
	Ok(())
}

fn with_stage(err: GenerateError) -> anyhow::Error {
	let stage = err.stage();
	anyhow::Error::new(err).context(format!("{stage} failed"))
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("PROTOREG_LOG").unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("debug")
		} else {
			EnvFilter::new("info")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}
