use std::path::PathBuf;

use clap::Parser;
use protoreg_gen::{ArtifactKind, Capacity, GeneratorConfig};

/// Protocol registry generator command line arguments.
#[derive(Parser, Debug)]
#[command(name = "protoreg")]
#[command(about = "Generate a protocol handler registry from a handler directory")]
pub struct Cli {
	/// TOML file with generator settings
	#[arg(short, long, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Directory containing one entry per protocol handler [default: protocols]
	#[arg(short, long, value_name = "DIR")]
	pub input: Option<PathBuf>,

	/// Artifact to (re)write [default: protocols.h]
	#[arg(short, long, value_name = "PATH")]
	pub output: Option<PathBuf>,

	/// Artifact flavor; inferred from the output extension when omitted
	#[arg(short, long, value_enum)]
	pub kind: Option<ArtifactKind>,

	/// Container slots, or `auto` to size from the handler count [default: 64]
	#[arg(long, value_name = "SLOTS|auto")]
	pub capacity: Option<Capacity>,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,
}

impl Cli {
	/// Resolves the effective config: defaults, then the config file, then flags.
	pub fn resolve_config(&self) -> protoreg_gen::Result<GeneratorConfig> {
		let mut config = match &self.config {
			Some(path) => GeneratorConfig::load(path)?,
			None => GeneratorConfig::default(),
		};
		if let Some(input) = &self.input {
			config.input_dir = input.clone();
		}
		if let Some(output) = &self.output {
			config.output = output.clone();
		}
		if self.kind.is_some() {
			config.kind = self.kind;
		}
		if let Some(capacity) = self.capacity {
			config.capacity = capacity;
		}
		Ok(config)
	}
}
