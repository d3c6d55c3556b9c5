//! Protocol handler registry generator.
//!
//! Discovers protocol handlers from a directory (one entry per handler) and
//! emits a single artifact that declares each handler's entry point,
//! `process_<name>_request`, and defines `collect_handlers()`, which builds a
//! name to entry point table for the dispatching program.
//!
//! The run is a single pass: [`discover`] → [`render`] → [`write_artifact`].
//! It either replaces the artifact completely or fails without touching it.

pub mod build_support;
pub mod config;
pub mod discovery;
pub mod emit;
pub mod error;
pub mod ident;
pub mod write;

use std::path::PathBuf;

use tracing::info;

pub use config::{Capacity, GeneratorConfig};
pub use discovery::{DiscoveredHandler, discover};
pub use emit::{ArtifactKind, Template, render};
pub use error::{GenerateError, Result, Stage};
pub use ident::HandlerIdentifier;
pub use write::{WriteOutcome, write_artifact};

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
	pub handlers: Vec<DiscoveredHandler>,
	pub kind: ArtifactKind,
	pub capacity: usize,
	pub output: PathBuf,
	pub outcome: WriteOutcome,
}

/// Runs discovery and emission for `config`.
pub fn generate(config: &GeneratorConfig) -> Result<GenerationReport> {
	info!(dir = %config.input_dir.display(), "scanning protocol handlers");
	let handlers = discover(&config.input_dir)?;
	for handler in &handlers {
		info!(handler = %handler.id, "adding handler");
	}

	let kind = config.artifact_kind();
	let capacity = config.capacity.resolve(handlers.len());
	let text = render(kind.template(), &handlers, capacity)?;
	let outcome = write_artifact(&config.output, &text)?;

	match outcome {
		WriteOutcome::Written => info!(path = %config.output.display(), "artifact written"),
		WriteOutcome::Unchanged => info!(path = %config.output.display(), "artifact unchanged"),
	}

	Ok(GenerationReport {
		handlers,
		kind,
		capacity,
		output: config.output.clone(),
		outcome,
	})
}
