//! Helpers for running the generator from a `build.rs`.
//!
//! ```ignore
//! fn main() {
//! 	let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
//! 	let out_dir = std::env::var("OUT_DIR").unwrap();
//! 	protoreg_gen::build_support::generate_for_build(
//! 		std::path::Path::new(&manifest_dir).join("protocols"),
//! 		std::path::Path::new(&out_dir).join("protocols.rs"),
//! 	);
//! }
//! ```

use std::path::PathBuf;

use crate::config::{Capacity, GeneratorConfig};
use crate::emit::ArtifactKind;
use crate::error::Result;
use crate::{GenerationReport, generate};

/// Emits a Rust registry for the handlers in `protocols_dir` into `out_file`
/// and registers the inputs with cargo's change tracking.
pub fn try_generate_for_build(
	protocols_dir: impl Into<PathBuf>,
	out_file: impl Into<PathBuf>,
) -> Result<GenerationReport> {
	let config = GeneratorConfig {
		input_dir: protocols_dir.into(),
		output: out_file.into(),
		kind: Some(ArtifactKind::RustModule),
		capacity: Capacity::FromCount,
	};

	// New or removed entries change the directory itself.
	println!("cargo:rerun-if-changed={}", config.input_dir.display());
	let report = generate(&config)?;
	for handler in &report.handlers {
		println!("cargo:rerun-if-changed={}", handler.path.display());
	}
	Ok(report)
}

/// Like [`try_generate_for_build`], but fails the build on error.
pub fn generate_for_build(
	protocols_dir: impl Into<PathBuf>,
	out_file: impl Into<PathBuf>,
) -> GenerationReport {
	match try_generate_for_build(protocols_dir, out_file) {
		Ok(report) => report,
		Err(err) => panic!("protocol registry {} failed: {err}", err.stage()),
	}
}
