//! Registry emission.
//!
//! An artifact is rendered from a [`Template`] in five parts: a fixed
//! preamble, one declaration per handler, the opening of the initialization
//! routine, one registration statement per handler, and a fixed closing.
//! Handlers are emitted in the order received; discovery already sorted them.

mod c_header;
mod rust_module;

use std::path::Path;

use serde::Deserialize;

pub use c_header::CHeader;
pub use rust_module::RustModule;

use crate::discovery::DiscoveredHandler;
use crate::error::Result;

/// Text shape of one artifact flavor.
pub trait Template {
	/// Rejects handlers this template cannot express.
	fn validate(&self, _handler: &DiscoveredHandler) -> Result<()> {
		Ok(())
	}

	fn preamble(&self) -> String;

	fn declaration(&self, handler: &DiscoveredHandler) -> Result<String>;

	/// Opens the initialization routine, allocating a container of
	/// `capacity` slots and bailing out if that allocation fails.
	fn opening(&self, handlers: &[DiscoveredHandler], capacity: usize) -> String;

	fn registration(&self, handler: &DiscoveredHandler) -> String;

	fn closing(&self) -> String;
}

/// Supported artifact flavors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
	/// C header declaring `process_<id>_request` and defining `collect_handlers()`.
	CHeader,
	/// Rust module built on `protoreg_dispatch::HandlerTable`.
	RustModule,
}

impl ArtifactKind {
	/// Picks the flavor matching an output file name: `.rs` is Rust,
	/// everything else a C header.
	pub fn infer(output: &Path) -> Self {
		match output.extension().and_then(|ext| ext.to_str()) {
			Some("rs") => ArtifactKind::RustModule,
			_ => ArtifactKind::CHeader,
		}
	}

	pub fn template(self) -> &'static dyn Template {
		match self {
			ArtifactKind::CHeader => &CHeader,
			ArtifactKind::RustModule => &RustModule,
		}
	}
}

/// Renders the complete artifact text.
pub fn render(
	template: &dyn Template,
	handlers: &[DiscoveredHandler],
	capacity: usize,
) -> Result<String> {
	for handler in handlers {
		template.validate(handler)?;
	}

	let declarations = handlers
		.iter()
		.map(|handler| template.declaration(handler))
		.collect::<Result<Vec<_>>>()?;
	let registrations: Vec<_> = handlers
		.iter()
		.map(|handler| template.registration(handler))
		.collect();

	let mut out = template.preamble();
	out.push_str(&declarations.join("\n"));
	out.push_str(&template.opening(handlers, capacity));
	out.push_str(&registrations.join("\n"));
	out.push_str(&template.closing());
	Ok(out)
}

#[cfg(test)]
mod tests;
