use std::path::PathBuf;

use super::Template;
use crate::discovery::DiscoveredHandler;
use crate::error::{GenerateError, Result};
use crate::ident::IdentError;

/// Rust module for inclusion via `include!` from a build script's output.
///
/// Each handler path becomes `pub mod <id>`, which must define
/// `process_<id>_request` with the `protoreg_dispatch::HandlerFn` signature.
/// Handler modules share the generated scope, so every other path in the
/// artifact is absolute.
pub struct RustModule;

impl RustModule {
	/// Source file backing the handler's module.
	fn module_root(handler: &DiscoveredHandler) -> Result<PathBuf> {
		if !handler.path.is_dir() {
			return Ok(handler.path.clone());
		}
		["mod.rs", "lib.rs"]
			.into_iter()
			.map(|file| handler.path.join(file))
			.find(|root| root.exists())
			.ok_or_else(|| GenerateError::MissingModule {
				path: handler.path.clone(),
			})
	}
}

impl Template for RustModule {
	fn validate(&self, handler: &DiscoveredHandler) -> Result<()> {
		if handler.id.is_rust_keyword() {
			return Err(GenerateError::InvalidIdentifier {
				path: handler.path.clone(),
				reason: IdentError::Keyword(handler.id.to_string()),
			});
		}
		Ok(())
	}

	fn preamble(&self) -> String {
		"// @generated by protoreg. Do not edit.\n\n".to_string()
	}

	fn declaration(&self, handler: &DiscoveredHandler) -> Result<String> {
		let root = Self::module_root(handler)?;
		Ok(format!(
			"#[path = {:?}]\npub mod {};",
			root.display().to_string(),
			handler.id
		))
	}

	fn opening(&self, handlers: &[DiscoveredHandler], capacity: usize) -> String {
		let names: Vec<&str> = handlers.iter().map(|h| h.id.as_str()).collect();
		let mut out = String::from("\n\n/// Names of every registered protocol handler, sorted.\n");
		out.push_str(&format!("pub const HANDLER_NAMES: &[&str] = &{names:?};\n\n"));
		out.push_str("/// Builds the protocol handler table, or `None` if it cannot be allocated.\n");
		out.push_str("#[allow(unused_mut)]\n");
		out.push_str(
			"pub fn collect_handlers() -> ::core::option::Option<::protoreg_dispatch::HandlerTable> {\n",
		);
		out.push_str(&format!(
			"\tlet mut tbl = ::protoreg_dispatch::HandlerTable::try_with_capacity({capacity})?;\n"
		));
		out
	}

	fn registration(&self, handler: &DiscoveredHandler) -> String {
		format!(
			"\ttbl.insert(\"{id}\", {id}::{symbol});",
			id = handler.id,
			symbol = handler.id.symbol()
		)
	}

	fn closing(&self) -> String {
		"\n\t::core::option::Option::Some(tbl)\n}\n".to_string()
	}
}
