//! Handler discovery.
//!
//! Lists the handler directory (non-recursively) and turns every visible
//! entry into a [`DiscoveredHandler`]. The result is sorted by identifier so
//! the emitted artifact depends only on the set of names, not on the order the
//! filesystem returns them in.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GenerateError, Result};
use crate::ident::{HandlerIdentifier, IdentError};

/// One handler entry found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredHandler {
	pub id: HandlerIdentifier,
	pub path: PathBuf,
}

/// Discovers every handler directly inside `dir`.
///
/// An empty directory yields an empty list. A missing directory, an invalid
/// name, or two entries sharing an identifier fail the whole run.
pub fn discover(dir: &Path) -> Result<Vec<DiscoveredHandler>> {
	let read_error = |source| GenerateError::Discovery {
		path: dir.to_path_buf(),
		source,
	};

	let mut found: BTreeMap<HandlerIdentifier, PathBuf> = BTreeMap::new();
	for entry in fs::read_dir(dir).map_err(read_error)? {
		let path = entry.map_err(read_error)?.path();
		let Some(id) = identifier_for(&path)? else {
			tracing::debug!(path = %path.display(), "skipping hidden entry");
			continue;
		};

		match found.entry(id) {
			Entry::Vacant(slot) => {
				slot.insert(path);
			}
			Entry::Occupied(slot) => {
				let (first, second) = if slot.get() <= &path {
					(slot.get().clone(), path)
				} else {
					(path, slot.get().clone())
				};
				return Err(GenerateError::DuplicateIdentifier {
					id: slot.key().to_string(),
					first,
					second,
				});
			}
		}
	}

	Ok(found
		.into_iter()
		.map(|(id, path)| DiscoveredHandler { id, path })
		.collect())
}

/// Derives the identifier of a directory entry, or `None` for hidden entries.
///
/// Directories contribute their full name, files their stem, so `http/` and
/// `http.rs` name the same handler.
fn identifier_for(path: &Path) -> Result<Option<HandlerIdentifier>> {
	let invalid = |reason| GenerateError::InvalidIdentifier {
		path: path.to_path_buf(),
		reason,
	};

	let file_name = path.file_name().ok_or_else(|| invalid(IdentError::Empty))?;
	let file_name = file_name.to_str().ok_or_else(|| invalid(IdentError::NotUtf8))?;
	if file_name.starts_with('.') {
		return Ok(None);
	}

	let base = if path.is_dir() {
		file_name
	} else {
		path.file_stem()
			.and_then(|stem| stem.to_str())
			.unwrap_or(file_name)
	};

	HandlerIdentifier::new(base).map(Some).map_err(invalid)
}
