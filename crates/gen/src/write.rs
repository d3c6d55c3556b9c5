//! Atomic artifact replacement.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{GenerateError, Result};

/// What happened to the artifact on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
	Written,
	/// The existing file already held these exact bytes.
	Unchanged,
}

/// Replaces `path` with `contents`.
///
/// The text goes to a temporary file in the destination directory which is
/// then renamed over `path`, so readers see either the old artifact or the
/// complete new one. On failure the temporary file is removed.
pub fn write_artifact(path: &Path, contents: &str) -> Result<WriteOutcome> {
	if let Ok(existing) = fs::read(path) {
		if existing == contents.as_bytes() {
			return Ok(WriteOutcome::Unchanged);
		}
	}

	let emission_error = |source| GenerateError::Emission {
		path: path.to_path_buf(),
		source,
	};

	let dir = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};

	let mut tmp = NamedTempFile::new_in(dir).map_err(emission_error)?;
	tmp.write_all(contents.as_bytes()).map_err(emission_error)?;
	tmp.as_file().sync_all().map_err(emission_error)?;
	if let Some(permissions) = artifact_permissions(path) {
		tmp.as_file()
			.set_permissions(permissions)
			.map_err(emission_error)?;
	}
	tmp.persist(path).map_err(|err| emission_error(err.error))?;

	Ok(WriteOutcome::Written)
}

/// Mode for the replacement file: the existing artifact's, or 0644 when the
/// artifact is new.
fn artifact_permissions(path: &Path) -> Option<fs::Permissions> {
	match fs::metadata(path) {
		Ok(meta) if meta.is_file() => Some(meta.permissions()),
		_ => new_artifact_permissions(),
	}
}

#[cfg(unix)]
fn new_artifact_permissions() -> Option<fs::Permissions> {
	use std::os::unix::fs::PermissionsExt;
	Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_artifact_permissions() -> Option<fs::Permissions> {
	None
}
