//! Error types for handler discovery and artifact emission.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::ident::IdentError;

/// Pipeline stage an error originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
	Config,
	Discovery,
	Emission,
}

impl fmt::Display for Stage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Stage::Config => "config",
			Stage::Discovery => "discovery",
			Stage::Emission => "emission",
		})
	}
}

/// Errors that abort a generation run.
///
/// None of these are recoverable within a run; the artifact is either fully
/// replaced or left untouched.
#[derive(Debug, Error)]
pub enum GenerateError {
	/// The handler directory is missing or unreadable.
	#[error("cannot read handler directory {}: {source}", path.display())]
	Discovery { path: PathBuf, source: io::Error },

	/// An entry's base name cannot be used as a key and symbol fragment.
	#[error("{} is not a valid handler identifier: {reason}", path.display())]
	InvalidIdentifier { path: PathBuf, reason: IdentError },

	/// Two entries map to the same identifier.
	#[error("duplicate handler identifier '{id}': {} and {}", first.display(), second.display())]
	DuplicateIdentifier {
		id: String,
		first: PathBuf,
		second: PathBuf,
	},

	/// A directory handler has no module root to point at.
	#[error("handler directory {} has neither mod.rs nor lib.rs", path.display())]
	MissingModule { path: PathBuf },

	/// The artifact could not be created or replaced.
	#[error("cannot write artifact {}: {source}", path.display())]
	Emission { path: PathBuf, source: io::Error },

	#[error("cannot read config {}: {source}", path.display())]
	ConfigRead { path: PathBuf, source: io::Error },

	#[error("invalid config {}: {source}", path.display())]
	ConfigParse {
		path: PathBuf,
		source: toml::de::Error,
	},
}

impl GenerateError {
	pub fn stage(&self) -> Stage {
		match self {
			GenerateError::ConfigRead { .. } | GenerateError::ConfigParse { .. } => Stage::Config,
			GenerateError::Discovery { .. }
			| GenerateError::InvalidIdentifier { .. }
			| GenerateError::DuplicateIdentifier { .. } => Stage::Discovery,
			GenerateError::MissingModule { .. } | GenerateError::Emission { .. } => Stage::Emission,
		}
	}
}

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, GenerateError>;
