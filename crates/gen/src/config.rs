//! Generator configuration.
//!
//! Defaults reproduce the fixed conventions: handlers live in `protocols/`
//! and the artifact is `protocols.h`. A TOML file and command line flags may
//! override them.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::emit::ArtifactKind;
use crate::error::{GenerateError, Result};

pub const DEFAULT_INPUT_DIR: &str = "protocols";
pub const DEFAULT_OUTPUT: &str = "protocols.h";
pub const DEFAULT_CAPACITY: usize = 64;

/// Slot count requested for the generated container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "CapacityRepr")]
pub enum Capacity {
	/// A constant slot count, independent of how many handlers exist.
	Fixed(usize),
	/// Exactly as many slots as handlers (at least one).
	FromCount,
}

impl Default for Capacity {
	fn default() -> Self {
		Capacity::Fixed(DEFAULT_CAPACITY)
	}
}

impl Capacity {
	/// Slot count for `count` handlers.
	///
	/// A fixed capacity below `count` is widened so every handler fits.
	pub fn resolve(self, count: usize) -> usize {
		match self {
			Capacity::Fixed(slots) if slots < count => {
				tracing::warn!(slots, count, "fixed capacity below handler count, widening");
				count
			}
			Capacity::Fixed(slots) => slots,
			Capacity::FromCount => count.max(1),
		}
	}
}

impl FromStr for Capacity {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		if s.eq_ignore_ascii_case("auto") {
			return Ok(Capacity::FromCount);
		}
		s.parse()
			.map(Capacity::Fixed)
			.map_err(|_| format!("expected a slot count or 'auto', got '{s}'"))
	}
}

impl fmt::Display for Capacity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Capacity::Fixed(slots) => write!(f, "{slots}"),
			Capacity::FromCount => f.write_str("auto"),
		}
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CapacityRepr {
	Slots(usize),
	Keyword(String),
}

impl TryFrom<CapacityRepr> for Capacity {
	type Error = String;

	fn try_from(repr: CapacityRepr) -> std::result::Result<Self, Self::Error> {
		match repr {
			CapacityRepr::Slots(slots) => Ok(Capacity::Fixed(slots)),
			CapacityRepr::Keyword(word) => word.parse(),
		}
	}
}

/// Settings for one generation run.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GeneratorConfig {
	/// Directory holding one entry per handler.
	pub input_dir: PathBuf,
	/// Artifact path, replaced on every run.
	pub output: PathBuf,
	/// Artifact flavor; inferred from `output` when unset.
	pub kind: Option<ArtifactKind>,
	pub capacity: Capacity,
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self {
			input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
			output: PathBuf::from(DEFAULT_OUTPUT),
			kind: None,
			capacity: Capacity::default(),
		}
	}
}

impl GeneratorConfig {
	/// Loads a TOML config file. Missing keys keep their defaults.
	pub fn load(path: &Path) -> Result<Self> {
		let text = fs::read_to_string(path).map_err(|source| GenerateError::ConfigRead {
			path: path.to_path_buf(),
			source,
		})?;
		toml::from_str(&text).map_err(|source| GenerateError::ConfigParse {
			path: path.to_path_buf(),
			source,
		})
	}

	pub fn artifact_kind(&self) -> ArtifactKind {
		self.kind.unwrap_or_else(|| ArtifactKind::infer(&self.output))
	}
}
