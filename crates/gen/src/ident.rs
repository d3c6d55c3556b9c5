//! Handler identifiers and the symbol naming transform.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const SYMBOL_PREFIX: &str = "process_";
pub const SYMBOL_SUFFIX: &str = "_request";

/// Words a Rust module cannot be named after.
const RUST_KEYWORDS: &[&str] = &[
	"_", "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
	"crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
	"impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
	"ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type", "typeof",
	"unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Why a name was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentError {
	#[error("name is empty")]
	Empty,
	#[error("name is not valid UTF-8")]
	NotUtf8,
	#[error("name starts with {0:?}")]
	InvalidStart(char),
	#[error("name contains {0:?}")]
	InvalidChar(char),
	#[error("'{0}' is a reserved Rust keyword")]
	Keyword(String),
}

/// Registry key of one protocol handler.
///
/// Always matches `[A-Za-z_][A-Za-z0-9_]*`, so it is usable verbatim as a
/// quoted key and inside the handler's symbol name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerIdentifier(String);

impl HandlerIdentifier {
	pub fn new(raw: impl Into<String>) -> Result<Self, IdentError> {
		let raw = raw.into();
		let mut chars = raw.chars();
		let first = chars.next().ok_or(IdentError::Empty)?;
		if !(first.is_ascii_alphabetic() || first == '_') {
			return Err(IdentError::InvalidStart(first));
		}
		if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
			return Err(IdentError::InvalidChar(bad));
		}
		Ok(Self(raw))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Entry point symbol the handler must export: `process_<id>_request`.
	pub fn symbol(&self) -> String {
		format!("{SYMBOL_PREFIX}{}{SYMBOL_SUFFIX}", self.0)
	}

	/// Inverse of [`HandlerIdentifier::symbol`].
	pub fn from_symbol(symbol: &str) -> Option<Self> {
		let inner = symbol
			.strip_prefix(SYMBOL_PREFIX)?
			.strip_suffix(SYMBOL_SUFFIX)?;
		Self::new(inner).ok()
	}

	pub fn is_rust_keyword(&self) -> bool {
		RUST_KEYWORDS.contains(&self.0.as_str())
	}
}

impl fmt::Display for HandlerIdentifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for HandlerIdentifier {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl FromStr for HandlerIdentifier {
	type Err = IdentError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
