use thiserror::Error;

/// Errors raised while installing the process-wide handler table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstallError {
	/// A table was already installed; the installed table is never replaced.
	#[error("handler table already installed")]
	AlreadyInstalled,
	/// The table's container could not be allocated.
	#[error("failed to allocate handler table")]
	Allocation,
}
