//! Built-in protocol handlers.
//!
//! The handler set is whatever `protocols/` contains at build time. The table
//! is built on first access and only read afterwards.

mod registry {
	include!(concat!(env!("OUT_DIR"), "/protocols.rs"));
}

use protoreg_dispatch::{HandlerFn, HandlerTable, InstallError, SharedTable};
pub use registry::{HANDLER_NAMES, collect_handlers};

static HANDLERS: SharedTable = SharedTable::new();

/// The process-wide handler table.
pub fn handlers() -> Result<&'static HandlerTable, InstallError> {
	HANDLERS.get_or_build(collect_handlers)
}

/// Looks up the handler registered for `protocol`.
pub fn lookup(protocol: &str) -> Option<HandlerFn> {
	handlers().ok()?.get(protocol)
}
