//! Runtime side of a generated protocol registry.
//!
//! Generated `collect_handlers()` routines build a [`HandlerTable`] mapping a
//! protocol name to its [`HandlerFn`]. The table is built once during an
//! explicit initialization phase and is read-only afterwards; [`SharedTable`]
//! is the process-wide holder consumers expose through an accessor.

mod error;
mod handler;
mod table;

pub use error::InstallError;
pub use handler::{
	HandlerFn, HandlerOptions, HandlerStatus, ProgressCallback, RequestContext, UserData,
};
pub use table::{HandlerTable, SharedTable};
