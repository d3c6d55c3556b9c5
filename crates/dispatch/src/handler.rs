//! The calling contract every protocol handler satisfies.

use std::any::Any;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

/// Result code returned by a handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum HandlerStatus {
	Ok = 0,
	/// The stop flag was raised before the request finished.
	Aborted = 1,
	/// The handler does not support the requested resource.
	Unsupported = 2,
	Io = 3,
	Protocol = 4,
}

impl HandlerStatus {
	pub fn is_ok(self) -> bool {
		self == HandlerStatus::Ok
	}

	/// Numeric result code, stable across releases.
	pub fn code(self) -> i32 {
		self as i32
	}
}

/// Per-request state owned by the caller and handed to a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
	url: String,
	total: Option<u64>,
	received: u64,
}

impl RequestContext {
	pub fn new(url: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			total: None,
			received: 0,
		}
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	/// The URL scheme, i.e. everything before `://`.
	pub fn scheme(&self) -> Option<&str> {
		self.url.split_once("://").map(|(scheme, _)| scheme)
	}

	pub fn total(&self) -> Option<u64> {
		self.total
	}

	pub fn set_total(&mut self, total: u64) {
		self.total = Some(total);
	}

	pub fn received(&self) -> u64 {
		self.received
	}

	pub fn advance(&mut self, bytes: u64) {
		self.received = self.received.saturating_add(bytes);
	}
}

/// Caller-provided tuning knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerOptions {
	pub max_connections: usize,
	pub user_agent: Option<String>,
	pub timeout: Duration,
}

impl Default for HandlerOptions {
	fn default() -> Self {
		Self {
			max_connections: 1,
			user_agent: None,
			timeout: Duration::from_secs(30),
		}
	}
}

/// Opaque caller data threaded through to a handler.
pub type UserData<'a> = Option<&'a mut (dyn Any + 'static)>;

/// Progress notification invoked by handlers as data arrives.
pub type ProgressCallback = fn(&RequestContext);

/// Entry point of a protocol handler.
///
/// Arguments are, in order: request context, progress callback, stop flag
/// polled by the handler, options, and opaque caller data.
pub type HandlerFn = fn(
	&mut RequestContext,
	ProgressCallback,
	&AtomicBool,
	&HandlerOptions,
	UserData<'_>,
) -> HandlerStatus;
