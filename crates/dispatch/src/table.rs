use std::fmt;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use crate::error::InstallError;
use crate::handler::HandlerFn;

/// Name to handler mapping populated by a generated `collect_handlers()`.
///
/// The table exposes no removal API. Once the initialization routine returns
/// it, the table only serves lookups.
#[derive(Clone)]
pub struct HandlerTable {
	entries: FxHashMap<&'static str, HandlerFn>,
	capacity: usize,
}

impl HandlerTable {
	/// Reserves room for `capacity` handlers, returning `None` if the
	/// allocation fails.
	pub fn try_with_capacity(capacity: usize) -> Option<Self> {
		let mut entries = FxHashMap::default();
		entries.try_reserve(capacity).ok()?;
		Some(Self { entries, capacity })
	}

	/// Registers `handler` under `name`, returning any handler it displaced.
	pub fn insert(&mut self, name: &'static str, handler: HandlerFn) -> Option<HandlerFn> {
		self.entries.insert(name, handler)
	}

	pub fn get(&self, name: &str) -> Option<HandlerFn> {
		self.entries.get(name).copied()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Number of slots requested at construction.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Registered names in lexicographic order.
	pub fn names(&self) -> Vec<&'static str> {
		let mut names: Vec<_> = self.entries.keys().copied().collect();
		names.sort_unstable();
		names
	}

	pub fn iter(&self) -> impl Iterator<Item = (&'static str, HandlerFn)> + '_ {
		self.entries.iter().map(|(name, handler)| (*name, *handler))
	}
}

impl fmt::Debug for HandlerTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HandlerTable")
			.field("names", &self.names())
			.field("capacity", &self.capacity)
			.finish()
	}
}

/// Process-wide, build-once holder for a [`HandlerTable`].
///
/// Construction happens-before every read handed out by [`SharedTable::get`].
#[derive(Debug, Default)]
pub struct SharedTable {
	cell: OnceLock<HandlerTable>,
}

impl SharedTable {
	pub const fn new() -> Self {
		Self {
			cell: OnceLock::new(),
		}
	}

	/// Installs `table` unless one is already present.
	pub fn install(&self, table: HandlerTable) -> Result<&HandlerTable, InstallError> {
		self.cell
			.set(table)
			.map_err(|_| InstallError::AlreadyInstalled)?;
		self.cell.get().ok_or(InstallError::AlreadyInstalled)
	}

	/// Returns the installed table, building it with `build` on first use.
	///
	/// A `None` from `build` leaves the holder empty so a later call may retry.
	pub fn get_or_build(
		&self,
		build: impl FnOnce() -> Option<HandlerTable>,
	) -> Result<&HandlerTable, InstallError> {
		if let Some(table) = self.cell.get() {
			return Ok(table);
		}
		let table = build().ok_or(InstallError::Allocation)?;
		// A concurrent builder may have won; either way the cell is now set.
		let _ = self.cell.set(table);
		self.cell.get().ok_or(InstallError::Allocation)
	}

	pub fn get(&self) -> Option<&HandlerTable> {
		self.cell.get()
	}
}

#[cfg(test)]
mod tests {
	use std::any::Any;
	use std::sync::atomic::{AtomicBool, Ordering};

	use super::*;
	use crate::handler::{HandlerOptions, HandlerStatus, RequestContext, UserData};

	fn noop(_: &RequestContext) {}

	fn ok_handler(
		ctx: &mut RequestContext,
		progress: fn(&RequestContext),
		_stop: &AtomicBool,
		_opts: &HandlerOptions,
		_data: UserData<'_>,
	) -> HandlerStatus {
		ctx.advance(1);
		progress(ctx);
		HandlerStatus::Ok
	}

	fn stopping_handler(
		_ctx: &mut RequestContext,
		_progress: fn(&RequestContext),
		stop: &AtomicBool,
		_opts: &HandlerOptions,
		data: UserData<'_>,
	) -> HandlerStatus {
		if let Some(calls) = data.and_then(|d| d.downcast_mut::<u32>()) {
			*calls += 1;
		}
		if stop.load(Ordering::Relaxed) {
			HandlerStatus::Aborted
		} else {
			HandlerStatus::Ok
		}
	}

	fn invoke(handler: HandlerFn, stop: bool, data: UserData<'_>) -> HandlerStatus {
		let mut ctx = RequestContext::new("test://resource");
		handler(
			&mut ctx,
			noop,
			&AtomicBool::new(stop),
			&HandlerOptions::default(),
			data,
		)
	}

	#[test]
	fn lookup_returns_registered_handler() {
		let mut table = HandlerTable::try_with_capacity(64).expect("allocation");
		table.insert("ok", ok_handler);
		table.insert("stop", stopping_handler);

		assert_eq!(table.len(), 2);
		assert_eq!(table.capacity(), 64);
		assert_eq!(table.names(), vec!["ok", "stop"]);
		assert!(table.get("missing").is_none());

		let handler = table.get("stop").expect("registered");
		assert_eq!(invoke(handler, true, None), HandlerStatus::Aborted);
		assert_eq!(invoke(handler, false, None), HandlerStatus::Ok);
	}

	#[test]
	fn user_data_reaches_handler() {
		let mut table = HandlerTable::try_with_capacity(1).expect("allocation");
		table.insert("stop", stopping_handler);

		let mut calls = 0u32;
		let handler = table.get("stop").expect("registered");
		invoke(handler, false, Some(&mut calls as &mut dyn Any));
		invoke(handler, false, Some(&mut calls as &mut dyn Any));
		assert_eq!(calls, 2);
	}

	#[test]
	fn empty_table_is_valid() {
		let table = HandlerTable::try_with_capacity(0).expect("allocation");
		assert!(table.is_empty());
		assert!(table.names().is_empty());
	}

	#[test]
	fn insert_reports_displaced_handler() {
		let mut table = HandlerTable::try_with_capacity(2).expect("allocation");
		assert!(table.insert("ok", ok_handler).is_none());
		assert!(table.insert("ok", stopping_handler).is_some());
		assert_eq!(table.len(), 1);
	}

	#[test]
	fn shared_table_builds_once() {
		let shared = SharedTable::new();
		assert!(shared.get().is_none());

		let mut builds = 0;
		for _ in 0..3 {
			let table = shared
				.get_or_build(|| {
					builds += 1;
					let mut table = HandlerTable::try_with_capacity(4)?;
					table.insert("ok", ok_handler);
					Some(table)
				})
				.expect("built");
			assert!(table.contains("ok"));
		}
		assert_eq!(builds, 1);
	}

	#[test]
	fn shared_table_rejects_second_install() {
		let shared = SharedTable::new();
		let first = HandlerTable::try_with_capacity(1).expect("allocation");
		let second = HandlerTable::try_with_capacity(1).expect("allocation");

		shared.install(first).expect("first install");
		assert_eq!(
			shared.install(second).unwrap_err(),
			InstallError::AlreadyInstalled
		);
	}

	#[test]
	fn failed_build_leaves_holder_empty() {
		let shared = SharedTable::new();
		assert_eq!(
			shared.get_or_build(|| None).unwrap_err(),
			InstallError::Allocation
		);
		assert!(shared.get().is_none());
	}
}
