use std::sync::atomic::{AtomicBool, Ordering};

use protoreg_dispatch::{
	HandlerOptions, HandlerStatus, ProgressCallback, RequestContext, UserData,
};

/// Schemes served by this handler.
const SCHEMES: &[&str] = &["http", "https"];

pub fn process_http_request(
	ctx: &mut RequestContext,
	progress: ProgressCallback,
	stop: &AtomicBool,
	options: &HandlerOptions,
	user_data: UserData<'_>,
) -> HandlerStatus {
	match ctx.scheme() {
		Some(scheme) if SCHEMES.contains(&scheme) => {}
		_ => return HandlerStatus::Unsupported,
	}
	if options.max_connections == 0 {
		return HandlerStatus::Protocol;
	}
	if stop.load(Ordering::Acquire) {
		return HandlerStatus::Aborted;
	}

	if let Some(calls) = user_data.and_then(|data| data.downcast_mut::<u32>()) {
		*calls += 1;
	}
	progress(ctx);
	HandlerStatus::Ok
}
