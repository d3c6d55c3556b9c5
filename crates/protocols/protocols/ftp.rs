use std::sync::atomic::{AtomicBool, Ordering};

use protoreg_dispatch::{
	HandlerOptions, HandlerStatus, ProgressCallback, RequestContext, UserData,
};

pub fn process_ftp_request(
	ctx: &mut RequestContext,
	progress: ProgressCallback,
	stop: &AtomicBool,
	_options: &HandlerOptions,
	user_data: UserData<'_>,
) -> HandlerStatus {
	if ctx.scheme() != Some("ftp") {
		return HandlerStatus::Unsupported;
	}
	// Directory listings have no file to fetch.
	if ctx.url().ends_with('/') {
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
