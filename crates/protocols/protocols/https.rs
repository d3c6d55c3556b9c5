use std::sync::atomic::AtomicBool;

use protoreg_dispatch::{
	HandlerOptions, HandlerStatus, ProgressCallback, RequestContext, UserData,
};

/// TLS transport is negotiated by the connection layer; the request flow is
/// plain HTTP.
pub fn process_https_request(
	ctx: &mut RequestContext,
	progress: ProgressCallback,
	stop: &AtomicBool,
	options: &HandlerOptions,
	user_data: UserData<'_>,
) -> HandlerStatus {
	if ctx.scheme() != Some("https") {
		return HandlerStatus::Unsupported;
	}
	super::http::process_http_request(ctx, progress, stop, options, user_data)
}
