use std::time::Duration;

use axum::{middleware::from_fn, routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

use crate::request_id::{self, MakeReqId};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, Default)]
pub struct StackOptions {
    /// Handler timeout; `None` uses 30s.
    pub timeout: Option<Duration>,
    pub cors_enabled: bool,
}

/// Add `/health` and wrap `router` in the standard middleware.
///
/// Order, outermost first: PropagateRequestId -> SetRequestId -> request id into
/// extensions -> Trace -> Timeout -> CORS -> BodyLimit.
pub fn with_standard_layers(router: Router, opts: &StackOptions) -> Router {
    let x_request_id = request_id::header();

    let mut router = router.route("/health", get(crate::web::health_check));

    // Layers added later wrap the ones added earlier, so build innermost first.
    router = router.layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES));
    if opts.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }
    router = router.layer(TimeoutLayer::new(opts.timeout.unwrap_or(DEFAULT_TIMEOUT)));
    router = router.layer(request_id::create_trace_layer());
    router = router.layer(from_fn(request_id::push_req_id_to_extensions));
    router = router.layer(SetRequestIdLayer::new(x_request_id.clone(), MakeReqId));
    router.layer(PropagateRequestIdLayer::new(x_request_id))
}
