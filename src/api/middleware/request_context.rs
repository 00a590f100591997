//! Request context middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::types::RequestContext;

/// Attach a [`RequestContext`] bounded by the configured request timeout.
///
/// The context is cancelled when the response is produced, so nothing
/// spawned under it outlives the request.
pub async fn request_context_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let ctx = RequestContext::with_timeout(state.request_timeout);
    let _guard = ctx.token().clone().drop_guard();

    tracing::trace!(timeout = ?state.request_timeout, "Request context attached");
    request.extensions_mut().insert(ctx);

    next.run(request).await
}
