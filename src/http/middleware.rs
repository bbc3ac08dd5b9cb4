//! Request middleware

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::app::AppState;

use super::error::AppError;

/// Middleware to throttle writes.
///
/// Only POST requests consume quota; reads always pass through.
pub async fn limit_writes(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if request.method() == Method::POST {
        if let Some(limiter) = &state.write_limiter {
            if limiter.check().is_err() {
                warn!(path = %request.uri().path(), "Write rate limit exceeded");
                return Err(AppError::TooManyRequests);
            }
        }
    }

    Ok(next.run(request).await)
}
