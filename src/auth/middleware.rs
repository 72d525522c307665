use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::AppState;

/// Reject requests while no user is active. Runs before body and query
/// extraction, so a missing session is reported ahead of malformed input.
pub async fn require_active_user(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let username = {
        let diary = state.diary.lock().await;
        diary.active_user()?.username.clone()
    };

    tracing::debug!(username = %username, path = %req.uri().path(), "Active user resolved");
    Ok(next.run(req).await)
}
