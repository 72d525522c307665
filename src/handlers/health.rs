use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::dto::ServiceInfoResponse;
use crate::models::mood::Mood;
use crate::AppState;

pub async fn index() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        message: "Mood Tracker API is running".into(),
        moods: Mood::labels(),
    })
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "moodtracker-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let storage_ok = match state.diary.lock().await.check_storage() {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            false
        }
    };

    if storage_ok {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "checks": { "storage": "ok" },
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "checks": { "storage": "failed" },
            })),
        )
    }
}
