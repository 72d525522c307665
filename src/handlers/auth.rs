use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::dto::{LoginRequest, RegisterRequest, SessionResponse};
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::handlers::with_diary_blocking;
use crate::models::user::UserProfile;
use crate::AppState;

pub async fn register(
    State(state): State<AppState>,
    AppJson(body): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<SessionResponse>)> {
    body.validate()?;

    let user = with_diary_blocking(&state, move |diary| diary.register(&body.username)).await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            message: "Account created".into(),
            username: user.username,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> AppResult<Json<SessionResponse>> {
    let mut diary = state.diary.lock().await;
    let user = diary.login(&body.username)?;

    Ok(Json(SessionResponse {
        message: "Logged in".into(),
        username: user.username,
    }))
}

pub async fn switch_user(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> AppResult<Json<SessionResponse>> {
    let mut diary = state.diary.lock().await;
    let user = diary.switch_user(&body.username)?;

    Ok(Json(SessionResponse {
        message: "Active user changed".into(),
        username: user.username,
    }))
}

pub async fn me(State(state): State<AppState>) -> AppResult<Json<UserProfile>> {
    let diary = state.diary.lock().await;
    Ok(Json(diary.current_user_info()?))
}
