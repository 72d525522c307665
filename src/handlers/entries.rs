use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::dto::{AddEntryRequest, AddEntryResponse, EntriesResponse, ViewEntryQuery};
use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::handlers::with_diary_blocking;
use crate::models::user::MoodEntry;
use crate::AppState;

pub async fn add_entry(
    State(state): State<AppState>,
    AppJson(body): AppJson<AddEntryRequest>,
) -> AppResult<(StatusCode, Json<AddEntryResponse>)> {
    body.validate()?;

    let (entry, updated) = with_diary_blocking(&state, move |diary| {
        diary.add_entry(body.day, body.month, &body.mood)
    })
    .await?;

    let (status, message) = if updated {
        (StatusCode::OK, "Entry updated")
    } else {
        (StatusCode::CREATED, "Entry added")
    };

    Ok((
        status,
        Json(AddEntryResponse {
            message: message.into(),
            created: !updated,
            entry,
        }),
    ))
}

pub async fn view_entry(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ViewEntryQuery>,
) -> AppResult<Json<MoodEntry>> {
    let (day, month) = query.require()?;
    let diary = state.diary.lock().await;

    Ok(Json(diary.view_entry(day, month)?))
}

pub async fn list_entries(State(state): State<AppState>) -> AppResult<Json<EntriesResponse>> {
    let diary = state.diary.lock().await;
    let user = diary.all_entries()?;

    Ok(Json(EntriesResponse {
        username: user.username.clone(),
        entries: user.entries.clone(),
    }))
}
