use axum::{extract::State, Json};

use crate::dto::{GeneralReportResponse, MoodReportResponse, ReportQuery};
use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::models::mood::month_name;
use crate::AppState;

pub async fn general_report(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ReportQuery>,
) -> AppResult<Json<GeneralReportResponse>> {
    let month = query.require_month()?;
    let diary = state.diary.lock().await;

    let response = match diary.general_report(month)? {
        Some(counts) => GeneralReportResponse::Counts {
            month,
            month_name: month_name(month).unwrap_or_default(),
            total: counts.values().sum(),
            counts,
        },
        None => GeneralReportResponse::Empty {
            message: "No entries for this month".into(),
            month,
        },
    };

    Ok(Json(response))
}

pub async fn mood_report(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ReportQuery>,
) -> AppResult<Json<MoodReportResponse>> {
    let month = query.require_month()?;
    let mood = query.require_mood()?;
    let diary = state.diary.lock().await;

    let (mood, count) = diary.mood_report(month, mood)?;
    Ok(Json(MoodReportResponse { month, mood, count }))
}
