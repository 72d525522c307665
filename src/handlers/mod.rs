pub mod auth;
pub mod entries;
pub mod health;
pub mod reports;

use crate::error::{AppError, AppResult};
use crate::services::diary::DiaryService;
use crate::AppState;

/// Run a snapshot-writing operation on the blocking pool while holding the
/// diary lock, so the file write never stalls a runtime worker.
pub(crate) async fn with_diary_blocking<T, F>(state: &AppState, op: F) -> AppResult<T>
where
    F: FnOnce(&mut DiaryService) -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    let mut diary = state.diary.clone().lock_owned().await;
    tokio::task::spawn_blocking(move || op(&mut *diary))
        .await
        .map_err(|e| AppError::Internal(e.into()))?
}
