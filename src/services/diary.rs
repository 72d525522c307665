//! The operations the HTTP layer calls into.
//!
//! Every successful mutation is followed by a full snapshot save before it
//! returns. If the save fails the in-memory change is rolled back, so the
//! directory always matches the last snapshot that reached disk.

use crate::error::{AppError, AppResult};
use crate::models::mood::Mood;
use crate::models::user::{MoodEntry, User, UserProfile};
use crate::services::directory::{Session, UserDirectory};
use crate::services::reports::{self, MoodCounts};
use crate::storage::{DiaryStorage, StorageError};
use crate::validation;

pub struct DiaryService {
    directory: UserDirectory,
    session: Session,
    storage: Box<dyn DiaryStorage>,
}

impl DiaryService {
    /// Load the last snapshot from `storage` and start with no active user.
    pub fn open(storage: Box<dyn DiaryStorage>) -> Result<Self, StorageError> {
        let users = storage.load()?;
        tracing::info!(users = users.len(), "User directory loaded");
        Ok(Self {
            directory: UserDirectory::new(users),
            session: Session::new(),
            storage,
        })
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Check that the snapshot can still be read back.
    pub fn check_storage(&self) -> Result<(), StorageError> {
        self.storage.load().map(|_| ())
    }

    fn flush(&self) -> Result<(), StorageError> {
        self.storage.save(self.directory.users())
    }

    /// The active user's record, or `Unauthorized` before any login.
    pub fn active_user(&self) -> AppResult<&User> {
        self.directory
            .current_user(&self.session)
            .ok_or(AppError::Unauthorized)
    }

    pub fn register(&mut self, username: &str) -> AppResult<User> {
        let previous_session = self.session.clone();
        let user = self.directory.register(&mut self.session, username)?;

        if let Err(e) = self.flush() {
            self.directory.remove_user(username);
            self.session = previous_session;
            return Err(e.into());
        }

        tracing::info!(username = %username, "User registered");
        Ok(user)
    }

    pub fn login(&mut self, username: &str) -> AppResult<User> {
        let user = self.directory.login(&mut self.session, username)?;
        tracing::info!(username = %username, "User logged in");
        Ok(user)
    }

    pub fn switch_user(&mut self, username: &str) -> AppResult<User> {
        let user = self.directory.switch_user(&mut self.session, username)?;
        tracing::info!(username = %username, "Switched active user");
        Ok(user)
    }

    /// Record `mood` for `(day, month)`, replacing any earlier mood for that
    /// date. Returns the stored entry and whether it already existed.
    pub fn add_entry(&mut self, day: i32, month: i32, mood: &str) -> AppResult<(MoodEntry, bool)> {
        let previous = self.active_user()?.clone();
        validation::check_date(day, month)?;
        let mood = validation::parse_mood(mood)?;

        let mut user = previous.clone();
        let updated = user.upsert_entry(day, month, mood);
        let username = user.username.clone();
        self.directory.update_user(user);

        if let Err(e) = self.flush() {
            self.directory.update_user(previous);
            return Err(e.into());
        }

        tracing::info!(
            username = %username,
            day = day,
            month = month,
            mood = %mood,
            updated = updated,
            "Mood entry saved"
        );
        Ok((MoodEntry { day, month, mood }, updated))
    }

    pub fn view_entry(&self, day: i32, month: i32) -> AppResult<MoodEntry> {
        let user = self.active_user()?;
        validation::check_date(day, month)?;
        user.find_entry(day, month)
            .copied()
            .ok_or_else(|| AppError::NotFound(format!("No entry for {}.{}", day, month)))
    }

    /// Per-mood counts for `month`, or `None` when the month has no entries.
    pub fn general_report(&self, month: i32) -> AppResult<Option<MoodCounts>> {
        let user = self.active_user()?;
        validation::check_month(month)?;
        Ok(reports::general_report(&user.entries, month))
    }

    pub fn mood_report(&self, month: i32, mood: &str) -> AppResult<(Mood, usize)> {
        let user = self.active_user()?;
        let mood = validation::parse_mood(mood)?;
        validation::check_month(month)?;
        Ok((mood, reports::mood_report(&user.entries, month, mood)))
    }

    pub fn all_entries(&self) -> AppResult<&User> {
        self.active_user()
    }

    pub fn current_user_info(&self) -> AppResult<UserProfile> {
        Ok(self.active_user()?.profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JsonFileStorage, Users};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Storage that keeps the last snapshot in memory and can be told to fail.
    #[derive(Default, Clone)]
    struct FlakyStorage {
        fail: Arc<AtomicBool>,
        saved: Arc<std::sync::Mutex<Option<Users>>>,
    }

    impl DiaryStorage for FlakyStorage {
        fn load(&self) -> Result<Users, StorageError> {
            Ok(self.saved.lock().unwrap().clone().unwrap_or_default())
        }

        fn save(&self, users: &Users) -> Result<(), StorageError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(StorageError::Io(std::io::Error::other("disk full")));
            }
            *self.saved.lock().unwrap() = Some(users.clone());
            Ok(())
        }
    }

    fn service() -> (DiaryService, FlakyStorage) {
        let storage = FlakyStorage::default();
        let svc = DiaryService::open(Box::new(storage.clone())).unwrap();
        (svc, storage)
    }

    #[test]
    fn test_operations_require_active_user() {
        let (mut svc, _) = service();
        assert!(matches!(svc.add_entry(1, 1, "Злое"), Err(AppError::Unauthorized)));
        assert!(matches!(svc.view_entry(1, 1), Err(AppError::Unauthorized)));
        assert!(matches!(svc.general_report(1), Err(AppError::Unauthorized)));
        assert!(matches!(svc.mood_report(1, "Злое"), Err(AppError::Unauthorized)));
        assert!(matches!(svc.all_entries(), Err(AppError::Unauthorized)));
        assert!(matches!(svc.current_user_info(), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_unauthorized_is_reported_before_validation() {
        let (mut svc, _) = service();
        assert!(matches!(svc.add_entry(99, 99, "nope"), Err(AppError::Unauthorized)));
        assert!(matches!(svc.general_report(13), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_update_replaces_instead_of_duplicating() {
        let (mut svc, storage) = service();
        svc.register("alice").unwrap();

        let (_, updated) = svc.add_entry(10, 6, "Радостное").unwrap();
        assert!(!updated);
        let (entry, updated) = svc.add_entry(10, 6, "Спокойное").unwrap();
        assert!(updated);
        assert_eq!(entry.mood, Mood::Calm);

        assert_eq!(svc.view_entry(10, 6).unwrap().mood, Mood::Calm);
        assert_eq!(svc.all_entries().unwrap().entries.len(), 1);

        let saved = storage.load().unwrap();
        assert_eq!(saved["alice"].entries[0].mood, Mood::Calm);
    }

    #[test]
    fn test_add_entry_validation_happens_before_mutation() {
        let (mut svc, _) = service();
        svc.register("alice").unwrap();

        assert!(matches!(svc.add_entry(29, 2, "Злое"), Err(AppError::Validation(_))));
        assert!(matches!(svc.add_entry(31, 4, "Злое"), Err(AppError::Validation(_))));
        assert!(matches!(svc.add_entry(1, 13, "Злое"), Err(AppError::Validation(_))));
        assert!(matches!(svc.add_entry(1, 1, "Angry"), Err(AppError::Validation(_))));
        assert_eq!(svc.current_user_info().unwrap().entries_count, 0);
    }

    #[test]
    fn test_view_entry_missing_is_not_found() {
        let (mut svc, _) = service();
        svc.register("alice").unwrap();
        assert!(matches!(svc.view_entry(1, 1), Err(AppError::NotFound(_))));
        assert!(matches!(svc.view_entry(30, 2), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_entries_are_scoped_to_active_user() {
        let (mut svc, _) = service();
        svc.register("alice").unwrap();
        svc.add_entry(1, 1, "Грустное").unwrap();
        svc.register("bob").unwrap();

        assert!(matches!(svc.view_entry(1, 1), Err(AppError::NotFound(_))));
        svc.switch_user("alice").unwrap();
        assert_eq!(svc.view_entry(1, 1).unwrap().mood, Mood::Sad);
    }

    #[test]
    fn test_duplicate_register_keeps_active_user_and_entries() {
        let (mut svc, _) = service();
        svc.register("alice").unwrap();
        svc.add_entry(5, 3, "Радостное").unwrap();
        svc.register("bob").unwrap();

        assert!(matches!(svc.register("alice"), Err(AppError::Conflict(_))));
        assert_eq!(svc.session().active_user(), Some("bob"));
        assert_eq!(svc.directory().users()["alice"].entries.len(), 1);
    }

    #[test]
    fn test_general_report_scenario() {
        let (mut svc, _) = service();
        svc.register("alice").unwrap();
        svc.add_entry(1, 6, "Грустное").unwrap();
        svc.add_entry(2, 6, "Грустное").unwrap();
        svc.add_entry(3, 6, "Радостное").unwrap();

        let counts = svc.general_report(6).unwrap().unwrap();
        let pairs: Vec<(&str, usize)> = counts.into_iter().collect();
        assert_eq!(pairs, vec![("Грустное", 2), ("Радостное", 1)]);

        assert!(svc.general_report(7).unwrap().is_none());
        assert!(matches!(svc.general_report(0), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_mood_report_zero_and_invalid_inputs() {
        let (mut svc, _) = service();
        svc.register("alice").unwrap();
        svc.add_entry(1, 6, "Грустное").unwrap();

        assert_eq!(svc.mood_report(6, "Грустное").unwrap(), (Mood::Sad, 1));
        assert_eq!(svc.mood_report(6, "Злое").unwrap(), (Mood::Angry, 0));
        assert!(matches!(svc.mood_report(13, "Злое"), Err(AppError::Validation(_))));
        assert!(matches!(svc.mood_report(6, "злое"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_failed_save_rolls_back_new_entry() {
        let (mut svc, storage) = service();
        svc.register("alice").unwrap();
        svc.add_entry(1, 1, "Спокойное").unwrap();

        storage.fail.store(true, Ordering::SeqCst);
        assert!(matches!(svc.add_entry(2, 1, "Злое"), Err(AppError::Persistence(_))));
        assert!(matches!(svc.add_entry(1, 1, "Злое"), Err(AppError::Persistence(_))));

        let user = svc.all_entries().unwrap();
        assert_eq!(user.entries, vec![MoodEntry { day: 1, month: 1, mood: Mood::Calm }]);
        assert_eq!(storage.load().unwrap()["alice"], *user);
    }

    #[test]
    fn test_failed_save_rolls_back_registration() {
        let (mut svc, storage) = service();
        svc.register("alice").unwrap();

        storage.fail.store(true, Ordering::SeqCst);
        assert!(matches!(svc.register("bob"), Err(AppError::Persistence(_))));
        assert!(!svc.directory().users().contains_key("bob"));
        assert_eq!(svc.session().active_user(), Some("alice"));

        storage.fail.store(false, Ordering::SeqCst);
        svc.register("bob").unwrap();
        assert_eq!(svc.session().active_user(), Some("bob"));
    }

    #[test]
    fn test_login_does_not_write_snapshot() {
        let (mut svc, storage) = service();
        svc.register("alice").unwrap();
        storage.fail.store(true, Ordering::SeqCst);
        svc.login("alice").unwrap();
        svc.switch_user("alice").unwrap();
    }

    #[test]
    fn test_reopen_restores_users_without_active_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mood_diary.json");

        let mut svc = DiaryService::open(Box::new(JsonFileStorage::new(&path))).unwrap();
        svc.register("alice").unwrap();
        svc.add_entry(10, 6, "Радостное").unwrap();
        svc.add_entry(1, 6, "Злое").unwrap();
        let before = svc.directory().users().clone();
        drop(svc);

        let mut svc = DiaryService::open(Box::new(JsonFileStorage::new(&path))).unwrap();
        assert_eq!(svc.directory().users(), &before);
        assert!(matches!(svc.current_user_info(), Err(AppError::Unauthorized)));

        svc.login("alice").unwrap();
        let days: Vec<i32> = svc.all_entries().unwrap().entries.iter().map(|e| e.day).collect();
        assert_eq!(days, vec![10, 1]);
    }

    #[test]
    fn test_open_fails_on_malformed_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mood_diary.json");
        std::fs::write(&path, "[1, 2").unwrap();
        assert!(DiaryService::open(Box::new(JsonFileStorage::new(&path))).is_err());
    }
}
