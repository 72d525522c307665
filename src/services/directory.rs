use crate::error::{AppError, AppResult};
use crate::models::user::User;
use crate::storage::Users;

/// The active-user slot for one caller.
///
/// Holds the username only; the record itself stays in the
/// [`UserDirectory`]. Once set it is never cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    active_user: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_user(&self) -> Option<&str> {
        self.active_user.as_deref()
    }

    fn activate(&mut self, username: &str) {
        self.active_user = Some(username.to_string());
    }
}

/// Owner of every [`User`] record.
///
/// Reads hand out copies or borrows; changes to a user's entries are written
/// back with [`UserDirectory::update_user`].
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: Users,
}

impl UserDirectory {
    pub fn new(users: Users) -> Self {
        Self { users }
    }

    pub fn users(&self) -> &Users {
        &self.users
    }

    pub fn register(&mut self, session: &mut Session, username: &str) -> AppResult<User> {
        if username.is_empty() {
            return Err(AppError::Validation("Username must not be empty".into()));
        }
        if self.users.contains_key(username) {
            return Err(AppError::Conflict(format!(
                "User '{}' already exists",
                username
            )));
        }

        let user = User::new(username);
        self.users.insert(username.to_string(), user.clone());
        session.activate(username);
        Ok(user)
    }

    pub fn login(&self, session: &mut Session, username: &str) -> AppResult<User> {
        let user = self
            .users
            .get(username)
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))?;
        session.activate(username);
        Ok(user.clone())
    }

    /// Same contract as [`UserDirectory::login`].
    pub fn switch_user(&self, session: &mut Session, username: &str) -> AppResult<User> {
        self.login(session, username)
    }

    pub fn current_user(&self, session: &Session) -> Option<&User> {
        session.active_user().and_then(|name| self.users.get(name))
    }

    /// Store `user` under its username, replacing any previous record.
    pub fn update_user(&mut self, user: User) {
        self.users.insert(user.username.clone(), user);
    }

    /// Undo a registration. Only used to roll back a failed save.
    pub(crate) fn remove_user(&mut self, username: &str) -> Option<User> {
        self.users.remove(username)
    }
}
