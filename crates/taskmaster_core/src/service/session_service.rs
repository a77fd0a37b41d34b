//! Session manager: account creation, sign-in/out, session restore.
//!
//! # Responsibility
//! - Own the `users` collection and the persisted `currentUser` session.
//! - Enforce unique emails and password confirmation at sign-up.
//!
//! # Invariants
//! - At most one session exists at a time.
//! - Sign-out clears the session only; per-user data stays persisted.
//! - Credentials are matched exactly and case-sensitively against the
//!   stored plaintext password (local-only account model, not real auth).

use crate::model::user::{Session, User, UserId};
use crate::store::{keys, Store, StoreError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

pub type SessionResult<T> = Result<T, SessionError>;

/// Errors from account and session operations.
#[derive(Debug)]
pub enum SessionError {
    /// Sign-up password and confirmation differ.
    PasswordMismatch,
    /// A user with this email is already registered.
    DuplicateEmail(String),
    /// No stored user matches the given email/password pair.
    InvalidCredentials,
    Store(StoreError),
    /// Persisted payload could not be decoded.
    InvalidData(String),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PasswordMismatch => write!(f, "passwords do not match"),
            Self::DuplicateEmail(email) => {
                write!(f, "user with email `{email}` already exists")
            }
            Self::InvalidCredentials => write!(f, "invalid email or password"),
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted session data: {message}")
            }
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Owns the current session and the registered-user collection.
pub struct SessionManager {
    store: Rc<dyn Store>,
    current: Option<Session>,
}

impl SessionManager {
    pub fn new(store: Rc<dyn Store>) -> Self {
        Self {
            store,
            current: None,
        }
    }

    /// Registers a new account and signs it in.
    ///
    /// On success the new user gets empty task/notification sequences so a
    /// later load sees a well-formed (if empty) payload.
    ///
    /// # Errors
    /// - `PasswordMismatch` when `password != confirm_password`.
    /// - `DuplicateEmail` when the email is already registered; the user
    ///   collection is left untouched.
    pub fn sign_up(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> SessionResult<Session> {
        if password != confirm_password {
            return Err(SessionError::PasswordMismatch);
        }

        let mut users = self.load_users()?;
        if users.iter().any(|user| user.email == email) {
            return Err(SessionError::DuplicateEmail(email.to_string()));
        }

        let user = User::new(name, email, password);
        let session = user.session();
        users.push(user);
        self.persist_users(&users)?;

        self.store.set(&keys::tasks(session.id), "[]")?;
        self.store.set(&keys::notifications(session.id), "[]")?;

        self.set_session(session.clone())?;
        info!(
            "event=sign_up module=session status=ok user_id={}",
            session.id
        );
        Ok(session)
    }

    /// Signs in an existing account by exact email/password match.
    pub fn sign_in(&mut self, email: &str, password: &str) -> SessionResult<Session> {
        let users = self.load_users()?;
        let user = users
            .iter()
            .find(|user| user.email == email && user.password == password)
            .ok_or(SessionError::InvalidCredentials)?;

        let session = user.session();
        self.set_session(session.clone())?;
        info!(
            "event=sign_in module=session status=ok user_id={}",
            session.id
        );
        Ok(session)
    }

    /// Clears the session. Persisted task/notification data is untouched.
    pub fn sign_out(&mut self) -> SessionResult<()> {
        if let Some(session) = self.current.take() {
            info!(
                "event=sign_out module=session status=ok user_id={}",
                session.id
            );
        }
        self.store.remove(keys::CURRENT_USER)?;
        Ok(())
    }

    /// Restores a persisted session on process start, if one exists.
    pub fn restore(&mut self) -> SessionResult<Option<Session>> {
        let Some(payload) = self.store.get(keys::CURRENT_USER)? else {
            self.current = None;
            return Ok(None);
        };
        let session: Session = serde_json::from_str(&payload)
            .map_err(|err| SessionError::InvalidData(err.to_string()))?;
        info!(
            "event=session_restore module=session status=ok user_id={}",
            session.id
        );
        self.current = Some(session.clone());
        Ok(Some(session))
    }

    /// The active session, if any.
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// The active user's id, if signed in.
    pub fn current_user_id(&self) -> Option<UserId> {
        self.current.as_ref().map(|session| session.id)
    }

    fn set_session(&mut self, session: Session) -> SessionResult<()> {
        let payload = serde_json::to_string(&session)
            .map_err(|err| SessionError::InvalidData(err.to_string()))?;
        self.store.set(keys::CURRENT_USER, &payload)?;
        self.current = Some(session);
        Ok(())
    }

    fn load_users(&self) -> SessionResult<Vec<User>> {
        match self.store.get(keys::USERS)? {
            Some(payload) => serde_json::from_str(&payload)
                .map_err(|err| SessionError::InvalidData(err.to_string())),
            None => Ok(Vec::new()),
        }
    }

    fn persist_users(&self, users: &[User]) -> SessionResult<()> {
        let payload = serde_json::to_string(users)
            .map_err(|err| SessionError::InvalidData(err.to_string()))?;
        self.store.set(keys::USERS, &payload)?;
        Ok(())
    }
}

/// Welcome copy shown right after a successful sign-up.
pub fn welcome_notification(name: &str) -> (String, String) {
    (
        "Welcome to TaskMaster!".to_string(),
        format!("Hello {name}, let's get things done!"),
    )
}

/// Welcome copy shown right after a successful sign-in.
pub fn welcome_back_notification(name: &str) -> (String, String) {
    (
        "Welcome Back!".to_string(),
        format!("Hello {name}, welcome back to TaskMaster!"),
    )
}
