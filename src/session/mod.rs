//! The logged-in user and their bearer token.
//!
//! [`Session`] is an explicit value owned by the application state rather than a
//! process-wide global. It is created by [`bootstrap`] at startup, replaced on
//! registration or login, and torn down with [`Session::clear`]. Every read is a
//! null-safe projection of the current user: absence is `None`, never an error.
//!
//! # Lifecycle
//!
//! ```text
//! bootstrap(credentials) ──► Session { user, token }
//!        │                          │
//!        └── anonymous ◄── clear() ─┘
//! ```

use crate::api::{Api, Authenticated, Credentials};
use crate::domain::{Book, BookId, BookStatus, LibrisError, ReadingStatus, Result, User, UserId};

/// How the session is established at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Bootstrap {
    /// Start without a user.
    #[default]
    Anonymous,
    /// Log in through the auth service.
    Login(Credentials),
    /// Fetch a known user id without authenticating (development backends).
    UserId(UserId),
}

/// Current user and token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    user: Option<User>,
    token: Option<String>,
}

impl Session {
    /// An empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_user(&mut self, user: User) {
        tracing::debug!(user_id = user.id, "session user set");
        self.user = Some(user);
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Drops user and token (logout).
    pub fn clear(&mut self) {
        tracing::debug!("session cleared");
        self.user = None;
        self.token = None;
    }

    /// Returns whether a user is present.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|u| u.id)
    }

    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.name.as_str())
    }

    #[must_use]
    pub fn user_email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.email.as_deref())
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The user's reading-status list, if it was loaded.
    #[must_use]
    pub fn statuses_books(&self) -> Option<&[BookStatus]> {
        self.user.as_ref()?.book_statuses.as_deref()
    }

    /// The user's liked-book list, if it was loaded.
    #[must_use]
    pub fn liked_books(&self) -> Option<&[Book]> {
        self.user.as_ref()?.liked_books.as_deref()
    }

    /// Returns whether the current user has liked the book.
    #[must_use]
    pub fn has_liked(&self, book_id: BookId) -> bool {
        self.user.as_ref().is_some_and(|u| u.has_liked(book_id))
    }

    /// The current user's status for a book.
    #[must_use]
    pub fn status_of(&self, book_id: BookId) -> Option<ReadingStatus> {
        self.user.as_ref()?.status_of(book_id)
    }

    /// Adds a book to the liked list (no-op without a user or if already present).
    pub fn add_liked_book(&mut self, book: Book) {
        let Some(user) = self.user.as_mut() else {
            return;
        };
        let liked = user.liked_books.get_or_insert_with(Vec::new);
        if !liked.iter().any(|b| b.id == book.id) {
            liked.push(book);
        }
    }

    /// Removes a book from the liked list by id.
    pub fn remove_liked_book(&mut self, book_id: BookId) {
        if let Some(liked) = self.user.as_mut().and_then(|u| u.liked_books.as_mut()) {
            liked.retain(|b| b.id != book_id);
        }
    }

    /// Sets the status for a book, keeping one entry per book.
    pub fn set_book_status(&mut self, book: Book, status: ReadingStatus) {
        let Some(user) = self.user.as_mut() else {
            return;
        };
        let statuses = user.book_statuses.get_or_insert_with(Vec::new);
        if let Some(existing) = statuses.iter_mut().find(|s| s.book.id == book.id) {
            existing.status = status;
        } else {
            statuses.push(BookStatus { book, status });
        }
    }

    /// Removes the status entry for a book.
    pub fn clear_book_status(&mut self, book_id: BookId) {
        if let Some(statuses) = self.user.as_mut().and_then(|u| u.book_statuses.as_mut()) {
            statuses.retain(|s| s.book.id != book_id);
        }
    }

    /// Installs a freshly authenticated user and token.
    pub fn install(&mut self, authenticated: Authenticated) {
        let Authenticated { user, token } = authenticated;
        self.set_user(user);
        self.token = token;
    }
}

/// Establishes the startup session.
///
/// A login loads the full profile (statuses and liked books) with a follow-up
/// user fetch, because the auth service returns the bare user record.
///
/// # Errors
///
/// Returns [`LibrisError::Config`] when a login is requested without an auth
/// service, and [`LibrisError::Session`] when the login or the profile fetch
/// fails.
pub fn bootstrap(api: &Api, how: &Bootstrap) -> Result<Session> {
    let _span = tracing::debug_span!("session_bootstrap").entered();
    let mut session = Session::new();

    match how {
        Bootstrap::Anonymous => {
            tracing::debug!("starting anonymous session");
        }
        Bootstrap::Login(credentials) => {
            let auth = api.auth.as_ref().ok_or_else(|| {
                LibrisError::Config("login requires auth_url to be set".to_string())
            })?;
            let authenticated = auth
                .login(credentials)
                .map_err(|e| LibrisError::Session(format!("login failed: {e}")))?;
            session.install(authenticated);
            api.authorize(session.token());

            if let Some(id) = session.user_id() {
                let profile = api
                    .users
                    .get_user(id)
                    .map_err(|e| LibrisError::Session(format!("profile fetch failed: {e}")))?;
                session.set_user(profile);
            }
        }
        Bootstrap::UserId(id) => {
            let user = api
                .users
                .get_user(*id)
                .map_err(|e| LibrisError::Session(format!("user {id} fetch failed: {e}")))?;
            session.set_user(user);
        }
    }

    tracing::debug!(user_id = ?session.user_id(), "session ready");
    Ok(session)
}
