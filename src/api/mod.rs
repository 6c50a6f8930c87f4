//! Resource clients for the users, books, reviews and auth services.
//!
//! Each client maps one logical operation to one HTTP call and normalizes the
//! outcome to either the decoded payload or an [`ApiError`] carrying the status
//! code. No client retries, caches or de-duplicates requests.
//!
//! # Modules
//!
//! - [`transport`]: `Transport` trait and the blocking `reqwest` implementation
//! - [`users`]: registration, profile fetch, book likes, reading statuses
//! - [`books`]: catalogue search
//! - [`reviews`]: review listing, authoring and likes
//! - [`auth`]: login by token or password
//! - [`error`]: `ApiError` and the no-response sentinel
//!
//! # Example
//!
//! ```no_run
//! use libris::api::{Api, BookQuery};
//! use libris::Endpoints;
//!
//! let endpoints = Endpoints {
//!     users: "http://localhost:8081/api/v1/users".to_string(),
//!     books: "http://localhost:8082/api/v1/books".to_string(),
//!     reviews: "http://localhost:8083/api/v1/reviews".to_string(),
//!     auth: None,
//! };
//! let api = Api::connect(&endpoints, None)?;
//! match api.books.search(&BookQuery::default()) {
//!     Ok(books) => println!("{} books", books.len()),
//!     Err(e) => println!("failed with {}", e.code()),
//! }
//! # Ok::<(), libris::LibrisError>(())
//! ```

pub mod auth;
pub mod books;
mod client;
pub mod error;
pub mod reviews;
pub mod transport;
pub mod users;

#[cfg(test)]
pub(crate) mod mock;

pub use auth::{AuthClient, Credentials};
pub use books::{BookQuery, BooksClient};
pub use error::{ApiError, ApiResult, NO_RESPONSE_STATUS};
pub use reviews::{ReviewPatch, ReviewsClient};
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport, TransportError};
pub use users::{Authenticated, UsersClient};

use std::sync::{Arc, PoisonError};
use std::time::Duration;

use crate::domain::Result;
use crate::Endpoints;
use client::{ServiceClient, SharedToken};

/// The full set of resource clients sharing one transport and one token.
#[derive(Clone)]
pub struct Api {
    pub users: UsersClient,
    pub books: BooksClient,
    pub reviews: ReviewsClient,
    /// Present only when an auth service URL is configured.
    pub auth: Option<AuthClient>,
    token: SharedToken,
}

impl Api {
    /// Builds the clients over an arbitrary transport.
    #[must_use]
    pub fn new(endpoints: &Endpoints, transport: Arc<dyn Transport>) -> Self {
        let token = SharedToken::default();
        let service = |name, url: &str| {
            ServiceClient::new(name, url, Arc::clone(&transport), Arc::clone(&token))
        };

        Self {
            users: UsersClient::new(service("users", &endpoints.users)),
            books: BooksClient::new(service("books", &endpoints.books)),
            reviews: ReviewsClient::new(service("reviews", &endpoints.reviews)),
            auth: endpoints
                .auth
                .as_deref()
                .map(|url| AuthClient::new(service("auth", url))),
            token,
        }
    }

    /// Builds the clients over a blocking `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn connect(endpoints: &Endpoints, timeout: Option<Duration>) -> Result<Self> {
        let transport = ReqwestTransport::new(timeout)?;
        Ok(Self::new(endpoints, Arc::new(transport)))
    }

    /// Sets the bearer token attached to every subsequent request.
    pub fn authorize(&self, token: Option<&str>) {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *guard = token.map(String::from);
    }

    /// The bearer token currently attached to requests.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock::MockTransport;

    fn endpoints() -> Endpoints {
        Endpoints {
            users: "http://u".to_string(),
            books: "http://b".to_string(),
            reviews: "http://r".to_string(),
            auth: None,
        }
    }

    #[test]
    fn token_is_shared_across_clients() {
        let transport = MockTransport::new();
        transport.respond(200, "[]").respond(200, "");
        let api = Api::new(&endpoints(), Arc::new(transport.clone()));

        api.authorize(Some("abc"));
        api.books.search(&BookQuery::default()).unwrap();
        api.authorize(None);
        api.users.like_book(1, 2).unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].bearer.as_deref(), Some("abc"));
        assert!(requests[1].bearer.is_none());
    }

    #[test]
    fn auth_client_requires_url() {
        let api = Api::new(&endpoints(), Arc::new(MockTransport::new()));
        assert!(api.auth.is_none());

        let mut with_auth = endpoints();
        with_auth.auth = Some("http://a".to_string());
        let api = Api::new(&with_auth, Arc::new(MockTransport::new()));
        assert!(api.auth.is_some());
    }
}
