//! Libris: client core for a book catalogue and review service.
//!
//! Libris talks to three REST services (users, books, reviews) and an optional
//! auth service, and provides:
//! - A session store holding the logged-in user and bearer token
//! - Resource clients that normalize every call to a payload or a status code
//! - View-models for the book detail, catalogue and favourites pages
//! - Presentational book and review cards rendered as plain text

#![allow(clippy::multiple_crate_versions)]
#![deny(rustdoc::broken_intra_doc_links, rustdoc::private_intra_doc_links)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal front-end (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │  ← Page view-models
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ State Layer   │   │ Worker Layer  │
//! │ (ui/)         │   │ (session/,    │   │ (worker/)     │
//! │ - Rendering   │   │  store/)      │   │ - Requests    │
//! │ - Cards       │   │ - User, token │   │ - Responses   │
//! │ - Helpers     │   │ - Entities    │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                  │
//! ┌─────────────────────────────────────────────────────┐
//! │  Resource Clients (api/)                            │
//! │  - users, books, reviews, auth over one Transport   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Config and data paths (infrastructure/)          │
//! │  - Error types (domain/error)                       │
//! │  - Book, Review, User (domain/)                     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber with a rotating log file      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`api`]: Resource clients and the HTTP transport
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Core domain types (Book, Review, User, errors)
//! - [`infrastructure`]: Config and data directory paths
//! - [`session`]: The logged-in user and token
//! - [`store`]: Normalized book and review snapshots
//! - [`worker`]: Executes requests emitted by the application layer
//! - [`ui`]: View models and plain-text rendering
//! - [`observability`]: Logging setup
//!
//! # Configuration
//!
//! Configuration is read from `~/.config/libris/config.toml` (or the file named
//! by `$LIBRIS_CONFIG`) and overridden by `LIBRIS_*` environment variables:
//!
//! ```toml
//! users_url = "http://localhost:8081/api/v1/users"
//! books_url = "http://localhost:8082/api/v1/books"
//! reviews_url = "http://localhost:8083/api/v1/reviews"
//! auth_url = "http://localhost:8084/api/v1/auth"
//! reviews_page_size = 5
//! trace_level = "debug"
//!
//! [credentials]
//! login = "maksim"
//! password = "secret"
//! ```
//!
//! # Event Flow
//!
//! 1. A user intent becomes an [`Event`]
//! 2. [`handle_event`] mutates [`AppState`] and returns [`Action`]s
//! 3. [`RequestWorker`] executes each `Action::Request` and produces an
//!    `ApiResponse`
//! 4. The response is fed back as `Event::Response`
//!
//! [`dispatch`] runs this loop until no actions remain.
//!
//! # Example
//!
//! ```no_run
//! use libris::{dispatch, initialize, Config, Event};
//!
//! let config = Config::load()?;
//! let (mut state, worker) = initialize(&config)?;
//!
//! dispatch(&mut state, &worker, Event::ShowCatalog { keywords: None, genres: None });
//! for line in libris::ui::render(&state) {
//!     println!("{line}");
//! }
//! # Ok::<(), libris::LibrisError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod session;
pub mod store;
pub mod worker;

pub mod ui;

pub mod observability;

pub use api::Api;
pub use app::{handle_event, Action, AppState, Event, PageSizes};
pub use domain::{LibrisError, Result};
pub use session::{Bootstrap, Session};
pub use worker::RequestWorker;

use std::collections::{BTreeMap, VecDeque};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use api::{Credentials, Transport};
use app::state::{DEFAULT_BOOKS_PAGE_SIZE, DEFAULT_REVIEWS_PAGE_SIZE};
use infrastructure::paths;

/// Validated base URLs of the services, without trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub users: String,
    pub books: String,
    pub reviews: String,
    /// Login is unavailable when unset.
    pub auth: Option<String>,
}

/// How to establish the session at startup.
///
/// Tried in order: `token`, then `login` + `password`, then `user_id`.
/// With none of them set the client starts anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub token: Option<String>,
    /// User name or email.
    pub login: Option<String>,
    pub password: Option<String>,
    /// Fetch this user without authenticating.
    pub user_id: Option<i64>,
}

/// Client configuration.
///
/// # Example
///
/// ```toml
/// users_url = "http://localhost:8081/api/v1/users"
/// books_url = "http://localhost:8082/api/v1/books"
/// reviews_url = "http://localhost:8083/api/v1/reviews"
/// request_timeout_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the users service. Required.
    pub users_url: Option<String>,
    /// Base URL of the books service. Required.
    pub books_url: Option<String>,
    /// Base URL of the reviews service. Required.
    pub reviews_url: Option<String>,
    /// Base URL of the auth service.
    pub auth_url: Option<String>,

    /// Reviews per page on the book page. Default: 5
    pub reviews_page_size: u32,

    /// Books per catalogue page. Default: 20
    pub books_page_size: u32,

    /// Per-request timeout. Absent means requests are never cut short.
    pub request_timeout_secs: Option<u64>,

    /// Log level for the tracing subscriber.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    pub credentials: CredentialsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            users_url: None,
            books_url: None,
            reviews_url: None,
            auth_url: None,
            reviews_page_size: DEFAULT_REVIEWS_PAGE_SIZE,
            books_page_size: DEFAULT_BOOKS_PAGE_SIZE,
            request_timeout_secs: None,
            trace_level: None,
            credentials: CredentialsConfig::default(),
        }
    }
}

/// Environment variables and the config keys they override.
const ENV_KEYS: &[(&str, &str)] = &[
    ("LIBRIS_USERS_URL", "users_url"),
    ("LIBRIS_BOOKS_URL", "books_url"),
    ("LIBRIS_REVIEWS_URL", "reviews_url"),
    ("LIBRIS_AUTH_URL", "auth_url"),
    ("LIBRIS_REVIEWS_PAGE_SIZE", "reviews_page_size"),
    ("LIBRIS_BOOKS_PAGE_SIZE", "books_page_size"),
    ("LIBRIS_TIMEOUT_SECS", "request_timeout_secs"),
    ("LIBRIS_TRACE_LEVEL", "trace_level"),
    ("LIBRIS_TOKEN", "token"),
    ("LIBRIS_LOGIN", "login"),
    ("LIBRIS_PASSWORD", "password"),
    ("LIBRIS_USER_ID", "user_id"),
];

impl Config {
    /// Parses configuration from a flat key/value map.
    ///
    /// # Parsing Rules
    ///
    /// - Blank values are ignored
    /// - `*_page_size`: String → `u32`, must be positive (ignored otherwise)
    /// - `request_timeout_secs`, `user_id`: String → integer (ignored on parse error)
    /// - `token`, `login`, `password`, `user_id` fill [`CredentialsConfig`]
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use libris::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("users_url".to_string(), "http://u/".to_string());
    /// map.insert("reviews_page_size".to_string(), "10".to_string());
    /// map.insert("books_page_size".to_string(), "lots".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.users_url.as_deref(), Some("http://u/"));
    /// assert_eq!(config.reviews_page_size, 10);
    /// assert_eq!(config.books_page_size, 20);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let mut config = Self::default();
        config.merge_map(map);
        config
    }

    /// Reads a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`LibrisError::Io`] if the file cannot be read and
    /// [`LibrisError::ConfigParse`] if it is not valid TOML for this shape.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Defaults overridden by `LIBRIS_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.merge_map(&env_overrides(std::env::vars()));
        config
    }

    /// Loads defaults, then the config file (if present), then the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = paths::config_path();
        let mut config = if path.exists() {
            tracing::debug!(path = %path.display(), "reading config file");
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        config.merge_map(&env_overrides(std::env::vars()));
        Ok(config)
    }

    fn merge_map(&mut self, map: &BTreeMap<String, String>) {
        let get = |key: &str| {
            map.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let page_size = |key: &str| {
            get(key)
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|n| *n > 0)
        };

        if let Some(url) = get("users_url") {
            self.users_url = Some(url);
        }
        if let Some(url) = get("books_url") {
            self.books_url = Some(url);
        }
        if let Some(url) = get("reviews_url") {
            self.reviews_url = Some(url);
        }
        if let Some(url) = get("auth_url") {
            self.auth_url = Some(url);
        }
        if let Some(size) = page_size("reviews_page_size") {
            self.reviews_page_size = size;
        }
        if let Some(size) = page_size("books_page_size") {
            self.books_page_size = size;
        }
        if let Some(secs) = get("request_timeout_secs").and_then(|v| v.parse().ok()) {
            self.request_timeout_secs = Some(secs);
        }
        if let Some(level) = get("trace_level") {
            self.trace_level = Some(level);
        }

        let credentials = &mut self.credentials;
        if let Some(token) = get("token") {
            credentials.token = Some(token);
        }
        if let Some(login) = get("login") {
            credentials.login = Some(login);
        }
        if let Some(password) = get("password") {
            credentials.password = Some(password);
        }
        if let Some(id) = get("user_id").and_then(|v| v.parse().ok()) {
            credentials.user_id = Some(id);
        }
    }

    /// Resolves the service base URLs.
    ///
    /// # Errors
    ///
    /// Returns [`LibrisError::Config`] naming the first missing required URL.
    pub fn endpoints(&self) -> Result<Endpoints> {
        let required = |value: &Option<String>, key: &str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(trim_slash)
                .ok_or_else(|| LibrisError::Config(format!("{key} is not set")))
        };

        Ok(Endpoints {
            users: required(&self.users_url, "users_url")?,
            books: required(&self.books_url, "books_url")?,
            reviews: required(&self.reviews_url, "reviews_url")?,
            auth: self
                .auth_url
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(trim_slash),
        })
    }

    /// Checks that the configuration can start a client.
    ///
    /// # Errors
    ///
    /// Returns [`LibrisError::Config`] naming the first missing required URL.
    pub fn validate(&self) -> Result<()> {
        self.endpoints().map(|_| ())
    }

    #[must_use]
    pub const fn page_sizes(&self) -> PageSizes {
        PageSizes {
            reviews: self.reviews_page_size,
            books: self.books_page_size,
        }
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Picks the startup session mode from the configured credentials.
    ///
    /// # Example
    ///
    /// ```rust
    /// use libris::{Bootstrap, Config};
    ///
    /// let mut config = Config::default();
    /// assert_eq!(config.bootstrap_mode(), Bootstrap::Anonymous);
    ///
    /// config.credentials.user_id = Some(2);
    /// assert_eq!(config.bootstrap_mode(), Bootstrap::UserId(2));
    /// ```
    #[must_use]
    pub fn bootstrap_mode(&self) -> Bootstrap {
        let credentials = &self.credentials;
        if let Some(token) = &credentials.token {
            return Bootstrap::Login(Credentials::Token(token.clone()));
        }
        if let (Some(login), Some(password)) = (&credentials.login, &credentials.password) {
            return Bootstrap::Login(Credentials::password(login, password));
        }
        credentials
            .user_id
            .map_or(Bootstrap::Anonymous, Bootstrap::UserId)
    }
}

fn trim_slash(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn env_overrides(vars: impl IntoIterator<Item = (String, String)>) -> BTreeMap<String, String> {
    vars.into_iter()
        .filter_map(|(name, value)| {
            ENV_KEYS
                .iter()
                .find(|(env, _)| *env == name)
                .map(|(_, key)| ((*key).to_string(), value))
        })
        .collect()
}

/// Builds the application state and request worker from configuration.
///
/// Validates the configuration, constructs the HTTP transport and
/// bootstraps the session.
///
/// # Errors
///
/// Fails when a required base URL is missing, when the HTTP client cannot be
/// built, or when the configured login or user fetch fails.
pub fn initialize(config: &Config) -> Result<(AppState, RequestWorker)> {
    let endpoints = config.endpoints()?;
    let api = Api::connect(&endpoints, config.request_timeout())?;
    start(config, api)
}

/// Like [`initialize`], with a caller-provided transport.
///
/// # Errors
///
/// Fails when a required base URL is missing or the session bootstrap fails.
pub fn initialize_with(
    config: &Config,
    transport: Arc<dyn Transport>,
) -> Result<(AppState, RequestWorker)> {
    let endpoints = config.endpoints()?;
    start(config, Api::new(&endpoints, transport))
}

fn start(config: &Config, api: Api) -> Result<(AppState, RequestWorker)> {
    let _span = tracing::debug_span!("initialize").entered();

    let session = session::bootstrap(&api, &config.bootstrap_mode())?;
    api.authorize(session.token());
    tracing::info!(
        user_id = ?session.user_id(),
        page_sizes = ?config.page_sizes(),
        "client initialized"
    );

    Ok((
        AppState::new(session, config.page_sizes()),
        RequestWorker::new(api),
    ))
}

/// Handles an event and every response it triggers, until quiescent.
///
/// Requests run synchronously in emission order; each response is handled
/// before the next queued event. Returns whether any step asked for a redraw
/// or moved the entity store's revision.
pub fn dispatch(state: &mut AppState, worker: &RequestWorker, event: Event) -> bool {
    let mut queue = VecDeque::from([event]);
    let revision = state.store.revision();
    let mut redraw = false;

    while let Some(event) = queue.pop_front() {
        let (changed, actions) = handle_event(state, event);
        redraw |= changed;

        for action in actions {
            match action {
                Action::Request(request) => {
                    queue.push_back(Event::Response(worker.handle(request)));
                }
                Action::Authorize(token) => worker.api().authorize(token.as_deref()),
            }
        }
    }

    redraw || state.store.revision() != revision
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::app::Page;
    use std::io::Write;

    fn urls() -> BTreeMap<String, String> {
        [
            ("users_url", "http://u/"),
            ("books_url", "http://b"),
            ("reviews_url", "http://r//"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.page_sizes(), PageSizes::default());
        assert!(config.request_timeout().is_none());
        assert_eq!(config.bootstrap_mode(), Bootstrap::Anonymous);
    }

    #[test]
    fn endpoints_strip_trailing_slashes() {
        let endpoints = Config::from_map(&urls()).endpoints().unwrap();
        assert_eq!(endpoints.users, "http://u");
        assert_eq!(endpoints.reviews, "http://r");
        assert!(endpoints.auth.is_none());
    }

    #[test]
    fn validation_names_first_missing_url() {
        let mut map = urls();
        map.remove("books_url");
        map.remove("reviews_url");
        let err = Config::from_map(&map).validate().unwrap_err();
        assert!(matches!(err, LibrisError::Config(ref m) if m.contains("books_url")));
    }

    #[test]
    fn zero_page_size_falls_back() {
        let mut map = urls();
        map.insert("reviews_page_size".to_string(), "0".to_string());
        map.insert("request_timeout_secs".to_string(), "7".to_string());
        let config = Config::from_map(&map);
        assert_eq!(config.reviews_page_size, DEFAULT_REVIEWS_PAGE_SIZE);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(7)));
    }

    #[test]
    fn token_wins_over_password_and_user_id() {
        let mut config = Config::default();
        config.credentials.user_id = Some(3);
        config.credentials.login = Some("a@x.io".to_string());
        config.credentials.password = Some("pw".to_string());
        assert!(matches!(
            config.bootstrap_mode(),
            Bootstrap::Login(Credentials::Email { .. })
        ));

        config.credentials.token = Some("t".to_string());
        assert_eq!(
            config.bootstrap_mode(),
            Bootstrap::Login(Credentials::Token("t".to_string()))
        );
    }

    #[test]
    fn login_without_password_is_ignored() {
        let mut config = Config::default();
        config.credentials.login = Some("ann".to_string());
        assert_eq!(config.bootstrap_mode(), Bootstrap::Anonymous);
    }

    #[test]
    fn env_overrides_map_known_variables_only() {
        let map = env_overrides(vec![
            ("LIBRIS_TIMEOUT_SECS".to_string(), "3".to_string()),
            ("LIBRIS_LOGIN".to_string(), "ann".to_string()),
            ("HOME".to_string(), "/root".to_string()),
        ]);
        assert_eq!(map.len(), 2);
        assert_eq!(map["request_timeout_secs"], "3");
        assert_eq!(map["login"], "ann");
    }

    #[test]
    fn reads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "users_url = \"http://u\"\nbooks_page_size = 50\n\n[credentials]\nuser_id = 2"
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.users_url.as_deref(), Some("http://u"));
        assert_eq!(config.books_page_size, 50);
        assert_eq!(config.reviews_page_size, DEFAULT_REVIEWS_PAGE_SIZE);
        assert_eq!(config.credentials.user_id, Some(2));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "books_page_size = \"many\"").unwrap();
        assert!(matches!(
            Config::from_file(file.path()),
            Err(LibrisError::ConfigParse(_))
        ));
    }

    #[test]
    fn initialize_refuses_missing_urls() {
        let transport = MockTransport::new();
        let result = initialize_with(&Config::default(), Arc::new(transport.clone()));
        assert!(matches!(result, Err(LibrisError::Config(_))));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn dispatch_runs_requests_to_completion() {
        let transport = MockTransport::new();
        transport.respond(200, r#"[{"id": 1, "name": "Dune", "likes": 2}]"#);
        let (mut state, worker) =
            initialize_with(&Config::from_map(&urls()), Arc::new(transport.clone())).unwrap();

        let redraw = dispatch(
            &mut state,
            &worker,
            Event::ShowCatalog {
                keywords: Some("dune".to_string()),
                genres: None,
            },
        );

        assert!(redraw);
        assert_eq!(state.listed_books(), &[1]);
        assert!(matches!(&state.page, Page::Catalog(page) if page.state.is_ready()));
        assert_eq!(transport.last_request().url, "http://b/search");
    }

    #[test]
    fn store_change_off_page_redraws() {
        let transport = MockTransport::new();
        let mut map = urls();
        map.insert("user_id".to_string(), "17".to_string());
        transport.respond(200, r#"{"id": 17, "name": "maksim"}"#);
        let (mut state, worker) =
            initialize_with(&Config::from_map(&map), Arc::new(transport.clone())).unwrap();
        state
            .store
            .apply(store::Mutation::UpsertReviews(vec![domain::Review::new(44)]));

        let late_like = || {
            Event::Response(crate::worker::ApiResponse::ReviewLikeChanged {
                review_id: 44,
                like: true,
                result: Ok(()),
            })
        };
        assert!(!handle_event(&mut state.clone(), late_like()).0);
        assert!(dispatch(&mut state, &worker, late_like()));
        assert_eq!(state.store.review(44).map(domain::Review::like_count), Some(1));
    }
}
