//! Error types for the Libris client core.
//!
//! This module defines the crate-level error type [`LibrisError`] and a type alias
//! [`Result`] for the fallible operations that are not network calls: configuration
//! loading, client construction and session bootstrap. Failures of individual REST
//! calls are modelled separately by [`crate::api::ApiError`], because view models
//! branch on their status code instead of propagating them.

use thiserror::Error;

/// The main error type for Libris operations.
///
/// Configuration problems are fatal at startup; everything else is surfaced to the
/// caller of [`crate::initialize`] or the session bootstrap.
///
/// # Examples
///
/// ```
/// use libris::LibrisError;
///
/// fn require_users_url(url: Option<&str>) -> Result<&str, LibrisError> {
///     url.ok_or_else(|| LibrisError::Config("users_url is not set".to_string()))
/// }
///
/// assert!(require_users_url(None).is_err());
/// ```
#[derive(Debug, Error)]
pub enum LibrisError {
    /// Configuration is invalid or missing.
    ///
    /// Raised when one of the three service base URLs is absent, or when a
    /// login flow is configured without an auth service URL.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The configuration file could not be parsed as TOML.
    #[error("Configuration file error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP client could not be constructed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The session could not be established.
    ///
    /// Wraps the status code of the failed login or user fetch.
    #[error("Session error: {0}")]
    Session(String),
}

/// A specialized `Result` type for Libris operations.
pub type Result<T> = std::result::Result<T, LibrisError>;
