//! Auth service client: login by token or by password.

use super::client::{decode, ServiceClient};
use super::error::ApiResult;
use super::transport::{bearer_token, Method};
use super::users::Authenticated;
use crate::domain::User;

/// How to prove identity to the auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// A previously issued bearer token.
    Token(String),
    /// User name and password.
    Name { username: String, password: String },
    /// Email and password.
    Email { email: String, password: String },
}

impl Credentials {
    /// Password credentials, picking email or name by the presence of `@`.
    #[must_use]
    pub fn password(login: &str, password: &str) -> Self {
        if login.contains('@') {
            Self::Email {
                email: login.to_string(),
                password: password.to_string(),
            }
        } else {
            Self::Name {
                username: login.to_string(),
                password: password.to_string(),
            }
        }
    }
}

/// Client for `{auth}`.
#[derive(Clone)]
pub struct AuthClient {
    inner: ServiceClient,
}

impl AuthClient {
    pub(crate) const fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    /// `GET {auth}` with a bearer token or `username`/`email` + `password`.
    ///
    /// The service answers with the user and a fresh token in the
    /// `Authorization` header. A token login keeps the presented token when
    /// the service does not issue a new one.
    ///
    /// # Errors
    ///
    /// Returns the status code (or the no-response sentinel) on failure.
    pub fn login(&self, credentials: &Credentials) -> ApiResult<Authenticated> {
        let mut request = self.inner.request(Method::Get, "");
        request.bearer = None;

        match credentials {
            Credentials::Token(token) => request.bearer = Some(token.clone()),
            Credentials::Name { username, password } => {
                request.query = vec![
                    ("username".to_string(), username.clone()),
                    ("password".to_string(), password.clone()),
                ];
            }
            Credentials::Email { email, password } => {
                request.query = vec![
                    ("email".to_string(), email.clone()),
                    ("password".to_string(), password.clone()),
                ];
            }
        }

        let response = self.inner.execute("login", &request)?;
        let user: User = decode(&response)?;
        let token = response
            .authorization
            .as_deref()
            .and_then(bearer_token)
            .or_else(|| match credentials {
                Credentials::Token(token) => Some(token.clone()),
                _ => None,
            });
        Ok(Authenticated { user, token })
    }
}
