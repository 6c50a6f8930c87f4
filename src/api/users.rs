//! Users service client: registration, profile fetch, book likes and statuses.

use serde_json::json;

use super::client::ServiceClient;
use super::error::ApiResult;
use super::transport::{bearer_token, Method};
use crate::domain::{BookId, ReadingStatus, User, UserId};

/// Join mode that embeds the status list and liked books into the user.
const JOIN_STATUSES_AND_BOOKS: &str = "with_statuses_and_books";

/// A freshly authenticated user together with the token the service issued.
#[derive(Debug, Clone, PartialEq)]
pub struct Authenticated {
    pub user: User,
    pub token: Option<String>,
}

/// Client for `{users}`.
#[derive(Clone)]
pub struct UsersClient {
    inner: ServiceClient,
}

impl UsersClient {
    pub(crate) const fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    /// `POST {users}` with name, email and password.
    ///
    /// # Errors
    ///
    /// Returns the status code (or the no-response sentinel) on failure.
    pub fn register(&self, name: &str, email: &str, password: &str) -> ApiResult<Authenticated> {
        let mut request = self.inner.request(Method::Post, "");
        request.body = Some(json!({
            "name": name,
            "email": email,
            "password": password,
        }));

        let response = self.inner.execute("register", &request)?;
        let user: User = super::client::decode(&response)?;
        let token = response.authorization.as_deref().and_then(bearer_token);
        Ok(Authenticated { user, token })
    }

    /// `GET {users}/{id}?joinMode=with_statuses_and_books`.
    ///
    /// # Errors
    ///
    /// Returns the status code (or the no-response sentinel) on failure.
    pub fn get_user(&self, id: UserId) -> ApiResult<User> {
        let mut request = self.inner.request(Method::Get, &format!("/{id}"));
        request
            .query
            .push(("joinMode".to_string(), JOIN_STATUSES_AND_BOOKS.to_string()));
        self.inner.fetch("get_user", &request)
    }

    /// `POST {users}/{userId}/like` with `{bookId}`.
    ///
    /// # Errors
    ///
    /// Returns the status code (or the no-response sentinel) on failure.
    pub fn like_book(&self, user_id: UserId, book_id: BookId) -> ApiResult<()> {
        let mut request = self.inner.request(Method::Post, &format!("/{user_id}/like"));
        request.body = Some(json!({ "bookId": book_id }));
        self.inner.execute("like_book", &request).map(drop)
    }

    /// `DELETE {users}/{userId}/like?toBook={bookId}`.
    ///
    /// # Errors
    ///
    /// Returns the status code (or the no-response sentinel) on failure.
    pub fn unlike_book(&self, user_id: UserId, book_id: BookId) -> ApiResult<()> {
        let mut request = self
            .inner
            .request(Method::Delete, &format!("/{user_id}/like"));
        request
            .query
            .push(("toBook".to_string(), book_id.to_string()));
        self.inner.execute("unlike_book", &request).map(drop)
    }

    /// `POST {users}/{userId}/book-status` with `{bookId, status}`.
    ///
    /// # Errors
    ///
    /// Returns the status code (or the no-response sentinel) on failure.
    pub fn set_book_status(
        &self,
        user_id: UserId,
        book_id: BookId,
        status: ReadingStatus,
    ) -> ApiResult<()> {
        let mut request = self
            .inner
            .request(Method::Post, &format!("/{user_id}/book-status"));
        request.body = Some(json!({ "bookId": book_id, "status": status }));
        self.inner.execute("set_book_status", &request).map(drop)
    }

    /// `PATCH {users}/{userId}/book-status` with `{bookId, status, statusValue}`.
    ///
    /// Moves an existing status to `status`. The service answers 404 when the
    /// book has no status yet.
    ///
    /// # Errors
    ///
    /// Returns the status code (or the no-response sentinel) on failure.
    pub fn update_book_status(
        &self,
        user_id: UserId,
        book_id: BookId,
        status: ReadingStatus,
    ) -> ApiResult<()> {
        let mut request = self
            .inner
            .request(Method::Patch, &format!("/{user_id}/book-status"));
        request.body = Some(json!({
            "bookId": book_id,
            "status": status,
            "statusValue": true,
        }));
        self.inner.execute("update_book_status", &request).map(drop)
    }

    /// `DELETE {users}/{userId}/book-status/{bookId}`.
    ///
    /// # Errors
    ///
    /// Returns the status code (or the no-response sentinel) on failure.
    pub fn clear_book_status(&self, user_id: UserId, book_id: BookId) -> ApiResult<()> {
        let request = self
            .inner
            .request(Method::Delete, &format!("/{user_id}/book-status/{book_id}"));
        self.inner.execute("clear_book_status", &request).map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::ApiError;
    use std::sync::Arc;

    fn client(transport: &MockTransport) -> UsersClient {
        UsersClient::new(ServiceClient::new(
            "users",
            "http://users.local/api/v1/users/",
            Arc::new(transport.clone()),
            Arc::default(),
        ))
    }

    #[test]
    fn get_user_joins_statuses_and_books() {
        let transport = MockTransport::new();
        transport.respond(200, r#"{"id": 17, "name": "maksim", "likedBooks": []}"#);

        let user = client(&transport).get_user(17).unwrap();
        assert_eq!(user.id, 17);

        let request = transport.last_request();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url, "http://users.local/api/v1/users/17");
        assert_eq!(
            request.query_param("joinMode"),
            Some("with_statuses_and_books")
        );
    }

    #[test]
    fn register_returns_user_and_token() {
        let transport = MockTransport::new();
        transport.respond_with_token(201, r#"{"id": 3, "name": "ann"}"#, "Bearer t0k");

        let auth = client(&transport)
            .register("ann", "ann@example.com", "secret")
            .unwrap();
        assert_eq!(auth.user.name, "ann");
        assert_eq!(auth.token.as_deref(), Some("t0k"));

        let request = transport.last_request();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "http://users.local/api/v1/users");
        assert_eq!(request.body.unwrap()["email"], "ann@example.com");
    }

    #[test]
    fn like_and_unlike_book_contracts() {
        let transport = MockTransport::new();
        transport.respond(200, "").respond(200, "");
        let users = client(&transport);

        users.like_book(17, 5).unwrap();
        users.unlike_book(17, 5).unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].url, "http://users.local/api/v1/users/17/like");
        assert_eq!(requests[0].body.as_ref().unwrap()["bookId"], 5);
        assert_eq!(requests[1].method, Method::Delete);
        assert_eq!(requests[1].query_param("toBook"), Some("5"));
    }

    #[test]
    fn failures_surface_status_or_sentinel() {
        let transport = MockTransport::new();
        transport.respond(403, "forbidden").fail();
        let users = client(&transport);

        assert_eq!(users.like_book(1, 2), Err(ApiError::Status(403)));
        let err = users.unlike_book(1, 2).unwrap_err();
        assert_eq!(err, ApiError::NoResponse);
        assert_eq!(err.code(), 500);
    }

    #[test]
    fn status_endpoints() {
        let transport = MockTransport::new();
        transport.respond(200, "").respond(204, "");
        let users = client(&transport);

        users.set_book_status(17, 8, ReadingStatus::Drop).unwrap();
        users.clear_book_status(17, 8).unwrap();

        let requests = transport.requests();
        assert_eq!(
            requests[0].url,
            "http://users.local/api/v1/users/17/book-status"
        );
        assert_eq!(requests[0].body.as_ref().unwrap()["status"], "DROP");
        assert_eq!(
            requests[1].url,
            "http://users.local/api/v1/users/17/book-status/8"
        );
    }

    #[test]
    fn changing_status_patches_with_status_value() {
        let transport = MockTransport::new();
        transport.respond(200, "").respond(404, "");
        let users = client(&transport);

        users.update_book_status(17, 8, ReadingStatus::Read).unwrap();
        assert_eq!(
            users.update_book_status(17, 9, ReadingStatus::Drop),
            Err(ApiError::Status(404))
        );

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.url, "http://users.local/api/v1/users/17/book-status");
        let body = request.body.as_ref().unwrap();
        assert_eq!(body["bookId"], 8);
        assert_eq!(body["status"], "READ");
        assert_eq!(body["statusValue"], true);
    }
}
