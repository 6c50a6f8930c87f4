//! Reviews service client: listing, authoring and liking reviews.

use serde_json::{json, Map, Value};

use super::client::ServiceClient;
use super::error::ApiResult;
use super::transport::Method;
use crate::domain::{BookId, Review, ReviewId, UserId};

/// Fields of a review edit; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewPatch {
    pub text: Option<String>,
    pub rating: Option<u8>,
}

impl ReviewPatch {
    /// Returns whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.as_deref().map_or(true, str::is_empty) && self.rating.is_none()
    }

    fn to_body(&self) -> Value {
        let mut body = Map::new();
        if let Some(text) = self.text.as_deref().filter(|t| !t.is_empty()) {
            body.insert("text".to_string(), json!(text));
        }
        if let Some(rating) = self.rating {
            body.insert("rating".to_string(), json!(rating));
        }
        Value::Object(body)
    }
}

/// Client for `{reviews}`.
#[derive(Clone)]
pub struct ReviewsClient {
    inner: ServiceClient,
}

impl ReviewsClient {
    pub(crate) const fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    /// `GET {reviews}?id={bookId}&criteria=bookId&pageSize=&pageNum=&joinMode=with`.
    ///
    /// # Errors
    ///
    /// Returns the status code (or the no-response sentinel) on failure.
    pub fn list_for_book(
        &self,
        book_id: BookId,
        page_num: u32,
        page_size: u32,
    ) -> ApiResult<Vec<Review>> {
        let mut request = self.inner.request(Method::Get, "");
        request.query = vec![
            ("id".to_string(), book_id.to_string()),
            ("criteria".to_string(), "bookId".to_string()),
            ("pageSize".to_string(), page_size.to_string()),
            ("pageNum".to_string(), page_num.to_string()),
            ("joinMode".to_string(), "with".to_string()),
        ];
        self.inner.fetch("list_reviews", &request)
    }

    /// `POST {reviews}` with `{userId, bookId, text, rating}`.
    ///
    /// # Errors
    ///
    /// Returns the status code (or the no-response sentinel) on failure.
    pub fn add(&self, user_id: UserId, book_id: BookId, text: &str, rating: u8) -> ApiResult<Review> {
        let mut request = self.inner.request(Method::Post, "");
        request.body = Some(json!({
            "userId": user_id,
            "bookId": book_id,
            "text": text,
            "rating": rating,
        }));
        self.inner.fetch("add_review", &request)
    }

    /// `POST {reviews}/{id}` with only the fields the patch sets.
    ///
    /// # Errors
    ///
    /// Returns the status code (or the no-response sentinel) on failure.
    pub fn update(&self, review_id: ReviewId, patch: &ReviewPatch) -> ApiResult<Review> {
        let mut request = self.inner.request(Method::Post, &format!("/{review_id}"));
        request.body = Some(patch.to_body());
        self.inner.fetch("update_review", &request)
    }

    /// `DELETE {reviews}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the status code (or the no-response sentinel) on failure.
    pub fn delete(&self, review_id: ReviewId) -> ApiResult<()> {
        let request = self.inner.request(Method::Delete, &format!("/{review_id}"));
        self.inner.execute("delete_review", &request).map(drop)
    }

    /// `POST {reviews}/like` with `{userId, reviewId}`.
    ///
    /// # Errors
    ///
    /// Returns the status code (or the no-response sentinel) on failure.
    pub fn like(&self, user_id: UserId, review_id: ReviewId) -> ApiResult<()> {
        let mut request = self.inner.request(Method::Post, "/like");
        request.body = Some(json!({ "userId": user_id, "reviewId": review_id }));
        self.inner.execute("like_review", &request).map(drop)
    }

    /// `DELETE {reviews}/like?fromUser=&toReview=`.
    ///
    /// # Errors
    ///
    /// Returns the status code (or the no-response sentinel) on failure.
    pub fn unlike(&self, user_id: UserId, review_id: ReviewId) -> ApiResult<()> {
        let mut request = self.inner.request(Method::Delete, "/like");
        request.query = vec![
            ("fromUser".to_string(), user_id.to_string()),
            ("toReview".to_string(), review_id.to_string()),
        ];
        self.inner.execute("unlike_review", &request).map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::ApiError;
    use std::sync::{Arc, RwLock};

    fn client(transport: &MockTransport) -> ReviewsClient {
        ReviewsClient::new(ServiceClient::new(
            "reviews",
            "http://reviews.local/api/v1/reviews",
            Arc::new(transport.clone()),
            Arc::new(RwLock::new(Some("tok".to_string()))),
        ))
    }

    #[test]
    fn list_for_book_query_contract() {
        let transport = MockTransport::new();
        transport.respond(200, r#"[{"id": 1, "rating": 4, "likes": 0}]"#);

        let reviews = client(&transport).list_for_book(9, 1, 5).unwrap();
        assert_eq!(reviews.len(), 1);

        let request = transport.last_request();
        assert_eq!(request.url, "http://reviews.local/api/v1/reviews");
        let params: Vec<(&str, &str)> = request
            .query
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            params,
            vec![
                ("id", "9"),
                ("criteria", "bookId"),
                ("pageSize", "5"),
                ("pageNum", "1"),
                ("joinMode", "with"),
            ]
        );
        assert_eq!(request.bearer.as_deref(), Some("tok"));
    }

    #[test]
    fn add_sends_author_book_text_and_rating() {
        let transport = MockTransport::new();
        transport.respond(201, r#"{"id": 44, "text": "good", "rating": 5}"#);

        let review = client(&transport).add(17, 9, "good", 5).unwrap();
        assert_eq!(review.id, 44);

        let body = transport.last_request().body.unwrap();
        assert_eq!(body["userId"], 17);
        assert_eq!(body["bookId"], 9);
        assert_eq!(body["rating"], 5);
    }

    #[test]
    fn add_conflict_is_reported() {
        let transport = MockTransport::new();
        transport.respond(409, "");
        assert_eq!(
            client(&transport).add(17, 9, "", 3),
            Err(ApiError::Status(409))
        );
    }

    #[test]
    fn update_sends_only_present_fields() {
        let transport = MockTransport::new();
        transport.respond(200, r#"{"id": 44, "rating": 2}"#);

        let patch = ReviewPatch {
            text: None,
            rating: Some(2),
        };
        client(&transport).update(44, &patch).unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "http://reviews.local/api/v1/reviews/44");
        assert_eq!(request.body.unwrap(), json!({ "rating": 2 }));
    }

    #[test]
    fn like_unlike_and_delete_contracts() {
        let transport = MockTransport::new();
        transport.respond(200, "").respond(200, "").respond(204, "");
        let reviews = client(&transport);

        reviews.like(17, 3).unwrap();
        reviews.unlike(17, 3).unwrap();
        reviews.delete(3).unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].url, "http://reviews.local/api/v1/reviews/like");
        assert_eq!(requests[0].body.as_ref().unwrap()["reviewId"], 3);
        assert_eq!(requests[1].method, Method::Delete);
        assert_eq!(requests[1].query_param("fromUser"), Some("17"));
        assert_eq!(requests[1].query_param("toReview"), Some("3"));
        assert_eq!(requests[2].url, "http://reviews.local/api/v1/reviews/3");
    }

    #[test]
    fn empty_patch_detection() {
        assert!(ReviewPatch::default().is_empty());
        assert!(ReviewPatch {
            text: Some(String::new()),
            rating: None
        }
        .is_empty());
        assert!(!ReviewPatch {
            text: None,
            rating: Some(1)
        }
        .is_empty());
    }
}
