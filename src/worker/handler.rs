//! Request worker: executes [`ApiRequest`]s through the Resource Clients.
//!
//! The worker is the only component that performs network I/O. It never
//! touches application state; it turns each request into exactly one client
//! call and packs the outcome into an [`ApiResponse`].

use crate::api::{Api, ApiResult};
use crate::worker::{ApiRequest, ApiResponse};

/// Executes requests against the configured services.
#[derive(Clone)]
pub struct RequestWorker {
    api: Api,
}

impl RequestWorker {
    #[must_use]
    pub const fn new(api: Api) -> Self {
        Self { api }
    }

    /// The clients this worker calls through.
    #[must_use]
    pub const fn api(&self) -> &Api {
        &self.api
    }

    /// Logs the outcome of a call with consistent fields.
    fn log_result<T>(operation: &str, result: &ApiResult<T>) {
        match result {
            Ok(_) => tracing::debug!(operation = operation, "request completed"),
            Err(e) => tracing::debug!(operation = operation, code = e.code(), error = %e, "request failed"),
        }
    }

    /// Runs one request to completion.
    pub fn handle(&self, request: ApiRequest) -> ApiResponse {
        let _span = tracing::debug_span!("worker_request").entered();

        match request {
            ApiRequest::LoadReviews {
                book_id,
                page_num,
                page_size,
                generation,
            } => {
                let result = self.api.reviews.list_for_book(book_id, page_num, page_size);
                Self::log_result("load reviews", &result);
                ApiResponse::ReviewsLoaded {
                    book_id,
                    page_num,
                    generation,
                    result,
                }
            }
            ApiRequest::SearchBooks { query, generation } => {
                let result = self.api.books.search(&query);
                Self::log_result("search books", &result);
                ApiResponse::BooksLoaded {
                    query,
                    generation,
                    result,
                }
            }
            ApiRequest::SetBookLike {
                user_id,
                book_id,
                like,
            } => {
                let result = if like {
                    self.api.users.like_book(user_id, book_id)
                } else {
                    self.api.users.unlike_book(user_id, book_id)
                };
                Self::log_result("set book like", &result);
                ApiResponse::BookLikeChanged {
                    book_id,
                    like,
                    result,
                }
            }
            ApiRequest::SetBookStatus {
                user_id,
                book_id,
                status,
                replace,
            } => {
                let result = match status {
                    Some(status) if replace => {
                        self.api.users.update_book_status(user_id, book_id, status)
                    }
                    Some(status) => self.api.users.set_book_status(user_id, book_id, status),
                    None => self.api.users.clear_book_status(user_id, book_id),
                };
                Self::log_result("set book status", &result);
                ApiResponse::BookStatusChanged {
                    book_id,
                    status,
                    result,
                }
            }
            ApiRequest::AddReview {
                user_id,
                book_id,
                text,
                rating,
            } => {
                let result = self.api.reviews.add(user_id, book_id, &text, rating);
                Self::log_result("add review", &result);
                ApiResponse::ReviewAdded { book_id, result }
            }
            ApiRequest::UpdateReview { review_id, patch } => {
                let result = self.api.reviews.update(review_id, &patch);
                Self::log_result("update review", &result);
                ApiResponse::ReviewUpdated { review_id, result }
            }
            ApiRequest::DeleteReview { review_id } => {
                let result = self.api.reviews.delete(review_id);
                Self::log_result("delete review", &result);
                ApiResponse::ReviewDeleted { review_id, result }
            }
            ApiRequest::SetReviewLike {
                user_id,
                review_id,
                like,
            } => {
                let result = if like {
                    self.api.reviews.like(user_id, review_id)
                } else {
                    self.api.reviews.unlike(user_id, review_id)
                };
                Self::log_result("set review like", &result);
                ApiResponse::ReviewLikeChanged {
                    review_id,
                    like,
                    result,
                }
            }
            ApiRequest::Register {
                name,
                email,
                password,
            } => {
                let result = self.api.users.register(&name, &email, &password);
                Self::log_result("register", &result);
                ApiResponse::Registered { result }
            }
        }
    }
}
