//! Request and response protocol between the view-models and the worker.
//!
//! Every [`ApiRequest`] maps to exactly one Resource Client call. The matching
//! [`ApiResponse`] echoes the identifiers the request carried (book id, page
//! number, generation) so the handler can tell whether the page that asked is
//! still the one on screen.

use crate::api::{ApiResult, Authenticated, BookQuery, ReviewPatch};
use crate::domain::{Book, BookId, ReadingStatus, Review, ReviewId, UserId};

/// Work for the request worker.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    /// Fetch one page of a book's reviews.
    LoadReviews {
        book_id: BookId,
        page_num: u32,
        page_size: u32,
        /// Navigation generation of the page that asked.
        generation: u64,
    },

    /// Search the catalogue. `query.page_num` is `None` for the first fetch.
    SearchBooks { query: BookQuery, generation: u64 },

    /// Like (`like = true`) or unlike a book.
    SetBookLike {
        user_id: UserId,
        book_id: BookId,
        like: bool,
    },

    /// Set (`Some`) or clear (`None`) the reading status of a book.
    ///
    /// `replace` marks a book that already has a status, which the users
    /// service moves with a PATCH instead of creating a second entry.
    SetBookStatus {
        user_id: UserId,
        book_id: BookId,
        status: Option<ReadingStatus>,
        replace: bool,
    },

    /// Post a new review.
    AddReview {
        user_id: UserId,
        book_id: BookId,
        text: String,
        rating: u8,
    },

    /// Edit an existing review.
    UpdateReview { review_id: ReviewId, patch: ReviewPatch },

    /// Delete a review.
    DeleteReview { review_id: ReviewId },

    /// Like (`like = true`) or unlike a review.
    SetReviewLike {
        user_id: UserId,
        review_id: ReviewId,
        like: bool,
    },

    /// Create an account.
    Register {
        name: String,
        email: String,
        password: String,
    },
}

/// Outcome of an [`ApiRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    ReviewsLoaded {
        book_id: BookId,
        page_num: u32,
        generation: u64,
        result: ApiResult<Vec<Review>>,
    },

    BooksLoaded {
        query: BookQuery,
        generation: u64,
        result: ApiResult<Vec<Book>>,
    },

    BookLikeChanged {
        book_id: BookId,
        like: bool,
        result: ApiResult<()>,
    },

    BookStatusChanged {
        book_id: BookId,
        status: Option<ReadingStatus>,
        result: ApiResult<()>,
    },

    ReviewAdded {
        book_id: BookId,
        result: ApiResult<Review>,
    },

    ReviewUpdated {
        review_id: ReviewId,
        result: ApiResult<Review>,
    },

    ReviewDeleted {
        review_id: ReviewId,
        result: ApiResult<()>,
    },

    ReviewLikeChanged {
        review_id: ReviewId,
        like: bool,
        result: ApiResult<()>,
    },

    Registered { result: ApiResult<Authenticated> },
}

impl ApiResponse {
    /// Status code of a failed response, `None` on success.
    #[must_use]
    pub fn error_code(&self) -> Option<u16> {
        let code = |e: &crate::api::ApiError| e.code();
        match self {
            Self::ReviewsLoaded { result, .. } => result.as_ref().err().map(code),
            Self::BooksLoaded { result, .. } => result.as_ref().err().map(code),
            Self::BookLikeChanged { result, .. }
            | Self::BookStatusChanged { result, .. }
            | Self::ReviewDeleted { result, .. }
            | Self::ReviewLikeChanged { result, .. } => result.as_ref().err().map(code),
            Self::ReviewAdded { result, .. } | Self::ReviewUpdated { result, .. } => {
                result.as_ref().err().map(code)
            }
            Self::Registered { result } => result.as_ref().err().map(code),
        }
    }
}
