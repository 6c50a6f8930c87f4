//! Book detail view-model.
//!
//! Owns the paginated review list of one book, the like and reading-status
//! toggles, the review form, and the per-review interactions (like, edit,
//! delete). Entity snapshots live in the [`EntityStore`]; the page keeps ids
//! and interaction flags only.
//!
//! # Lifecycle
//!
//! ```text
//! open ──► Loading ──page 0 ok──► Ready ──load_more──► Ready (+page)
//!             │                     │
//!             └──page 0 err──► Failed(msg)   load-more err ──► banner
//! ```
//!
//! Every interaction that needs the network returns an [`ApiRequest`] and
//! marks itself pending; a second identical interaction while pending is
//! ignored. The matching `on_*` method settles the pending flag when the
//! response arrives.

use std::collections::HashSet;

use crate::api::{ApiResult, ReviewPatch};
use crate::app::messages;
use crate::app::modes::LoadState;
use crate::domain::{BookId, ReadingStatus, Review, ReviewId, MAX_STARS};
use crate::session::Session;
use crate::store::{EntityStore, Mutation};
use crate::worker::ApiRequest;

/// Raw review form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewForm {
    /// Selected star value as typed; must parse to 1..=5.
    pub rating: String,
    /// Free text body, may be empty.
    pub text: String,
}

impl ReviewForm {
    #[must_use]
    pub fn new(rating: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            rating: rating.into(),
            text: text.into(),
        }
    }

    /// The selected rating, `None` when missing or outside 1..=5.
    #[must_use]
    pub fn rating(&self) -> Option<u8> {
        self.rating
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|r| (1..=MAX_STARS).contains(r))
    }
}

/// State of the book detail page.
#[derive(Debug, Clone)]
pub struct BookPage {
    pub book_id: BookId,
    pub generation: u64,
    pub state: LoadState,
    pub review_ids: Vec<ReviewId>,
    /// Last review page appended; only ever increases.
    pub page_num: u32,
    /// Failure of a load-more, like, status, edit or delete.
    pub banner: Option<String>,
    /// Failure of the review form.
    pub review_error: Option<String>,
    page_size: u32,
    more_pending: bool,
    like_pending: bool,
    status_pending: bool,
    submit_pending: bool,
    review_pending: HashSet<ReviewId>,
}

impl BookPage {
    /// Opens the page and requests the first review page.
    #[must_use]
    pub fn open(book_id: BookId, generation: u64, page_size: u32) -> (Self, ApiRequest) {
        let page = Self {
            book_id,
            generation,
            state: LoadState::Loading,
            review_ids: Vec::new(),
            page_num: 0,
            banner: None,
            review_error: None,
            page_size,
            more_pending: false,
            like_pending: false,
            status_pending: false,
            submit_pending: false,
            review_pending: HashSet::new(),
        };
        let request = page.reviews_request(0);
        (page, request)
    }

    fn reviews_request(&self, page_num: u32) -> ApiRequest {
        ApiRequest::LoadReviews {
            book_id: self.book_id,
            page_num,
            page_size: self.page_size,
            generation: self.generation,
        }
    }

    /// Returns whether a response for this book and generation belongs here.
    #[must_use]
    pub fn accepts(&self, book_id: BookId, generation: u64) -> bool {
        self.book_id == book_id && self.generation == generation
    }

    /// Returns whether the review is shown or has an interaction in flight.
    #[must_use]
    pub fn tracks_review(&self, review_id: ReviewId) -> bool {
        self.review_ids.contains(&review_id) || self.review_pending.contains(&review_id)
    }

    #[must_use]
    pub const fn is_like_pending(&self) -> bool {
        self.like_pending
    }

    /// Requests the next review page unless one is already in flight.
    pub fn load_more(&mut self) -> Option<ApiRequest> {
        if !self.state.is_ready() || self.more_pending {
            tracing::debug!(book_id = self.book_id, "load more ignored");
            return None;
        }
        self.more_pending = true;
        Some(self.reviews_request(self.page_num + 1))
    }

    /// Settles a review page.
    ///
    /// Page 0 decides between `Ready` and `Failed`. Later pages append and
    /// advance `page_num` when non-empty, do nothing when empty, and set the
    /// banner on failure without touching loaded reviews.
    pub fn on_reviews_loaded(
        &mut self,
        store: &mut EntityStore,
        page_num: u32,
        result: ApiResult<Vec<Review>>,
    ) {
        if page_num == 0 {
            match result {
                Ok(reviews) => {
                    self.review_ids = reviews.iter().map(|r| r.id).collect();
                    store.apply(Mutation::UpsertReviews(reviews));
                    self.state = LoadState::Ready;
                }
                Err(e) => {
                    self.state = LoadState::Failed(messages::reviews_load(e.code()).to_string());
                }
            }
            return;
        }

        self.more_pending = false;
        match result {
            Ok(reviews) if reviews.is_empty() => {
                tracing::debug!(book_id = self.book_id, page_num, "no more reviews");
            }
            Ok(reviews) => {
                for review in &reviews {
                    if !self.review_ids.contains(&review.id) {
                        self.review_ids.push(review.id);
                    }
                }
                store.apply(Mutation::UpsertReviews(reviews));
                self.page_num = self.page_num.max(page_num);
            }
            Err(e) => {
                self.banner = Some(messages::reviews_load(e.code()).to_string());
            }
        }
    }

    /// Likes or unlikes the book, depending on the session's liked list.
    pub fn toggle_like(&mut self, session: &Session) -> Option<ApiRequest> {
        let Some(user_id) = session.user_id() else {
            self.banner = Some(messages::LOGIN_REQUIRED.to_string());
            return None;
        };
        if self.like_pending {
            tracing::debug!(book_id = self.book_id, "like toggle already pending");
            return None;
        }
        self.like_pending = true;
        Some(ApiRequest::SetBookLike {
            user_id,
            book_id: self.book_id,
            like: !session.has_liked(self.book_id),
        })
    }

    pub fn on_like_changed(&mut self, result: &ApiResult<()>) {
        self.like_pending = false;
        if let Err(e) = result {
            self.banner = Some(messages::interaction(e.code()).to_string());
        }
    }

    /// Sets or clears the reading status; a no-op when it would not change.
    ///
    /// A book that already has a status is moved to the new one rather than
    /// given a second entry.
    pub fn set_status(
        &mut self,
        session: &Session,
        status: Option<ReadingStatus>,
    ) -> Option<ApiRequest> {
        let Some(user_id) = session.user_id() else {
            self.banner = Some(messages::LOGIN_REQUIRED.to_string());
            return None;
        };
        let current = session.status_of(self.book_id);
        if self.status_pending || current == status {
            return None;
        }
        self.status_pending = true;
        Some(ApiRequest::SetBookStatus {
            user_id,
            book_id: self.book_id,
            status,
            replace: current.is_some(),
        })
    }

    pub fn on_status_changed(&mut self, result: &ApiResult<()>) {
        self.status_pending = false;
        if let Err(e) = result {
            self.banner = Some(messages::interaction(e.code()).to_string());
        }
    }

    /// Validates the form and requests the new review.
    ///
    /// A missing or out-of-range rating blocks submission without a request.
    pub fn submit_review(&mut self, session: &Session, form: &ReviewForm) -> Option<ApiRequest> {
        let Some(rating) = form.rating() else {
            self.review_error = Some(messages::RATING_REQUIRED.to_string());
            return None;
        };
        let Some(user_id) = session.user_id() else {
            self.review_error = Some(messages::LOGIN_REQUIRED.to_string());
            return None;
        };
        if self.submit_pending {
            return None;
        }
        self.submit_pending = true;
        self.review_error = None;
        Some(ApiRequest::AddReview {
            user_id,
            book_id: self.book_id,
            text: form.text.clone(),
            rating,
        })
    }

    /// Prepends the new review on success; the list must already be loaded.
    pub fn on_review_added(&mut self, result: &ApiResult<Review>) {
        self.submit_pending = false;
        match result {
            Ok(review) => {
                if self.state.is_ready() && !self.review_ids.contains(&review.id) {
                    self.review_ids.insert(0, review.id);
                }
            }
            Err(e) => {
                self.review_error = Some(messages::review_submit(e.code()).to_string());
            }
        }
    }

    /// Requests an edit of the viewer's own review.
    ///
    /// A blank rating or text leaves that field unchanged; an edit that changes
    /// nothing sends nothing.
    pub fn edit_review(
        &mut self,
        session: &Session,
        store: &EntityStore,
        review_id: ReviewId,
        form: &ReviewForm,
    ) -> Option<ApiRequest> {
        if !self.may_author(session, store, review_id) || self.review_pending.contains(&review_id) {
            return None;
        }

        let rating = if form.rating.trim().is_empty() {
            None
        } else {
            let Some(rating) = form.rating() else {
                self.review_error = Some(messages::RATING_REQUIRED.to_string());
                return None;
            };
            Some(rating)
        };
        let patch = ReviewPatch {
            text: Some(form.text.trim().to_string()).filter(|t| !t.is_empty()),
            rating,
        };
        if patch.is_empty() {
            return None;
        }

        self.review_pending.insert(review_id);
        Some(ApiRequest::UpdateReview { review_id, patch })
    }

    pub fn on_review_updated(&mut self, review_id: ReviewId, result: &ApiResult<Review>) {
        self.review_pending.remove(&review_id);
        if let Err(e) = result {
            self.review_error = Some(messages::review_submit(e.code()).to_string());
        }
    }

    /// Requests deletion of the viewer's own review.
    pub fn delete_review(
        &mut self,
        session: &Session,
        store: &EntityStore,
        review_id: ReviewId,
    ) -> Option<ApiRequest> {
        if !self.may_author(session, store, review_id) || self.review_pending.contains(&review_id) {
            return None;
        }
        self.review_pending.insert(review_id);
        Some(ApiRequest::DeleteReview { review_id })
    }

    /// Hides the review on success.
    pub fn on_review_deleted(&mut self, review_id: ReviewId, result: &ApiResult<()>) {
        self.review_pending.remove(&review_id);
        match result {
            Ok(()) => self.review_ids.retain(|id| *id != review_id),
            Err(e) => self.banner = Some(messages::interaction(e.code()).to_string()),
        }
    }

    /// Likes or unlikes a review, depending on its liked-users set.
    pub fn toggle_review_like(
        &mut self,
        session: &Session,
        store: &EntityStore,
        review_id: ReviewId,
    ) -> Option<ApiRequest> {
        let Some(user_id) = session.user_id() else {
            self.banner = Some(messages::LOGIN_REQUIRED.to_string());
            return None;
        };
        let review = store.review(review_id)?;
        if self.review_pending.contains(&review_id) {
            return None;
        }
        let like = !review.is_liked_by(user_id);
        self.review_pending.insert(review_id);
        Some(ApiRequest::SetReviewLike {
            user_id,
            review_id,
            like,
        })
    }

    pub fn on_review_like_changed(&mut self, review_id: ReviewId, result: &ApiResult<()>) {
        self.review_pending.remove(&review_id);
        if let Err(e) = result {
            self.banner = Some(messages::interaction(e.code()).to_string());
        }
    }

    /// Client-side ownership gate for edit and delete.
    fn may_author(&mut self, session: &Session, store: &EntityStore, review_id: ReviewId) -> bool {
        let Some(user_id) = session.user_id() else {
            self.banner = Some(messages::LOGIN_REQUIRED.to_string());
            return false;
        };
        let authored = store
            .review(review_id)
            .is_some_and(|r| r.is_authored_by(user_id));
        if !authored {
            tracing::debug!(review_id, user_id, "review is not the viewer's own");
            self.banner = Some(messages::NO_RIGHTS.to_string());
        }
        authored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::domain::User;

    fn review(id: ReviewId, author: i64) -> Review {
        Review {
            user_id: Some(author),
            likes: Some(0),
            liked_users: Some(vec![]),
            ..Review::new(id)
        }
    }

    fn session() -> Session {
        let mut session = Session::new();
        session.set_user(User::new(17, "maksim", None));
        session
    }

    fn ready_page(store: &mut EntityStore, ids: &[ReviewId]) -> BookPage {
        let (mut page, _) = BookPage::open(9, 1, 5);
        let reviews = ids.iter().map(|id| review(*id, 17)).collect();
        page.on_reviews_loaded(store, 0, Ok(reviews));
        page
    }

    #[test]
    fn open_requests_first_page() {
        let (page, request) = BookPage::open(9, 3, 5);
        assert_eq!(page.state, LoadState::Loading);
        assert_eq!(
            request,
            ApiRequest::LoadReviews {
                book_id: 9,
                page_num: 0,
                page_size: 5,
                generation: 3,
            }
        );
    }

    #[test]
    fn first_page_failure_maps_status() {
        let mut store = EntityStore::new();
        for (code, expected) in [
            (400, messages::REVIEWS_BAD_PAGE),
            (403, messages::NO_RIGHTS),
            (404, messages::NOT_FOUND),
            (500, messages::GENERIC),
        ] {
            let (mut page, _) = BookPage::open(9, 1, 5);
            page.on_reviews_loaded(&mut store, 0, Err(ApiError::Status(code)));
            assert_eq!(page.state, LoadState::Failed(expected.to_string()));
        }
    }

    #[test]
    fn load_more_appends_and_advances() {
        let mut store = EntityStore::new();
        let mut page = ready_page(&mut store, &[1, 2]);

        let request = page.load_more().unwrap();
        assert!(matches!(request, ApiRequest::LoadReviews { page_num: 1, .. }));
        page.on_reviews_loaded(&mut store, 1, Ok(vec![review(3, 5)]));
        assert_eq!(page.review_ids, vec![1, 2, 3]);
        assert_eq!(page.page_num, 1);
    }

    #[test]
    fn empty_page_changes_nothing() {
        let mut store = EntityStore::new();
        let mut page = ready_page(&mut store, &[1]);
        page.load_more();
        page.on_reviews_loaded(&mut store, 1, Ok(vec![]));
        assert_eq!(page.review_ids, vec![1]);
        assert_eq!(page.page_num, 0);
        assert!(page.banner.is_none());
    }

    #[test]
    fn load_more_failure_keeps_reviews() {
        let mut store = EntityStore::new();
        let mut page = ready_page(&mut store, &[1, 2]);
        page.load_more();
        page.on_reviews_loaded(&mut store, 1, Err(ApiError::Status(400)));
        assert_eq!(page.review_ids, vec![1, 2]);
        assert_eq!(page.state, LoadState::Ready);
        assert_eq!(page.banner.as_deref(), Some(messages::REVIEWS_BAD_PAGE));
    }

    #[test]
    fn second_load_more_while_pending_is_ignored() {
        let mut store = EntityStore::new();
        let mut page = ready_page(&mut store, &[1]);
        assert!(page.load_more().is_some());
        assert!(page.load_more().is_none());
    }

    #[test]
    fn missing_rating_blocks_submission() {
        let mut page = BookPage::open(9, 1, 5).0;
        for raw in ["", "abc", "0", "6"] {
            let request = page.submit_review(&session(), &ReviewForm::new(raw, "text"));
            assert!(request.is_none());
            assert_eq!(page.review_error.as_deref(), Some(messages::RATING_REQUIRED));
        }
    }

    #[test]
    fn submit_outcomes_prepend_or_show_one_message() {
        for rating in 1..=5u8 {
            let mut store = EntityStore::new();
            let mut page = ready_page(&mut store, &[1, 2]);
            let request = page
                .submit_review(&session(), &ReviewForm::new(rating.to_string(), "ok"))
                .unwrap();
            assert!(matches!(request, ApiRequest::AddReview { rating: r, .. } if r == rating));

            page.on_review_added(&Ok(review(44, 17)));
            assert_eq!(page.review_ids, vec![44, 1, 2]);
            assert!(page.review_error.is_none());
        }

        for (code, expected) in [
            (400, messages::REVIEW_BAD_INPUT),
            (403, messages::NO_RIGHTS),
            (404, messages::REVIEW_NO_HANDLER),
            (409, messages::REVIEW_DUPLICATE),
            (502, messages::GENERIC),
        ] {
            let mut store = EntityStore::new();
            let mut page = ready_page(&mut store, &[1, 2]);
            page.submit_review(&session(), &ReviewForm::new("3", ""));
            page.on_review_added(&Err(ApiError::Status(code)));
            assert_eq!(page.review_ids, vec![1, 2]);
            assert_eq!(page.review_error.as_deref(), Some(expected));
        }
    }

    #[test]
    fn review_not_prepended_before_list_loads() {
        let (mut page, _) = BookPage::open(9, 1, 5);
        page.submit_review(&session(), &ReviewForm::new("5", ""));
        page.on_review_added(&Ok(review(44, 17)));
        assert!(page.review_ids.is_empty());
    }

    #[test]
    fn like_requires_user_and_ignores_double_toggle() {
        let mut page = BookPage::open(9, 1, 5).0;
        assert!(page.toggle_like(&Session::new()).is_none());
        assert_eq!(page.banner.as_deref(), Some(messages::LOGIN_REQUIRED));

        let request = page.toggle_like(&session()).unwrap();
        assert!(matches!(request, ApiRequest::SetBookLike { like: true, .. }));
        assert!(page.toggle_like(&session()).is_none());

        page.on_like_changed(&Err(ApiError::Status(403)));
        assert!(!page.is_like_pending());
        assert_eq!(page.banner.as_deref(), Some(messages::NO_RIGHTS));
    }

    #[test]
    fn delete_is_gated_on_authorship() {
        let mut store = EntityStore::new();
        store.apply(Mutation::UpsertReviews(vec![review(1, 17), review(2, 99)]));
        let mut page = ready_page(&mut store, &[]);

        assert!(page.delete_review(&session(), &store, 2).is_none());
        assert_eq!(page.banner.as_deref(), Some(messages::NO_RIGHTS));

        let request = page.delete_review(&session(), &store, 1).unwrap();
        assert_eq!(request, ApiRequest::DeleteReview { review_id: 1 });
    }

    #[test]
    fn successful_delete_hides_review() {
        let mut store = EntityStore::new();
        let mut page = ready_page(&mut store, &[1, 2]);
        page.delete_review(&session(), &store, 1);
        page.on_review_deleted(1, &Ok(()));
        assert_eq!(page.review_ids, vec![2]);
    }

    #[test]
    fn edit_sends_only_changed_fields() {
        let mut store = EntityStore::new();
        let mut page = ready_page(&mut store, &[1]);

        assert!(page
            .edit_review(&session(), &store, 1, &ReviewForm::new(" ", " "))
            .is_none());
        let request = page
            .edit_review(&session(), &store, 1, &ReviewForm::new("2", ""))
            .unwrap();
        assert_eq!(
            request,
            ApiRequest::UpdateReview {
                review_id: 1,
                patch: ReviewPatch {
                    text: None,
                    rating: Some(2),
                },
            }
        );
    }

    #[test]
    fn status_change_skips_no_op() {
        let mut session = session();
        session.set_book_status(crate::domain::Book::new(9, "Dune"), ReadingStatus::Read);
        let mut page = BookPage::open(9, 1, 5).0;

        assert!(page.set_status(&session, Some(ReadingStatus::Read)).is_none());
        let request = page.set_status(&session, None).unwrap();
        assert!(matches!(request, ApiRequest::SetBookStatus { status: None, .. }));
    }

    #[test]
    fn status_change_replaces_existing_status() {
        let mut session = session();
        let mut fresh = BookPage::open(9, 1, 5).0;
        let request = fresh.set_status(&session, Some(ReadingStatus::Reading));
        assert!(matches!(
            request,
            Some(ApiRequest::SetBookStatus { replace: false, .. })
        ));

        session.set_book_status(crate::domain::Book::new(9, "Dune"), ReadingStatus::Reading);
        let mut page = BookPage::open(9, 1, 5).0;
        assert_eq!(
            page.set_status(&session, Some(ReadingStatus::Read)),
            Some(ApiRequest::SetBookStatus {
                user_id: 17,
                book_id: 9,
                status: Some(ReadingStatus::Read),
                replace: true,
            })
        );
    }

    #[test]
    fn review_like_direction_follows_liked_users() {
        let mut store = EntityStore::new();
        let mut page = ready_page(&mut store, &[1]);
        store.apply(Mutation::ReviewLiked {
            review_id: 1,
            user: User::new(17, "maksim", None),
        });

        let request = page.toggle_review_like(&session(), &store, 1).unwrap();
        assert!(matches!(request, ApiRequest::SetReviewLike { like: false, .. }));
        assert!(page.toggle_review_like(&session(), &store, 1).is_none());
    }
}
