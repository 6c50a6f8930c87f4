//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place that mutates [`AppState`]. User intents
//! are routed to the page on screen, which answers with zero or more
//! [`ApiRequest`]s; worker responses come back as [`Event::Response`] and are
//! applied in two steps:
//!
//! 1. **Entity effects** (store and session) are applied whenever a call that
//!    changed server state succeeded, regardless of the page on screen.
//! 2. **Page effects** (pending flags, banners, list ids) are applied only when
//!    the page that asked is still displayed; load responses for another book
//!    or an older navigation generation are dropped.
//!
//! # Event Types
//!
//! - **Navigation**: `ShowCatalog`, `OpenBook`, `ShowFavourites`, `SelectFavourites`
//! - **Lists**: `LoadMore`
//! - **Book**: `ToggleBookLike`, `SetStatus`, `SubmitReview`
//! - **Reviews**: `ToggleReviewLike`, `EditReview`, `DeleteReview`
//! - **Account**: `Register`, `Logout`
//! - **Worker**: `Response`

use crate::app::messages;
use crate::app::modes::FavouritesFilter;
use crate::app::pages::{BookPage, CatalogPage, FavouritesPage, ReviewForm};
use crate::app::state::Page;
use crate::app::{Action, AppState};
use crate::domain::{BookId, ReadingStatus, ReviewId, User};
use crate::session::Session;
use crate::store::{EntityStore, Mutation};
use crate::worker::{ApiRequest, ApiResponse};

/// User intents and worker responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Opens the catalogue with optional keyword and genre filters.
    ShowCatalog {
        keywords: Option<String>,
        genres: Option<String>,
    },
    /// Opens the detail page of a book already in the store.
    OpenBook(BookId),
    /// Opens the favourites page on its default projection.
    ShowFavourites,
    /// Switches the favourites projection.
    SelectFavourites(FavouritesFilter),

    /// Requests the next page of the current list.
    LoadMore,

    ToggleBookLike,
    /// Sets (`Some`) or clears (`None`) the reading status of the open book.
    SetStatus(Option<ReadingStatus>),
    SubmitReview(ReviewForm),

    ToggleReviewLike(ReviewId),
    EditReview {
        review_id: ReviewId,
        form: ReviewForm,
    },
    DeleteReview(ReviewId),

    Register {
        name: String,
        email: String,
        password: String,
    },
    Logout,

    /// A worker finished a request.
    Response(ApiResponse),
}

impl Event {
    /// Variant name for log lines; never includes payloads such as passwords.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ShowCatalog { .. } => "show_catalog",
            Self::OpenBook(_) => "open_book",
            Self::ShowFavourites => "show_favourites",
            Self::SelectFavourites(_) => "select_favourites",
            Self::LoadMore => "load_more",
            Self::ToggleBookLike => "toggle_book_like",
            Self::SetStatus(_) => "set_status",
            Self::SubmitReview(_) => "submit_review",
            Self::ToggleReviewLike(_) => "toggle_review_like",
            Self::EditReview { .. } => "edit_review",
            Self::DeleteReview(_) => "delete_review",
            Self::Register { .. } => "register",
            Self::Logout => "logout",
            Self::Response(_) => "response",
        }
    }
}

/// Processes an event, mutates state, and returns actions to execute.
///
/// The returned flag tells whether the open page changed; store changes are
/// tracked separately through [`EntityStore::revision`].
///
/// # Example
///
/// ```rust
/// use libris::app::{handle_event, Action, AppState, Event, PageSizes};
/// use libris::session::Session;
///
/// let mut state = AppState::new(Session::new(), PageSizes::default());
/// let (redraw, actions) = handle_event(
///     &mut state,
///     Event::ShowCatalog { keywords: None, genres: None },
/// );
/// assert!(redraw);
/// assert!(matches!(actions[..], [Action::Request(_)]));
/// ```
pub fn handle_event(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event = event.name()).entered();

    match event {
        Event::ShowCatalog { keywords, genres } => {
            let generation = state.next_generation();
            let (page, request) =
                CatalogPage::open(keywords, genres, generation, state.page_sizes.books);
            state.page = Page::Catalog(page);
            (true, vec![Action::Request(request)])
        }
        Event::OpenBook(book_id) => {
            if state.store.book(book_id).is_none() {
                tracing::warn!(book_id, "cannot open a book that was never listed");
                return (false, vec![]);
            }
            let generation = state.next_generation();
            let (page, request) = BookPage::open(book_id, generation, state.page_sizes.reviews);
            state.page = Page::Book(page);
            (true, vec![Action::Request(request)])
        }
        Event::ShowFavourites => {
            state.next_generation();
            state.page = Page::Favourites(FavouritesPage::open(&state.session, &mut state.store));
            (true, vec![])
        }
        Event::SelectFavourites(filter) => {
            let Page::Favourites(page) = &mut state.page else {
                tracing::debug!("favourites page is not open");
                return (false, vec![]);
            };
            page.select(filter, &state.session, &mut state.store);
            (true, vec![])
        }
        Event::LoadMore => {
            let request = match &mut state.page {
                Page::Book(page) => page.load_more(),
                Page::Catalog(page) => page.load_more(),
                Page::Home | Page::Favourites(_) => None,
            };
            requests(request)
        }
        Event::ToggleBookLike => on_book_page(state, |page, session, _| page.toggle_like(session)),
        Event::SetStatus(status) => {
            on_book_page(state, |page, session, _| page.set_status(session, status))
        }
        Event::SubmitReview(form) => {
            on_book_page(state, |page, session, _| page.submit_review(session, &form))
        }
        Event::ToggleReviewLike(review_id) => on_book_page(state, |page, session, store| {
            page.toggle_review_like(session, store, review_id)
        }),
        Event::EditReview { review_id, form } => on_book_page(state, |page, session, store| {
            page.edit_review(session, store, review_id, &form)
        }),
        Event::DeleteReview(review_id) => on_book_page(state, |page, session, store| {
            page.delete_review(session, store, review_id)
        }),
        Event::Register {
            name,
            email,
            password,
        } => {
            state.notice = None;
            requests(Some(ApiRequest::Register {
                name,
                email,
                password,
            }))
        }
        Event::Logout => {
            state.session.clear();
            if let Page::Favourites(page) = &mut state.page {
                let filter = page.filter;
                page.select(filter, &state.session, &mut state.store);
            }
            (true, vec![Action::Authorize(None)])
        }
        Event::Response(response) => handle_response(state, response),
    }
}

fn requests(request: Option<ApiRequest>) -> (bool, Vec<Action>) {
    let actions: Vec<Action> = request.map(Action::Request).into_iter().collect();
    (!actions.is_empty(), actions)
}

/// Runs an intent against the open book page.
///
/// Always redraws: a rejected intent may still have set a banner.
fn on_book_page<F>(state: &mut AppState, intent: F) -> (bool, Vec<Action>)
where
    F: FnOnce(&mut BookPage, &Session, &EntityStore) -> Option<ApiRequest>,
{
    let Page::Book(page) = &mut state.page else {
        tracing::debug!("book page is not open");
        return (false, vec![]);
    };
    let request = intent(page, &state.session, &state.store);
    (true, request.map(Action::Request).into_iter().collect())
}

/// The open book page, if it shows `book_id`.
fn book_page_for(page: &mut Page, book_id: BookId) -> Option<&mut BookPage> {
    match page {
        Page::Book(page) if page.book_id == book_id => Some(page),
        _ => None,
    }
}

/// The open book page, if it lists or is acting on `review_id`.
fn book_page_tracking(page: &mut Page, review_id: ReviewId) -> Option<&mut BookPage> {
    match page {
        Page::Book(page) if page.tracks_review(review_id) => Some(page),
        _ => None,
    }
}

/// Copy of the session user without joined lists, for embedding in reviews.
fn bare_user(session: &Session) -> Option<User> {
    session
        .user()
        .map(|u| User::new(u.id, u.name.clone(), u.email.clone()))
}

/// Settles a response.
///
/// Confirmed effects land in the store and session whatever page is open,
/// but the redraw flag only reports the open page. Store changes are picked
/// up from [`EntityStore::revision`] by [`crate::dispatch`].
#[allow(clippy::too_many_lines)]
fn handle_response(state: &mut AppState, response: ApiResponse) -> (bool, Vec<Action>) {
    if let Some(code) = response.error_code() {
        tracing::debug!(code, "response carries a failure");
    }

    match response {
        ApiResponse::ReviewsLoaded {
            book_id,
            page_num,
            generation,
            result,
        } => match &mut state.page {
            Page::Book(page) if page.accepts(book_id, generation) => {
                page.on_reviews_loaded(&mut state.store, page_num, result);
                (true, vec![])
            }
            _ => {
                tracing::debug!(book_id, generation, "dropping stale reviews page");
                (false, vec![])
            }
        },
        ApiResponse::BooksLoaded {
            query,
            generation,
            result,
        } => match &mut state.page {
            Page::Catalog(page) if page.accepts(generation) => {
                page.on_books_loaded(&mut state.store, &query, result);
                (true, vec![])
            }
            _ => {
                tracing::debug!(generation, "dropping stale catalog page");
                (false, vec![])
            }
        },
        ApiResponse::BookLikeChanged {
            book_id,
            like,
            result,
        } => {
            if result.is_ok() {
                if like {
                    state.store.apply(Mutation::BookLiked(book_id));
                    if let Some(book) = state.store.book(book_id).cloned() {
                        state.session.add_liked_book(book);
                    }
                } else {
                    state.store.apply(Mutation::BookUnliked(book_id));
                    state.session.remove_liked_book(book_id);
                }
            }
            let Some(page) = book_page_for(&mut state.page, book_id) else {
                return (false, vec![]);
            };
            page.on_like_changed(&result);
            (true, vec![])
        }
        ApiResponse::BookStatusChanged {
            book_id,
            status,
            result,
        } => {
            if result.is_ok() {
                match status {
                    Some(status) => {
                        if let Some(book) = state.store.book(book_id).cloned() {
                            state.session.set_book_status(book, status);
                        }
                    }
                    None => state.session.clear_book_status(book_id),
                }
            }
            let Some(page) = book_page_for(&mut state.page, book_id) else {
                return (result.is_ok(), vec![]);
            };
            page.on_status_changed(&result);
            (true, vec![])
        }
        ApiResponse::ReviewAdded { book_id, result } => {
            if let Ok(review) = &result {
                let mut review = review.clone();
                if review.author().is_none() {
                    review.user = bare_user(&state.session);
                }
                if review.user_id.is_none() {
                    review.user_id = state.session.user_id();
                }
                state.store.apply(Mutation::UpsertReviews(vec![review]));
            }
            let Some(page) = book_page_for(&mut state.page, book_id) else {
                return (false, vec![]);
            };
            page.on_review_added(&result);
            (true, vec![])
        }
        ApiResponse::ReviewUpdated { review_id, result } => {
            if let Ok(review) = &result {
                state.store.apply(Mutation::ReviewReplaced(review.clone()));
            }
            let Some(page) = book_page_tracking(&mut state.page, review_id) else {
                return (false, vec![]);
            };
            page.on_review_updated(review_id, &result);
            (true, vec![])
        }
        ApiResponse::ReviewDeleted { review_id, result } => {
            let redraw = match book_page_tracking(&mut state.page, review_id) {
                Some(page) => {
                    page.on_review_deleted(review_id, &result);
                    true
                }
                None => false,
            };
            if result.is_ok() {
                state.store.apply(Mutation::ReviewRemoved(review_id));
            }
            (redraw, vec![])
        }
        ApiResponse::ReviewLikeChanged {
            review_id,
            like,
            result,
        } => {
            if result.is_ok() {
                if like {
                    if let Some(user) = bare_user(&state.session) {
                        state.store.apply(Mutation::ReviewLiked { review_id, user });
                    }
                } else if let Some(user_id) = state.session.user_id() {
                    state
                        .store
                        .apply(Mutation::ReviewUnliked { review_id, user_id });
                }
            }
            let Some(page) = book_page_tracking(&mut state.page, review_id) else {
                return (false, vec![]);
            };
            page.on_review_like_changed(review_id, &result);
            (true, vec![])
        }
        ApiResponse::Registered { result } => match result {
            Ok(authenticated) => {
                state.session.install(authenticated);
                let token = state.session.token().map(String::from);
                (true, vec![Action::Authorize(token)])
            }
            Err(e) => {
                state.notice = Some(messages::register(e.code()).to_string());
                (true, vec![])
            }
        },
    }
}
