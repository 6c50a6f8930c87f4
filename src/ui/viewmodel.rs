//! View model types representing renderable UI state.
//!
//! View models are immutable, display-ready projections computed from
//! application state by `AppState::compute_viewmodel()`. They contain no
//! business logic: star counts, labels and ownership flags are already
//! resolved, so the renderer only lays text out.
//!
//! # Example
//!
//! ```rust
//! use libris::domain::Book;
//! use libris::ui::viewmodel::BookCardView;
//!
//! let mut book = Book::new(1, "Solaris");
//! book.rating = Some(3.6);
//! let card = BookCardView::from_book(&book);
//! assert_eq!(card.rating_label.as_deref(), Some("3.6/5.0"));
//! ```

use crate::domain::{Book, ReadingStatus, Review, StarRating, UserId};
use crate::ui::helpers::{card_rating_label, format_issued_date, header_rating_label};

/// Complete view model for one screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    /// Name of the logged-in user, if any.
    pub user_name: Option<String>,
    /// Page-independent message (registration failures).
    pub notice: Option<String>,
    pub page: PageView,
}

/// The page currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Home,
    Catalog(CatalogView),
    Book(Box<BookDetailView>),
    Favourites(FavouritesView),
}

/// Body of a list page.
#[derive(Debug, Clone, PartialEq)]
pub enum ListBody<T> {
    Loading,
    Failed(String),
    Items(Vec<T>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView {
    /// Active filters, e.g. `keywords: sea; genres: novel`.
    pub filters: Option<String>,
    pub body: ListBody<BookCardView>,
    pub banner: Option<String>,
}

/// The book detail page.
///
/// The header star line uses the rounded rating with two decimals and shows
/// zero stars for an unrated book.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDetailView {
    pub name: String,
    pub author_name: Option<String>,
    pub stars: StarRating,
    pub rating_label: String,
    pub ratings_count: Option<i64>,
    pub genres: Option<String>,
    pub likes: i64,
    pub liked: bool,
    pub status: Option<ReadingStatus>,
    pub reviews: ListBody<ReviewCardView>,
    pub banner: Option<String>,
    pub review_error: Option<String>,
}

impl BookDetailView {
    /// Header fields of the page for a book.
    #[must_use]
    pub fn header(book: &Book) -> Self {
        let stars = book.stars().unwrap_or_else(|| StarRating::from_filled(0));
        Self {
            name: book.name.clone(),
            author_name: book.author.as_ref().map(|a| a.name.clone()),
            stars,
            rating_label: header_rating_label(stars),
            ratings_count: book.ratings_count,
            genres: book.genres_line(),
            likes: book.like_count(),
            liked: false,
            status: None,
            reviews: ListBody::Loading,
            banner: None,
            review_error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FavouritesView {
    pub buttons: Vec<FilterButton>,
    /// `None` when the projection is not available.
    pub books: Option<Vec<BookCardView>>,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterButton {
    pub label: &'static str,
    pub active: bool,
}

/// A book card.
#[derive(Debug, Clone, PartialEq)]
pub struct BookCardView {
    pub id: i64,
    pub name: String,
    /// `None` when the book is unrated; no star line is shown then.
    pub stars: Option<StarRating>,
    /// Raw rating over five, e.g. `3.6/5.0`.
    pub rating_label: Option<String>,
    pub genres: Option<String>,
    pub likes: i64,
    pub issued: Option<String>,
}

impl BookCardView {
    #[must_use]
    pub fn from_book(book: &Book) -> Self {
        let stars = book.stars();
        Self {
            id: book.id,
            name: book.name.clone(),
            stars,
            rating_label: stars.and(book.rating).map(card_rating_label),
            genres: book.genres_line(),
            likes: book.like_count(),
            issued: book.issued_date.as_deref().map(format_issued_date),
        }
    }
}

/// A review card.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewCardView {
    pub id: i64,
    pub author_name: Option<String>,
    pub text: String,
    pub stars: Option<StarRating>,
    pub rating_label: Option<String>,
    pub likes: i64,
    /// Whether the viewer is in the liked-users set.
    pub liked: bool,
    /// Delete (and edit) is offered only to the author.
    pub can_delete: bool,
}

impl ReviewCardView {
    #[must_use]
    pub fn from_review(review: &Review, viewer: Option<UserId>) -> Self {
        let stars = review.stars();
        Self {
            id: review.id,
            author_name: review.author().map(|u| u.name.clone()),
            text: review.text.clone().unwrap_or_default(),
            stars,
            rating_label: stars.and(review.rating).map(card_rating_label),
            likes: review.like_count(),
            liked: viewer.is_some_and(|id| review.is_liked_by(id)),
            can_delete: viewer.is_some_and(|id| review.is_authored_by(id)),
        }
    }
}
