//! Application state and view model computation.
//!
//! [`AppState`] is the single owner of everything the client knows: the
//! [`Session`], the [`EntityStore`] of book and review snapshots, and the page
//! on screen. The event handler mutates it; [`AppState::compute_viewmodel`]
//! projects it for rendering.
//!
//! # Navigation generations
//!
//! Every navigation bumps a generation counter. Pages remember the generation
//! they were opened with, and load responses carrying an older generation are
//! dropped, so navigating away discards late responses.
//!
//! # Example
//!
//! ```rust
//! use libris::app::{AppState, PageSizes};
//! use libris::session::Session;
//! use libris::ui::PageView;
//!
//! let state = AppState::new(Session::new(), PageSizes::default());
//! assert_eq!(state.compute_viewmodel().page, PageView::Home);
//! ```

use crate::app::modes::{FavouritesFilter, LoadState};
use crate::app::pages::{BookPage, CatalogPage, FavouritesPage};
use crate::domain::{BookId, ReviewId};
use crate::session::Session;
use crate::store::EntityStore;
use crate::ui::viewmodel::{
    BookCardView, BookDetailView, CatalogView, FavouritesView, FilterButton, ListBody, PageView,
    ReviewCardView, ViewModel,
};

/// Default number of reviews per page.
pub const DEFAULT_REVIEWS_PAGE_SIZE: u32 = 5;
/// Default number of books per catalogue page.
pub const DEFAULT_BOOKS_PAGE_SIZE: u32 = 20;

/// Page sizes used by the list pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizes {
    pub reviews: u32,
    pub books: u32,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            reviews: DEFAULT_REVIEWS_PAGE_SIZE,
            books: DEFAULT_BOOKS_PAGE_SIZE,
        }
    }
}

/// The page on screen.
#[derive(Debug, Clone, Default)]
pub enum Page {
    #[default]
    Home,
    Catalog(CatalogPage),
    Book(BookPage),
    Favourites(FavouritesPage),
}

/// Central application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub session: Session,
    pub store: EntityStore,
    pub page: Page,
    /// Page-independent message, e.g. a failed registration.
    pub notice: Option<String>,
    pub page_sizes: PageSizes,
    generation: u64,
}

impl AppState {
    #[must_use]
    pub fn new(session: Session, page_sizes: PageSizes) -> Self {
        Self {
            session,
            store: EntityStore::new(),
            page: Page::Home,
            notice: None,
            page_sizes,
            generation: 0,
        }
    }

    /// Advances and returns the navigation generation.
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Book ids listed on the current page, in display order.
    ///
    /// Used to resolve `open <n>` style selections.
    #[must_use]
    pub fn listed_books(&self) -> &[BookId] {
        match &self.page {
            Page::Catalog(page) => &page.book_ids,
            Page::Favourites(page) => page.book_ids.as_deref().unwrap_or_default(),
            Page::Home | Page::Book(_) => &[],
        }
    }

    /// Review ids listed on the current page, in display order.
    #[must_use]
    pub fn listed_reviews(&self) -> &[ReviewId] {
        match &self.page {
            Page::Book(page) => &page.review_ids,
            _ => &[],
        }
    }

    /// Projects the state into a renderable view model.
    #[must_use]
    pub fn compute_viewmodel(&self) -> ViewModel {
        let page = match &self.page {
            Page::Home => PageView::Home,
            Page::Catalog(page) => PageView::Catalog(self.catalog_view(page)),
            Page::Book(page) => self
                .book_view(page)
                .map_or(PageView::Home, |view| PageView::Book(Box::new(view))),
            Page::Favourites(page) => PageView::Favourites(self.favourites_view(page)),
        };

        ViewModel {
            user_name: self.session.user_name().map(String::from),
            notice: self.notice.clone(),
            page,
        }
    }

    fn book_cards(&self, ids: &[BookId]) -> Vec<BookCardView> {
        self.store
            .books(ids)
            .into_iter()
            .map(BookCardView::from_book)
            .collect()
    }

    fn catalog_view(&self, page: &CatalogPage) -> CatalogView {
        let filters = [
            ("keywords", page.filters.keywords.as_deref()),
            ("genres", page.filters.genres.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .filter(|v| !v.trim().is_empty())
                .map(|v| format!("{name}: {v}"))
        })
        .collect::<Vec<_>>();

        CatalogView {
            filters: (!filters.is_empty()).then(|| filters.join("; ")),
            body: match &page.state {
                LoadState::Loading => ListBody::Loading,
                LoadState::Failed(message) => ListBody::Failed(message.clone()),
                LoadState::Ready => ListBody::Items(self.book_cards(&page.book_ids)),
            },
            banner: page.banner.clone(),
        }
    }

    fn book_view(&self, page: &BookPage) -> Option<BookDetailView> {
        let book = self.store.book(page.book_id)?;
        let viewer = self.session.user_id();

        let mut view = BookDetailView::header(book);
        view.liked = self.session.has_liked(page.book_id);
        view.status = self.session.status_of(page.book_id);
        view.banner = page.banner.clone();
        view.review_error = page.review_error.clone();
        view.reviews = match &page.state {
            LoadState::Loading => ListBody::Loading,
            LoadState::Failed(message) => ListBody::Failed(message.clone()),
            LoadState::Ready => ListBody::Items(
                self.store
                    .reviews(&page.review_ids)
                    .into_iter()
                    .map(|review| ReviewCardView::from_review(review, viewer))
                    .collect(),
            ),
        };
        Some(view)
    }

    fn favourites_view(&self, page: &FavouritesPage) -> FavouritesView {
        FavouritesView {
            buttons: FavouritesFilter::ALL
                .into_iter()
                .map(|filter| FilterButton {
                    label: filter.label(),
                    active: filter == page.filter,
                })
                .collect(),
            books: page.book_ids.as_deref().map(|ids| self.book_cards(ids)),
            notice: page.notice.clone(),
        }
    }
}
