//! Catalogue view-model: search results with "load more" pagination.

use crate::api::{ApiResult, BookQuery};
use crate::app::messages;
use crate::app::modes::LoadState;
use crate::domain::{Book, BookId};
use crate::store::{EntityStore, Mutation};
use crate::worker::ApiRequest;

/// State of the catalogue page.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    /// Keyword and genre filters supplied by the host.
    pub filters: BookQuery,
    pub generation: u64,
    pub state: LoadState,
    pub book_ids: Vec<BookId>,
    pub page_num: u32,
    pub banner: Option<String>,
    page_size: u32,
    more_pending: bool,
}

impl CatalogPage {
    /// Opens the page and requests the unpaged first result set.
    #[must_use]
    pub fn open(
        keywords: Option<String>,
        genres: Option<String>,
        generation: u64,
        page_size: u32,
    ) -> (Self, ApiRequest) {
        let filters = BookQuery::new(keywords, genres);
        let request = ApiRequest::SearchBooks {
            query: filters.clone(),
            generation,
        };
        let page = Self {
            filters,
            generation,
            state: LoadState::Loading,
            book_ids: Vec::new(),
            page_num: 0,
            banner: None,
            page_size,
            more_pending: false,
        };
        (page, request)
    }

    #[must_use]
    pub const fn accepts(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Requests the next page unless one is already in flight.
    pub fn load_more(&mut self) -> Option<ApiRequest> {
        if !self.state.is_ready() || self.more_pending {
            tracing::debug!("catalog load more ignored");
            return None;
        }
        self.more_pending = true;
        Some(ApiRequest::SearchBooks {
            query: self.filters.page(self.page_num + 1, self.page_size),
            generation: self.generation,
        })
    }

    /// Settles a search response; `query.page_num` tells first fetch from more.
    pub fn on_books_loaded(
        &mut self,
        store: &mut EntityStore,
        query: &BookQuery,
        result: ApiResult<Vec<Book>>,
    ) {
        let Some(page_num) = query.page_num else {
            match result {
                Ok(books) => {
                    self.book_ids = books.iter().map(|b| b.id).collect();
                    store.apply(Mutation::UpsertBooks(books));
                    self.state = LoadState::Ready;
                }
                Err(e) => {
                    self.state = LoadState::Failed(messages::catalog_load(e.code()).to_string());
                }
            }
            return;
        };

        self.more_pending = false;
        match result {
            Ok(books) if books.is_empty() => {
                tracing::debug!(page_num, "no more books");
            }
            Ok(books) => {
                for book in &books {
                    if !self.book_ids.contains(&book.id) {
                        self.book_ids.push(book.id);
                    }
                }
                store.apply(Mutation::UpsertBooks(books));
                self.page_num = self.page_num.max(page_num);
            }
            Err(e) => {
                self.banner = Some(messages::catalog_load(e.code()).to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    fn books(ids: &[BookId]) -> Vec<Book> {
        ids.iter().map(|id| Book::new(*id, format!("book {id}"))).collect()
    }

    fn ready(store: &mut EntityStore) -> CatalogPage {
        let (mut page, request) = CatalogPage::open(None, None, 1, 20);
        let ApiRequest::SearchBooks { query, .. } = request else {
            panic!("expected a search request");
        };
        page.on_books_loaded(store, &query, Ok(books(&[1, 2])));
        page
    }

    #[test]
    fn first_fetch_is_unpaged() {
        let (_, request) = CatalogPage::open(Some("sea".to_string()), None, 1, 20);
        let ApiRequest::SearchBooks { query, .. } = request else {
            panic!("expected a search request");
        };
        assert_eq!(query.keywords.as_deref(), Some("sea"));
        assert!(query.page_num.is_none());
    }

    #[test]
    fn not_found_shows_message() {
        let mut store = EntityStore::new();
        let (mut page, _) = CatalogPage::open(None, None, 1, 20);
        page.on_books_loaded(&mut store, &BookQuery::default(), Err(ApiError::Status(404)));
        assert_eq!(page.state, LoadState::Failed("Не найдено.".to_string()));
    }

    #[test]
    fn load_more_requests_next_page_and_appends() {
        let mut store = EntityStore::new();
        let mut page = ready(&mut store);

        let Some(ApiRequest::SearchBooks { query, .. }) = page.load_more() else {
            panic!("expected a search request");
        };
        assert_eq!((query.page_num, query.page_size), (Some(1), Some(20)));
        assert!(page.load_more().is_none());

        page.on_books_loaded(&mut store, &query, Ok(books(&[3])));
        assert_eq!(page.book_ids, vec![1, 2, 3]);
        assert_eq!(page.page_num, 1);
        assert!(store.book(3).is_some());
    }

    #[test]
    fn load_more_failure_uses_search_message_and_keeps_books() {
        let mut store = EntityStore::new();
        let mut page = ready(&mut store);
        let query = page.filters.page(1, 20);
        page.load_more();
        page.on_books_loaded(&mut store, &query, Err(ApiError::Status(400)));

        assert_eq!(page.book_ids, vec![1, 2]);
        assert_eq!(page.banner.as_deref(), Some(messages::SEARCH_BAD_PARAMS));
    }

    #[test]
    fn list_never_shrinks() {
        let mut store = EntityStore::new();
        let mut page = ready(&mut store);
        let mut previous = page.book_ids.len();
        let pages: [ApiResult<Vec<Book>>; 4] = [
            Ok(books(&[3, 4])),
            Ok(vec![]),
            Err(ApiError::NoResponse),
            Ok(books(&[4, 5])),
        ];
        for (n, result) in pages.into_iter().enumerate() {
            page.load_more();
            let query = page.filters.page(u32::try_from(n).unwrap() + 1, 20);
            page.on_books_loaded(&mut store, &query, result);
            assert!(page.book_ids.len() >= previous);
            previous = page.book_ids.len();
        }
        assert_eq!(page.book_ids, vec![1, 2, 3, 4, 5]);
    }
}
