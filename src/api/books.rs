//! Books service client: catalogue search.

use super::client::ServiceClient;
use super::error::ApiResult;
use super::transport::Method;
use crate::domain::Book;

/// Search filters and paging for `GET {books}/search`.
///
/// Blank filters are not sent; paging is sent only when set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    pub keywords: Option<String>,
    pub genres: Option<String>,
    pub page_num: Option<u32>,
    pub page_size: Option<u32>,
}

impl BookQuery {
    /// Query with the given filters and no paging.
    #[must_use]
    pub fn new(keywords: Option<String>, genres: Option<String>) -> Self {
        Self {
            keywords,
            genres,
            page_num: None,
            page_size: None,
        }
    }

    /// Same filters, asking for a specific page.
    #[must_use]
    pub fn page(&self, page_num: u32, page_size: u32) -> Self {
        Self {
            page_num: Some(page_num),
            page_size: Some(page_size),
            ..self.clone()
        }
    }
}

/// Client for `{books}`.
#[derive(Clone)]
pub struct BooksClient {
    inner: ServiceClient,
}

impl BooksClient {
    pub(crate) const fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    /// `GET {books}/search?keyWords=&genres=&pageNum=&pageSize=&_=ts`.
    ///
    /// The trailing `_` parameter is a millisecond timestamp that defeats
    /// intermediate caches.
    ///
    /// # Errors
    ///
    /// Returns the status code (or the no-response sentinel) on failure.
    pub fn search(&self, query: &BookQuery) -> ApiResult<Vec<Book>> {
        let mut request = self.inner.request(Method::Get, "/search");

        let filters = [("keyWords", &query.keywords), ("genres", &query.genres)];
        for (name, value) in filters {
            if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                request.query.push((name.to_string(), value.to_string()));
            }
        }
        if let Some(page_num) = query.page_num {
            request
                .query
                .push(("pageNum".to_string(), page_num.to_string()));
        }
        if let Some(page_size) = query.page_size {
            request
                .query
                .push(("pageSize".to_string(), page_size.to_string()));
        }
        request.query.push((
            "_".to_string(),
            chrono::Utc::now().timestamp_millis().to_string(),
        ));

        let books: Vec<Book> = self.inner.fetch("search_books", &request)?;
        tracing::debug!(count = books.len(), "books fetched");
        Ok(books)
    }
}
