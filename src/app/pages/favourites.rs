//! Favourites view-model: local projections of the session's lists.
//!
//! No network calls. Each selection fully replaces the displayed list with a
//! projection of what the session already holds, so the page only reflects
//! data loaded at bootstrap or changed since through the book page.

use crate::app::messages;
use crate::app::modes::FavouritesFilter;
use crate::domain::{Book, BookId};
use crate::session::Session;
use crate::store::{EntityStore, Mutation};

/// State of the favourites page.
#[derive(Debug, Clone, Default)]
pub struct FavouritesPage {
    pub filter: FavouritesFilter,
    /// `None` when the session has no such list loaded.
    pub book_ids: Option<Vec<BookId>>,
    pub notice: Option<String>,
}

impl FavouritesPage {
    /// Opens on the default projection.
    #[must_use]
    pub fn open(session: &Session, store: &mut EntityStore) -> Self {
        let mut page = Self::default();
        page.select(FavouritesFilter::default(), session, store);
        page
    }

    /// Replaces the list with the chosen projection.
    pub fn select(&mut self, filter: FavouritesFilter, session: &Session, store: &mut EntityStore) {
        self.filter = filter;
        self.notice = None;

        if !session.is_logged_in() {
            tracing::debug!("favourites need a user");
            self.book_ids = None;
            self.notice = Some(messages::LOGIN_REQUIRED.to_string());
            return;
        }

        let books: Option<Vec<Book>> = match filter.status() {
            None => session.liked_books().map(<[Book]>::to_vec),
            Some(status) => session.user().and_then(|u| u.books_with_status(status)),
        };

        self.book_ids = books.map(|books| {
            let ids = books.iter().map(|b| b.id).collect();
            store.apply(Mutation::SeedBooks(books));
            ids
        });
        tracing::debug!(filter = %filter, count = ?self.book_ids.as_ref().map(Vec::len), "favourites projected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ReadingStatus, User};

    fn session() -> Session {
        let mut session = Session::new();
        session.set_user(User::new(17, "maksim", None));
        session.set_book_status(Book::new(1, "A"), ReadingStatus::Read);
        session.set_book_status(Book::new(2, "B"), ReadingStatus::Reading);
        session.set_book_status(Book::new(3, "C"), ReadingStatus::Read);
        session.set_book_status(Book::new(4, "D"), ReadingStatus::Drop);
        session.add_liked_book(Book::new(2, "B"));
        session
    }

    #[test]
    fn opens_on_read_projection() {
        let mut store = EntityStore::new();
        let page = FavouritesPage::open(&session(), &mut store);
        assert_eq!(page.filter, FavouritesFilter::Read);
        assert_eq!(page.book_ids, Some(vec![1, 3]));
        assert!(store.book(3).is_some());
    }

    #[test]
    fn each_selection_replaces_list() {
        let mut store = EntityStore::new();
        let session = session();
        let mut page = FavouritesPage::open(&session, &mut store);

        page.select(FavouritesFilter::Reading, &session, &mut store);
        assert_eq!(page.book_ids, Some(vec![2]));
        page.select(FavouritesFilter::Drop, &session, &mut store);
        assert_eq!(page.book_ids, Some(vec![4]));
        page.select(FavouritesFilter::Liked, &session, &mut store);
        assert_eq!(page.book_ids, Some(vec![2]));
    }

    #[test]
    fn anonymous_viewer_gets_notice() {
        let mut store = EntityStore::new();
        let page = FavouritesPage::open(&Session::new(), &mut store);
        assert!(page.book_ids.is_none());
        assert_eq!(page.notice.as_deref(), Some(messages::LOGIN_REQUIRED));
    }

    #[test]
    fn unloaded_lists_stay_unavailable() {
        let mut store = EntityStore::new();
        let mut session = Session::new();
        session.set_user(User::new(17, "maksim", None));
        let page = FavouritesPage::open(&session, &mut store);
        assert!(page.book_ids.is_none());
        assert!(page.notice.is_none());
    }
}
