//! User domain model.

use serde::{Deserialize, Serialize};

use super::book::{Book, BookId, BookStatus, ReadingStatus};

/// Identifier of a user in the users service.
pub type UserId = i64;

/// A registered user.
///
/// `book_statuses` and `liked_books` are only present when the user was fetched
/// with the `with_statuses_and_books` join mode; `None` means "not loaded", not
/// "empty".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "bookStatuses", default, skip_serializing_if = "Option::is_none")]
    pub book_statuses: Option<Vec<BookStatus>>,
    #[serde(rename = "likedBooks", default, skip_serializing_if = "Option::is_none")]
    pub liked_books: Option<Vec<Book>>,
}

impl User {
    /// Creates a user without joined statuses or liked books.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email,
            book_statuses: None,
            liked_books: None,
        }
    }

    /// Returns whether the book is in the user's liked list.
    #[must_use]
    pub fn has_liked(&self, book_id: BookId) -> bool {
        self.liked_books
            .as_ref()
            .is_some_and(|books| books.iter().any(|b| b.id == book_id))
    }

    /// Returns the user's reading status for a book, if any.
    #[must_use]
    pub fn status_of(&self, book_id: BookId) -> Option<ReadingStatus> {
        self.book_statuses
            .as_ref()?
            .iter()
            .find(|s| s.book.id == book_id)
            .map(|s| s.status)
    }

    /// Books from the status list carrying the given status, in list order.
    #[must_use]
    pub fn books_with_status(&self, status: ReadingStatus) -> Option<Vec<Book>> {
        self.book_statuses.as_ref().map(|statuses| {
            statuses
                .iter()
                .filter(|s| s.status == status)
                .map(|s| s.book.clone())
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader() -> User {
        let json = r#"{
            "id": 17,
            "name": "maksim",
            "email": "m@example.com",
            "bookStatuses": [
                {"book": {"id": 1, "name": "A"}, "status": "READ"},
                {"book": {"id": 2, "name": "B"}, "status": "READING"},
                {"book": {"id": 3, "name": "C"}, "status": "READ"}
            ],
            "likedBooks": [{"id": 2, "name": "B"}]
        }"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn joined_lists_decode() {
        let user = reader();
        assert_eq!(user.book_statuses.as_ref().map(Vec::len), Some(3));
        assert!(user.has_liked(2));
        assert!(!user.has_liked(1));
    }

    #[test]
    fn status_lookup_and_projection() {
        let user = reader();
        assert_eq!(user.status_of(2), Some(ReadingStatus::Reading));
        assert_eq!(user.status_of(9), None);

        let read: Vec<BookId> = user
            .books_with_status(ReadingStatus::Read)
            .unwrap()
            .iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(read, vec![1, 3]);
    }

    #[test]
    fn unjoined_user_has_no_lists() {
        let user: User = serde_json::from_str(r#"{"id": 5, "name": "x"}"#).unwrap();
        assert!(user.books_with_status(ReadingStatus::Drop).is_none());
        assert!(!user.has_liked(1));
    }
}
