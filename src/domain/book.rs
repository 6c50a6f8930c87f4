//! Book domain model and reading statuses.
//!
//! Books arrive from the books service as JSON snapshots. Field names follow the
//! service's wire format (`author_id`, `ratings_count`, `issued_date`), so the
//! serde attributes below are part of the REST contract.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::rating::StarRating;
use super::user::User;

/// Identifier of a book in the books service.
pub type BookId = i64;

/// A catalogue entry.
///
/// Everything except `id` and `name` is optional on the wire; the service omits
/// fields depending on the join mode of the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    #[serde(default)]
    pub author_id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub ratings_count: Option<i64>,
    #[serde(default)]
    pub issued_date: Option<String>,
    #[serde(default)]
    pub likes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
}

impl Book {
    /// Creates a bare book with only an id and a name.
    #[must_use]
    pub fn new(id: BookId, name: impl Into<String>) -> Self {
        Self {
            id,
            author_id: None,
            name: name.into(),
            file_path: None,
            rating: None,
            genres: None,
            ratings_count: None,
            issued_date: None,
            likes: None,
            author: None,
        }
    }

    /// Star projection of the average rating, `None` when unrated.
    #[must_use]
    pub fn stars(&self) -> Option<StarRating> {
        StarRating::from_rating(self.rating)
    }

    /// Genres joined with `", "`, or `None` when the book has no genre list.
    #[must_use]
    pub fn genres_line(&self) -> Option<String> {
        self.genres.as_ref().map(|genres| genres.join(", "))
    }

    /// Like counter, treating an absent counter as zero.
    #[must_use]
    pub fn like_count(&self) -> i64 {
        self.likes.unwrap_or(0)
    }
}

/// A user's reading progress for a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadingStatus {
    Reading,
    Read,
    Drop,
}

impl ReadingStatus {
    /// Wire tag of the status (`READING`, `READ`, `DROP`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reading => "READING",
            Self::Read => "READ",
            Self::Drop => "DROP",
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "READING" => Ok(Self::Reading),
            "READ" => Ok(Self::Read),
            "DROP" => Ok(Self::Drop),
            other => Err(format!("unknown reading status: {other}")),
        }
    }
}

/// Pairing of a book with the user's reading status for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookStatus {
    pub book: Book,
    pub status: ReadingStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_service_payload() {
        let json = r#"{
            "id": 7,
            "author_id": 3,
            "name": "Solaris",
            "rating": 4.4,
            "genres": ["sci-fi", "classic"],
            "ratings_count": 12,
            "issued_date": "1961-06-01",
            "likes": 40
        }"#;

        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.id, 7);
        assert_eq!(book.author_id, Some(3));
        assert_eq!(book.genres_line().as_deref(), Some("sci-fi, classic"));
        assert_eq!(book.stars().unwrap().filled, 4);
        assert_eq!(book.like_count(), 40);
        assert!(book.author.is_none());
    }

    #[test]
    fn missing_optional_fields_decode_as_none() {
        let book: Book = serde_json::from_str(r#"{"id": 1, "name": "Untitled"}"#).unwrap();
        assert!(book.rating.is_none());
        assert!(book.stars().is_none());
        assert_eq!(book.like_count(), 0);
    }

    #[test]
    fn status_tags_match_wire_format() {
        let status: BookStatus =
            serde_json::from_str(r#"{"book": {"id": 2, "name": "Dune"}, "status": "READING"}"#)
                .unwrap();
        assert_eq!(status.status, ReadingStatus::Reading);
        assert_eq!(
            serde_json::to_string(&ReadingStatus::Drop).unwrap(),
            "\"DROP\""
        );
        assert_eq!("read".parse::<ReadingStatus>(), Ok(ReadingStatus::Read));
        assert!("finished".parse::<ReadingStatus>().is_err());
    }
}
