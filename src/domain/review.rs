//! Review domain model.
//!
//! The reviews service has shipped two shapes for the review author: older
//! payloads embed it as `user`, newer ones as `author`. Both are accepted and
//! [`Review::author`] resolves whichever is present, preferring `user`.

use serde::{Deserialize, Serialize};

use super::book::BookId;
use super::rating::StarRating;
use super::user::{User, UserId};

/// Identifier of a review in the reviews service.
pub type ReviewId = i64;

/// A user's review of a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub likes: Option<i64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub book_id: Option<BookId>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    #[serde(rename = "likedUsers", default, skip_serializing_if = "Option::is_none")]
    pub liked_users: Option<Vec<User>>,
}

impl Review {
    /// Creates an empty review with only an id.
    #[must_use]
    pub const fn new(id: ReviewId) -> Self {
        Self {
            id,
            text: None,
            likes: None,
            rating: None,
            book_id: None,
            user_id: None,
            user: None,
            author: None,
            liked_users: None,
        }
    }

    /// The embedded author record, from `user` or else `author`.
    #[must_use]
    pub fn author(&self) -> Option<&User> {
        self.user.as_ref().or(self.author.as_ref())
    }

    /// The author's id, from `user_id` or the embedded author record.
    #[must_use]
    pub fn author_id(&self) -> Option<UserId> {
        self.user_id.or_else(|| self.author().map(|u| u.id))
    }

    /// Returns whether the given user is the author of this review.
    #[must_use]
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id() == Some(user_id)
    }

    /// Returns whether the given user is in the liked-users set.
    #[must_use]
    pub fn is_liked_by(&self, user_id: UserId) -> bool {
        self.liked_users
            .as_ref()
            .is_some_and(|users| users.iter().any(|u| u.id == user_id))
    }

    /// Star projection of the review rating.
    #[must_use]
    pub fn stars(&self) -> Option<StarRating> {
        StarRating::from_rating(self.rating)
    }

    /// Like counter, treating an absent counter as zero.
    #[must_use]
    pub fn like_count(&self) -> i64 {
        self.likes.unwrap_or(0)
    }
}
