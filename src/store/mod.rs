//! Normalized snapshot store for books and reviews.
//!
//! Pages and cards never own entities. They hold ids and read the current
//! snapshot from [`EntityStore`]; every change goes through
//! [`EntityStore::apply`], which bumps a revision counter. The event loop
//! compares revisions to tell whether anything moved during an event.
//!
//! # Example
//!
//! ```rust
//! use libris::domain::Book;
//! use libris::store::{EntityStore, Mutation};
//!
//! let mut store = EntityStore::new();
//! store.apply(Mutation::UpsertBooks(vec![Book::new(1, "Dune")]));
//! store.apply(Mutation::BookLiked(1));
//! assert_eq!(store.book(1).map(Book::like_count), Some(1));
//! ```

use std::collections::HashMap;

use crate::domain::{Book, BookId, Review, ReviewId, User, UserId};

/// A single change to the stored entities.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Inserts or replaces book snapshots.
    UpsertBooks(Vec<Book>),
    /// Inserts book snapshots that are not stored yet; present ones are kept.
    SeedBooks(Vec<Book>),
    /// Inserts or replaces review snapshots.
    UpsertReviews(Vec<Review>),
    /// Replaces a review, keeping joined relations the new snapshot lacks.
    ReviewReplaced(Review),
    /// Drops a deleted review.
    ReviewRemoved(ReviewId),
    /// The viewer liked a book.
    BookLiked(BookId),
    /// The viewer removed their like from a book.
    BookUnliked(BookId),
    /// A user liked a review.
    ReviewLiked { review_id: ReviewId, user: User },
    /// A user removed their like from a review.
    ReviewUnliked { review_id: ReviewId, user_id: UserId },
}

/// Id-keyed snapshots of every book and review seen so far.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    books: HashMap<BookId, Book>,
    reviews: HashMap<ReviewId, Review>,
    revision: u64,
}

impl EntityStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.get(&id)
    }

    #[must_use]
    pub fn review(&self, id: ReviewId) -> Option<&Review> {
        self.reviews.get(&id)
    }

    /// Resolves ids to snapshots in order, skipping unknown ids.
    #[must_use]
    pub fn books<'a>(&'a self, ids: &'a [BookId]) -> Vec<&'a Book> {
        ids.iter().filter_map(|id| self.books.get(id)).collect()
    }

    /// Resolves ids to snapshots in order, skipping unknown ids.
    #[must_use]
    pub fn reviews<'a>(&'a self, ids: &'a [ReviewId]) -> Vec<&'a Review> {
        ids.iter().filter_map(|id| self.reviews.get(id)).collect()
    }

    /// Number of mutations applied so far.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Applies a mutation and bumps the revision.
    ///
    /// Returns `false` when the mutation referred to an entity the store does
    /// not hold; the revision is bumped either way.
    pub fn apply(&mut self, mutation: Mutation) -> bool {
        self.revision += 1;
        tracing::debug!(
            revision = self.revision,
            mutation = ?MutationKind::of(&mutation),
            "applying mutation"
        );

        match mutation {
            Mutation::UpsertBooks(books) => {
                for book in books {
                    self.books.insert(book.id, book);
                }
                true
            }
            Mutation::SeedBooks(books) => {
                for book in books {
                    self.books.entry(book.id).or_insert(book);
                }
                true
            }
            Mutation::UpsertReviews(reviews) => {
                for review in reviews {
                    self.reviews.insert(review.id, review);
                }
                true
            }
            Mutation::ReviewReplaced(mut review) => {
                if let Some(previous) = self.reviews.remove(&review.id) {
                    review.user = review.user.or(previous.user);
                    review.author = review.author.or(previous.author);
                    review.liked_users = review.liked_users.or(previous.liked_users);
                    review.likes = review.likes.or(previous.likes);
                }
                self.reviews.insert(review.id, review);
                true
            }
            Mutation::ReviewRemoved(id) => self.reviews.remove(&id).is_some(),
            Mutation::BookLiked(id) => self.adjust_book_likes(id, 1),
            Mutation::BookUnliked(id) => self.adjust_book_likes(id, -1),
            Mutation::ReviewLiked { review_id, user } => {
                let Some(review) = self.reviews.get_mut(&review_id) else {
                    return false;
                };
                let liked = review.liked_users.get_or_insert_with(Vec::new);
                if !liked.iter().any(|u| u.id == user.id) {
                    liked.push(user);
                    review.likes = Some(review.like_count() + 1);
                }
                true
            }
            Mutation::ReviewUnliked { review_id, user_id } => {
                let Some(review) = self.reviews.get_mut(&review_id) else {
                    return false;
                };
                let liked = review.liked_users.get_or_insert_with(Vec::new);
                let before = liked.len();
                liked.retain(|u| u.id != user_id);
                if liked.len() != before {
                    review.likes = Some((review.like_count() - 1).max(0));
                }
                true
            }
        }
    }

    fn adjust_book_likes(&mut self, id: BookId, delta: i64) -> bool {
        let Some(book) = self.books.get_mut(&id) else {
            return false;
        };
        book.likes = Some((book.like_count() + delta).max(0));
        true
    }
}

/// Payload-free mutation name for log lines.
#[derive(Debug)]
enum MutationKind {
    UpsertBooks(usize),
    SeedBooks(usize),
    UpsertReviews(usize),
    ReviewReplaced(ReviewId),
    ReviewRemoved(ReviewId),
    BookLiked(BookId),
    BookUnliked(BookId),
    ReviewLiked(ReviewId),
    ReviewUnliked(ReviewId),
}

impl MutationKind {
    fn of(mutation: &Mutation) -> Self {
        match mutation {
            Mutation::UpsertBooks(books) => Self::UpsertBooks(books.len()),
            Mutation::SeedBooks(books) => Self::SeedBooks(books.len()),
            Mutation::UpsertReviews(reviews) => Self::UpsertReviews(reviews.len()),
            Mutation::ReviewReplaced(review) => Self::ReviewReplaced(review.id),
            Mutation::ReviewRemoved(id) => Self::ReviewRemoved(*id),
            Mutation::BookLiked(id) => Self::BookLiked(*id),
            Mutation::BookUnliked(id) => Self::BookUnliked(*id),
            Mutation::ReviewLiked { review_id, .. } => Self::ReviewLiked(*review_id),
            Mutation::ReviewUnliked { review_id, .. } => Self::ReviewUnliked(*review_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(id: ReviewId) -> Review {
        Review {
            likes: Some(0),
            liked_users: Some(vec![]),
            ..Review::new(id)
        }
    }

    #[test]
    fn like_then_unlike_restores_book_counter() {
        let mut store = EntityStore::new();
        let mut book = Book::new(1, "Dune");
        book.likes = Some(7);
        store.apply(Mutation::UpsertBooks(vec![book]));

        store.apply(Mutation::BookLiked(1));
        assert_eq!(store.book(1).and_then(|b| b.likes), Some(8));
        store.apply(Mutation::BookUnliked(1));
        assert_eq!(store.book(1).and_then(|b| b.likes), Some(7));
    }

    #[test]
    fn counters_never_go_negative() {
        let mut store = EntityStore::new();
        store.apply(Mutation::UpsertBooks(vec![Book::new(1, "Dune")]));
        store.apply(Mutation::BookUnliked(1));
        assert_eq!(store.book(1).and_then(|b| b.likes), Some(0));
    }

    #[test]
    fn review_likes_and_liked_users_move_together() {
        let mut store = EntityStore::new();
        store.apply(Mutation::UpsertReviews(vec![review(3)]));
        let user = User::new(17, "maksim", None);

        store.apply(Mutation::ReviewLiked {
            review_id: 3,
            user: user.clone(),
        });
        store.apply(Mutation::ReviewLiked { review_id: 3, user });
        let stored = store.review(3).unwrap();
        assert_eq!(stored.likes, Some(1));
        assert!(stored.is_liked_by(17));

        store.apply(Mutation::ReviewUnliked {
            review_id: 3,
            user_id: 17,
        });
        let stored = store.review(3).unwrap();
        assert_eq!(stored.likes, Some(0));
        assert!(!stored.is_liked_by(17));
    }

    #[test]
    fn seed_keeps_fresher_snapshot() {
        let mut store = EntityStore::new();
        let mut fresh = Book::new(1, "Dune");
        fresh.likes = Some(10);
        store.apply(Mutation::UpsertBooks(vec![fresh]));
        store.apply(Mutation::SeedBooks(vec![Book::new(1, "Dune"), Book::new(2, "Emma")]));

        assert_eq!(store.book(1).and_then(|b| b.likes), Some(10));
        assert!(store.book(2).is_some());
    }

    #[test]
    fn replaced_review_keeps_joined_author() {
        let mut store = EntityStore::new();
        let mut original = review(5);
        original.user = Some(User::new(17, "maksim", None));
        store.apply(Mutation::UpsertReviews(vec![original]));

        let edited = Review {
            text: Some("better".to_string()),
            ..Review::new(5)
        };
        store.apply(Mutation::ReviewReplaced(edited));

        let stored = store.review(5).unwrap();
        assert_eq!(stored.text.as_deref(), Some("better"));
        assert_eq!(stored.author().map(|u| u.id), Some(17));
    }

    #[test]
    fn unknown_entities_are_reported_and_revision_moves() {
        let mut store = EntityStore::new();
        assert!(!store.apply(Mutation::BookLiked(99)));
        assert!(!store.apply(Mutation::ReviewRemoved(99)));
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn id_lists_resolve_in_order() {
        let mut store = EntityStore::new();
        store.apply(Mutation::UpsertBooks(vec![Book::new(1, "A"), Book::new(2, "B")]));
        let names: Vec<&str> = store
            .books(&[2, 9, 1])
            .into_iter()
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}
