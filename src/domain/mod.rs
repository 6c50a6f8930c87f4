//! Domain layer for the Libris client.
//!
//! This module contains the entity types exchanged with the users, books and
//! reviews services, independent of how they are fetched or displayed.
//!
//! # Organization
//!
//! - [`book`]: Books and reading statuses
//! - [`review`]: Reviews and their author/like relations
//! - [`user`]: Users with their joined status and liked-book lists
//! - [`rating`]: Five-star rating projection
//! - [`error`]: Error types and result aliases

pub mod book;
pub mod error;
pub mod rating;
pub mod review;
pub mod user;

pub use book::{Book, BookId, BookStatus, ReadingStatus};
pub use error::{LibrisError, Result};
pub use rating::{StarRating, MAX_STARS};
pub use review::{Review, ReviewId};
pub use user::{User, UserId};
