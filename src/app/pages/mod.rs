//! Page-level view-models.
//!
//! Each page owns its list ids, load state and interaction flags, and turns
//! user intents into [`crate::worker::ApiRequest`]s. Entity snapshots stay in
//! the [`crate::store::EntityStore`].
//!
//! - [`book`]: book detail with reviews, likes, reading status
//! - [`catalog`]: search results with pagination
//! - [`favourites`]: local projections of the session's lists

pub mod book;
pub mod catalog;
pub mod favourites;

pub use book::{BookPage, ReviewForm};
pub use catalog::CatalogPage;
pub use favourites::FavouritesPage;
