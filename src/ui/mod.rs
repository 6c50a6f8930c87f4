//! Text rendering layer.
//!
//! Transforms application state into display lines through composable
//! components. Nothing here talks to the network or mutates state.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → ViewModel → render → Vec<String>
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types (pages, book and review cards)
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable text components
//! - [`helpers`]: Rating labels and date formatting
//!
//! # Example
//!
//! ```rust
//! use libris::app::{AppState, PageSizes};
//! use libris::session::Session;
//!
//! let state = AppState::new(Session::new(), PageSizes::default());
//! for line in libris::ui::render(&state) {
//!     println!("{line}");
//! }
//! ```

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use viewmodel::{
    BookCardView, BookDetailView, CatalogView, FavouritesView, FilterButton, ListBody, PageView,
    ReviewCardView, ViewModel,
};
