//! Application layer: state, events, view-models and actions.
//!
//! This layer sits between the runtime (`dispatch` and the binary) and the
//! session, store and worker layers. It never performs I/O.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Intent → Event → handle_event → State Mutations → Actions → Worker
//!                           ↑                                        ↓
//!                           └────────── Event::Response ─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects emitted by the event handler
//! - [`handler`]: Event processing and response routing
//! - [`messages`]: Localized failure messages keyed by status code
//! - [`modes`]: Load state and favourites projection types
//! - [`pages`]: Book detail, catalogue and favourites view-models
//! - [`state`]: Central state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use libris::app::{handle_event, AppState, Event, PageSizes};
//! use libris::session::Session;
//!
//! let mut state = AppState::new(Session::new(), PageSizes::default());
//! let (redraw, _actions) = handle_event(&mut state, Event::ShowFavourites);
//! assert!(redraw);
//! ```

pub mod actions;
pub mod handler;
pub mod messages;
pub mod modes;
pub mod pages;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{FavouritesFilter, LoadState};
pub use pages::{BookPage, CatalogPage, FavouritesPage, ReviewForm};
pub use state::{AppState, Page, PageSizes};
