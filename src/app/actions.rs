//! Side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) never performs I/O itself. It returns
//! a `Vec<Action>` that the caller (normally [`crate::dispatch`]) executes in
//! order, feeding worker responses back as events.
//!
//! # Example
//!
//! ```rust
//! use libris::app::Action;
//! use libris::worker::ApiRequest;
//!
//! let actions = vec![
//!     Action::Request(ApiRequest::DeleteReview { review_id: 3 }),
//!     Action::Authorize(None),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::worker::ApiRequest;

/// Commands for the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Executes a request on the worker and feeds the response back.
    Request(ApiRequest),

    /// Replaces the bearer token attached to subsequent requests.
    ///
    /// Emitted after registration and logout.
    Authorize(Option<String>),
}
