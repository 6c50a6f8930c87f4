//! Request worker that performs all network I/O for the view-models.
//!
//! The application layer never calls a Resource Client directly. It emits
//! [`ApiRequest`]s, the [`RequestWorker`] executes them, and the resulting
//! [`ApiResponse`]s are fed back as events.
//!
//! # Architecture
//!
//! - `messages`: request/response protocol
//! - `handler`: worker implementation and per-request dispatch

pub mod handler;
pub mod messages;

pub use handler::RequestWorker;
pub use messages::{ApiRequest, ApiResponse};
