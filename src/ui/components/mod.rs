//! Composable text components.
//!
//! Each component appends display lines to an output buffer; the renderer
//! decides which components a page is made of.
//!
//! # Components
//!
//! - [`render_header`]: Title line with the logged-in user
//! - [`render_footer`]: Command hints for the current page
//! - [`render_book_card`]: One catalogue entry
//! - [`render_review_card`]: One review with like and delete markers
//! - [`render_empty_state`]: Placeholder for empty or unavailable lists

mod book_card;
mod empty;
mod footer;
mod header;
mod review_card;

pub use book_card::render_book_card;
pub use empty::render_empty_state;
pub use footer::render_footer;
pub use header::render_header;
pub use review_card::render_review_card;

/// Indentation of card detail lines.
const INDENT: &str = "    ";

/// Horizontal rule separating page sections.
pub fn render_border(out: &mut Vec<String>) {
    out.push("─".repeat(48));
}

/// Renders a banner line when a message is present.
pub fn render_banner(message: Option<&str>, out: &mut Vec<String>) {
    if let Some(message) = message {
        out.push(format!("! {message}"));
    }
}
