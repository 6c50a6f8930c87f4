//! Book card component.

use super::INDENT;
use crate::ui::viewmodel::BookCardView;

/// Renders one book card, numbered for `open <n>`.
///
/// # Layout
///
/// ```text
/// [1] Solaris
///     ★★★★☆ 3.6/5.0
///     sci-fi, classic
///     ♥ 12 · 01.06.1961
/// ```
///
/// The star line is omitted for unrated books and the genre line for books
/// without genres.
pub fn render_book_card(number: usize, card: &BookCardView, out: &mut Vec<String>) {
    out.push(format!("[{number}] {}", card.name));

    if let (Some(stars), Some(label)) = (card.stars, card.rating_label.as_deref()) {
        out.push(format!("{INDENT}{} {label}", stars.glyphs()));
    }
    if let Some(genres) = card.genres.as_deref() {
        out.push(format!("{INDENT}{genres}"));
    }

    let mut meta = format!("{INDENT}♥ {}", card.likes);
    if let Some(issued) = card.issued.as_deref() {
        meta.push_str(" · ");
        meta.push_str(issued);
    }
    out.push(meta);
}
