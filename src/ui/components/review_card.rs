//! Review card component.

use super::INDENT;
use crate::ui::viewmodel::ReviewCardView;

/// Renders one review card, numbered for the review commands.
///
/// `♥` marks a review the viewer liked, `♡` one they did not. `[delete]` is
/// shown only on the viewer's own reviews.
pub fn render_review_card(number: usize, card: &ReviewCardView, out: &mut Vec<String>) {
    let mut title = format!("({number}) {}", card.author_name.as_deref().unwrap_or("—"));
    if let (Some(stars), Some(label)) = (card.stars, card.rating_label.as_deref()) {
        title.push_str(&format!("  {} {label}", stars.glyphs()));
    }
    let heart = if card.liked { '♥' } else { '♡' };
    title.push_str(&format!("  {heart} {}", card.likes));
    if card.can_delete {
        title.push_str("  [delete]");
    }
    out.push(title);

    for line in card.text.lines().filter(|l| !l.trim().is_empty()) {
        out.push(format!("{INDENT}{line}"));
    }
}
