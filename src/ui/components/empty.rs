//! Empty state component.

use super::INDENT;

/// Renders a placeholder with an explanatory subtitle.
pub fn render_empty_state(message: &str, subtitle: &str, out: &mut Vec<String>) {
    out.push(format!("{INDENT}{message}"));
    if !subtitle.is_empty() {
        out.push(format!("{INDENT}{subtitle}"));
    }
}
