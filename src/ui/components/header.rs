//! Header component: application title and the current user.

/// Renders the title line.
///
/// ```text
/// libris · maksim
/// libris · гость
/// ```
pub fn render_header(title: &str, user_name: Option<&str>, out: &mut Vec<String>) {
    out.push(format!("libris · {}", user_name.unwrap_or("гость")));
    out.push(title.to_string());
}
