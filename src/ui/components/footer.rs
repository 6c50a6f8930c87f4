//! Footer component: command hints.

use crate::ui::viewmodel::PageView;

/// Renders the commands available on the page.
pub fn render_footer(page: &PageView, out: &mut Vec<String>) {
    let hints = match page {
        PageView::Home => "catalog | search <words> | fav | register | help | quit",
        PageView::Catalog(_) => "open <n> | more | search <words> | fav | quit",
        PageView::Book(_) => {
            "like | more | review <1-5> [text] | like-review <n> | edit <n> <1-5|-> [text] | \
             delete-review <n> | status <reading|read|drop|none> | catalog"
        }
        PageView::Favourites(_) => "fav <liked|reading|read|drop> | open <n> | catalog | quit",
    };
    out.push(hints.to_string());
}
