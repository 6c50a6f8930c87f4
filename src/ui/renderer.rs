//! Top-level rendering coordinator.
//!
//! Turns a [`ViewModel`] into plain text lines. Layout:
//!
//! ```text
//! [Header]
//! [Border]
//! [Notice / banners]
//! [Page body]
//! [Border]
//! [Footer]
//! ```

use crate::app::AppState;
use crate::ui::components::{
    render_banner, render_book_card, render_border, render_empty_state, render_footer,
    render_header, render_review_card,
};
use crate::ui::viewmodel::{
    BookCardView, BookDetailView, CatalogView, FavouritesView, ListBody, PageView, ViewModel,
};

/// Renders the current screen of `state`.
#[must_use]
pub fn render(state: &AppState) -> Vec<String> {
    render_viewmodel(&state.compute_viewmodel())
}

/// Renders a pre-computed view model.
#[must_use]
pub fn render_viewmodel(vm: &ViewModel) -> Vec<String> {
    let mut out = Vec::new();

    let title = match &vm.page {
        PageView::Home => "Главная".to_string(),
        PageView::Catalog(_) => "Каталог".to_string(),
        PageView::Book(book) => book.name.clone(),
        PageView::Favourites(_) => "Избранное".to_string(),
    };
    render_header(&title, vm.user_name.as_deref(), &mut out);
    render_border(&mut out);
    render_banner(vm.notice.as_deref(), &mut out);

    match &vm.page {
        PageView::Home => render_empty_state("Откройте каталог", "catalog | search <words>", &mut out),
        PageView::Catalog(catalog) => render_catalog(catalog, &mut out),
        PageView::Book(book) => render_book(book, &mut out),
        PageView::Favourites(favourites) => render_favourites(favourites, &mut out),
    }

    render_border(&mut out);
    render_footer(&vm.page, &mut out);
    out
}

fn render_book_list(books: &[BookCardView], out: &mut Vec<String>) {
    if books.is_empty() {
        render_empty_state("Книг нет", "", out);
        return;
    }
    for (index, card) in books.iter().enumerate() {
        render_book_card(index + 1, card, out);
    }
}

fn render_catalog(catalog: &CatalogView, out: &mut Vec<String>) {
    if let Some(filters) = catalog.filters.as_deref() {
        out.push(filters.to_string());
    }
    match &catalog.body {
        ListBody::Loading => out.push("Loading...".to_string()),
        ListBody::Failed(message) => out.push(format!("Error: {message}")),
        ListBody::Items(books) => {
            render_banner(catalog.banner.as_deref(), out);
            render_book_list(books, out);
            out.push("Еще...".to_string());
        }
    }
}

fn render_book(book: &BookDetailView, out: &mut Vec<String>) {
    if let ListBody::Failed(message) = &book.reviews {
        out.push(format!("Error: {message}"));
        return;
    }
    if let Some(author) = book.author_name.as_deref() {
        out.push(author.to_string());
    }
    out.push(format!("{} {}", book.stars.glyphs(), book.rating_label));
    if let Some(count) = book.ratings_count {
        out.push(format!("Оценок: {count}"));
    }
    if let Some(genres) = book.genres.as_deref() {
        out.push(genres.to_string());
    }
    let heart = if book.liked { '♥' } else { '♡' };
    let status = book.status.map_or_else(String::new, |s| format!("  [{s}]"));
    out.push(format!("{heart} {}{status}", book.likes));
    render_banner(book.banner.as_deref(), out);

    render_border(out);
    render_banner(book.review_error.as_deref(), out);
    match &book.reviews {
        ListBody::Loading | ListBody::Failed(_) => out.push("Loading...".to_string()),
        ListBody::Items(reviews) if reviews.is_empty() => {
            render_empty_state("Отзывов пока нет", "review <1-5> [text]", out);
        }
        ListBody::Items(reviews) => {
            for (index, card) in reviews.iter().enumerate() {
                render_review_card(index + 1, card, out);
            }
            out.push("Еще...".to_string());
        }
    }
}

fn render_favourites(favourites: &FavouritesView, out: &mut Vec<String>) {
    let buttons: Vec<String> = favourites
        .buttons
        .iter()
        .map(|b| {
            if b.active {
                format!("[{}]", b.label)
            } else {
                b.label.to_string()
            }
        })
        .collect();
    out.push(buttons.join("  "));
    render_banner(favourites.notice.as_deref(), out);

    match favourites.books.as_deref() {
        Some(books) => render_book_list(books, out),
        None => render_empty_state("Список недоступен", "", out),
    }
}
