//! User-visible failure messages.
//!
//! View-models never show a raw error. Every failure is translated from its
//! status code to one of the static strings below.

pub const NO_RIGHTS: &str = "У вас нет прав.";
pub const NOT_FOUND: &str = "Не найдено.";
pub const GENERIC: &str = "Упс, какая-то ошибка.";

pub const REVIEWS_BAD_PAGE: &str = "Неверное значение номера или размера страницы отзывов.";
pub const SEARCH_BAD_PARAMS: &str = "Неверные параметры поиска.";

pub const REVIEW_BAD_INPUT: &str = "Неверное значение рейтинга или текста.";
pub const REVIEW_NO_HANDLER: &str = "Не найден обработчик.";
pub const REVIEW_DUPLICATE: &str = "Вы уже добавляли отзыв на эту книгу.";
pub const RATING_REQUIRED: &str = "Выберите значение рейтинга.";

pub const LOGIN_REQUIRED: &str = "Войдите в аккаунт.";
pub const REGISTER_BAD_INPUT: &str = "Неверные данные регистрации.";
pub const REGISTER_TAKEN: &str = "Пользователь с таким именем или почтой уже существует.";

/// Shared tail of every mapping: 403, 404, anything else.
const fn common(code: u16) -> &'static str {
    match code {
        403 => NO_RIGHTS,
        404 => NOT_FOUND,
        _ => GENERIC,
    }
}

/// Failure loading a page of reviews.
#[must_use]
pub const fn reviews_load(code: u16) -> &'static str {
    match code {
        400 => REVIEWS_BAD_PAGE,
        _ => common(code),
    }
}

/// Failure loading a page of the catalogue (first page or more).
#[must_use]
pub const fn catalog_load(code: u16) -> &'static str {
    match code {
        400 => SEARCH_BAD_PARAMS,
        _ => common(code),
    }
}

/// Failure posting or editing a review.
#[must_use]
pub const fn review_submit(code: u16) -> &'static str {
    match code {
        400 => REVIEW_BAD_INPUT,
        404 => REVIEW_NO_HANDLER,
        409 => REVIEW_DUPLICATE,
        _ => common(code),
    }
}

/// Failure of a like, delete or status change.
#[must_use]
pub const fn interaction(code: u16) -> &'static str {
    common(code)
}

/// Failure registering an account.
#[must_use]
pub const fn register(code: u16) -> &'static str {
    match code {
        400 => REGISTER_BAD_INPUT,
        409 => REGISTER_TAKEN,
        _ => common(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_submit_has_five_outcomes() {
        assert_eq!(review_submit(400), REVIEW_BAD_INPUT);
        assert_eq!(review_submit(403), NO_RIGHTS);
        assert_eq!(review_submit(404), REVIEW_NO_HANDLER);
        assert_eq!(review_submit(409), REVIEW_DUPLICATE);
        assert_eq!(review_submit(500), GENERIC);
        assert_eq!(review_submit(418), GENERIC);
    }

    #[test]
    fn load_mappings() {
        assert_eq!(reviews_load(400), REVIEWS_BAD_PAGE);
        assert_eq!(catalog_load(400), SEARCH_BAD_PARAMS);
        assert_eq!(catalog_load(404), "Не найдено.");
        assert_eq!(interaction(409), GENERIC);
    }
}
