//! Small state-machine types shared by the pages.
//!
//! # State Machine
//!
//! Every list page moves through [`LoadState`]:
//!
//! ```text
//! Loading ──ok──► Ready
//!    │
//!    └──err──► Failed(message)
//! ```
//!
//! Once `Ready`, a page never returns to `Loading`; later failures go to its
//! banner instead.

use std::fmt;
use std::str::FromStr;

use crate::domain::ReadingStatus;

/// Load state of a page's first fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// The first page is in flight.
    Loading,
    /// The first page arrived.
    Ready,
    /// The first page failed; the message replaces the page body.
    Failed(String),
}

impl LoadState {
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Projection shown on the favourites page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavouritesFilter {
    Liked,
    Reading,
    #[default]
    Read,
    Drop,
}

impl FavouritesFilter {
    /// All projections in button order.
    pub const ALL: [Self; 4] = [Self::Liked, Self::Reading, Self::Read, Self::Drop];

    /// Button caption.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Liked => "ЛАЙКАЛ",
            Self::Reading => "ЧИТАЮ",
            Self::Read => "ПРОЧИТАНО",
            Self::Drop => "БРОСИЛ ЧИТАТЬ",
        }
    }

    /// The reading status this projection filters by; `None` for likes.
    #[must_use]
    pub const fn status(self) -> Option<ReadingStatus> {
        match self {
            Self::Liked => None,
            Self::Reading => Some(ReadingStatus::Reading),
            Self::Read => Some(ReadingStatus::Read),
            Self::Drop => Some(ReadingStatus::Drop),
        }
    }
}

impl fmt::Display for FavouritesFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FavouritesFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "liked" | "like" | "likes" => Ok(Self::Liked),
            other => other
                .parse::<ReadingStatus>()
                .map(|status| match status {
                    ReadingStatus::Reading => Self::Reading,
                    ReadingStatus::Read => Self::Read,
                    ReadingStatus::Drop => Self::Drop,
                })
                .map_err(|_| format!("unknown favourites filter: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_parse_from_commands() {
        assert_eq!("liked".parse(), Ok(FavouritesFilter::Liked));
        assert_eq!("READING".parse(), Ok(FavouritesFilter::Reading));
        assert_eq!("drop".parse(), Ok(FavouritesFilter::Drop));
        assert!("shelf".parse::<FavouritesFilter>().is_err());
    }

    #[test]
    fn default_projection_is_read() {
        assert_eq!(FavouritesFilter::default().status(), Some(ReadingStatus::Read));
    }
}
