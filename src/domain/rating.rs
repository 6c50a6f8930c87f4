//! Five-star rating projection shared by books and reviews.

/// Maximum number of stars a rating is displayed with.
pub const MAX_STARS: u8 = 5;

/// A rating rounded to whole stars.
///
/// `filled + empty` is always [`MAX_STARS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    pub filled: u8,
    pub empty: u8,
}

impl StarRating {
    /// Rounds a raw rating to `clamp(round(rating), 0, 5)` stars.
    ///
    /// Returns `None` for absent or non-finite ratings, which are not displayed.
    ///
    /// # Examples
    ///
    /// ```
    /// use libris::domain::StarRating;
    ///
    /// let stars = StarRating::from_rating(Some(3.6)).unwrap();
    /// assert_eq!((stars.filled, stars.empty), (4, 1));
    /// assert!(StarRating::from_rating(None).is_none());
    /// ```
    #[must_use]
    pub fn from_rating(rating: Option<f64>) -> Option<Self> {
        let rating = rating.filter(|r| r.is_finite())?;
        Some(Self::from_filled(rating.round().clamp(0.0, f64::from(MAX_STARS)) as u8))
    }

    /// Builds a rating with `filled` stars, saturating at [`MAX_STARS`].
    #[must_use]
    pub fn from_filled(filled: u8) -> Self {
        let filled = filled.min(MAX_STARS);
        Self {
            filled,
            empty: MAX_STARS - filled,
        }
    }

    /// Renders the stars as `★` and `☆` glyphs.
    #[must_use]
    pub fn glyphs(&self) -> String {
        format!(
            "{}{}",
            "★".repeat(usize::from(self.filled)),
            "☆".repeat(usize::from(self.empty))
        )
    }
}
