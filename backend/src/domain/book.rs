//! Catalogue records loaded from the scraped snapshot.

use std::fmt;

/// Positional identifier of a record: its 1-based row number in the source.
///
/// Identifiers are stable within one load only. A skipped row still consumes
/// its number, so sequences may have gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookId(u32);

impl BookId {
    /// Wrap a raw row number.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Raw row number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Star rating between one and five inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

/// Raised when a rating falls outside `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rating must be between 1 and 5, got {0}")]
pub struct RatingOutOfRange(pub i64);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Raw star count.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|stars| (Self::MIN..=Self::MAX).contains(stars))
            .map(Self)
            .ok_or(RatingOutOfRange(value))
    }
}

/// One catalogue record.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    /// Position in the source file, starting at 1.
    pub id: BookId,
    /// Title as scraped.
    pub title: String,
    /// Non-negative list price.
    pub price: f64,
    /// Star rating.
    pub rating: Rating,
    /// Free-text availability as scraped, e.g. "In stock".
    pub availability: String,
    /// Category name as scraped.
    pub category: String,
    /// Cover image URL.
    pub image_url: String,
}

impl Book {
    /// Whether the availability text reports stock on hand.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        availability_in_stock(&self.availability)
    }
}

/// Interpret scraped availability text.
///
/// "In stock" and "In stock (22 available)" count; "Out of stock" does not.
#[must_use]
pub fn availability_in_stock(availability: &str) -> bool {
    let lowered = availability.trim().to_lowercase();
    lowered.contains("in stock") && !lowered.contains("out of stock")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, true)]
    #[case(5, true)]
    #[case(0, false)]
    #[case(6, false)]
    #[case(-3, false)]
    #[case(300, false)]
    fn rating_accepts_one_to_five(#[case] raw: i64, #[case] ok: bool) {
        assert_eq!(Rating::try_from(raw).is_ok(), ok);
    }

    #[rstest]
    #[case("In stock", true)]
    #[case("In stock (22 available)", true)]
    #[case("  in STOCK ", true)]
    #[case("Out of stock", false)]
    #[case("", false)]
    fn availability_text_maps_to_stock_flag(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(availability_in_stock(text), expected);
    }
}
