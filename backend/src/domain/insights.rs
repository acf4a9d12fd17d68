//! Feature encoding and the heuristic rating predictor.
//!
//! The predictor is deliberately simple: it starts from the mean rating of the
//! requested category and nudges it by price and stock signals.

use super::stats::{PriceSummary, mean_rating};
use super::{Book, BookId};

/// Rating assumed when no records are loaded.
pub const NEUTRAL_RATING: f64 = 3.0;

const PRICE_NUDGE: f64 = 0.25;
const STOCK_NUDGE: f64 = 0.25;

/// Numeric encoding of one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookFeatures {
    /// Record the features were taken from.
    pub book_id: BookId,
    /// Price in pounds.
    pub price: f64,
    /// Star rating, `1` to `5`.
    pub rating: u8,
    /// Position of the category in the sorted category list.
    pub category_index: usize,
    /// Whether the availability text reports stock.
    pub in_stock: bool,
}

/// Feature vector paired with its target rating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingExample {
    /// Encoded inputs.
    pub features: BookFeatures,
    /// Observed star rating.
    pub target: u8,
}

/// Inputs accepted by the predictor.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionInput {
    /// Price in pounds.
    pub price: f64,
    /// Category name, matched exactly.
    pub category: String,
    /// Whether the book is in stock.
    pub in_stock: bool,
}

/// Predictor output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingPrediction {
    /// Predicted rating in `1.0..=5.0`, rounded to two decimals.
    pub predicted_rating: f64,
    /// Whether the category exists in the loaded data.
    pub category_known: bool,
}

/// Encode every record against the sorted category list `categories`.
#[must_use]
pub fn encode_features(books: &[Book], categories: &[String]) -> Vec<BookFeatures> {
    books
        .iter()
        .map(|book| BookFeatures {
            book_id: book.id,
            price: book.price,
            rating: book.rating.get(),
            category_index: categories
                .binary_search(&book.category)
                .unwrap_or(categories.len()),
            in_stock: book.in_stock(),
        })
        .collect()
}

/// Pair each encoded record with its rating.
#[must_use]
pub fn training_examples(features: Vec<BookFeatures>) -> Vec<TrainingExample> {
    features
        .into_iter()
        .map(|features| TrainingExample {
            target: features.rating,
            features,
        })
        .collect()
}

/// Predict a rating for `input` from the loaded `books`.
#[must_use]
pub fn predict_rating(books: &[Book], input: &PredictionInput) -> RatingPrediction {
    let wanted = input.category.trim().to_lowercase();
    let in_category: Vec<&Book> = books
        .iter()
        .filter(|book| book.category.to_lowercase() == wanted)
        .collect();
    let category_known = !in_category.is_empty();

    let (baseline, reference_price) = if category_known {
        (
            mean_rating(in_category.iter().copied()),
            PriceSummary::of(in_category.iter().copied()).map(|p| p.mean),
        )
    } else {
        (mean_rating(books), None)
    };

    let mut score = baseline.unwrap_or(NEUTRAL_RATING);
    if let Some(reference) = reference_price {
        if input.price > reference {
            score += PRICE_NUDGE;
        } else if input.price < reference {
            score -= PRICE_NUDGE;
        }
    }
    if input.in_stock {
        score += STOCK_NUDGE;
    }

    RatingPrediction {
        predicted_rating: round_to_cents(score.clamp(1.0, 5.0)),
        category_known,
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
