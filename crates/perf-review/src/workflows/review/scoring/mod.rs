//! Weighted performance scoring.
//!
//! Raw category ratings flow through composite aggregation, weighting and
//! summation into a total on the 0-5 scale, which is then expressed as a
//! percentage and mapped onto a rating band. Every stage is a pure function
//! and can be called on its own.

mod composite;
mod rating;
mod rubric;
mod weighted;

pub use composite::{aggregate_composite, join_comments, CompositeScoreItem, SubScore};
pub use rating::{rate, RatingBand};
pub use rubric::{
    standard_categories, CategoryInput, JOB_KNOWLEDGE_WEIGHT, QUALITY_OF_WORK_WEIGHT,
    STANDARD_WEIGHT,
};
pub use weighted::{
    compute_total, format_score, round_to_hundredths, to_percentage, ScoreItem, MAX_SCORE,
};

use serde::{Deserialize, Serialize};

use super::domain::ReviewForm;

/// Category row as rendered on a review summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub score: f64,
    pub weight: f64,
    pub weighted_score: f64,
    pub comments: String,
}

impl From<&ScoreItem> for CategoryScore {
    fn from(item: &ScoreItem) -> Self {
        Self {
            category: item.category.clone(),
            score: item.effective_score(),
            weight: item.weight,
            weighted_score: round_to_hundredths(item.contribution()),
            comments: item.comments.clone(),
        }
    }
}

/// Aggregated result of scoring one review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub scores: Vec<CategoryScore>,
    pub total_score: f64,
    pub percentage: f64,
    pub rating: String,
}

impl Scorecard {
    pub fn from_items(items: &[ScoreItem]) -> Self {
        let total_score = compute_total(items);
        Self {
            scores: items.iter().map(CategoryScore::from).collect(),
            total_score,
            percentage: to_percentage(Some(total_score)).unwrap_or_default(),
            rating: rate(total_score).to_string(),
        }
    }

    pub fn from_categories(categories: &[CategoryInput]) -> Self {
        let items: Vec<ScoreItem> = categories.iter().map(CategoryInput::resolve).collect();
        Self::from_items(&items)
    }

    pub fn band(&self) -> Option<RatingBand> {
        RatingBand::classify(self.total_score)
    }
}

/// Score a review form against the standard rubric.
pub fn score_form(form: &ReviewForm) -> Scorecard {
    Scorecard::from_categories(&standard_categories(form))
}
