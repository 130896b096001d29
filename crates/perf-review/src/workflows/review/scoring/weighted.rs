use serde::{Deserialize, Serialize};

/// Highest attainable score on the rating scale.
pub const MAX_SCORE: f64 = 5.0;

/// Resolved category score with its weight in percentage points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreItem {
    pub category: String,
    #[serde(default)]
    pub score: Option<f64>,
    pub weight: f64,
    #[serde(default)]
    pub comments: String,
}

impl ScoreItem {
    pub fn new(
        category: impl Into<String>,
        score: Option<f64>,
        weight: f64,
        comments: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            score,
            weight,
            comments: comments.into(),
        }
    }

    /// Score with missing or NaN values treated as zero.
    pub fn effective_score(&self) -> f64 {
        match self.score {
            Some(value) if !value.is_nan() => value,
            _ => 0.0,
        }
    }

    pub fn contribution(&self) -> f64 {
        self.weighted_points() / 100.0
    }

    fn weighted_points(&self) -> f64 {
        self.effective_score() * self.weight
    }
}

/// Unnormalised weighted sum of `items`.
///
/// Weights are taken as given; a set that does not add up to 100 yields a
/// proportionally smaller or larger total. Points are summed before the single
/// division so whole-number ratings land exactly on band boundaries. Dividing
/// each item by 100 before summing can differ from this by about one ulp, which
/// only matters for totals sitting on a band bound (uniform 3s give 3.0 here,
/// not 2.9999999999999996).
pub fn compute_total(items: &[ScoreItem]) -> f64 {
    items.iter().map(ScoreItem::weighted_points).sum::<f64>() / 100.0
}

/// Total expressed as a percentage of [`MAX_SCORE`], rounded to two decimals.
pub fn to_percentage(total_score: Option<f64>) -> Option<f64> {
    total_score.map(|total| round_to_hundredths(total / MAX_SCORE * 100.0))
}

pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Two-decimal rendering, or `--` when the value is absent.
pub fn format_score(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.2}"),
        None => "--".to_string(),
    }
}
