use serde::{Deserialize, Serialize};

/// One named sub-rating feeding a composite category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    pub name: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub comments: Option<String>,
}

impl SubScore {
    pub fn new(name: impl Into<String>, score: Option<f64>, comments: Option<String>) -> Self {
        Self {
            name: name.into(),
            score,
            comments,
        }
    }
}

/// A category whose score is the mean of its sub-ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeScoreItem {
    pub category: String,
    pub weight: f64,
    pub parts: Vec<SubScore>,
}

impl CompositeScoreItem {
    pub fn score(&self) -> f64 {
        let scores: Vec<Option<f64>> = self.parts.iter().map(|part| part.score).collect();
        aggregate_composite(&scores)
    }

    pub fn comments(&self) -> String {
        join_comments(self.parts.iter().map(|part| part.comments.as_deref()))
    }
}

/// Mean of `sub_scores`, or `0.0` unless every sub-score is present and non-zero.
///
/// A single missing rating zeroes the whole category; partial averages are never
/// produced.
pub fn aggregate_composite(sub_scores: &[Option<f64>]) -> f64 {
    if sub_scores.is_empty() {
        return 0.0;
    }

    let mut sum = 0.0;
    for score in sub_scores {
        match score {
            Some(value) if is_rated(*value) => sum += value,
            _ => return 0.0,
        }
    }

    sum / sub_scores.len() as f64
}

/// Newline-joined non-empty comments, in declaration order.
pub fn join_comments<'a, I>(comments: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    comments
        .into_iter()
        .flatten()
        .filter(|comment| !comment.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_rated(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}
