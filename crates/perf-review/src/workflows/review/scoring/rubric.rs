use serde::{Deserialize, Serialize};

use super::super::domain::{RatedField, ReviewForm};
use super::composite::{CompositeScoreItem, SubScore};
use super::weighted::ScoreItem;

/// Rubric entry before aggregation: either a directly rated category or one
/// averaged from named sub-ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CategoryInput {
    Simple(ScoreItem),
    Composite(CompositeScoreItem),
}

impl CategoryInput {
    pub fn category(&self) -> &str {
        match self {
            CategoryInput::Simple(item) => &item.category,
            CategoryInput::Composite(item) => &item.category,
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            CategoryInput::Simple(item) => item.weight,
            CategoryInput::Composite(item) => item.weight,
        }
    }

    pub fn resolve(&self) -> ScoreItem {
        match self {
            CategoryInput::Simple(item) => item.clone(),
            CategoryInput::Composite(item) => ScoreItem {
                category: item.category.clone(),
                score: Some(item.score()),
                weight: item.weight,
                comments: item.comments(),
            },
        }
    }
}

pub const JOB_KNOWLEDGE_WEIGHT: f64 = 15.0;
pub const QUALITY_OF_WORK_WEIGHT: f64 = 15.0;
pub const STANDARD_WEIGHT: f64 = 10.0;

/// The nine-category quarterly rubric, in display order.
pub fn standard_categories(form: &ReviewForm) -> Vec<CategoryInput> {
    vec![
        simple("Job Knowledge", &form.job_knowledge, JOB_KNOWLEDGE_WEIGHT),
        simple("Quality of Work", &form.quality_of_work, QUALITY_OF_WORK_WEIGHT),
        simple("Promptness of Work", &form.promptness_of_work, STANDARD_WEIGHT),
        simple("Quality Standards", &form.quality_meets_standards, STANDARD_WEIGHT),
        simple("Timeliness", &form.quality_timeliness, STANDARD_WEIGHT),
        simple("Work Output", &form.quality_work_output_volume, STANDARD_WEIGHT),
        simple("Consistency", &form.quality_consistency, STANDARD_WEIGHT),
        simple("Job Targets", &form.quality_job_targets, STANDARD_WEIGHT),
        CategoryInput::Composite(CompositeScoreItem {
            category: "Adaptability".to_string(),
            weight: STANDARD_WEIGHT,
            parts: vec![
                sub_score("openness", &form.adaptability_openness),
                sub_score("flexibility", &form.adaptability_flexibility),
                sub_score("resilience", &form.adaptability_resilience),
            ],
        }),
    ]
}

fn simple(category: &str, field: &RatedField, weight: f64) -> CategoryInput {
    CategoryInput::Simple(ScoreItem::new(
        category,
        field.score,
        weight,
        field.comments.clone().unwrap_or_default(),
    ))
}

fn sub_score(name: &str, field: &RatedField) -> SubScore {
    SubScore::new(name, field.score, field.comments.clone())
}
