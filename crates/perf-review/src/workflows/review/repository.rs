use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    Employee, EmployeeId, PerformanceReview, ReviewFilter, ReviewId, ReviewStatus,
};
use super::scoring::{format_score, rate, score_form, to_percentage, CategoryScore};

/// Storage abstraction for reviews so the service can be exercised in isolation.
pub trait ReviewRepository: Send + Sync {
    fn insert(&self, review: PerformanceReview) -> Result<PerformanceReview, RepositoryError>;
    fn update(&self, review: PerformanceReview) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ReviewId) -> Result<Option<PerformanceReview>, RepositoryError>;
    fn list(&self, filter: &ReviewFilter) -> Result<Vec<PerformanceReview>, RepositoryError>;
    fn delete(&self, id: &ReviewId) -> Result<(), RepositoryError>;
}

/// Storage abstraction for employee records.
pub trait EmployeeRepository: Send + Sync {
    fn insert(&self, employee: Employee) -> Result<Employee, RepositoryError>;
    fn update(&self, employee: Employee) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &EmployeeId) -> Result<Option<Employee>, RepositoryError>;
    fn list(&self) -> Result<Vec<Employee>, RepositoryError>;
    fn delete(&self, id: &EmployeeId) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound activity hook backing the "recent activity" feeds.
pub trait ActivityFeed: Send + Sync {
    fn publish(&self, activity: Activity) -> Result<(), ActivityError>;
    fn recent(&self, limit: usize) -> Result<Vec<Activity>, ActivityError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    EmployeeRegistered,
    ReviewSubmitted,
    ReviewAmended,
    ReviewCompleted,
    ReviewRejected,
    ReviewDeleted,
}

/// Audit entry describing something that happened to a review or employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub subject: String,
    pub employee_id: EmployeeId,
    pub detail: String,
    pub occurred_at: DateTime<Utc>,
}

/// Activity dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    #[error("activity transport unavailable: {0}")]
    Transport(String),
}

/// Compact listing row for a review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewStatusView {
    pub review_id: ReviewId,
    pub employee_id: EmployeeId,
    pub department: String,
    pub position: String,
    pub status: &'static str,
    pub total_score: f64,
    pub final_rating: &'static str,
    pub submitted_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl From<&PerformanceReview> for ReviewStatusView {
    fn from(review: &PerformanceReview) -> Self {
        let total_score = score_form(&review.form).total_score;
        Self {
            review_id: review.id.clone(),
            employee_id: review.employee_id.clone(),
            department: review.department.clone(),
            position: review.position.clone(),
            status: review.status.label(),
            total_score,
            final_rating: rate(total_score),
            submitted_at: review.submitted_at,
            updated_at: review.updated_at,
        }
    }
}

/// Full evaluation summary as presented to HR, evaluators and employees.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummaryView {
    pub review_id: ReviewId,
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub department: String,
    pub position: String,
    pub status: ReviewStatus,
    pub last_modified: DateTime<Utc>,
    pub scores: Vec<CategoryScore>,
    pub total_score: f64,
    pub display_score: String,
    pub final_percentage: Option<f64>,
    pub final_rating: String,
    pub areas_for_improvement: Option<String>,
    pub comments: String,
    pub hr_comments: Option<String>,
}

pub(crate) const UNKNOWN_EMPLOYEE: &str = "Unknown Employee";
pub(crate) const NO_COMMENTS: &str = "No additional comments provided.";

impl ReviewSummaryView {
    /// Derive the summary from the stored answers; rating and percentage are
    /// never read back from storage except for an explicit percentage override.
    pub fn build(review: &PerformanceReview, employee: Option<&Employee>) -> Self {
        let scorecard = score_form(&review.form);
        let final_percentage = review
            .final_percentage
            .filter(|value| *value != 0.0 && !value.is_nan())
            .or_else(|| to_percentage(Some(scorecard.total_score)));

        Self {
            review_id: review.id.clone(),
            employee_id: review.employee_id.clone(),
            employee_name: employee
                .map(|employee| employee.name.clone())
                .unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string()),
            department: review.department.clone(),
            position: review.position.clone(),
            status: review.status,
            last_modified: review.last_modified(),
            display_score: format_score(Some(scorecard.total_score)),
            total_score: scorecard.total_score,
            final_percentage,
            final_rating: scorecard.rating,
            scores: scorecard.scores,
            areas_for_improvement: review.areas_for_improvement.clone(),
            comments: review
                .additional_comments
                .clone()
                .filter(|comments| !comments.trim().is_empty())
                .unwrap_or_else(|| NO_COMMENTS.to_string()),
            hr_comments: review.hr_comments.clone(),
        }
    }
}
