//! Quarterly performance reviews: employee records, review intake, weighted
//! scoring, HR sign-off and dashboard roll-ups.
//!
//! Scoring lives in [`scoring`] and is usable on its own; everything else in
//! this module is the review-management layer built around it.

pub mod dashboard;
pub mod domain;
pub(crate) mod intake;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use dashboard::{AwaitingReviewEntry, DashboardSummary, DepartmentCountEntry, StatusCountEntry};
pub use domain::{
    Employee, EmployeeDraft, EmployeeId, EmployeeStatus, HrDecision, PerformanceReview, RatedField,
    ReviewAmendment, ReviewFilter, ReviewForm, ReviewId, ReviewStatus, ReviewSubmission,
};
pub use intake::{IntakeGuard, IntakeViolation};
pub use repository::{
    Activity, ActivityError, ActivityFeed, ActivityKind, EmployeeRepository, RepositoryError,
    ReviewRepository, ReviewStatusView, ReviewSummaryView,
};
pub use router::{review_router, ScoringPreviewRequest};
pub use scoring::{
    aggregate_composite, compute_total, rate, score_form, to_percentage, CategoryInput,
    RatingBand, ScoreItem, Scorecard,
};
pub use service::{PerformanceReviewService, ReviewServiceError, DEFAULT_RECENT_LIMIT};
