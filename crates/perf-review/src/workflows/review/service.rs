use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::dashboard::DashboardSummary;
use super::domain::{
    Employee, EmployeeDraft, EmployeeId, HrDecision, PerformanceReview, ReviewAmendment,
    ReviewFilter, ReviewId, ReviewStatus, ReviewSubmission,
};
use super::intake::{IntakeGuard, IntakeViolation};
use super::repository::{
    Activity, ActivityError, ActivityFeed, ActivityKind, EmployeeRepository, RepositoryError,
    ReviewRepository, ReviewSummaryView,
};
use super::scoring::{format_score, score_form};

/// Number of reviews shown in "recent" listings when no limit is configured.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

static EMPLOYEE_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static REVIEW_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_employee_id() -> EmployeeId {
    let id = EMPLOYEE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EmployeeId(format!("emp-{id:06}"))
}

fn next_review_id() -> ReviewId {
    let id = REVIEW_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ReviewId(format!("rev-{id:06}"))
}

/// Service composing intake validation, storage, scoring and the activity feed.
pub struct PerformanceReviewService<R, E, A> {
    guard: IntakeGuard,
    reviews: Arc<R>,
    employees: Arc<E>,
    activity: Arc<A>,
    recent_limit: usize,
}

impl<R, E, A> PerformanceReviewService<R, E, A>
where
    R: ReviewRepository + 'static,
    E: EmployeeRepository + 'static,
    A: ActivityFeed + 'static,
{
    pub fn new(reviews: Arc<R>, employees: Arc<E>, activity: Arc<A>) -> Self {
        Self {
            guard: IntakeGuard,
            reviews,
            employees,
            activity,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit.max(1);
        self
    }

    pub fn recent_limit(&self) -> usize {
        self.recent_limit
    }

    /// Register a new employee record.
    pub fn register_employee(&self, draft: EmployeeDraft) -> Result<Employee, ReviewServiceError> {
        self.guard.check_employee(&draft)?;
        let employee = Employee::from_draft(next_employee_id(), draft, Utc::now());
        let stored = self.employees.insert(employee)?;

        info!(employee_id = %stored.id, department = %stored.department, "employee registered");
        self.publish(
            ActivityKind::EmployeeRegistered,
            &stored.id,
            stored.id.0.clone(),
            format!("{} joined {}", stored.name, stored.department),
        )?;

        Ok(stored)
    }

    /// Replace an employee's editable fields.
    pub fn update_employee(
        &self,
        id: &EmployeeId,
        draft: EmployeeDraft,
    ) -> Result<Employee, ReviewServiceError> {
        self.guard.check_employee(&draft)?;
        let mut employee = self.employee(id)?;
        employee.apply(draft, Utc::now());
        self.employees.update(employee.clone())?;
        Ok(employee)
    }

    pub fn employee(&self, id: &EmployeeId) -> Result<Employee, ReviewServiceError> {
        self.employees
            .fetch(id)?
            .ok_or_else(|| ReviewServiceError::EmployeeNotFound(id.clone()))
    }

    pub fn employees(&self) -> Result<Vec<Employee>, ReviewServiceError> {
        let mut employees = self.employees.list()?;
        employees.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(employees)
    }

    pub fn remove_employee(&self, id: &EmployeeId) -> Result<(), ReviewServiceError> {
        match self.employees.delete(id) {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => Err(ReviewServiceError::EmployeeNotFound(id.clone())),
            Err(other) => Err(other.into()),
        }
    }

    /// Submit a completed review form; the review waits for HR sign-off.
    pub fn submit(
        &self,
        submission: ReviewSubmission,
    ) -> Result<PerformanceReview, ReviewServiceError> {
        self.guard.check_submission(&submission)?;
        let employee = self.employee(&submission.employee_id)?;

        let review = PerformanceReview::from_submission(next_review_id(), submission, Utc::now());
        let stored = self.reviews.insert(review)?;

        let scorecard = score_form(&stored.form);
        info!(
            review_id = %stored.id,
            employee_id = %stored.employee_id,
            total_score = scorecard.total_score,
            rating = %scorecard.rating,
            "performance review submitted"
        );
        self.publish(
            ActivityKind::ReviewSubmitted,
            &stored.employee_id,
            stored.id.0.clone(),
            format!(
                "review for {} submitted with score {}",
                employee.name,
                format_score(Some(scorecard.total_score))
            ),
        )?;

        Ok(stored)
    }

    /// Apply a partial update to a stored review.
    pub fn amend(
        &self,
        id: &ReviewId,
        amendment: ReviewAmendment,
    ) -> Result<PerformanceReview, ReviewServiceError> {
        self.guard.check_amendment(&amendment)?;
        let mut review = self.review(id)?;
        review.amend(amendment, Utc::now());
        self.reviews.update(review.clone())?;

        self.publish(
            ActivityKind::ReviewAmended,
            &review.employee_id,
            review.id.0.clone(),
            format!("review updated, status {}", review.status.label()),
        )?;

        Ok(review)
    }

    /// Record HR's final decision on a review.
    pub fn decide(
        &self,
        id: &ReviewId,
        decision: HrDecision,
    ) -> Result<PerformanceReview, ReviewServiceError> {
        self.guard.check_decision(&decision)?;
        let mut review = self.review(id)?;
        review.record_decision(decision, Utc::now());
        self.reviews.update(review.clone())?;

        let kind = if review.status == ReviewStatus::Completed {
            ActivityKind::ReviewCompleted
        } else {
            ActivityKind::ReviewRejected
        };
        info!(review_id = %review.id, status = review.status.label(), "hr decision recorded");
        self.publish(
            kind,
            &review.employee_id,
            review.id.0.clone(),
            format!("review marked {}", review.status.label()),
        )?;

        Ok(review)
    }

    pub fn review(&self, id: &ReviewId) -> Result<PerformanceReview, ReviewServiceError> {
        self.reviews
            .fetch(id)?
            .ok_or_else(|| ReviewServiceError::ReviewNotFound(id.clone()))
    }

    pub fn reviews(
        &self,
        filter: &ReviewFilter,
    ) -> Result<Vec<PerformanceReview>, ReviewServiceError> {
        let mut reviews = self.reviews.list(filter)?;
        reviews.retain(|review| review.matches(filter));
        reviews.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(reviews)
    }

    /// Most recently submitted reviews, newest first.
    pub fn recent(&self, limit: Option<usize>) -> Result<Vec<PerformanceReview>, ReviewServiceError> {
        let mut reviews = self.reviews.list(&ReviewFilter::default())?;
        reviews.sort_by(|a, b| b.activity_at().cmp(&a.activity_at()));
        reviews.truncate(limit.unwrap_or(self.recent_limit));
        Ok(reviews)
    }

    /// Scored summary of a review, resolving the employee's display name.
    pub fn summary(&self, id: &ReviewId) -> Result<ReviewSummaryView, ReviewServiceError> {
        let review = self.review(id)?;
        let employee = self.employees.fetch(&review.employee_id)?;
        if employee.is_none() {
            warn!(review_id = %review.id, employee_id = %review.employee_id, "review references a missing employee");
        }
        Ok(ReviewSummaryView::build(&review, employee.as_ref()))
    }

    pub fn delete(&self, id: &ReviewId) -> Result<(), ReviewServiceError> {
        let review = self.review(id)?;
        self.reviews.delete(id)?;
        self.publish(
            ActivityKind::ReviewDeleted,
            &review.employee_id,
            review.id.0.clone(),
            "performance review deleted".to_string(),
        )?;
        Ok(())
    }

    pub fn dashboard(&self) -> Result<DashboardSummary, ReviewServiceError> {
        let employees = self.employees.list()?;
        let reviews = self.reviews.list(&ReviewFilter::default())?;
        Ok(DashboardSummary::build(&employees, &reviews, self.recent_limit))
    }

    pub fn activities(&self, limit: Option<usize>) -> Result<Vec<Activity>, ReviewServiceError> {
        Ok(self.activity.recent(limit.unwrap_or(self.recent_limit))?)
    }

    fn publish(
        &self,
        kind: ActivityKind,
        employee_id: &EmployeeId,
        subject: String,
        detail: String,
    ) -> Result<(), ActivityError> {
        self.activity.publish(Activity {
            kind,
            subject,
            employee_id: employee_id.clone(),
            detail,
            occurred_at: Utc::now(),
        })
    }
}

/// Error raised by the review service.
#[derive(Debug, thiserror::Error)]
pub enum ReviewServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Activity(#[from] ActivityError),
    #[error("employee {0} not found")]
    EmployeeNotFound(EmployeeId),
    #[error("review {0} not found")]
    ReviewNotFound(ReviewId),
}
