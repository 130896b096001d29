use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for employee records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

/// Identifier wrapper for performance reviews.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReviewId(pub String);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Employment state as tracked by HR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EmployeeStatus {
    #[default]
    Active,
    #[serde(rename = "On Leave")]
    OnLeave,
    Terminated,
}

impl EmployeeStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::OnLeave => "On Leave",
            EmployeeStatus::Terminated => "Terminated",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "active" => Some(Self::Active),
            "on leave" | "on_leave" | "leave" => Some(Self::OnLeave),
            "terminated" => Some(Self::Terminated),
            _ => None,
        }
    }
}

/// Payload used to register or replace an employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: String,
    pub location: String,
    #[serde(default)]
    pub status: EmployeeStatus,
    #[serde(default)]
    pub date_hired: Option<NaiveDate>,
}

/// Stored employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: String,
    pub location: String,
    pub status: EmployeeStatus,
    pub date_hired: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn from_draft(id: EmployeeId, draft: EmployeeDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            position: draft.position,
            department: draft.department,
            location: draft.location,
            status: draft.status,
            date_hired: draft.date_hired,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, draft: EmployeeDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.email = draft.email;
        self.phone = draft.phone;
        self.position = draft.position;
        self.department = draft.department;
        self.location = draft.location;
        self.status = draft.status;
        self.date_hired = draft.date_hired.or(self.date_hired);
        self.updated_at = now;
    }

    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

/// Lifecycle of a performance review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReviewStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    #[serde(rename = "Pending HR Review")]
    PendingHrReview,
    Rejected,
}

impl ReviewStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ReviewStatus::Pending => "Pending",
            ReviewStatus::InProgress => "In Progress",
            ReviewStatus::Completed => "Completed",
            ReviewStatus::PendingHrReview => "Pending HR Review",
            ReviewStatus::Rejected => "Rejected",
        }
    }

    pub fn ordered() -> [ReviewStatus; 5] {
        [
            ReviewStatus::Pending,
            ReviewStatus::InProgress,
            ReviewStatus::PendingHrReview,
            ReviewStatus::Completed,
            ReviewStatus::Rejected,
        ]
    }

    /// Statuses an HR reviewer may close a review with.
    pub const fn is_hr_decision(self) -> bool {
        matches!(self, ReviewStatus::Completed | ReviewStatus::Rejected)
    }

    pub const fn is_open(self) -> bool {
        !self.is_hr_decision()
    }
}

/// A single rubric answer: a rating on the 1-5 scale plus reviewer notes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RatedField {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub comments: Option<String>,
}

impl RatedField {
    pub fn rated(score: f64, comments: impl Into<String>) -> Self {
        Self {
            score: Some(score),
            comments: Some(comments.into()),
        }
    }
}

/// Rubric answers captured by the quarterly review form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    pub job_knowledge: RatedField,
    #[serde(default)]
    pub quality_of_work: RatedField,
    #[serde(default)]
    pub promptness_of_work: RatedField,
    #[serde(default)]
    pub quality_meets_standards: RatedField,
    #[serde(default)]
    pub quality_timeliness: RatedField,
    #[serde(default)]
    pub quality_work_output_volume: RatedField,
    #[serde(default)]
    pub quality_consistency: RatedField,
    #[serde(default)]
    pub quality_job_targets: RatedField,
    #[serde(default)]
    pub adaptability_openness: RatedField,
    #[serde(default)]
    pub adaptability_flexibility: RatedField,
    #[serde(default)]
    pub adaptability_resilience: RatedField,
}

/// Evaluator submission for a single employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSubmission {
    pub employee_id: EmployeeId,
    pub position: String,
    pub department: String,
    #[serde(default)]
    pub review_type: Option<String>,
    #[serde(default)]
    pub immediate_supervisor: Option<String>,
    #[serde(default)]
    pub performance_coverage: Option<String>,
    #[serde(default)]
    pub form: ReviewForm,
    #[serde(default)]
    pub final_percentage: Option<f64>,
    #[serde(default)]
    pub areas_for_improvement: Option<String>,
    #[serde(default)]
    pub additional_comments: Option<String>,
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReviewAmendment {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub review_type: Option<String>,
    #[serde(default)]
    pub immediate_supervisor: Option<String>,
    #[serde(default)]
    pub performance_coverage: Option<String>,
    #[serde(default)]
    pub form: Option<ReviewForm>,
    #[serde(default)]
    pub final_percentage: Option<f64>,
    #[serde(default)]
    pub areas_for_improvement: Option<String>,
    #[serde(default)]
    pub additional_comments: Option<String>,
    #[serde(default)]
    pub status: Option<ReviewStatus>,
}

/// HR sign-off on a submitted review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrDecision {
    pub status: ReviewStatus,
    #[serde(default)]
    pub hr_comments: Option<String>,
}

/// Listing filter; `None` fields match everything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReviewFilter {
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    #[serde(default)]
    pub status: Option<ReviewStatus>,
}

/// Stored performance review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReview {
    pub id: ReviewId,
    pub employee_id: EmployeeId,
    pub position: String,
    pub department: String,
    pub review_type: Option<String>,
    pub immediate_supervisor: Option<String>,
    pub performance_coverage: Option<String>,
    pub form: ReviewForm,
    pub final_percentage: Option<f64>,
    pub areas_for_improvement: Option<String>,
    pub additional_comments: Option<String>,
    pub status: ReviewStatus,
    pub hr_comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl PerformanceReview {
    pub fn from_submission(id: ReviewId, submission: ReviewSubmission, now: DateTime<Utc>) -> Self {
        Self {
            id,
            employee_id: submission.employee_id,
            position: submission.position,
            department: submission.department,
            review_type: submission.review_type,
            immediate_supervisor: submission.immediate_supervisor,
            performance_coverage: submission.performance_coverage,
            form: submission.form,
            final_percentage: submission.final_percentage,
            areas_for_improvement: submission.areas_for_improvement,
            additional_comments: submission.additional_comments,
            status: ReviewStatus::PendingHrReview,
            hr_comments: None,
            created_at: now,
            updated_at: now,
            submitted_at: Some(now),
        }
    }

    pub fn amend(&mut self, amendment: ReviewAmendment, now: DateTime<Utc>) {
        let ReviewAmendment {
            position,
            department,
            review_type,
            immediate_supervisor,
            performance_coverage,
            form,
            final_percentage,
            areas_for_improvement,
            additional_comments,
            status,
        } = amendment;

        if let Some(position) = position {
            self.position = position;
        }
        if let Some(department) = department {
            self.department = department;
        }
        if review_type.is_some() {
            self.review_type = review_type;
        }
        if immediate_supervisor.is_some() {
            self.immediate_supervisor = immediate_supervisor;
        }
        if performance_coverage.is_some() {
            self.performance_coverage = performance_coverage;
        }
        if let Some(form) = form {
            self.form = form;
        }
        if final_percentage.is_some() {
            self.final_percentage = final_percentage;
        }
        if areas_for_improvement.is_some() {
            self.areas_for_improvement = areas_for_improvement;
        }
        if additional_comments.is_some() {
            self.additional_comments = additional_comments;
        }
        if let Some(status) = status {
            self.status = status;
        }
        self.updated_at = now;
    }

    pub fn record_decision(&mut self, decision: HrDecision, now: DateTime<Utc>) {
        self.status = decision.status;
        self.hr_comments = Some(decision.hr_comments.unwrap_or_default());
        self.updated_at = now;
    }

    /// Timestamp used for recency ordering.
    pub fn activity_at(&self) -> DateTime<Utc> {
        self.submitted_at.unwrap_or(self.created_at)
    }

    /// Most meaningful "last touched" timestamp for display.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.submitted_at.unwrap_or(self.updated_at)
    }

    pub fn matches(&self, filter: &ReviewFilter) -> bool {
        filter
            .employee_id
            .as_ref()
            .map_or(true, |id| *id == self.employee_id)
            && filter.status.map_or(true, |status| status == self.status)
    }
}
