use super::domain::{EmployeeDraft, HrDecision, ReviewAmendment, ReviewStatus, ReviewSubmission};

/// Validation errors raised before anything reaches a repository.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error("invalid status {}: HR decisions must be Completed or Rejected", .0.label())]
    InvalidDecision(ReviewStatus),
}

/// Field-level checks for employee records, review submissions and HR decisions.
///
/// Rubric ratings are not range-checked; the scoring engine degrades missing
/// values to zero.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn check_employee(&self, draft: &EmployeeDraft) -> Result<(), IntakeViolation> {
        require("name", &draft.name)?;
        require("email", &draft.email)?;
        require("phone", &draft.phone)?;
        require("position", &draft.position)?;
        require("department", &draft.department)?;
        require("location", &draft.location)?;

        if !is_plausible_email(&draft.email) {
            return Err(IntakeViolation::InvalidEmail(draft.email.trim().to_string()));
        }

        Ok(())
    }

    pub fn check_submission(&self, submission: &ReviewSubmission) -> Result<(), IntakeViolation> {
        require("employee_id", &submission.employee_id.0)?;
        require("position", &submission.position)?;
        require("department", &submission.department)?;
        Ok(())
    }

    pub fn check_amendment(&self, amendment: &ReviewAmendment) -> Result<(), IntakeViolation> {
        if let Some(position) = &amendment.position {
            require("position", position)?;
        }
        if let Some(department) = &amendment.department {
            require("department", department)?;
        }
        Ok(())
    }

    pub fn check_decision(&self, decision: &HrDecision) -> Result<(), IntakeViolation> {
        if decision.status.is_hr_decision() {
            Ok(())
        } else {
            Err(IntakeViolation::InvalidDecision(decision.status))
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), IntakeViolation> {
    if value.trim().is_empty() {
        Err(IntakeViolation::MissingField { field })
    } else {
        Ok(())
    }
}

fn is_plausible_email(raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.chars().any(char::is_whitespace) {
        return false;
    }

    match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .map_or(false, |(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}
