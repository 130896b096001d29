use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::domain::{Employee, EmployeeId, PerformanceReview, ReviewStatus};
use super::repository::ReviewStatusView;
use super::scoring::{rate, round_to_hundredths, score_form};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCountEntry {
    pub status: ReviewStatus,
    pub status_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentCountEntry {
    pub department: String,
    pub employees: usize,
    pub completed_reviews: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AwaitingReviewEntry {
    pub employee_id: EmployeeId,
    pub name: String,
    pub department: String,
}

/// Roll-up shown on the HR and evaluator dashboards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_employees: usize,
    pub active_employees: usize,
    pub total_reviews: usize,
    pub completed_reviews: usize,
    pub pending_reviews: usize,
    pub rejected_reviews: usize,
    pub completion_rate: f64,
    pub average_score: Option<f64>,
    pub average_rating: &'static str,
    pub status_breakdown: Vec<StatusCountEntry>,
    pub department_breakdown: Vec<DepartmentCountEntry>,
    pub recent_reviews: Vec<ReviewStatusView>,
    pub awaiting_review: Vec<AwaitingReviewEntry>,
}

impl DashboardSummary {
    pub fn build(employees: &[Employee], reviews: &[PerformanceReview], recent_limit: usize) -> Self {
        let completed: Vec<&PerformanceReview> = reviews
            .iter()
            .filter(|review| review.status == ReviewStatus::Completed)
            .collect();
        let rejected_reviews = reviews
            .iter()
            .filter(|review| review.status == ReviewStatus::Rejected)
            .count();

        let completion_rate = if employees.is_empty() {
            0.0
        } else {
            round_to_hundredths(completed.len() as f64 / employees.len() as f64 * 100.0)
        };

        // rating uses the unrounded mean
        let mean_score = if completed.is_empty() {
            None
        } else {
            let sum: f64 = completed
                .iter()
                .map(|review| score_form(&review.form).total_score)
                .sum();
            Some(sum / completed.len() as f64)
        };

        let status_breakdown = ReviewStatus::ordered()
            .into_iter()
            .map(|status| StatusCountEntry {
                status,
                status_label: status.label(),
                count: reviews.iter().filter(|review| review.status == status).count(),
            })
            .collect();

        let reviewed: BTreeSet<&EmployeeId> =
            completed.iter().map(|review| &review.employee_id).collect();

        let mut departments: BTreeMap<&str, DepartmentCountEntry> = BTreeMap::new();
        for employee in employees {
            let entry = departments
                .entry(employee.department.as_str())
                .or_insert_with(|| DepartmentCountEntry {
                    department: employee.department.clone(),
                    employees: 0,
                    completed_reviews: 0,
                });
            entry.employees += 1;
        }
        for review in &completed {
            if let Some(entry) = departments.get_mut(review.department.as_str()) {
                entry.completed_reviews += 1;
            }
        }

        let mut recent: Vec<&PerformanceReview> = reviews.iter().collect();
        recent.sort_by(|a, b| b.activity_at().cmp(&a.activity_at()));
        let recent_reviews = recent
            .into_iter()
            .take(recent_limit)
            .map(ReviewStatusView::from)
            .collect();

        let awaiting_review = employees
            .iter()
            .filter(|employee| employee.is_active() && !reviewed.contains(&employee.id))
            .map(|employee| AwaitingReviewEntry {
                employee_id: employee.id.clone(),
                name: employee.name.clone(),
                department: employee.department.clone(),
            })
            .collect();

        Self {
            total_employees: employees.len(),
            active_employees: employees.iter().filter(|employee| employee.is_active()).count(),
            total_reviews: reviews.len(),
            completed_reviews: completed.len(),
            pending_reviews: reviews
                .iter()
                .filter(|review| review.status.is_open())
                .count(),
            rejected_reviews,
            completion_rate,
            average_score: mean_score.map(round_to_hundredths),
            average_rating: mean_score.map(rate).unwrap_or_default(),
            status_breakdown,
            department_breakdown: departments.into_values().collect(),
            recent_reviews,
            awaiting_review,
        }
    }
}
