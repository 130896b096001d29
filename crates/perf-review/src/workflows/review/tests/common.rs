use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::review::domain::{
    Employee, EmployeeDraft, EmployeeId, EmployeeStatus, PerformanceReview, RatedField,
    ReviewFilter, ReviewForm, ReviewId, ReviewSubmission,
};
use crate::workflows::review::repository::{
    Activity, ActivityError, ActivityFeed, EmployeeRepository, RepositoryError, ReviewRepository,
};
use crate::workflows::review::{review_router, PerformanceReviewService};

pub(super) type TestService =
    PerformanceReviewService<MemoryReviews, MemoryEmployees, MemoryActivity>;

pub(super) fn employee_draft(name: &str, department: &str) -> EmployeeDraft {
    let handle = name.to_ascii_lowercase().replace(' ', ".");
    EmployeeDraft {
        name: name.to_string(),
        email: format!("{handle}@example.com"),
        phone: "0917-555-0100".to_string(),
        position: "Branch Associate".to_string(),
        department: department.to_string(),
        location: "Makati".to_string(),
        status: EmployeeStatus::Active,
        date_hired: None,
    }
}

pub(super) fn uniform_form(score: f64) -> ReviewForm {
    let field = || RatedField::rated(score, "");
    ReviewForm {
        job_knowledge: field(),
        quality_of_work: field(),
        promptness_of_work: field(),
        quality_meets_standards: field(),
        quality_timeliness: field(),
        quality_work_output_volume: field(),
        quality_consistency: field(),
        quality_job_targets: field(),
        adaptability_openness: field(),
        adaptability_flexibility: field(),
        adaptability_resilience: field(),
    }
}

pub(super) fn submission_for(employee_id: &EmployeeId, form: ReviewForm) -> ReviewSubmission {
    ReviewSubmission {
        employee_id: employee_id.clone(),
        position: "Branch Associate".to_string(),
        department: "Branch Operations".to_string(),
        review_type: Some("Quarterly".to_string()),
        immediate_supervisor: Some("Dana Santos".to_string()),
        performance_coverage: Some("Q3 2025".to_string()),
        form,
        final_percentage: None,
        areas_for_improvement: Some("Delegation".to_string()),
        additional_comments: None,
    }
}

pub(super) fn build_service() -> (
    TestService,
    Arc<MemoryReviews>,
    Arc<MemoryEmployees>,
    Arc<MemoryActivity>,
) {
    let reviews = Arc::new(MemoryReviews::default());
    let employees = Arc::new(MemoryEmployees::default());
    let activity = Arc::new(MemoryActivity::default());
    let service = PerformanceReviewService::new(reviews.clone(), employees.clone(), activity.clone());
    (service, reviews, employees, activity)
}

/// Service with one registered employee.
pub(super) fn seeded_service() -> (Arc<TestService>, Employee) {
    let (service, _, _, _) = build_service();
    let employee = service
        .register_employee(employee_draft("Ana Cruz", "Branch Operations"))
        .expect("employee registers");
    (Arc::new(service), employee)
}

#[derive(Default, Clone)]
pub(super) struct MemoryReviews {
    pub(super) records: Arc<Mutex<HashMap<ReviewId, PerformanceReview>>>,
}

impl ReviewRepository for MemoryReviews {
    fn insert(&self, review: PerformanceReview) -> Result<PerformanceReview, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&review.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(review.id.clone(), review.clone());
        Ok(review)
    }

    fn update(&self, review: PerformanceReview) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(review.id.clone(), review);
        Ok(())
    }

    fn fetch(&self, id: &ReviewId) -> Result<Option<PerformanceReview>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self, filter: &ReviewFilter) -> Result<Vec<PerformanceReview>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|review| review.matches(filter))
            .cloned()
            .collect())
    }

    fn delete(&self, id: &ReviewId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryEmployees {
    pub(super) records: Arc<Mutex<HashMap<EmployeeId, Employee>>>,
}

impl EmployeeRepository for MemoryEmployees {
    fn insert(&self, employee: Employee) -> Result<Employee, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&employee.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(employee.id.clone(), employee.clone());
        Ok(employee)
    }

    fn update(&self, employee: Employee) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(employee.id.clone(), employee);
        Ok(())
    }

    fn fetch(&self, id: &EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Employee>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn delete(&self, id: &EmployeeId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryActivity {
    events: Arc<Mutex<Vec<Activity>>>,
}

impl MemoryActivity {
    pub(super) fn events(&self) -> Vec<Activity> {
        self.events.lock().expect("activity mutex poisoned").clone()
    }
}

impl ActivityFeed for MemoryActivity {
    fn publish(&self, activity: Activity) -> Result<(), ActivityError> {
        self.events
            .lock()
            .expect("activity mutex poisoned")
            .push(activity);
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<Activity>, ActivityError> {
        let guard = self.events.lock().expect("activity mutex poisoned");
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

pub(super) struct OfflineReviews;

impl ReviewRepository for OfflineReviews {
    fn insert(&self, _review: PerformanceReview) -> Result<PerformanceReview, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _review: PerformanceReview) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ReviewId) -> Result<Option<PerformanceReview>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _filter: &ReviewFilter) -> Result<Vec<PerformanceReview>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &ReviewId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct ConflictReviews;

impl ReviewRepository for ConflictReviews {
    fn insert(&self, _review: PerformanceReview) -> Result<PerformanceReview, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _review: PerformanceReview) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &ReviewId) -> Result<Option<PerformanceReview>, RepositoryError> {
        Ok(None)
    }

    fn list(&self, _filter: &ReviewFilter) -> Result<Vec<PerformanceReview>, RepositoryError> {
        Ok(Vec::new())
    }

    fn delete(&self, _id: &ReviewId) -> Result<(), RepositoryError> {
        Err(RepositoryError::NotFound)
    }
}

pub(super) fn router_with_service(service: Arc<TestService>) -> axum::Router {
    review_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
