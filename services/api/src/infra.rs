use metrics_exporter_prometheus::PrometheusHandle;
use perf_review::workflows::review::{
    Activity, ActivityError, ActivityFeed, Employee, EmployeeId, EmployeeRepository,
    PerformanceReview, PerformanceReviewService, RepositoryError, ReviewFilter, ReviewId,
    ReviewRepository,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

/// Activity entries kept before the oldest are dropped.
const ACTIVITY_CAPACITY: usize = 500;

pub(crate) type InMemoryReviewService = PerformanceReviewService<
    InMemoryReviewRepository,
    InMemoryEmployeeRepository,
    InMemoryActivityFeed,
>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn in_memory_service(recent_limit: usize) -> InMemoryReviewService {
    PerformanceReviewService::new(
        Arc::new(InMemoryReviewRepository::default()),
        Arc::new(InMemoryEmployeeRepository::default()),
        Arc::new(InMemoryActivityFeed::default()),
    )
    .with_recent_limit(recent_limit)
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryReviewRepository {
    records: Arc<Mutex<HashMap<ReviewId, PerformanceReview>>>,
}

impl ReviewRepository for InMemoryReviewRepository {
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
        if guard.contains_key(&review.id) {
            guard.insert(review.id.clone(), review);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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
        guard
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryEmployeeRepository {
    records: Arc<Mutex<HashMap<EmployeeId, Employee>>>,
}

impl EmployeeRepository for InMemoryEmployeeRepository {
    fn insert(&self, employee: Employee) -> Result<Employee, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let duplicate_email = guard
            .values()
            .any(|existing| existing.email.eq_ignore_ascii_case(&employee.email));
        if guard.contains_key(&employee.id) || duplicate_email {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(employee.id.clone(), employee.clone());
        Ok(employee)
    }

    fn update(&self, employee: Employee) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&employee.id) {
            guard.insert(employee.id.clone(), employee);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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
        guard
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryActivityFeed {
    events: Arc<Mutex<Vec<Activity>>>,
}

impl ActivityFeed for InMemoryActivityFeed {
    fn publish(&self, activity: Activity) -> Result<(), ActivityError> {
        let mut guard = self.events.lock().expect("activity mutex poisoned");
        guard.push(activity);
        if guard.len() > ACTIVITY_CAPACITY {
            let overflow = guard.len() - ACTIVITY_CAPACITY;
            guard.drain(..overflow);
        }
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<Activity>, ActivityError> {
        let guard = self.events.lock().expect("activity mutex poisoned");
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}
