use crate::infra::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use perf_review::error::AppError;
use perf_review::workflows::review::{
    review_router, ActivityFeed, Employee, EmployeeRepository, IntakeGuard, PerformanceReviewService,
    RepositoryError, ReviewRepository, ReviewServiceError,
};
use perf_review::workflows::roster::EmployeeRosterImporter;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct RosterImportRequest {
    pub(crate) csv: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RosterImportResponse {
    pub(crate) imported: usize,
    pub(crate) employees: Vec<Employee>,
}

pub(crate) fn with_review_routes<R, E, A>(
    service: Arc<PerformanceReviewService<R, E, A>>,
) -> Router
where
    R: ReviewRepository + 'static,
    E: EmployeeRepository + 'static,
    A: ActivityFeed + 'static,
{
    let roster = Router::new()
        .route(
            "/api/v1/roster/import",
            post(roster_import_endpoint::<R, E, A>),
        )
        .with_state(service.clone());

    review_router(service)
        .merge(roster)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Registers every roster row, or none of them when a row fails validation or
/// repeats an email already in the batch or the store.
pub(crate) async fn roster_import_endpoint<R, E, A>(
    State(service): State<Arc<PerformanceReviewService<R, E, A>>>,
    Json(payload): Json<RosterImportRequest>,
) -> Result<(StatusCode, Json<RosterImportResponse>), AppError>
where
    R: ReviewRepository + 'static,
    E: EmployeeRepository + 'static,
    A: ActivityFeed + 'static,
{
    let drafts = EmployeeRosterImporter::from_reader(Cursor::new(payload.csv.into_bytes()))?;

    let guard = IntakeGuard;
    for draft in &drafts {
        guard
            .check_employee(draft)
            .map_err(ReviewServiceError::from)?;
    }

    let mut emails: HashSet<String> = service
        .employees()?
        .into_iter()
        .map(|employee| employee.email.trim().to_ascii_lowercase())
        .collect();
    for draft in &drafts {
        if !emails.insert(draft.email.trim().to_ascii_lowercase()) {
            return Err(ReviewServiceError::Repository(RepositoryError::Conflict).into());
        }
    }

    let mut employees = Vec::with_capacity(drafts.len());
    for draft in drafts {
        employees.push(service.register_employee(draft)?);
    }

    Ok((
        StatusCode::CREATED,
        Json(RosterImportResponse {
            imported: employees.len(),
            employees,
        }),
    ))
}
