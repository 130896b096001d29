use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{de, Deserialize, Deserializer};
use serde_json::{json, Value};

use super::domain::{
    EmployeeDraft, EmployeeId, HrDecision, ReviewAmendment, ReviewFilter, ReviewForm, ReviewId,
    ReviewStatus, ReviewSubmission,
};
use super::intake::IntakeViolation;
use super::repository::{
    ActivityFeed, EmployeeRepository, RepositoryError, ReviewRepository, ReviewStatusView,
};
use super::scoring::{score_form, CategoryInput, Scorecard};
use super::service::{PerformanceReviewService, ReviewServiceError};

type SharedService<R, E, A> = Arc<PerformanceReviewService<R, E, A>>;

/// Router builder exposing the employee, review and scoring endpoints.
pub fn review_router<R, E, A>(service: SharedService<R, E, A>) -> Router
where
    R: ReviewRepository + 'static,
    E: EmployeeRepository + 'static,
    A: ActivityFeed + 'static,
{
    Router::new()
        .route(
            "/api/v1/employees",
            get(list_employees_handler::<R, E, A>).post(register_employee_handler::<R, E, A>),
        )
        .route(
            "/api/v1/employees/:employee_id",
            get(employee_handler::<R, E, A>)
                .put(update_employee_handler::<R, E, A>)
                .delete(remove_employee_handler::<R, E, A>),
        )
        .route(
            "/api/v1/reviews",
            get(list_reviews_handler::<R, E, A>).post(submit_handler::<R, E, A>),
        )
        .route("/api/v1/reviews/recent", get(recent_handler::<R, E, A>))
        .route(
            "/api/v1/reviews/:review_id",
            get(review_handler::<R, E, A>)
                .put(amend_handler::<R, E, A>)
                .patch(decision_handler::<R, E, A>)
                .delete(delete_handler::<R, E, A>),
        )
        .route(
            "/api/v1/reviews/:review_id/summary",
            get(summary_handler::<R, E, A>),
        )
        .route("/api/v1/scoring/preview", post(preview_handler))
        .route("/api/v1/dashboard", get(dashboard_handler::<R, E, A>))
        .route("/api/v1/activities", get(activities_handler::<R, E, A>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReviewListQuery {
    #[serde(default)]
    pub(crate) employee_id: Option<String>,
    #[serde(default)]
    pub(crate) status: Option<ReviewStatus>,
}

impl From<ReviewListQuery> for ReviewFilter {
    fn from(query: ReviewListQuery) -> Self {
        Self {
            employee_id: query
                .employee_id
                .filter(|id| !id.trim().is_empty())
                .map(EmployeeId),
            status: query.status,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LimitQuery {
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

/// Scoring preview input: either a standard review form or an explicit
/// category list with its own weights.
///
/// A body carrying a `categories` key is always read as a category list, so
/// a malformed list is rejected rather than scored as an empty form.
#[derive(Debug)]
pub enum ScoringPreviewRequest {
    Categories { categories: Vec<CategoryInput> },
    Form(Box<ReviewForm>),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CategoryList {
    categories: Vec<CategoryInput>,
}

impl<'de> Deserialize<'de> for ScoringPreviewRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.get("categories").is_some() {
            let list = CategoryList::deserialize(value).map_err(de::Error::custom)?;
            Ok(Self::Categories {
                categories: list.categories,
            })
        } else {
            let form = ReviewForm::deserialize(value).map_err(de::Error::custom)?;
            Ok(Self::Form(Box::new(form)))
        }
    }
}

pub(crate) async fn register_employee_handler<R, E, A>(
    State(service): State<SharedService<R, E, A>>,
    Json(draft): Json<EmployeeDraft>,
) -> Response
where
    R: ReviewRepository + 'static,
    E: EmployeeRepository + 'static,
    A: ActivityFeed + 'static,
{
    match service.register_employee(draft) {
        Ok(employee) => (StatusCode::CREATED, Json(employee)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_employees_handler<R, E, A>(
    State(service): State<SharedService<R, E, A>>,
) -> Response
where
    R: ReviewRepository + 'static,
    E: EmployeeRepository + 'static,
    A: ActivityFeed + 'static,
{
    match service.employees() {
        Ok(employees) => (StatusCode::OK, Json(employees)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn employee_handler<R, E, A>(
    State(service): State<SharedService<R, E, A>>,
    Path(employee_id): Path<String>,
) -> Response
where
    R: ReviewRepository + 'static,
    E: EmployeeRepository + 'static,
    A: ActivityFeed + 'static,
{
    match service.employee(&EmployeeId(employee_id)) {
        Ok(employee) => (StatusCode::OK, Json(employee)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_employee_handler<R, E, A>(
    State(service): State<SharedService<R, E, A>>,
    Path(employee_id): Path<String>,
    Json(draft): Json<EmployeeDraft>,
) -> Response
where
    R: ReviewRepository + 'static,
    E: EmployeeRepository + 'static,
    A: ActivityFeed + 'static,
{
    match service.update_employee(&EmployeeId(employee_id), draft) {
        Ok(employee) => (StatusCode::OK, Json(employee)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn remove_employee_handler<R, E, A>(
    State(service): State<SharedService<R, E, A>>,
    Path(employee_id): Path<String>,
) -> Response
where
    R: ReviewRepository + 'static,
    E: EmployeeRepository + 'static,
    A: ActivityFeed + 'static,
{
    match service.remove_employee(&EmployeeId(employee_id)) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Employee deleted successfully" })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn submit_handler<R, E, A>(
    State(service): State<SharedService<R, E, A>>,
    Json(submission): Json<ReviewSubmission>,
) -> Response
where
    R: ReviewRepository + 'static,
    E: EmployeeRepository + 'static,
    A: ActivityFeed + 'static,
{
    match service.submit(submission) {
        Ok(review) => (StatusCode::CREATED, Json(review)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_reviews_handler<R, E, A>(
    State(service): State<SharedService<R, E, A>>,
    Query(query): Query<ReviewListQuery>,
) -> Response
where
    R: ReviewRepository + 'static,
    E: EmployeeRepository + 'static,
    A: ActivityFeed + 'static,
{
    let filter = ReviewFilter::from(query);
    match service.reviews(&filter) {
        Ok(reviews) => {
            let views: Vec<ReviewStatusView> = reviews.iter().map(ReviewStatusView::from).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn recent_handler<R, E, A>(
    State(service): State<SharedService<R, E, A>>,
    Query(query): Query<LimitQuery>,
) -> Response
where
    R: ReviewRepository + 'static,
    E: EmployeeRepository + 'static,
    A: ActivityFeed + 'static,
{
    match service.recent(query.limit) {
        Ok(reviews) => {
            let views: Vec<ReviewStatusView> = reviews.iter().map(ReviewStatusView::from).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn review_handler<R, E, A>(
    State(service): State<SharedService<R, E, A>>,
    Path(review_id): Path<String>,
) -> Response
where
    R: ReviewRepository + 'static,
    E: EmployeeRepository + 'static,
    A: ActivityFeed + 'static,
{
    match service.review(&ReviewId(review_id)) {
        Ok(review) => (StatusCode::OK, Json(review)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn amend_handler<R, E, A>(
    State(service): State<SharedService<R, E, A>>,
    Path(review_id): Path<String>,
    Json(amendment): Json<ReviewAmendment>,
) -> Response
where
    R: ReviewRepository + 'static,
    E: EmployeeRepository + 'static,
    A: ActivityFeed + 'static,
{
    match service.amend(&ReviewId(review_id), amendment) {
        Ok(review) => (StatusCode::OK, Json(review)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn decision_handler<R, E, A>(
    State(service): State<SharedService<R, E, A>>,
    Path(review_id): Path<String>,
    Json(decision): Json<HrDecision>,
) -> Response
where
    R: ReviewRepository + 'static,
    E: EmployeeRepository + 'static,
    A: ActivityFeed + 'static,
{
    match service.decide(&ReviewId(review_id), decision) {
        Ok(review) => (StatusCode::OK, Json(ReviewStatusView::from(&review))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<R, E, A>(
    State(service): State<SharedService<R, E, A>>,
    Path(review_id): Path<String>,
) -> Response
where
    R: ReviewRepository + 'static,
    E: EmployeeRepository + 'static,
    A: ActivityFeed + 'static,
{
    match service.delete(&ReviewId(review_id)) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Performance review deleted successfully" })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn summary_handler<R, E, A>(
    State(service): State<SharedService<R, E, A>>,
    Path(review_id): Path<String>,
) -> Response
where
    R: ReviewRepository + 'static,
    E: EmployeeRepository + 'static,
    A: ActivityFeed + 'static,
{
    match service.summary(&ReviewId(review_id)) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn preview_handler(Json(request): Json<ScoringPreviewRequest>) -> Json<Scorecard> {
    let scorecard = match request {
        ScoringPreviewRequest::Categories { categories } => Scorecard::from_categories(&categories),
        ScoringPreviewRequest::Form(form) => score_form(&form),
    };
    Json(scorecard)
}

pub(crate) async fn dashboard_handler<R, E, A>(
    State(service): State<SharedService<R, E, A>>,
) -> Response
where
    R: ReviewRepository + 'static,
    E: EmployeeRepository + 'static,
    A: ActivityFeed + 'static,
{
    match service.dashboard() {
        Ok(dashboard) => (StatusCode::OK, Json(dashboard)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn activities_handler<R, E, A>(
    State(service): State<SharedService<R, E, A>>,
    Query(query): Query<LimitQuery>,
) -> Response
where
    R: ReviewRepository + 'static,
    E: EmployeeRepository + 'static,
    A: ActivityFeed + 'static,
{
    match service.activities(query.limit) {
        Ok(activities) => (StatusCode::OK, Json(activities)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) fn error_status(err: &ReviewServiceError) -> StatusCode {
    match err {
        ReviewServiceError::Intake(IntakeViolation::InvalidDecision(_)) => StatusCode::BAD_REQUEST,
        ReviewServiceError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ReviewServiceError::EmployeeNotFound(_)
        | ReviewServiceError::ReviewNotFound(_)
        | ReviewServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ReviewServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ReviewServiceError::Repository(RepositoryError::Unavailable(_))
        | ReviewServiceError::Activity(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: ReviewServiceError) -> Response {
    let status = error_status(&err);
    let payload = json!({
        "error": err.to_string(),
    });
    (status, Json(payload)).into_response()
}
