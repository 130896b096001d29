use super::common::*;
use crate::workflows::review::domain::{
    EmployeeId, EmployeeStatus, HrDecision, RatedField, ReviewAmendment, ReviewFilter, ReviewId,
    ReviewStatus,
};
use crate::workflows::review::intake::IntakeViolation;
use crate::workflows::review::repository::{ActivityKind, RepositoryError, ReviewRepository};
use crate::workflows::review::{PerformanceReviewService, ReviewServiceError};
use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

fn completed(hr_comments: &str) -> HrDecision {
    HrDecision {
        status: ReviewStatus::Completed,
        hr_comments: Some(hr_comments.to_string()),
    }
}

#[test]
fn register_rejects_malformed_email() {
    let (service, _, employees, activity) = build_service();
    let mut draft = employee_draft("Ana Cruz", "Branch Operations");
    draft.email = "ana.cruz-at-example".to_string();

    match service.register_employee(draft) {
        Err(ReviewServiceError::Intake(IntakeViolation::InvalidEmail(email))) => {
            assert_eq!(email, "ana.cruz-at-example")
        }
        other => panic!("expected invalid email, got {other:?}"),
    }
    assert!(employees.records.lock().expect("lock").is_empty());
    assert!(activity.events().is_empty());
}

#[test]
fn update_employee_keeps_identity_and_creation_time() {
    let (service, employee) = seeded_service();
    let mut draft = employee_draft("Ana Cruz", "Treasury");
    draft.status = EmployeeStatus::OnLeave;

    let updated = service
        .update_employee(&employee.id, draft)
        .expect("update succeeds");

    assert_eq!(updated.id, employee.id);
    assert_eq!(updated.created_at, employee.created_at);
    assert_eq!(updated.department, "Treasury");
    assert!(!updated.is_active());
}

#[test]
fn submit_requires_a_registered_employee() {
    let (service, reviews, _, _) = build_service();
    let ghost = EmployeeId("emp-999999".to_string());

    match service.submit(submission_for(&ghost, uniform_form(3.0))) {
        Err(ReviewServiceError::EmployeeNotFound(id)) => assert_eq!(id, ghost),
        other => panic!("expected missing employee, got {other:?}"),
    }
    assert!(reviews.records.lock().expect("lock").is_empty());
}

#[test]
fn submit_propagates_intake_errors() {
    let (service, employee) = seeded_service();
    let mut submission = submission_for(&employee.id, uniform_form(3.0));
    submission.position = "   ".to_string();

    match service.submit(submission) {
        Err(ReviewServiceError::Intake(IntakeViolation::MissingField { field })) => {
            assert_eq!(field, "position")
        }
        other => panic!("expected missing position, got {other:?}"),
    }
}

#[test]
fn submit_awaits_hr_and_records_activity() {
    let (service, _, _, activity) = build_service();
    let employee = service
        .register_employee(employee_draft("Ben Reyes", "Lending"))
        .expect("employee registers");

    let review = service
        .submit(submission_for(&employee.id, uniform_form(3.0)))
        .expect("submission accepted");

    assert_eq!(review.status, ReviewStatus::PendingHrReview);
    assert!(review.submitted_at.is_some());
    assert!(review.id.0.starts_with("rev-"));

    let events = activity.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].kind, ActivityKind::ReviewSubmitted);
    assert_eq!(events[1].subject, review.id.0);
    assert!(events[1].detail.contains("3.00"), "{}", events[1].detail);
}

#[test]
fn decide_rejects_statuses_outside_hr_outcomes() {
    let (service, employee) = seeded_service();
    let review = service
        .submit(submission_for(&employee.id, uniform_form(3.0)))
        .expect("submission accepted");

    let decision = HrDecision {
        status: ReviewStatus::InProgress,
        hr_comments: None,
    };

    match service.decide(&review.id, decision) {
        Err(ReviewServiceError::Intake(IntakeViolation::InvalidDecision(status))) => {
            assert_eq!(status, ReviewStatus::InProgress)
        }
        other => panic!("expected invalid decision, got {other:?}"),
    }
    let stored = service.review(&review.id).expect("review present");
    assert_eq!(stored.status, ReviewStatus::PendingHrReview);
}

#[test]
fn decide_records_completion_and_comments() {
    let (service, _, _, activity) = build_service();
    let employee = service
        .register_employee(employee_draft("Carla Lim", "Lending"))
        .expect("employee registers");
    let review = service
        .submit(submission_for(&employee.id, uniform_form(4.0)))
        .expect("submission accepted");

    let decided = service
        .decide(&review.id, completed("Approved for merit increase"))
        .expect("decision recorded");

    assert_eq!(decided.status, ReviewStatus::Completed);
    assert_eq!(
        decided.hr_comments.as_deref(),
        Some("Approved for merit increase")
    );
    assert_eq!(
        activity.events().last().map(|event| event.kind),
        Some(ActivityKind::ReviewCompleted)
    );

    let rejected = service
        .decide(
            &review.id,
            HrDecision {
                status: ReviewStatus::Rejected,
                hr_comments: None,
            },
        )
        .expect("decision recorded");
    assert_eq!(rejected.hr_comments.as_deref(), Some(""));
    assert_eq!(
        activity.events().last().map(|event| event.kind),
        Some(ActivityKind::ReviewRejected)
    );
}

#[test]
fn amend_replaces_only_supplied_fields() {
    let (service, employee) = seeded_service();
    let review = service
        .submit(submission_for(&employee.id, uniform_form(3.0)))
        .expect("submission accepted");

    let amended = service
        .amend(
            &review.id,
            ReviewAmendment {
                form: Some(uniform_form(5.0)),
                additional_comments: Some("Strong quarter".to_string()),
                ..ReviewAmendment::default()
            },
        )
        .expect("amendment applied");

    assert_eq!(amended.position, review.position);
    assert_eq!(amended.review_type, review.review_type);
    assert_eq!(amended.form, uniform_form(5.0));
    assert_eq!(amended.status, ReviewStatus::PendingHrReview);

    let summary = service.summary(&review.id).expect("summary");
    assert_eq!(summary.total_score, 5.0);
    assert_eq!(summary.final_rating, "Outstanding");
    assert_eq!(summary.comments, "Strong quarter");
}

#[test]
fn amend_rejects_blank_department() {
    let (service, employee) = seeded_service();
    let review = service
        .submit(submission_for(&employee.id, uniform_form(3.0)))
        .expect("submission accepted");

    let result = service.amend(
        &review.id,
        ReviewAmendment {
            department: Some(String::new()),
            ..ReviewAmendment::default()
        },
    );

    assert!(matches!(
        result,
        Err(ReviewServiceError::Intake(IntakeViolation::MissingField {
            field: "department"
        }))
    ));
}

#[test]
fn summary_derives_rating_and_defaults() {
    let (service, employee) = seeded_service();
    let review = service
        .submit(submission_for(&employee.id, uniform_form(3.0)))
        .expect("submission accepted");

    let summary = service.summary(&review.id).expect("summary");

    assert_eq!(summary.employee_name, "Ana Cruz");
    assert_eq!(summary.total_score, 3.0);
    assert_eq!(summary.display_score, "3.00");
    assert_eq!(summary.final_percentage, Some(60.0));
    assert_eq!(summary.final_rating, "Meets Expectations");
    assert_eq!(summary.comments, "No additional comments provided.");
    assert_eq!(summary.scores.len(), 9);
}

#[test]
fn summary_prefers_explicit_percentage_override() {
    let (service, employee) = seeded_service();
    let mut submission = submission_for(&employee.id, uniform_form(3.0));
    submission.final_percentage = Some(72.5);
    let review = service.submit(submission).expect("submission accepted");

    let summary = service.summary(&review.id).expect("summary");
    assert_eq!(summary.final_percentage, Some(72.5));
    assert_eq!(summary.final_rating, "Meets Expectations");

    service
        .amend(
            &review.id,
            ReviewAmendment {
                final_percentage: Some(0.0),
                ..ReviewAmendment::default()
            },
        )
        .expect("amendment applied");
    let summary = service.summary(&review.id).expect("summary");
    assert_eq!(summary.final_percentage, Some(60.0));
}

#[test]
fn summary_survives_a_removed_employee() {
    let (service, employee) = seeded_service();
    let review = service
        .submit(submission_for(&employee.id, uniform_form(2.0)))
        .expect("submission accepted");
    service
        .remove_employee(&employee.id)
        .expect("employee removed");

    let summary = service.summary(&review.id).expect("summary");
    assert_eq!(summary.employee_name, "Unknown Employee");
    assert_eq!(summary.final_rating, "Needs Improvement");
}

#[test]
fn remove_employee_reports_unknown_ids() {
    let (service, _, _, _) = build_service();
    let ghost = EmployeeId("emp-000000".to_string());

    assert!(matches!(
        service.remove_employee(&ghost),
        Err(ReviewServiceError::EmployeeNotFound(_))
    ));
}

#[test]
fn reviews_filter_by_employee_and_status() {
    let (service, _, _, _) = build_service();
    let ana = service
        .register_employee(employee_draft("Ana Cruz", "Lending"))
        .expect("employee registers");
    let ben = service
        .register_employee(employee_draft("Ben Reyes", "Lending"))
        .expect("employee registers");

    let first = service
        .submit(submission_for(&ana.id, uniform_form(3.0)))
        .expect("submission accepted");
    service
        .submit(submission_for(&ana.id, uniform_form(4.0)))
        .expect("submission accepted");
    service
        .submit(submission_for(&ben.id, uniform_form(2.0)))
        .expect("submission accepted");
    service
        .decide(&first.id, completed("ok"))
        .expect("decision recorded");

    let for_ana = service
        .reviews(&ReviewFilter {
            employee_id: Some(ana.id.clone()),
            status: None,
        })
        .expect("listing");
    assert_eq!(for_ana.len(), 2);
    assert!(for_ana.windows(2).all(|pair| pair[0].id < pair[1].id));

    let completed_only = service
        .reviews(&ReviewFilter {
            employee_id: None,
            status: Some(ReviewStatus::Completed),
        })
        .expect("listing");
    assert_eq!(completed_only.len(), 1);
    assert_eq!(completed_only[0].id, first.id);
}

#[test]
fn recent_orders_by_submission_time_and_truncates() {
    let (service, reviews, _, _) = build_service();
    let service = service.with_recent_limit(2);
    let employee = service
        .register_employee(employee_draft("Dan Uy", "Audit"))
        .expect("employee registers");

    let base = Utc.with_ymd_and_hms(2025, 7, 1, 9, 0, 0).unwrap();
    let mut ids = Vec::new();
    for offset in [2, 0, 1] {
        let review = service
            .submit(submission_for(&employee.id, uniform_form(3.0)))
            .expect("submission accepted");
        let mut stored = review.clone();
        stored.submitted_at = Some(base + Duration::days(offset));
        reviews.update(stored).expect("update");
        ids.push(review.id);
    }

    let recent = service.recent(None).expect("recent");
    let recent_ids: Vec<ReviewId> = recent.into_iter().map(|review| review.id).collect();
    assert_eq!(recent_ids, vec![ids[0].clone(), ids[2].clone()]);

    let everything = service.recent(Some(10)).expect("recent");
    assert_eq!(everything.len(), 3);
    assert_eq!(everything[2].id, ids[1]);
}

#[test]
fn delete_removes_review_and_reports_missing() {
    let (service, employee) = seeded_service();
    let review = service
        .submit(submission_for(&employee.id, uniform_form(3.0)))
        .expect("submission accepted");

    service.delete(&review.id).expect("delete succeeds");

    assert!(matches!(
        service.review(&review.id),
        Err(ReviewServiceError::ReviewNotFound(_))
    ));
    assert!(matches!(
        service.delete(&review.id),
        Err(ReviewServiceError::ReviewNotFound(_))
    ));
}

#[test]
fn dashboard_counts_completed_reviews() {
    let (service, _, _, _) = build_service();
    let ana = service
        .register_employee(employee_draft("Ana Cruz", "Lending"))
        .expect("employee registers");
    let ben = service
        .register_employee(employee_draft("Ben Reyes", "Audit"))
        .expect("employee registers");
    let mut inactive = employee_draft("Cy Tan", "Audit");
    inactive.status = EmployeeStatus::Terminated;
    service
        .register_employee(inactive)
        .expect("employee registers");

    let done = service
        .submit(submission_for(&ana.id, uniform_form(4.0)))
        .expect("submission accepted");
    service
        .decide(&done.id, completed("ok"))
        .expect("decision recorded");
    service
        .submit(submission_for(&ben.id, uniform_form(2.0)))
        .expect("submission accepted");

    let dashboard = service.dashboard().expect("dashboard");

    assert_eq!(dashboard.total_employees, 3);
    assert_eq!(dashboard.active_employees, 2);
    assert_eq!(dashboard.total_reviews, 2);
    assert_eq!(dashboard.completed_reviews, 1);
    assert_eq!(dashboard.pending_reviews, 1);
    assert_eq!(dashboard.completion_rate, 33.33);
    assert_eq!(dashboard.average_score, Some(4.0));
    assert_eq!(dashboard.average_rating, "Exceeds Expectations");
    assert_eq!(dashboard.awaiting_review.len(), 1);
    assert_eq!(dashboard.awaiting_review[0].employee_id, ben.id);
}

#[test]
fn dashboard_rates_the_unrounded_average() {
    let (service, _, _, _) = build_service();
    let ana = service
        .register_employee(employee_draft("Ana Cruz", "Lending"))
        .expect("employee registers");
    let ben = service
        .register_employee(employee_draft("Ben Reyes", "Lending"))
        .expect("employee registers");

    let mut edged = uniform_form(3.0);
    edged.job_knowledge = RatedField::rated(3.05, "");
    for (employee, form) in [(&ana, uniform_form(3.0)), (&ben, edged)] {
        let review = service
            .submit(submission_for(&employee.id, form))
            .expect("submission accepted");
        service
            .decide(&review.id, completed("ok"))
            .expect("decision recorded");
    }

    let dashboard = service.dashboard().expect("dashboard");

    assert_eq!(dashboard.average_score, Some(3.0));
    assert_eq!(dashboard.average_rating, "Exceeds Expectations");
}

#[test]
fn activities_are_newest_first() {
    let (service, employee) = seeded_service();
    let review = service
        .submit(submission_for(&employee.id, uniform_form(3.0)))
        .expect("submission accepted");
    service.delete(&review.id).expect("delete succeeds");

    let activities = service.activities(Some(2)).expect("activities");
    let kinds: Vec<ActivityKind> = activities.iter().map(|activity| activity.kind).collect();
    assert_eq!(
        kinds,
        vec![ActivityKind::ReviewDeleted, ActivityKind::ReviewSubmitted]
    );
}

#[test]
fn submit_surfaces_repository_conflicts() {
    let employees = Arc::new(MemoryEmployees::default());
    let service = PerformanceReviewService::new(
        Arc::new(ConflictReviews),
        employees,
        Arc::new(MemoryActivity::default()),
    );
    let employee = service
        .register_employee(employee_draft("Ana Cruz", "Lending"))
        .expect("employee registers");

    assert!(matches!(
        service.submit(submission_for(&employee.id, uniform_form(3.0))),
        Err(ReviewServiceError::Repository(RepositoryError::Conflict))
    ));
}

#[test]
fn listing_surfaces_unavailable_storage() {
    let service = PerformanceReviewService::new(
        Arc::new(OfflineReviews),
        Arc::new(MemoryEmployees::default()),
        Arc::new(MemoryActivity::default()),
    );

    match service.recent(None) {
        Err(ReviewServiceError::Repository(RepositoryError::Unavailable(reason))) => {
            assert_eq!(reason, "database offline")
        }
        other => panic!("expected unavailable repository, got {other:?}"),
    }
}
