use crate::infra::in_memory_service;
use clap::Args;
use perf_review::error::AppError;
use perf_review::workflows::review::{
    DashboardSummary, Employee, HrDecision, RatedField, ReviewForm, ReviewStatus,
    ReviewSubmission, ReviewSummaryView, Scorecard, ScoringPreviewRequest, DEFAULT_RECENT_LIMIT,
};
use perf_review::workflows::review::scoring::{format_score, score_form, CategoryScore};
use perf_review::workflows::roster::{EmployeeRosterImporter, SAMPLE_ROSTER};
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding a review form or a `{ "categories": [...] }` list
    #[arg(long)]
    pub(crate) form: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Roster CSV to seed employees from (defaults to the bundled sample)
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.form)?;
    let request: ScoringPreviewRequest = serde_json::from_str(&raw)?;

    let scorecard = match request {
        ScoringPreviewRequest::Categories { categories } => Scorecard::from_categories(&categories),
        ScoringPreviewRequest::Form(form) => score_form(&form),
    };

    print!("{}", render_scorecard(&scorecard));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let drafts = match args.roster {
        Some(path) => EmployeeRosterImporter::from_path(path)?,
        None => EmployeeRosterImporter::from_reader(SAMPLE_ROSTER.as_bytes())?,
    };

    let service = in_memory_service(DEFAULT_RECENT_LIMIT);
    println!("Performance review demo");

    let mut registered = Vec::with_capacity(drafts.len());
    for draft in drafts {
        registered.push(service.register_employee(draft)?);
    }
    println!("- {} employees registered", registered.len());

    let Some(employee) = registered.iter().find(|employee| employee.is_active()) else {
        println!("- no active employees to review");
        return Ok(());
    };

    let review = service.submit(demo_submission(employee))?;
    println!(
        "- review {} submitted for {} ({})",
        review.id,
        employee.name,
        review.status.label()
    );

    let review = service.decide(
        &review.id,
        HrDecision {
            status: ReviewStatus::Completed,
            hr_comments: Some("Reviewed with the department head.".to_string()),
        },
    )?;
    println!("- HR decision recorded: {}", review.status.label());

    let summary = service.summary(&review.id)?;
    print!("\n{}", render_summary(&summary));

    let dashboard = service.dashboard()?;
    print!("\n{}", render_dashboard(&dashboard));
    Ok(())
}

fn demo_submission(employee: &Employee) -> ReviewSubmission {
    let rated = RatedField::rated;
    ReviewSubmission {
        employee_id: employee.id.clone(),
        position: employee.position.clone(),
        department: employee.department.clone(),
        review_type: Some("Quarterly".to_string()),
        immediate_supervisor: Some("Department Head".to_string()),
        performance_coverage: Some("Q3".to_string()),
        form: ReviewForm {
            job_knowledge: rated(4.0, "Knows the branch procedures"),
            quality_of_work: rated(4.0, ""),
            promptness_of_work: rated(3.0, "Occasional late reports"),
            quality_meets_standards: rated(4.0, ""),
            quality_timeliness: rated(3.0, ""),
            quality_work_output_volume: rated(4.0, ""),
            quality_consistency: rated(4.0, ""),
            quality_job_targets: rated(5.0, "Beat the quarterly target"),
            adaptability_openness: rated(4.0, ""),
            adaptability_flexibility: rated(4.0, "Covered two branches"),
            adaptability_resilience: rated(4.0, ""),
        },
        final_percentage: None,
        areas_for_improvement: Some("Report turnaround time".to_string()),
        additional_comments: None,
    }
}

fn render_rows(out: &mut String, scores: &[CategoryScore]) {
    let _ = writeln!(
        out,
        "{:<20} {:>6} {:>7} {:>9}",
        "Category", "Score", "Weight", "Weighted"
    );
    for row in scores {
        let _ = writeln!(
            out,
            "{:<20} {:>6} {:>6}% {:>9}",
            row.category,
            format_score(Some(row.score)),
            row.weight,
            format_score(Some(row.weighted_score))
        );
    }
}

pub(crate) fn render_scorecard(scorecard: &Scorecard) -> String {
    let mut out = String::new();
    render_rows(&mut out, &scorecard.scores);
    let _ = writeln!(out, "Total score: {}", format_score(Some(scorecard.total_score)));
    let _ = writeln!(out, "Percentage: {:.2}%", scorecard.percentage);
    match scorecard.band() {
        Some(band) => {
            let _ = writeln!(out, "Rating: {} ({})", band.label(), band.description());
        }
        None => {
            let _ = writeln!(out, "Rating: unrated");
        }
    }
    out
}

pub(crate) fn render_summary(summary: &ReviewSummaryView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Review {} | {} | {} / {}",
        summary.review_id, summary.employee_name, summary.department, summary.position
    );
    render_rows(&mut out, &summary.scores);
    let percentage = summary
        .final_percentage
        .map(|value| format!("{value:.2}%"))
        .unwrap_or_else(|| "--".to_string());
    let _ = writeln!(
        out,
        "Total {} | {} | {}",
        summary.display_score, percentage, summary.final_rating
    );
    let _ = writeln!(out, "Comments: {}", summary.comments);
    if let Some(hr_comments) = &summary.hr_comments {
        let _ = writeln!(out, "HR: {hr_comments}");
    }
    out
}

pub(crate) fn render_dashboard(dashboard: &DashboardSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Dashboard: {} employees ({} active) | {} reviews | {:.2}% completion",
        dashboard.total_employees,
        dashboard.active_employees,
        dashboard.total_reviews,
        dashboard.completion_rate
    );
    let _ = writeln!(
        out,
        "Average score: {} {}",
        format_score(dashboard.average_score),
        dashboard.average_rating
    );
    for entry in &dashboard.department_breakdown {
        let _ = writeln!(
            out,
            "  - {}: {} employees, {} completed reviews",
            entry.department, entry.employees, entry.completed_reviews
        );
    }
    if !dashboard.awaiting_review.is_empty() {
        let names: Vec<&str> = dashboard
            .awaiting_review
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        let _ = writeln!(out, "Awaiting review: {}", names.join(", "));
    }
    out
}
