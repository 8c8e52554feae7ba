//! Canonical markdown rendering for weekly and monthly reviews.
//!
//! # Responsibility
//! - Serialize review records into deterministic markdown.
//! - Name rendered files canonically (`YYYY-Www.md`, `YYYY-MM.md`).
//!
//! # Invariants
//! - Heading text is byte-exact; template validators match on it.
//! - Front matter re-parses to the scalar fields it was rendered from.
//! - Empty lists render one placeholder item, never a bare heading.

use crate::model::document::{FrontMatter, FrontMatterValue};
use crate::model::review::{MonthlyReview, WeeklyReview};
use crate::parser::front_matter::render_front_matter;
use chrono::{Datelike, NaiveDate};

pub const SUMMARY_HEADING: &str = "Summary";
pub const TOP_WINS_HEADING: &str = "Top Wins";
pub const PATTERNS_OBSERVED_HEADING: &str = "Patterns Observed";
pub const NEXT_WEEK_GOALS_HEADING: &str = "Goals for Next Week";
pub const TOP_ACHIEVEMENTS_HEADING: &str = "Top Achievements";
pub const SIGNIFICANT_WINS_HEADING: &str = "Most Significant Wins";
pub const PATTERNS_INSIGHTS_HEADING: &str = "Patterns & Insights";
pub const WEEKLY_BREAKDOWN_HEADING: &str = "Weekly Breakdown";

pub const NO_WINS_PLACEHOLDER: &str = "_No wins recorded_";
pub const NO_PATTERNS_PLACEHOLDER: &str = "_No notable patterns detected_";
pub const NO_GOALS_PLACEHOLDER: &str = "_No goals recorded_";
pub const NO_ACHIEVEMENTS_PLACEHOLDER: &str = "_No achievements recorded_";

/// Renders a weekly review.
pub fn generate_weekly_review_markdown(review: &WeeklyReview) -> String {
    let iso_year = review.start_date.iso_week().year();

    let mut front_matter = FrontMatter::new();
    front_matter.insert("week", FrontMatterValue::Integer(i64::from(review.week_number)));
    front_matter.insert("year", FrontMatterValue::Integer(i64::from(iso_year)));
    front_matter.insert("start_date", FrontMatterValue::Date(review.start_date));
    front_matter.insert("end_date", FrontMatterValue::Date(review.end_date));
    insert_task_scalars(
        &mut front_matter,
        review.completion_rate,
        review.total_tasks,
        review.completed_tasks,
    );

    let mut out = render_front_matter(&front_matter);
    out.push_str(&format!(
        "\n# Weekly Review - Week {}, {}\n\n",
        review.week_number, iso_year
    ));

    push_heading(&mut out, SUMMARY_HEADING);
    out.push_str(&format!(
        "- **Period**: {} to {}\n",
        format_date(review.start_date),
        format_date(review.end_date)
    ));
    if !review.daily_logs.is_empty() {
        out.push_str(&format!("- **Days Logged**: {}\n", review.days_logged()));
    }
    push_task_summary(&mut out, review.completed_tasks, review.total_tasks, review.completion_rate);

    push_heading(&mut out, TOP_WINS_HEADING);
    push_numbered(&mut out, &review.top_wins, NO_WINS_PLACEHOLDER);

    push_heading(&mut out, PATTERNS_OBSERVED_HEADING);
    push_bullets(&mut out, &review.patterns, NO_PATTERNS_PLACEHOLDER);

    push_heading(&mut out, NEXT_WEEK_GOALS_HEADING);
    push_bullets(&mut out, &review.goals, NO_GOALS_PLACEHOLDER);

    trim_trailing_blank_line(out)
}

/// Renders a monthly review.
pub fn generate_monthly_review_markdown(review: &MonthlyReview) -> String {
    let mut front_matter = FrontMatter::new();
    front_matter.insert("month", FrontMatterValue::Integer(i64::from(review.month)));
    front_matter.insert("year", FrontMatterValue::Integer(i64::from(review.year)));
    insert_task_scalars(
        &mut front_matter,
        review.completion_rate,
        review.total_tasks,
        review.completed_tasks,
    );

    let mut out = render_front_matter(&front_matter);
    out.push_str(&format!(
        "\n# Monthly Review - {} {}\n\n",
        month_name(review.year, review.month),
        review.year
    ));

    push_heading(&mut out, SUMMARY_HEADING);
    out.push_str(&format!(
        "- **Weeks Reviewed**: {}\n",
        review.weekly_reviews.len()
    ));
    push_task_summary(&mut out, review.completed_tasks, review.total_tasks, review.completion_rate);

    push_heading(&mut out, TOP_ACHIEVEMENTS_HEADING);
    push_bullets(&mut out, &review.achievements, NO_ACHIEVEMENTS_PLACEHOLDER);

    push_heading(&mut out, SIGNIFICANT_WINS_HEADING);
    push_numbered(&mut out, &review.top_wins, NO_WINS_PLACEHOLDER);

    push_heading(&mut out, PATTERNS_INSIGHTS_HEADING);
    push_bullets(&mut out, &review.patterns, NO_PATTERNS_PLACEHOLDER);

    push_heading(&mut out, WEEKLY_BREAKDOWN_HEADING);
    out.push_str("| Week | Period | Tasks | Completion |\n");
    out.push_str("|------|--------|-------|------------|\n");
    for week in &review.weekly_reviews {
        out.push_str(&format!(
            "| {} | {} to {} | {}/{} | {}% |\n",
            week.week_number,
            format_date(week.start_date),
            format_date(week.end_date),
            week.completed_tasks,
            week.total_tasks,
            week.completion_rate
        ));
    }

    out
}

/// `YYYY-Www.md`, using the ISO year of `start_date`.
pub fn weekly_review_file_name(review: &WeeklyReview) -> String {
    format!(
        "{}-W{:02}.md",
        review.start_date.iso_week().year(),
        review.week_number
    )
}

/// `YYYY-MM.md`.
pub fn monthly_review_file_name(review: &MonthlyReview) -> String {
    format!("{}-{:02}.md", review.year, review.month)
}

fn insert_task_scalars(front_matter: &mut FrontMatter, rate: u32, total: u32, completed: u32) {
    front_matter.insert("completion_rate", FrontMatterValue::Integer(i64::from(rate)));
    front_matter.insert("total_tasks", FrontMatterValue::Integer(i64::from(total)));
    front_matter.insert(
        "completed_tasks",
        FrontMatterValue::Integer(i64::from(completed)),
    );
}

fn push_heading(out: &mut String, heading: &str) {
    out.push_str(&format!("## {heading}\n\n"));
}

fn push_task_summary(out: &mut String, completed: u32, total: u32, rate: u32) {
    out.push_str(&format!("- **Tasks Completed**: {completed}/{total}\n"));
    out.push_str(&format!("- **Completion Rate**: {rate}%\n\n"));
}

fn push_bullets(out: &mut String, items: &[String], placeholder: &str) {
    if items.is_empty() {
        out.push_str(&format!("- {placeholder}\n"));
    }
    for item in items {
        out.push_str(&format!("- {item}\n"));
    }
    out.push('\n');
}

fn push_numbered(out: &mut String, items: &[String], placeholder: &str) {
    if items.is_empty() {
        out.push_str(&format!("- {placeholder}\n"));
    }
    for (idx, item) in items.iter().enumerate() {
        out.push_str(&format!("{}. {item}\n", idx + 1));
    }
    out.push('\n');
}

fn trim_trailing_blank_line(mut out: String) -> String {
    if out.ends_with("\n\n") {
        out.pop();
    }
    out
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn month_name(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.format("%B").to_string())
        .unwrap_or_else(|| month.to_string())
}
