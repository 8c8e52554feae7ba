use chrono::{Datelike, Duration, NaiveDate};
use lazyreview_core::{
    aggregate_weekly_to_monthly, MonthlyReview, ReviewConfig, ReviewError, ReviewService,
    WeeklyReview,
};

fn week(start: NaiveDate, total: u32, completed: u32, wins: &[&str]) -> WeeklyReview {
    let rate = if total == 0 {
        0
    } else {
        (completed * 200 + total) / (2 * total)
    };
    WeeklyReview {
        week_number: start.iso_week().week(),
        start_date: start,
        end_date: start + Duration::days(6),
        daily_logs: Vec::new(),
        total_tasks: total,
        completed_tasks: completed,
        completion_rate: rate,
        top_wins: wins.iter().map(|win| win.to_string()).collect(),
        patterns: vec!["Consistent task workload".to_string()],
        goals: Vec::new(),
    }
}

fn january() -> Vec<WeeklyReview> {
    let first = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
    vec![
        week(first, 20, 16, &["Shipped importer", "Ran 10k"]),
        week(first + Duration::days(7), 25, 20, &["Ran 10k", "Fixed CI"]),
        week(first + Duration::days(14), 30, 24, &["Ran 10k", "Fixed CI", "Wrote docs"]),
    ]
}

#[test]
fn three_weeks_match_reference_numbers() {
    let review: MonthlyReview = aggregate_weekly_to_monthly(january()).unwrap();

    assert_eq!((review.year, review.month), (2025, 1));
    assert_eq!(review.total_tasks, 75);
    assert_eq!(review.completed_tasks, 60);
    assert_eq!(review.completion_rate, 80);
    assert!(review
        .achievements
        .iter()
        .any(|achievement| achievement.contains("High performance")));
    assert_eq!(
        review.achievements[0],
        "Completed 60 of 75 tasks across 3 weeks"
    );
    assert_eq!(review.patterns, vec!["Consistent task workload".to_string()]);
}

#[test]
fn wins_rank_by_weeks_mentioned() {
    let review = aggregate_weekly_to_monthly(january()).unwrap();
    assert_eq!(
        review.top_wins,
        vec!["Ran 10k", "Fixed CI", "Shipped importer", "Wrote docs"]
    );
}

#[test]
fn wins_cap_at_fifteen() {
    let start = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    let labels: Vec<String> = (0..20).map(|idx| format!("win {idx}")).collect();
    let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
    let review = aggregate_weekly_to_monthly(vec![week(start, 1, 1, &refs)]).unwrap();
    assert_eq!(review.top_wins.len(), 15);
}

#[test]
fn weeks_are_ordered_before_deriving_month() {
    let mut weeks = january();
    weeks.reverse();
    let review = aggregate_weekly_to_monthly(weeks).unwrap();
    assert_eq!(review.month, 1);
    assert_eq!(review.weekly_reviews[0].total_tasks, 20);
}

#[test]
fn low_month_skips_high_performance_and_names_strongest_week() {
    let first = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
    let weeks = vec![
        week(first, 10, 3, &[]),
        week(first + Duration::days(7), 10, 7, &[]),
    ];
    let review = ReviewService::new(ReviewConfig::default())
        .aggregate_weekly_to_monthly(weeks)
        .unwrap();
    assert_eq!(review.completion_rate, 50);
    assert!(!review
        .achievements
        .iter()
        .any(|achievement| achievement.contains("High performance")));
    assert_eq!(
        review.achievements.last().unwrap(),
        "Strongest week: Week 7 at 70% completion"
    );
}

#[test]
fn empty_batch_is_a_usage_error() {
    let err = aggregate_weekly_to_monthly(Vec::new()).unwrap_err();
    assert!(matches!(err, ReviewError::Usage(_)));
}
