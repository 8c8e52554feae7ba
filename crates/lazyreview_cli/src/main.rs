//! `lazyreview` command-line entry point.
//!
//! # Responsibility
//! - Wire config, logging and the core readers/aggregators together.
//! - Print rendered reviews or write them to disk.
//!
//! # Invariants
//! - All console output lives here; the core only returns data.
//! - `--out DIR` writes the canonical review file name inside `DIR`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate};
use clap::{Args, Parser, Subcommand};
use lazyreview_core::{
    generate_monthly_review_markdown, generate_weekly_review_markdown, init_logging,
    monthly_review_file_name, read_weekly_reviews, weekly_review_file_name, weeks_starting_in,
    DailyLogReader, DateFallback, ReviewConfig, ReviewService,
};
use log::info;

#[derive(Debug, Parser)]
#[command(
    name = "lazyreview",
    version,
    about = "Roll daily markdown journals up into weekly and monthly reviews"
)]
struct Cli {
    /// TOML file overriding caps, thresholds and heading keywords.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Write rotating log files here instead of stderr.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Aggregate daily logs into a weekly review.
    Weekly(WeeklyArgs),
    /// Aggregate weekly reviews into a monthly review.
    Monthly(MonthlyArgs),
}

#[derive(Debug, Args)]
struct WeeklyArgs {
    /// Directory holding `YYYY-MM-DD.md` daily files.
    #[arg(long)]
    daily_dir: PathBuf,

    /// First day to include (YYYY-MM-DD). Without `--to`, six days follow.
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Fail on daily files whose date cannot be resolved instead of using today.
    #[arg(long, default_value_t = false)]
    strict_dates: bool,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct MonthlyArgs {
    /// Directory holding `YYYY-Www.md` weekly reviews.
    #[arg(long)]
    weekly_dir: PathBuf,

    /// Only weeks starting in this month (YYYY-MM).
    #[arg(long, value_parser = parse_month)]
    month: Option<(i32, u32)>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Output file, or a directory to receive the canonical file name.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Emit the review as JSON instead of markdown.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_dir = cli.log_dir.as_deref().map(absolute_path).transpose()?;
    init_logging(&cli.log_level, log_dir.as_deref()).context("failed to initialize logging")?;

    let config = match &cli.config {
        Some(path) => ReviewConfig::load(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => ReviewConfig::default(),
    };
    let service = ReviewService::new(config);

    match cli.command {
        Command::Weekly(args) => run_weekly(&service, args),
        Command::Monthly(args) => run_monthly(&service, args),
    }
}

fn run_weekly(service: &ReviewService, args: WeeklyArgs) -> Result<()> {
    let fallback = if args.strict_dates {
        DateFallback::Reject
    } else {
        DateFallback::Today
    };
    let reader = DailyLogReader::new(service.config()).with_date_fallback(fallback);

    let logs = match (args.from, args.to) {
        (None, None) => reader.read_daily_logs(&args.daily_dir),
        (from, to) => {
            let from = from.unwrap_or(NaiveDate::MIN);
            let to = to.unwrap_or_else(|| from + Duration::days(6));
            anyhow::ensure!(from <= to, "--from {from} is after --to {to}");
            reader.read_daily_logs_between(&args.daily_dir, from, to)
        }
    }
    .with_context(|| format!("failed to read daily logs: {}", args.daily_dir.display()))?;

    let review = service.aggregate_daily_to_weekly(logs).with_context(|| {
        format!(
            "no daily logs to aggregate in {}",
            args.daily_dir.display()
        )
    })?;
    info!(
        "event=weekly_review_built module=cli status=ok week={} rate={}",
        review.week_number, review.completion_rate
    );

    let body = if args.output.json {
        serde_json::to_string_pretty(&review)?
    } else {
        generate_weekly_review_markdown(&review)
    };
    emit(&args.output, &weekly_review_file_name(&review), &body)
}

fn run_monthly(service: &ReviewService, args: MonthlyArgs) -> Result<()> {
    let mut weeks = read_weekly_reviews(&args.weekly_dir).with_context(|| {
        format!(
            "failed to read weekly reviews: {}",
            args.weekly_dir.display()
        )
    })?;
    if let Some((year, month)) = args.month {
        weeks = weeks_starting_in(weeks, year, month);
    }

    let review = service.aggregate_weekly_to_monthly(weeks).with_context(|| {
        format!(
            "no weekly reviews to aggregate in {}",
            args.weekly_dir.display()
        )
    })?;
    info!(
        "event=monthly_review_built module=cli status=ok month={}-{:02} rate={}",
        review.year, review.month, review.completion_rate
    );

    let body = if args.output.json {
        serde_json::to_string_pretty(&review)?
    } else {
        generate_monthly_review_markdown(&review)
    };
    emit(&args.output, &monthly_review_file_name(&review), &body)
}

fn emit(output: &OutputArgs, canonical_name: &str, body: &str) -> Result<()> {
    let Some(out) = &output.out else {
        println!("{body}");
        return Ok(());
    };

    let path = if out.is_dir() {
        let name = if output.json {
            Path::new(canonical_name).with_extension("json")
        } else {
            PathBuf::from(canonical_name)
        };
        out.join(name)
    } else {
        out.clone()
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output dir: {}", parent.display()))?;
    }
    std::fs::write(&path, body)
        .with_context(|| format!("failed to write review: {}", path.display()))?;
    println!("{}", path.display());
    Ok(())
}

fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    Ok(cwd.join(path))
}

fn parse_month(value: &str) -> Result<(i32, u32), String> {
    let date = NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
        .map_err(|_| format!("expected YYYY-MM, got `{value}`"))?;
    Ok((date.year(), date.month()))
}
