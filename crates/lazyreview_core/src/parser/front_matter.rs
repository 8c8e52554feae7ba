//! `---`-delimited front-matter block parsing and rendering.
//!
//! # Responsibility
//! - Split a document into its front-matter block and body.
//! - Coerce each `key: value` line into a typed `FrontMatterValue`.
//! - Render a `FrontMatter` back into a block that re-parses identically.
//!
//! # Invariants
//! - Never fails: documents without a complete block return an empty map
//!   and the original text.
//! - Coercion order is bool → integer → float → date/date-time → list →
//!   string; quoted values are always strings.

use crate::model::document::{FrontMatter, FrontMatterValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

const DELIMITER: &str = "---";

static INTEGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?\d+$").expect("valid integer regex"));
static FLOAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?(?:\d+\.\d*|\.\d+)(?:[eE][-+]?\d+)?$").expect("valid float regex"));
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));
static DATE_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}").expect("valid date-time regex"));

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Splits `input` into its parsed front matter and the remaining body.
///
/// The body starts on the line after the closing delimiter. Input that does
/// not open with a delimiter line, or never closes the block, is returned
/// unchanged with an empty map.
pub fn split_front_matter(input: &str) -> (FrontMatter, &str) {
    let start = if input.starts_with('\u{feff}') { 3 } else { 0 };
    let mut lines = input[start..].split_inclusive('\n');

    let Some(first) = lines.next() else {
        return (FrontMatter::new(), input);
    };
    if first.trim_end() != DELIMITER {
        return (FrontMatter::new(), input);
    }

    let block_start = start + first.len();
    let mut offset = block_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let front_matter = parse_front_matter_block(&input[block_start..offset]);
            return (front_matter, &input[offset + line.len()..]);
        }
        offset += line.len();
    }

    (FrontMatter::new(), input)
}

/// Parses the lines between the delimiters.
///
/// Lines without a colon, blank lines and `#` comments are skipped.
pub fn parse_front_matter_block(block: &str) -> FrontMatter {
    let mut front_matter = FrontMatter::new();
    for line in block.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        front_matter.insert(key, coerce_value(value));
    }
    front_matter
}

/// Coerces one raw value into its typed form.
pub fn coerce_value(raw: &str) -> FrontMatterValue {
    let value = raw.trim();

    if let Some(unquoted) = strip_quotes(value) {
        return FrontMatterValue::String(unquoted.to_string());
    }

    match value {
        "true" => return FrontMatterValue::Bool(true),
        "false" => return FrontMatterValue::Bool(false),
        _ => {}
    }

    if INTEGER_RE.is_match(value) {
        if let Ok(number) = value.parse::<i64>() {
            return FrontMatterValue::Integer(number);
        }
    }
    if INTEGER_RE.is_match(value) || FLOAT_RE.is_match(value) {
        if let Ok(number) = value.parse::<f64>() {
            return FrontMatterValue::Float(number);
        }
    }

    if DATE_RE.is_match(value) {
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return FrontMatterValue::Date(date);
        }
    }
    if DATE_TIME_RE.is_match(value) {
        if let Some(date_time) = parse_date_time(value) {
            return FrontMatterValue::DateTime(date_time);
        }
    }

    if let Some(inner) = value.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        let items = inner
            .split(',')
            .map(|item| {
                let item = item.trim();
                strip_quotes(item).unwrap_or(item).to_string()
            })
            .filter(|item| !item.is_empty())
            .collect();
        return FrontMatterValue::List(items);
    }

    FrontMatterValue::String(value.to_string())
}

/// Renders a complete block including both delimiter lines and a trailing
/// newline.
pub fn render_front_matter(front_matter: &FrontMatter) -> String {
    let mut out = String::from(DELIMITER);
    out.push('\n');
    for (key, value) in front_matter.iter() {
        out.push_str(key);
        out.push_str(": ");
        out.push_str(&render_value(value));
        out.push('\n');
    }
    out.push_str(DELIMITER);
    out.push('\n');
    out
}

fn render_value(value: &FrontMatterValue) -> String {
    match value {
        // Strings that would coerce into another variant must stay quoted.
        FrontMatterValue::String(text) if coerce_value(text) != *value => {
            format!("\"{text}\"")
        }
        other => other.to_string(),
    }
}

fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|date_time| date_time.naive_local())
        })
}

fn strip_quotes(value: &str) -> Option<&str> {
    if value.len() < 2 {
        return None;
    }
    let quoted = (value.starts_with('"') && value.ends_with('"'))
        || (value.starts_with('\'') && value.ends_with('\''));
    quoted.then(|| &value[1..value.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::{coerce_value, render_front_matter, split_front_matter};
    use crate::model::document::{FrontMatter, FrontMatterValue};
    use chrono::NaiveDate;

    #[test]
    fn parses_typed_values_in_order() {
        let input = "---\ntitle: Test\ndate: 2025-01-06\npublished: true\nversion: 1.5\ntags: [a, b, c]\n---\n# Body\n";
        let (front_matter, body) = split_front_matter(input);

        assert_eq!(
            front_matter.keys().collect::<Vec<_>>(),
            vec!["title", "date", "published", "version", "tags"]
        );
        assert_eq!(
            front_matter.get("title"),
            Some(&FrontMatterValue::String("Test".to_string()))
        );
        assert_eq!(
            front_matter.get("date"),
            Some(&FrontMatterValue::Date(
                NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
            ))
        );
        assert_eq!(front_matter.get("published"), Some(&FrontMatterValue::Bool(true)));
        assert_eq!(front_matter.get("version"), Some(&FrontMatterValue::Float(1.5)));
        assert_eq!(
            front_matter.get("tags"),
            Some(&FrontMatterValue::List(vec![
                "a".to_string(),
                "b".to_string(),
                "c".to_string()
            ]))
        );
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn missing_block_returns_input_unchanged() {
        let input = "# Just a heading\n\nSome body text.";
        let (front_matter, body) = split_front_matter(input);
        assert!(front_matter.is_empty());
        assert_eq!(body, input);
    }

    #[test]
    fn unclosed_block_returns_input_unchanged() {
        let input = "---\ntitle: Dangling\n# Heading\n";
        let (front_matter, body) = split_front_matter(input);
        assert!(front_matter.is_empty());
        assert_eq!(body, input);
    }

    #[test]
    fn lines_without_colon_are_skipped() {
        let (front_matter, _) = split_front_matter("---\njust words\nmood: good\n---\n");
        assert_eq!(front_matter.len(), 1);
        assert_eq!(
            front_matter.get("mood").and_then(FrontMatterValue::as_str),
            Some("good")
        );
    }

    #[test]
    fn value_keeps_text_after_first_colon() {
        assert_eq!(
            coerce_value(" 10:30 standup"),
            FrontMatterValue::String("10:30 standup".to_string())
        );
    }

    #[test]
    fn quoted_values_stay_strings() {
        assert_eq!(coerce_value("\"42\""), FrontMatterValue::String("42".to_string()));
        assert_eq!(coerce_value("'true'"), FrontMatterValue::String("true".to_string()));
    }

    #[test]
    fn coerces_integers_date_times_and_empty_lists() {
        assert_eq!(coerce_value("7"), FrontMatterValue::Integer(7));
        assert_eq!(coerce_value("-3"), FrontMatterValue::Integer(-3));
        assert_eq!(coerce_value("[]"), FrontMatterValue::List(Vec::new()));
        let value = coerce_value("2026-02-18T14:32:00");
        assert_eq!(
            value.as_date(),
            NaiveDate::from_ymd_opt(2026, 2, 18)
        );
        assert!(matches!(value, FrontMatterValue::DateTime(_)));
    }

    #[test]
    fn invalid_calendar_dates_fall_back_to_string() {
        assert_eq!(
            coerce_value("2025-13-40"),
            FrontMatterValue::String("2025-13-40".to_string())
        );
    }

    #[test]
    fn rendered_block_reparses_to_the_same_map() {
        let mut front_matter = FrontMatter::new();
        front_matter.insert("week", FrontMatterValue::Integer(2));
        front_matter.insert(
            "start_date",
            FrontMatterValue::Date(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()),
        );
        front_matter.insert("ratio", FrontMatterValue::Float(3.0));
        front_matter.insert("label", FrontMatterValue::String("123".to_string()));
        front_matter.insert("done", FrontMatterValue::Bool(false));

        let rendered = render_front_matter(&front_matter);
        let (reparsed, body) = split_front_matter(&rendered);
        assert_eq!(reparsed, front_matter);
        assert_eq!(body, "");
    }
}
