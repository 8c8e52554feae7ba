//! Heading, checkbox, list and pipe-table extraction.
//!
//! # Responsibility
//! - Split a markdown body into heading-delimited sections.
//! - Extract checkbox tasks, plain list items and pipe tables from a span.
//!
//! # Invariants
//! - Lines inside fenced code blocks never start sections, tasks, list items
//!   or tables.
//! - Nothing here fails: lines that do not match a construct are ignored.
//! - Extracted tables are rectangular.

use crate::model::document::{Priority, Section, Table, Task};
use once_cell::sync::Lazy;
use regex::Regex;

static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(#{1,6})[ \t]+(.*?)(?:[ \t]+#+)?[ \t]*$").expect("valid heading regex")
});
static TASK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-*]\s+\[([ xX])\]\s*(.*)$").expect("valid task regex"));
static PRIORITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\s*\[(!{1,3})\]\s*$").expect("valid priority regex"));
static LIST_ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[-*]|\d+[.)])\s+(.*\S)\s*$").expect("valid list item regex")
});
static CHECKBOX_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[[ xX]\]").expect("valid checkbox regex"));
static SEPARATOR_CELL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:?-+:?$").expect("valid separator regex"));

/// Splits `body` into sections in document order.
///
/// Non-blank text before the first heading becomes an untitled section with
/// level 0 so its tasks are not lost.
pub fn parse_sections(body: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<(String, u8)> = None;
    let mut content_start = 0;
    let mut offset = 0;
    let mut in_fence = false;

    for line in body.split_inclusive('\n') {
        let text = line.trim_end_matches(['\n', '\r']);
        if is_fence(text) {
            in_fence = !in_fence;
        } else if !in_fence {
            if let Some(caps) = HEADING_RE.captures(text) {
                push_section(&mut sections, current.take(), &body[content_start..offset]);
                current = Some((caps[2].trim().to_string(), caps[1].len() as u8));
                content_start = offset + line.len();
            }
        }
        offset += line.len();
    }
    push_section(&mut sections, current, &body[content_start..]);

    sections
}

/// Extracts checkbox tasks from a content span.
pub fn extract_tasks(content: &str) -> Vec<Task> {
    unfenced_lines(content)
        .into_iter()
        .filter_map(parse_task_line)
        .collect()
}

/// Parses one `- [x] text [!!]` line.
pub fn parse_task_line(line: &str) -> Option<Task> {
    let caps = TASK_RE.captures(line)?;
    let completed = !caps[1].trim().is_empty();
    let body = caps[2].trim();

    let (text, priority) = match PRIORITY_RE.captures(body) {
        Some(marker) => (
            marker[1].trim().to_string(),
            Priority::from_marker_len(marker[2].len()),
        ),
        None => (body.to_string(), None),
    };

    Some(Task {
        text,
        completed,
        priority,
    })
}

/// Extracts plain bullet (`-`, `*`) and numbered list items, skipping
/// checkbox lines.
pub fn extract_list_items(content: &str) -> Vec<String> {
    unfenced_lines(content)
        .into_iter()
        .filter_map(|line| LIST_ITEM_RE.captures(line))
        .map(|caps| caps[1].to_string())
        .filter(|item| !CHECKBOX_PREFIX_RE.is_match(item))
        .collect()
}

/// Extracts every valid pipe table from a content span.
///
/// A table needs a header row with at least one pipe, a separator row with
/// the same number of dash cells, and at least one data row. Anything else
/// is skipped.
pub fn extract_tables(content: &str) -> Vec<Table> {
    let lines = unfenced_lines(content);
    let mut tables = Vec::new();
    let mut idx = 0;

    while idx < lines.len() {
        let header_line = lines[idx].trim();
        let width = lines
            .get(idx + 1)
            .and_then(|next| separator_width(next.trim()));

        if header_line.contains('|') {
            let headers = split_row(header_line);
            if width == Some(headers.len()) {
                let mut rows = Vec::new();
                let mut cursor = idx + 2;
                while let Some(row) = lines.get(cursor).map(|line| line.trim()) {
                    if row.is_empty() || !row.contains('|') {
                        break;
                    }
                    rows.push(fit_row(split_row(row), headers.len()));
                    cursor += 1;
                }
                if !rows.is_empty() {
                    tables.push(Table { headers, rows });
                    idx = cursor;
                    continue;
                }
            }
        }
        idx += 1;
    }

    tables
}

fn push_section(sections: &mut Vec<Section>, heading: Option<(String, u8)>, content: &str) {
    let (heading, level) = match heading {
        Some(found) => found,
        None if content.trim().is_empty() => return,
        None => (String::new(), 0),
    };
    sections.push(Section {
        heading,
        level,
        content: content.to_string(),
        tasks: extract_tasks(content),
        tables: extract_tables(content),
    });
}

fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

fn unfenced_lines(content: &str) -> Vec<&str> {
    let mut in_fence = false;
    content
        .lines()
        .filter(|line| {
            if is_fence(line) {
                in_fence = !in_fence;
                return false;
            }
            !in_fence
        })
        .collect()
}

fn split_row(line: &str) -> Vec<String> {
    let inner = line.strip_prefix('|').unwrap_or(line);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

fn separator_width(line: &str) -> Option<usize> {
    if !line.contains('-') {
        return None;
    }
    let cells = split_row(line);
    cells
        .iter()
        .all(|cell| SEPARATOR_CELL_RE.is_match(cell))
        .then_some(cells.len())
}

fn fit_row(mut cells: Vec<String>, width: usize) -> Vec<String> {
    cells.resize(width, String::new());
    cells
}
