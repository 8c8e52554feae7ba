//! Document-level parsing and section queries.
//!
//! # Responsibility
//! - Compose front-matter and structural parsing into one `ParsedDocument`.
//! - Provide lookup/flatten helpers used by the readers.
//!
//! # Invariants
//! - `raw_content` is always the exact input, byte order mark included.
//! - A leading byte order mark never reaches the section splitter.
//! - Front matter is stripped before structural parsing, so `---` lines
//!   of the block never reach the section splitter.

use crate::model::document::{ParsedDocument, Section, Task};
use crate::parser::front_matter::split_front_matter;
use crate::parser::structure::{extract_list_items, parse_sections};
use crate::stats::completion_rate;

/// Parses a full markdown document.
pub fn parse_document(input: &str) -> ParsedDocument {
    let text = input.strip_prefix('\u{feff}').unwrap_or(input);
    let (front_matter, body) = split_front_matter(text);
    ParsedDocument {
        front_matter,
        sections: parse_sections(body),
        raw_content: input.to_string(),
    }
}

/// Returns the first section whose heading equals `heading`,
/// case-insensitively.
pub fn find_section<'a>(sections: &'a [Section], heading: &str) -> Option<&'a Section> {
    let wanted = heading.trim().to_lowercase();
    sections
        .iter()
        .find(|section| section.heading.to_lowercase() == wanted)
}

/// Returns every section whose heading contains `needle`, case-insensitively,
/// in document order.
pub fn find_sections_containing<'a>(
    sections: &'a [Section],
    needle: &str,
) -> impl Iterator<Item = &'a Section> {
    let needle = needle.to_lowercase();
    sections
        .iter()
        .filter(move |section| section.heading.to_lowercase().contains(&needle))
}

/// Flattens tasks across sections in document order.
pub fn get_all_tasks(sections: &[Section]) -> Vec<Task> {
    sections
        .iter()
        .flat_map(|section| section.tasks.iter().cloned())
        .collect()
}

/// Plain list items across every section matching any of `keywords`.
pub(crate) fn list_items_under(sections: &[Section], keywords: &[String]) -> Vec<String> {
    sections
        .iter()
        .filter(|section| {
            let heading = section.heading.to_lowercase();
            keywords
                .iter()
                .any(|keyword| heading.contains(&keyword.to_lowercase()))
        })
        .flat_map(|section| extract_list_items(&section.content))
        .collect()
}

/// Percentage of completed tasks, rounded; 0 for an empty list.
pub fn get_completion_rate(tasks: &[Task]) -> u32 {
    let completed = tasks.iter().filter(|task| task.completed).count() as u32;
    completion_rate(completed, tasks.len() as u32)
}

#[cfg(test)]
mod tests {
    use super::{
        find_section, find_sections_containing, get_all_tasks, get_completion_rate,
        parse_document,
    };
    use crate::model::document::Task;

    const DAILY: &str = "---\ndate: 2025-01-06\n---\n# Monday\n\n## Goals\n- [x] write report\n- [ ] call bank\n\n## Wins\n- report done\n\n## Notes\nquiet day\n";

    #[test]
    fn keeps_raw_content_and_strips_front_matter() {
        let doc = parse_document(DAILY);
        assert_eq!(doc.raw_content, DAILY);
        assert!(doc.front_matter.contains_key("date"));
        assert_eq!(doc.sections[0].heading, "Monday");
        assert!(doc.sections.iter().all(|section| !section.content.contains("date:")));
    }

    #[test]
    fn leading_byte_order_mark_is_ignored_for_structure() {
        let input = "\u{feff}## Wins\n- shipped\n";
        let doc = parse_document(input);
        assert_eq!(doc.raw_content, input);
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].heading, "Wins");
        assert_eq!(doc.sections[0].level, 2);

        let with_front_matter = parse_document("\u{feff}---\ndate: 2025-01-06\n---\n# Day\n");
        assert!(with_front_matter.front_matter.contains_key("date"));
        assert_eq!(with_front_matter.sections[0].heading, "Day");
    }

    #[test]
    fn find_section_is_case_insensitive_exact_match() {
        let doc = parse_document(DAILY);
        assert_eq!(
            find_section(&doc.sections, "wins").map(|s| s.heading.as_str()),
            Some("Wins")
        );
        assert!(find_section(&doc.sections, "win").is_none());
        assert_eq!(find_sections_containing(&doc.sections, "WIN").count(), 1);
    }

    #[test]
    fn get_all_tasks_flattens_in_document_order() {
        let doc = parse_document("# A\n- [x] one\n# B\nnothing\n# C\n- [ ] two\n");
        let texts: Vec<String> = get_all_tasks(&doc.sections)
            .into_iter()
            .map(|task| task.text)
            .collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[test]
    fn completion_rate_rounds_and_handles_empty() {
        assert_eq!(get_completion_rate(&[]), 0);
        let tasks = vec![
            Task::new("a", true),
            Task::new("b", true),
            Task::new("c", false),
        ];
        assert_eq!(get_completion_rate(&tasks), 67);
    }
}
