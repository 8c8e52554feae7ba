use chrono::NaiveDate;
use lazyreview_core::{
    extract_tables, find_section, find_sections_containing, get_all_tasks, get_completion_rate,
    parse_document, FrontMatterValue, Priority,
};

#[test]
fn front_matter_values_are_typed() {
    let document = parse_document(
        "---\ntitle: Test\ndate: 2025-01-06\npublished: true\nversion: 1.5\ntags: [a, b, c]\n---\n# Body\n",
    );
    let front_matter = &document.front_matter;

    assert_eq!(front_matter.len(), 5);
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
        front_matter.get("tags").and_then(FrontMatterValue::as_list),
        Some(&["a".to_string(), "b".to_string(), "c".to_string()][..])
    );
    assert_eq!(document.sections.len(), 1);
    assert_eq!(document.sections[0].heading, "Body");
}

#[test]
fn unterminated_front_matter_is_body_text() {
    let input = "---\ntitle: Draft\n# Heading\n- [ ] task\n";
    let document = parse_document(input);
    assert!(document.front_matter.is_empty());
    assert_eq!(document.raw_content, input);
    assert_eq!(get_all_tasks(&document.sections).len(), 1);
}

#[test]
fn high_priority_completed_task() {
    let document = parse_document("## Today\n- [x] High priority task [!!!]\n");
    let tasks = get_all_tasks(&document.sections);
    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].completed);
    assert_eq!(tasks[0].text, "High priority task");
    assert_eq!(tasks[0].priority, Some(Priority::High));
}

#[test]
fn sections_and_tasks_follow_document_order() {
    let document = parse_document(
        "Loose intro\n- [ ] preamble task\n# Day\n## Work\n- [x] one\n* [ ] two\n### Work log\n- [X] three\n",
    );
    let headings: Vec<(&str, u8)> = document
        .sections
        .iter()
        .map(|section| (section.heading.as_str(), section.level))
        .collect();
    assert_eq!(
        headings,
        vec![("", 0), ("Day", 1), ("Work", 2), ("Work log", 3)]
    );
    assert!(document.sections[0].is_untitled());

    let tasks = get_all_tasks(&document.sections);
    let texts: Vec<&str> = tasks.iter().map(|task| task.text.as_str()).collect();
    assert_eq!(texts, vec!["preamble task", "one", "two", "three"]);
    assert_eq!(get_completion_rate(&tasks), 50);

    assert_eq!(find_section(&document.sections, "work").unwrap().level, 2);
    assert_eq!(find_sections_containing(&document.sections, "WORK").count(), 2);
    assert!(find_section(&document.sections, "Missing").is_none());
}

#[test]
fn headings_inside_code_fences_do_not_split_sections() {
    let document = parse_document("## Notes\n```md\n# not a heading\n- [ ] not a task\n```\n");
    assert_eq!(document.sections.len(), 1);
    assert!(document.sections[0].tasks.is_empty());
}

#[test]
fn tables_are_rectangular_and_malformed_ones_skipped() {
    let content = "| Habit | Done |\n|---|:---:|\n| Run | yes |\n| Read |\n\n| A | B |\n|---|\n| 1 | 2 |\n";
    let tables = extract_tables(content);
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].headers, vec!["Habit", "Done"]);
    assert_eq!(tables[0].rows.len(), 2);
    assert_eq!(tables[0].cell(1, "Done"), Some(""));
    assert_eq!(tables[0].cell(0, "Done"), Some("yes"));
}

#[test]
fn empty_task_list_rate_is_zero() {
    assert_eq!(get_completion_rate(&[]), 0);
}
