use super::{SectionState, SelectionPlan};
use crate::formats::markdown::MarkdownFormat;
use crate::input::split_lines;
use crate::outline::Outline;
use crate::parser::parse;
use crate::projector::project;
use std::fs;
use std::path::Path;
use tempfile::NamedTempFile;

const DOC: &str = "# A\ntext1\n## B\ntext2\n# C\ntext3\n";

fn parse_str(text: &str) -> Outline {
    parse(split_lines(text), &MarkdownFormat)
}

#[test]
fn test_plan_captures_toggle_state() {
    let mut outline = parse_str(DOC);
    outline.set_enabled(outline.roots()[1], false);

    let plan = SelectionPlan::from_outline(Path::new("CLAUDE.md"), &outline);

    assert_eq!(plan.file_name, "CLAUDE.md");
    assert_eq!(plan.sections.len(), 3);
    assert_eq!(
        plan.sections[2],
        SectionState {
            level: 1,
            title: "C".to_string(),
            line_start: 4,
            enabled: false,
        }
    );
    assert!(plan.sections[0].enabled);
}

#[test]
fn test_plan_replays_onto_fresh_parse() {
    let mut outline = parse_str(DOC);
    let a = outline.roots()[0];
    outline.set_enabled(a, false);
    let plan = SelectionPlan::from_outline(Path::new("CLAUDE.md"), &outline);

    let mut fresh = parse_str(DOC);
    assert_eq!(plan.apply(&mut fresh), 3);
    assert_eq!(
        project(&fresh, &MarkdownFormat),
        project(&outline, &MarkdownFormat)
    );
}

#[test]
fn test_stale_entries_are_skipped() {
    let plan = SelectionPlan {
        file_name: "CLAUDE.md".to_string(),
        sections: vec![
            SectionState {
                level: 1,
                title: "A".to_string(),
                line_start: 0,
                enabled: false,
            },
            SectionState {
                level: 2,
                title: "Gone".to_string(),
                line_start: 9,
                enabled: false,
            },
        ],
    };

    let mut outline = parse_str(DOC);
    assert_eq!(plan.apply(&mut outline), 1);
    assert!(!outline.get(outline.roots()[0]).enabled);
    assert!(outline.get(outline.roots()[1]).enabled);
}

#[test]
fn test_plan_loads_from_json_file() {
    let outline = parse_str(DOC);
    let plan = SelectionPlan::from_outline(Path::new("CLAUDE.md"), &outline);

    let file = NamedTempFile::new().unwrap();
    fs::write(file.path(), plan.to_json().unwrap()).unwrap();

    assert_eq!(SelectionPlan::load(file.path()).unwrap(), plan);
}

#[test]
fn test_invalid_plan_is_an_error() {
    let file = NamedTempFile::new().unwrap();
    fs::write(file.path(), "{ not json").unwrap();

    assert!(matches!(
        SelectionPlan::load(file.path()),
        Err(crate::error::Error::Selection(_))
    ));
}
