use super::{extract_sections, pick_candidate, read_lines, resolve_target, split_lines};
use crate::config::Config;
use crate::error::Error;
use crate::formats::markdown::MarkdownFormat;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_split_keeps_terminators() {
    assert_eq!(split_lines("a\nb\r\nc"), vec!["a\n", "b\r\n", "c"]);
    assert!(split_lines("").is_empty());
}

#[test]
fn test_read_missing_file_is_not_found() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("CLAUDE.md");

    match read_lines(&path) {
        Err(Error::NotFound(missing)) => assert_eq!(missing, path),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_extract_sections_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("CLAUDE.md");
    fs::write(&path, "# Rules\n- be terse\n## Style\n- no emoji\n").unwrap();

    let outline = extract_sections(&path, &MarkdownFormat).unwrap();
    assert_eq!(outline.len(), 2);
    assert_eq!(outline.lines().len(), 4);
}

#[test]
fn test_explicit_target_must_exist() {
    let dir = tempdir().unwrap();
    let cfg = Config::default();

    let present = dir.path().join("custom.md");
    fs::write(&present, "# X\n").unwrap();
    assert_eq!(resolve_target(Some(present.clone()), &cfg).unwrap(), present);

    let absent = dir.path().join("absent.md");
    assert!(matches!(
        resolve_target(Some(absent), &cfg),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn test_project_candidate_wins() {
    let dir = tempdir().unwrap();
    let project = dir.path().join("project.md");
    let global = dir.path().join("global.md");
    fs::write(&project, "# P\n").unwrap();
    fs::write(&global, "# G\n").unwrap();

    assert_eq!(pick_candidate(project.clone(), global).unwrap(), project);
}

#[test]
fn test_global_candidate_fallback() {
    let dir = tempdir().unwrap();
    let project = dir.path().join("project.md");
    let global = dir.path().join("global.md");
    fs::write(&global, "# G\n").unwrap();

    assert_eq!(pick_candidate(project, global.clone()).unwrap(), global);
}

#[test]
fn test_no_candidate_reports_both_paths() {
    let dir = tempdir().unwrap();
    let project = dir.path().join("project.md");
    let global = dir.path().join("global.md");

    let err = pick_candidate(project.clone(), global.clone()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains(&project.display().to_string()));
    assert!(message.contains(&global.display().to_string()));
}
