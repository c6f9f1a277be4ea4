use super::parse;
use crate::formats::markdown::MarkdownFormat;
use crate::input::split_lines;
use crate::outline::Outline;
use crate::section::SectionId;
use proptest::prelude::*;

fn parse_str(text: &str) -> Outline {
    parse(split_lines(text), &MarkdownFormat)
}

fn titles(outline: &Outline, ids: &[SectionId]) -> Vec<String> {
    ids.iter().map(|&id| outline.get(id).title.clone()).collect()
}

#[test]
fn test_basic_hierarchy() {
    let outline = parse_str("# A\ntext1\n## B\ntext2\n# C\ntext3\n");

    assert_eq!(titles(&outline, outline.roots()), vec!["A", "C"]);

    let a = outline.roots()[0];
    let c = outline.roots()[1];
    assert_eq!(titles(&outline, outline.children(a)), vec!["B"]);
    assert!(outline.children(c).is_empty());

    let b = outline.children(a)[0];
    assert_eq!(outline.get(b).level, 2);
    assert_eq!(outline.parent(b), Some(a));
    assert_eq!(outline.parent(a), None);

    assert_eq!(outline.get(a).content_lines, vec!["# A\n", "text1\n"]);
    assert_eq!(outline.get(b).content_lines, vec!["## B\n", "text2\n"]);
    assert_eq!(outline.get(c).content_lines, vec!["# C\n", "text3\n"]);
}

#[test]
fn test_line_ranges() {
    let outline = parse_str("# A\ntext1\n## B\ntext2\n# C\ntext3\n");
    let ranges: Vec<_> = outline
        .iter()
        .map(|(_, s)| (s.line_start, s.line_end, s.subtree_end))
        .collect();

    // A's own content stops before B, but its subtree runs until C.
    assert_eq!(ranges, vec![(0, 1, 3), (2, 3, 3), (4, 5, 5)]);
}

#[test]
fn test_heading_closes_deeper_not_shallower() {
    let outline = parse_str("# A\n### Deep\n## B\n#### Deeper\n# C\n");

    let a = outline.roots()[0];
    assert_eq!(titles(&outline, outline.roots()), vec!["A", "C"]);
    assert_eq!(titles(&outline, outline.children(a)), vec!["Deep", "B"]);

    let b = outline.children(a)[1];
    assert_eq!(titles(&outline, outline.children(b)), vec!["Deeper"]);
}

#[test]
fn test_headings_in_code_blocks_are_ignored() {
    let outline = parse_str("# Setup\n```bash\n# install deps\nmake\n```\nafter\n");

    assert_eq!(outline.len(), 1);
    let setup = outline.get(outline.roots()[0]);
    assert_eq!(setup.title, "Setup");
    assert_eq!(setup.content_lines.len(), 6);
    assert_eq!(setup.content_lines[2], "# install deps\n");
}

#[test]
fn test_unterminated_fence_before_headings() {
    let outline = parse_str("intro\n```\n# A\ntext\n## B\n");
    assert!(outline.is_empty());
}

#[test]
fn test_unterminated_fence_swallows_rest() {
    let outline = parse_str("# A\n```\n# B\n## C\n");

    assert_eq!(outline.len(), 1);
    let a = outline.get(outline.roots()[0]);
    assert_eq!(a.line_end, 3);
    assert_eq!(a.content_lines.len(), 4);
}

#[test]
fn test_preamble_belongs_to_no_section() {
    let outline = parse_str("Preamble line\n\n# First\nbody\n");

    assert_eq!(outline.len(), 1);
    let first = outline.get(outline.roots()[0]);
    assert_eq!(first.line_start, 2);
    assert_eq!(first.content_lines, vec!["# First\n", "body\n"]);
}

#[test]
fn test_duplicate_titles_stay_distinct() {
    let outline = parse_str("# Notes\na\n# Notes\nb\n");

    let first = outline.get(outline.roots()[0]);
    let second = outline.get(outline.roots()[1]);
    assert_eq!(first.title, second.title);
    assert_ne!(first, second);
    assert_ne!(first.key(), second.key());
    assert_eq!(outline.find(&second.key()), Some(outline.roots()[1]));
}

#[test]
fn test_malformed_headings_are_content() {
    let outline = parse_str("# Real\n#hashtag\n####### seven\n#\n");

    assert_eq!(outline.len(), 1);
    assert_eq!(outline.get(outline.roots()[0]).content_lines.len(), 4);
}

#[test]
fn test_empty_document() {
    let outline = parse_str("");
    assert!(outline.is_empty());
    assert!(outline.roots().is_empty());
}

#[test]
fn test_last_line_without_newline() {
    let outline = parse_str("# A\nbody");
    let a = outline.get(outline.roots()[0]);
    assert_eq!(a.content_lines, vec!["# A\n", "body"]);
    assert_eq!(a.line_end, 1);
}

fn document_lines() -> impl Strategy<Value = Vec<String>> {
    let line = prop::sample::select(vec![
        "# One\n",
        "## Two\n",
        "### Three\n",
        "#### Four\n",
        "text\n",
        "\n",
        "```\n",
        "    # indented\n",
    ]);
    prop::collection::vec(line.prop_map(str::to_string), 0..40)
}

proptest! {
    #[test]
    fn prop_siblings_are_disjoint_and_ordered(lines in document_lines()) {
        let outline = parse(lines, &MarkdownFormat);
        let mut groups: Vec<Vec<SectionId>> = vec![outline.roots().to_vec()];
        groups.extend(outline.iter().map(|(id, _)| outline.children(id).to_vec()));

        for group in groups {
            for pair in group.windows(2) {
                let (left, right) = (outline.get(pair[0]), outline.get(pair[1]));
                prop_assert!(left.subtree_end < right.line_start);
            }
        }
    }

    #[test]
    fn prop_children_nest_inside_parents(lines in document_lines()) {
        let outline = parse(lines, &MarkdownFormat);
        for (id, section) in outline.iter() {
            for ancestor in outline.ancestors(id) {
                let outer = outline.get(ancestor);
                prop_assert!(outer.line_start < section.line_start);
                prop_assert!(section.subtree_end <= outer.subtree_end);
            }
            if let Some(parent) = outline.parent(id) {
                prop_assert!(outline.get(parent).level < section.level);
            }
        }
    }

    #[test]
    fn prop_content_matches_own_range(lines in document_lines()) {
        let outline = parse(lines, &MarkdownFormat);
        for (_, section) in outline.iter() {
            prop_assert_eq!(
                section.content_lines.len(),
                section.line_end - section.line_start + 1
            );
            prop_assert_eq!(
                &section.content_lines[..],
                &outline.lines()[section.line_start..=section.line_end]
            );
        }
    }
}
