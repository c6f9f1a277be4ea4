//! Builds a section forest from the lines of a document.
//!
//! A heading closes every open heading at its own depth or deeper, never a shallower one.
//! Lines inside fenced blocks are never headings. Once the tree is built, each section is
//! narrowed to its own header and body so that descendants' lines are not counted twice.

use crate::formats::Format;
use crate::outline::Outline;
use crate::section::{Section, SectionId};

/// Parses `lines` into an [`Outline`] using the heading rules of `format`.
///
/// Malformed headings are treated as plain content. An unterminated fence suppresses heading
/// detection for the rest of the document.
pub fn parse<F: Format>(lines: Vec<String>, format: &F) -> Outline {
    let last_line = lines.len().saturating_sub(1);
    let mut outline = Outline::new(lines);
    let mut open: Vec<SectionId> = Vec::new();
    let mut in_code_block = false;
    let mut fence_opened_at = 0;

    let headings: Vec<_> = outline
        .lines()
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            if format.is_fence(line) {
                in_code_block = !in_code_block;
                fence_opened_at = i;
                return None;
            }
            if in_code_block {
                return None;
            }
            format.heading(line).map(|heading| (i, heading))
        })
        .collect();

    if in_code_block {
        tracing::warn!(
            line = fence_opened_at + 1,
            "unterminated code fence; no headings detected after it"
        );
    }

    for (i, heading) in headings {
        while let Some(&top) = open.last() {
            if outline.get(top).level < heading.level {
                break;
            }
            open.pop();
            close(&mut outline, top, i - 1);
        }

        let section = Section::new(heading.level, heading.title, i, last_line);
        let id = outline.push(section, open.last().copied());
        open.push(id);
    }

    for id in open {
        close(&mut outline, id, last_line);
    }

    extract_content(&mut outline);

    tracing::debug!(
        sections = outline.len(),
        roots = outline.roots().len(),
        "parsed outline"
    );
    outline
}

fn close(outline: &mut Outline, id: SectionId, line_end: usize) {
    let section = &mut outline.sections_mut()[id.index()];
    section.line_end = line_end;
    section.subtree_end = line_end;
}

/// Narrows every section to its own header and body lines.
///
/// Arena order is document order, so the first section starting inside a section's window is
/// always the one immediately after it in the arena.
fn extract_content(outline: &mut Outline) {
    let starts: Vec<usize> = outline.iter().map(|(_, s)| s.line_start).collect();
    let lines = outline.lines().to_vec();

    for (i, section) in outline.sections_mut().iter_mut().enumerate() {
        let start = section.line_start;
        let mut end = section.line_end + 1;

        if let Some(&next) = starts.get(i + 1) {
            if next > start && next < end {
                end = next;
            }
        }

        section.content_lines = lines[start..end].to_vec();
        section.line_end = end - 1;
    }
}

#[cfg(test)]
#[path = "tests/parser.rs"]
mod tests;
