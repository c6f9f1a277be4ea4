//! Regenerates a document from the enabled sections of an outline.
//!
//! A disabled section drops its own header and body, but its subsections are still visited,
//! so an enabled child of a disabled parent is emitted without the parent's heading.

use crate::formats::Format;
use crate::outline::Outline;
use crate::section::SectionId;

#[must_use]
/// Concatenates the headers and bodies of every enabled section in document order.
///
/// Headers are regenerated from level and title and keep the source heading's line ending
/// (`\r\n` stays `\r\n`). Body lines that look like headings are skipped so no heading is
/// written twice.
pub fn project<F: Format>(outline: &Outline, format: &F) -> String {
    let mut out = String::new();
    for &root in outline.roots() {
        emit(outline, root, format, &mut out);
    }
    out
}

fn emit<F: Format>(outline: &Outline, id: SectionId, format: &F, out: &mut String) {
    let section = outline.get(id);

    if section.enabled {
        out.push_str(&section.full_title());
        let header = section.content_lines.first().map_or("", String::as_str);
        out.push_str(line_terminator(header));

        for line in section.content_lines.iter().skip(1) {
            if format.heading(line).is_some() {
                continue;
            }
            out.push_str(line);
        }
    }

    for &child in outline.children(id) {
        emit(outline, child, format, out);
    }
}

/// `\r\n` when the source heading line used it, `\n` otherwise.
fn line_terminator(header: &str) -> &'static str {
    if header.ends_with("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

#[cfg(test)]
#[path = "tests/projector.rs"]
mod tests;
