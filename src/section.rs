//! Section representation for parsed CLAUDE.md documents.
//!
//! A section represents one ATX heading and the text beneath it. Sections live in a single
//! arena owned by [`crate::outline::Outline`] and refer to each other by [`SectionId`], so the
//! parent back-reference is just an index and never an ownership edge.

use std::hash::{Hash, Hasher};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Stable index of a section within its outline arena.
pub struct SectionId(pub usize);

impl SectionId {
    #[must_use]
    /// Position of the section in the arena (and in document order).
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Identity of a section across parses: heading depth, title and starting line.
///
/// Duplicate titles at different positions stay distinguishable because the line is part of
/// the key.
pub struct SectionKey {
    /// Heading depth.
    pub level: usize,
    /// Heading text.
    pub title: String,
    /// Zero-based line of the heading.
    pub line_start: usize,
}

#[derive(Clone, Debug)]
/// Hierarchical document division with line coordinates and its own text.
pub struct Section {
    /// Number of leading `#` characters (1 to 6).
    pub level: usize,
    /// Heading text without markup, whitespace-trimmed.
    pub title: String,
    /// Zero-based line of the heading.
    pub line_start: usize,
    /// Last line of the section's own content (inclusive), before any child heading.
    pub line_end: usize,
    /// Last line of the section including all of its descendants (inclusive).
    pub subtree_end: usize,
    /// Whether the section is kept when the document is regenerated.
    pub enabled: bool,
    /// Source lines owned by this section, heading first, terminators preserved.
    pub content_lines: Vec<String>,
    /// Containing section, if any.
    pub parent: Option<SectionId>,
    /// Directly nested subsections in document order.
    pub children: Vec<SectionId>,
}

impl Section {
    #[must_use]
    /// Creates an enabled section whose range is still open.
    pub fn new(level: usize, title: String, line_start: usize, line_end: usize) -> Self {
        Self {
            level,
            title,
            line_start,
            line_end,
            subtree_end: line_end,
            enabled: true,
            content_lines: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    /// The identity triple used for equality, hashing and lookup.
    pub fn key(&self) -> SectionKey {
        SectionKey {
            level: self.level,
            title: self.title.clone(),
            line_start: self.line_start,
        }
    }

    #[must_use]
    /// Regenerated heading line, e.g. `## Title`.
    pub fn full_title(&self) -> String {
        format!("{} {}", "#".repeat(self.level), self.title)
    }

    #[must_use]
    /// Menu entry text: `[*] Title` when enabled, `[ ] Title` when not, with a `--->` marker
    /// for sections that have subsections.
    pub fn label(&self) -> String {
        let state_char = if self.enabled { '*' } else { ' ' };
        let subsection_indicator = if self.children.is_empty() {
            ""
        } else {
            " --->"
        };
        format!("[{state_char}] {}{subsection_indicator}", self.title)
    }
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level
            && self.title == other.title
            && self.line_start == other.line_start
    }
}

impl Eq for Section {}

impl Hash for Section {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.level.hash(state);
        self.title.hash(state);
        self.line_start.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_reflects_state_and_children() {
        let mut section = Section::new(2, "Style".to_string(), 3, 5);
        assert_eq!(section.full_title(), "## Style");
        assert_eq!(section.label(), "[*] Style");

        section.enabled = false;
        section.children.push(SectionId(1));
        assert_eq!(section.label(), "[ ] Style --->");
    }

    #[test]
    fn test_equality_ignores_toggle_and_content() {
        let a = Section::new(1, "Rules".to_string(), 0, 4);
        let mut b = Section::new(1, "Rules".to_string(), 0, 9);
        b.enabled = false;
        b.content_lines.push("# Rules\n".to_string());
        assert_eq!(a, b);
        assert_ne!(a, Section::new(1, "Rules".to_string(), 2, 4));
    }
}
