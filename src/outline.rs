//! The outline is the arena that owns every section of one parsed document.
//!
//! Sections are appended in the order their headings appear, so arena order, document order
//! and pre-order traversal order all coincide. Structure is fixed once parsing finishes; only
//! the `enabled` flags change afterwards.

use crate::section::{Section, SectionId, SectionKey};

#[derive(Clone, Debug, Default)]
/// Parsed section forest together with the line snapshot it was built from.
pub struct Outline {
    lines: Vec<String>,
    sections: Vec<Section>,
    roots: Vec<SectionId>,
}

impl Outline {
    #[must_use]
    /// Wraps a line snapshot with no sections yet.
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines,
            sections: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Appends a section, linking it under `parent` or as a new root.
    pub(crate) fn push(&mut self, mut section: Section, parent: Option<SectionId>) -> SectionId {
        let id = SectionId(self.sections.len());
        section.parent = parent;
        match parent {
            Some(parent_id) => self.sections[parent_id.0].children.push(id),
            None => self.roots.push(id),
        }
        self.sections.push(section);
        id
    }

    #[must_use]
    /// The source lines, terminators preserved.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    /// Top-level sections in document order.
    pub fn roots(&self) -> &[SectionId] {
        &self.roots
    }

    #[must_use]
    /// Number of sections at every depth.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    /// True when the document has no headings outside code blocks.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    #[must_use]
    /// Looks up a section by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this outline.
    pub fn get(&self, id: SectionId) -> &Section {
        &self.sections[id.0]
    }

    /// Mutable access for the session layer, which may only change `enabled`.
    pub(crate) fn get_mut(&mut self, id: SectionId) -> &mut Section {
        &mut self.sections[id.0]
    }

    /// Every section in pre-order (document order).
    pub fn iter(&self) -> impl Iterator<Item = (SectionId, &Section)> {
        self.sections
            .iter()
            .enumerate()
            .map(|(i, section)| (SectionId(i), section))
    }

    #[must_use]
    /// Immediate subsections of `id`.
    pub fn children(&self, id: SectionId) -> &[SectionId] {
        &self.sections[id.0].children
    }

    #[must_use]
    /// Containing section of `id`, if any.
    pub fn parent(&self, id: SectionId) -> Option<SectionId> {
        self.sections[id.0].parent
    }

    #[must_use]
    /// Containing sections of `id`, nearest first.
    pub fn ancestors(&self, id: SectionId) -> Vec<SectionId> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent) = current {
            ancestors.push(parent);
            current = self.parent(parent);
        }
        ancestors
    }

    #[must_use]
    /// Number of ancestors above `id` (0 for roots).
    pub fn depth(&self, id: SectionId) -> usize {
        self.ancestors(id).len()
    }

    #[must_use]
    /// Finds the section carrying the given identity.
    pub fn find(&self, key: &SectionKey) -> Option<SectionId> {
        self.iter()
            .find(|(_, section)| {
                section.line_start == key.line_start
                    && section.level == key.level
                    && section.title == key.title
            })
            .map(|(id, _)| id)
    }

    /// Flips a section's `enabled` flag and returns the new value.
    pub fn toggle(&mut self, id: SectionId) -> bool {
        let section = self.get_mut(id);
        section.enabled = !section.enabled;
        section.enabled
    }

    /// Sets a section's `enabled` flag.
    pub fn set_enabled(&mut self, id: SectionId, enabled: bool) {
        self.get_mut(id).enabled = enabled;
    }

    /// Sets every section's `enabled` flag.
    pub fn set_all(&mut self, enabled: bool) {
        for section in &mut self.sections {
            section.enabled = enabled;
        }
    }

    #[must_use]
    /// Sections whose title contains `term`, ignoring case, in document order.
    pub fn search(&self, term: &str) -> Vec<SectionId> {
        let needle = term.to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.iter()
            .filter(|(_, section)| section.title.to_lowercase().contains(&needle))
            .map(|(id, _)| id)
            .collect()
    }

    /// Parser access to the arena for closing ranges and filling content.
    pub(crate) fn sections_mut(&mut self) -> &mut [Section] {
        &mut self.sections
    }
}
