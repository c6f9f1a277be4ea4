//! The selection plan records which sections of a document are switched on.
//!
//! Plans are plain JSON so a selection made in the TUI can be saved, reviewed, and replayed
//! later (or in batch mode) against a fresh parse of the same file.

use crate::error::Result;
use crate::outline::Outline;
use crate::section::SectionKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// Serialisable toggle state for every section of one document.
pub struct SelectionPlan {
    /// Document the plan was taken from.
    pub file_name: String,
    /// One entry per section, in document order.
    pub sections: Vec<SectionState>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// Identity and toggle state of a single section.
pub struct SectionState {
    /// Heading depth.
    pub level: usize,
    /// Heading text.
    pub title: String,
    /// Zero-based line of the heading.
    pub line_start: usize,
    /// Whether the section is kept.
    pub enabled: bool,
}

impl SectionState {
    fn key(&self) -> SectionKey {
        SectionKey {
            level: self.level,
            title: self.title.clone(),
            line_start: self.line_start,
        }
    }
}

impl SelectionPlan {
    #[must_use]
    /// Captures the current toggle state of `outline`.
    pub fn from_outline(file_name: &Path, outline: &Outline) -> Self {
        let sections = outline
            .iter()
            .map(|(_, section)| SectionState {
                level: section.level,
                title: section.title.clone(),
                line_start: section.line_start,
                enabled: section.enabled,
            })
            .collect();

        Self {
            file_name: file_name.to_string_lossy().to_string(),
            sections,
        }
    }

    /// Applies the recorded toggle states to matching sections.
    ///
    /// Sections are matched by level, title and starting line; entries that no longer match
    /// anything (because the document changed) are skipped. Returns the number applied.
    pub fn apply(&self, outline: &mut Outline) -> usize {
        let states: HashMap<SectionKey, bool> = self
            .sections
            .iter()
            .map(|state| (state.key(), state.enabled))
            .collect();

        let matched: Vec<_> = outline
            .iter()
            .filter_map(|(id, section)| states.get(&section.key()).map(|&enabled| (id, enabled)))
            .collect();

        for &(id, enabled) in &matched {
            outline.set_enabled(id, enabled);
        }

        let skipped = self.sections.len().saturating_sub(matched.len());
        if skipped > 0 {
            tracing::warn!(skipped, "selection entries did not match any section");
        }
        matched.len()
    }

    /// Reads a plan from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid plan.
    pub fn load(path: &Path) -> Result<Self> {
        let file_content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&file_content)?)
    }

    /// Pretty-printed JSON form of the plan.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "tests/selection.rs"]
mod tests;
