//! The core state machine bridging the section outline and the interactive menu.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the user
//! navigates and toggles. The outline owns the sections; this state only adds what the menu
//! needs on top: which branches are expanded, which rows are visible, where the cursor is, and
//! whether there are unsaved toggles.

use crate::config::Config;
use crate::error::Result;
use crate::formats::markdown::MarkdownFormat;
use crate::outline::Outline;
use crate::persist;
use crate::projector;
use crate::section::{SectionId, SectionKey};
use crate::selection::SelectionPlan;
use edtui::{EditorEventHandler, EditorMode, EditorState, Lines};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
/// Determines which UI screen renders and how input is interpreted.
pub enum View {
    /// Section tree with toggles.
    Tree,
    /// Captures a search term after '/' is pressed.
    Search,
    /// Keyboard reference overlay.
    Help,
    /// Read-only view of the document as it would be saved.
    Preview,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// One visible line of the section tree.
pub struct TreeRow {
    /// Section shown on this row.
    pub id: SectionId,
    /// Nesting depth used for indentation.
    pub depth: usize,
}

/// Menu session state for one document.
///
/// Expansion is tracked by [`SectionKey`] rather than by row so the visible rows can be
/// rebuilt freely without losing which branches are open.
pub struct AppState {
    /// Parsed sections of the document being configured.
    pub outline: Outline,
    /// Document being configured.
    pub file_path: PathBuf,
    /// Suffix for the backup written before each save.
    pub backup_suffix: String,
    /// Branches currently showing their subsections.
    pub expanded: HashSet<SectionKey>,
    /// Visible rows in display order.
    pub rows: Vec<TreeRow>,
    /// Selected row.
    pub cursor: usize,
    /// Active UI screen determining input handling.
    pub current_view: View,
    /// Search term being typed.
    pub search_buffer: String,
    /// Results of the last search, in document order.
    pub search_matches: Vec<SectionId>,
    /// Position within `search_matches` of the selected result.
    pub search_position: usize,
    /// Toggles have been made since the last save.
    pub modified: bool,
    /// A quit was refused once because of unsaved toggles.
    pub quit_pending: bool,
    /// Status feedback displayed in the status bar.
    pub message: Option<String>,
    /// Viewer buffer while the preview is open.
    pub editor_state: Option<EditorState>,
}

impl AppState {
    #[must_use]
    /// Initialises the session with top-level sections visible (or everything, if configured).
    pub fn new(file_path: PathBuf, outline: Outline, cfg: &Config) -> Self {
        let expanded = if cfg.expand_all {
            outline
                .iter()
                .filter(|(_, section)| !section.children.is_empty())
                .map(|(_, section)| section.key())
                .collect()
        } else {
            HashSet::new()
        };

        let mut state = Self {
            outline,
            file_path,
            backup_suffix: cfg.backup_suffix.clone(),
            expanded,
            rows: Vec::new(),
            cursor: 0,
            current_view: View::Tree,
            search_buffer: String::new(),
            search_matches: Vec::new(),
            search_position: 0,
            modified: false,
            quit_pending: false,
            message: None,
            editor_state: None,
        };
        state.rebuild_rows();
        state
    }

    /// Recomputes the visible rows, keeping the cursor on the same section where possible.
    pub fn rebuild_rows(&mut self) {
        let selected = self.selected();
        let mut rows = Vec::new();
        for &root in self.outline.roots() {
            self.collect_rows(root, 0, &mut rows);
        }
        self.rows = rows;

        self.cursor = selected
            .and_then(|id| self.row_of(id))
            .unwrap_or_else(|| self.cursor.min(self.rows.len().saturating_sub(1)));
    }

    fn collect_rows(&self, id: SectionId, depth: usize, rows: &mut Vec<TreeRow>) {
        rows.push(TreeRow { id, depth });
        if self.expanded.contains(&self.outline.get(id).key()) {
            for &child in self.outline.children(id) {
                self.collect_rows(child, depth + 1, rows);
            }
        }
    }

    fn row_of(&self, id: SectionId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    #[must_use]
    /// Section under the cursor.
    pub fn selected(&self) -> Option<SectionId> {
        self.rows.get(self.cursor).map(|row| row.id)
    }

    #[must_use]
    /// Whether `id` is showing its subsections.
    pub fn is_expanded(&self, id: SectionId) -> bool {
        self.expanded.contains(&self.outline.get(id).key())
    }

    // --- <Navigation> ---

    /// Moves the cursor to the previous row.
    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor to the next row.
    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.rows.len() {
            self.cursor += 1;
        }
    }

    /// Jumps to the first row.
    pub fn move_first(&mut self) {
        self.cursor = 0;
    }

    /// Jumps to the last row.
    pub fn move_last(&mut self) {
        self.cursor = self.rows.len().saturating_sub(1);
    }

    /// Shows the subsections of the selected section. Returns false if there was nothing to
    /// expand.
    pub fn expand(&mut self) -> bool {
        let Some(id) = self.selected() else {
            return false;
        };
        if self.outline.children(id).is_empty() || self.is_expanded(id) {
            return false;
        }
        self.expanded.insert(self.outline.get(id).key());
        self.rebuild_rows();
        true
    }

    /// Hides the subsections of the selected section, or moves to its parent when it is
    /// already collapsed.
    pub fn collapse(&mut self) {
        let Some(id) = self.selected() else {
            return;
        };
        if self.is_expanded(id) {
            self.expanded.remove(&self.outline.get(id).key());
            self.rebuild_rows();
        } else if let Some(parent) = self.outline.parent(id) {
            if let Some(row) = self.row_of(parent) {
                self.cursor = row;
            }
        }
    }

    /// Expands a collapsed branch or collapses an expanded one.
    pub fn toggle_expand(&mut self) {
        let Some(id) = self.selected() else {
            return;
        };
        if self.is_expanded(id) {
            self.collapse();
        } else {
            self.expand();
        }
    }

    /// Expands every ancestor of `id` and puts the cursor on it.
    pub fn reveal(&mut self, id: SectionId) {
        for ancestor in self.outline.ancestors(id) {
            self.expanded.insert(self.outline.get(ancestor).key());
        }
        self.rebuild_rows();
        if let Some(row) = self.row_of(id) {
            self.cursor = row;
        }
    }

    // --- </Navigation> ---

    /// Flips the selected section between enabled and disabled.
    ///
    /// Returns the new state, or `None` when there is nothing selected.
    pub fn toggle_selected(&mut self) -> Option<bool> {
        let id = self.selected()?;
        let enabled = self.outline.toggle(id);
        self.modified = true;
        self.quit_pending = false;
        Some(enabled)
    }

    // --- <Search> ---

    /// Opens the search prompt with an empty term.
    pub fn begin_search(&mut self) {
        self.search_buffer.clear();
        self.message = None;
        self.current_view = View::Search;
    }

    /// Leaves the search prompt without searching.
    pub fn cancel_search(&mut self) {
        self.search_buffer.clear();
        self.current_view = View::Tree;
    }

    /// Runs the typed search and selects the first match.
    pub fn submit_search(&mut self) {
        self.current_view = View::Tree;
        let term = self.search_buffer.trim().to_string();
        if term.is_empty() {
            return;
        }

        self.search_matches = self.outline.search(&term);
        self.search_position = 0;

        if let Some(&first) = self.search_matches.first() {
            self.reveal(first);
            self.message = Some(format!(
                "{} match(es) for '{term}' (n: next)",
                self.search_matches.len()
            ));
        } else {
            self.message = Some(format!("No sections match '{term}'"));
        }
    }

    /// Selects the following search result, wrapping around.
    pub fn next_match(&mut self) {
        if self.search_matches.is_empty() {
            self.message = Some("No active search".to_string());
            return;
        }
        self.search_position = (self.search_position + 1) % self.search_matches.len();
        self.reveal(self.search_matches[self.search_position]);
    }

    // --- </Search> ---

    /// Opens the keyboard reference.
    pub fn show_help(&mut self) {
        self.current_view = View::Help;
    }

    /// Returns from the keyboard reference to the tree.
    pub fn close_help(&mut self) {
        self.current_view = View::Tree;
    }

    #[must_use]
    /// The document as it would be written with the current toggles.
    pub fn projected_content(&self) -> String {
        projector::project(&self.outline, &MarkdownFormat)
    }

    /// Loads the projected document into the read-only viewer.
    pub fn enter_preview(&mut self) {
        let content = self.projected_content();
        let lines = Lines::from(content.as_str());
        self.editor_state = Some(EditorState::new(lines));
        self.current_view = View::Preview;
    }

    /// Forwards a key to the viewer if it only moves, selects or copies.
    ///
    /// Keys that would insert, delete or paste are dropped, and the viewer is held in normal or
    /// visual mode.
    pub fn preview_key(&mut self, key: KeyEvent, handler: &mut EditorEventHandler) {
        let Some(editor_state) = self.editor_state.as_mut() else {
            return;
        };
        if !preview_accepts(&key) {
            return;
        }
        handler.on_key_event(key, editor_state);
        if !matches!(editor_state.mode, EditorMode::Normal | EditorMode::Visual) {
            editor_state.mode = EditorMode::Normal;
        }
    }

    /// Closes the viewer.
    pub fn exit_preview(&mut self) {
        self.editor_state = None;
        self.current_view = View::Tree;
    }

    /// Backs up the document and overwrites it with the projection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backup or the write fails; the session stays modified.
    pub fn write_document(&mut self) -> Result<PathBuf> {
        let content = self.projected_content();
        let backup = persist::save(&self.file_path, &content, &self.backup_suffix)?;
        self.modified = false;
        self.quit_pending = false;
        Ok(backup)
    }

    /// Saves and reports the outcome in the status bar.
    pub fn save(&mut self) {
        self.message = Some(match self.write_document() {
            Ok(_) => "Configuration saved successfully!".to_string(),
            Err(e) => {
                tracing::error!(error = %e, "save failed");
                format!("Error saving: {e}")
            }
        });
    }

    /// Asks to leave the session. Unsaved toggles make the first request only warn.
    ///
    /// Returns true when the caller should exit.
    pub fn request_quit(&mut self) -> bool {
        if self.modified && !self.quit_pending {
            self.quit_pending = true;
            self.message =
                Some("Unsaved changes: press q again to quit, s to save".to_string());
            return false;
        }
        true
    }

    #[must_use]
    /// Snapshot of every section's toggle state.
    pub fn selection_plan(&self) -> SelectionPlan {
        SelectionPlan::from_outline(&self.file_path, &self.outline)
    }

    #[must_use]
    /// Status bar text: file, modification marker, section count and key hints.
    pub fn status_text(&self) -> String {
        let modified_text = if self.modified { " [MODIFIED]" } else { "" };
        format!(
            "File: {}{modified_text} | {} sections loaded | Use arrow keys to navigate, Space to toggle, 's' to save, '?' for help",
            self.file_path.display(),
            self.outline.len()
        )
    }
}

#[must_use]
/// Whether the preview viewer takes `key`: cursor motion, visual selection, yank and `Esc`.
pub fn preview_accepts(key: &KeyEvent) -> bool {
    if !key.modifiers.difference(KeyModifiers::SHIFT).is_empty() {
        return false;
    }
    match key.code {
        KeyCode::Up
        | KeyCode::Down
        | KeyCode::Left
        | KeyCode::Right
        | KeyCode::PageUp
        | KeyCode::PageDown
        | KeyCode::Home
        | KeyCode::End
        | KeyCode::Esc => true,
        KeyCode::Char(c) => "hjklwbeGg0$^vVy".contains(c),
        _ => false,
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
