//! The UI renders the application state into a menuconfig-style screen.
//!
//! The draw function dispatches based on the current view. The tree view always stays
//! underneath; search and help are drawn as overlays on top of it, while the preview takes
//! over the whole screen.

use crate::app_state::{AppState, View};
use crate::config::Config;
use edtui::{EditorTheme, EditorView, SyntaxHighlighter};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const HELP_TEXT: &str = "\
Navigation:
  ↑/↓, k/j       Navigate through sections
  →/l            Expand section
  ←/h            Collapse section (or go to parent)
  Enter          Expand/collapse section
  Home/End       Go to first/last item

Actions:
  Space          Toggle section enabled/disabled
  s              Save configuration (backup is written first)
  /              Search sections
  n              Next search match
  p              Preview the document as it would be saved
  ?              Show this help
  q, Esc         Exit (asks again if there are unsaved changes)

Section States:
  [*]            Section enabled (will be included)
  [ ]            Section disabled (will be excluded)
  --->           Section has subsections

Press Esc or 'q' to close this help screen.";

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &mut AppState, cfg: &Config) {
    match app.current_view {
        View::Tree => draw_tree(f, app),
        View::Search => {
            draw_tree(f, app);
            draw_search(f, app);
        }
        View::Help => {
            draw_tree(f, app);
            draw_help(f);
        }
        View::Preview => draw_preview(f, app, cfg),
    }
}

/// Branch marker shown before a section's label.
fn expansion_marker(has_children: bool, expanded: bool) -> &'static str {
    match (has_children, expanded) {
        (false, _) => "  ",
        (true, false) => "▸ ",
        (true, true) => "▾ ",
    }
}

fn draw_tree(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let items: Vec<ListItem> = app
        .rows
        .iter()
        .map(|row| {
            let section = app.outline.get(row.id);
            let indent = "    ".repeat(row.depth);
            let marker = expansion_marker(!section.children.is_empty(), app.is_expanded(row.id));

            let style = if section.enabled {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };

            ListItem::new(Line::from(vec![
                Span::raw(format!("{indent}{marker}")),
                Span::styled(section.label(), style),
            ]))
        })
        .collect();

    let title = if app.modified {
        format!("{} Configuration (MODIFIED)", app.file_path.display())
    } else {
        format!("{} Configuration", app.file_path.display())
    };

    if items.is_empty() {
        let empty = Paragraph::new("No sections found in file")
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(empty, chunks[0]);
    } else {
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut list_state = ListState::default().with_selected(Some(app.cursor));
        f.render_stateful_widget(list, chunks[0], &mut list_state);
    }

    let status_text = app.message.clone().unwrap_or_else(|| app.status_text());
    let status_style = if app.quit_pending {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let status = Paragraph::new(status_text)
        .style(status_style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[1]);
}

/// A rectangle of the given size centred in `area`, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn draw_search(f: &mut Frame, app: &AppState) {
    let area = centered_rect(60, 3, f.area());
    let prompt = Paragraph::new(format!("{}_", app.search_buffer)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Search sections (Enter: search, Esc: cancel)"),
    );
    f.render_widget(Clear, area);
    f.render_widget(prompt, area);
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(72, 30, f.area());
    let help = Paragraph::new(HELP_TEXT)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("CLAUDE.md Menuconfig Help"),
        );
    f.render_widget(Clear, area);
    f.render_widget(help, area);
}

fn draw_preview(f: &mut Frame, app: &mut AppState, cfg: &Config) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let title = format!("Preview: {}", app.file_path.display());

    if let Some(ref mut editor_state) = app.editor_state {
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(chunks[0]);
        f.render_widget(block, chunks[0]);

        let syntax_highlighter = SyntaxHighlighter::new(&cfg.theme, "md");
        let editor = EditorView::new(editor_state)
            .theme(EditorTheme::default())
            .syntax_highlighter(Some(syntax_highlighter))
            .wrap(true);

        f.render_widget(editor, inner);
    }

    let help = Paragraph::new(
        "Esc: Back to sections | read-only: hjkl/w/b/G move, v selects, y copies",
    )
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[1]);
}
