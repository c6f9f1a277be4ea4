//! menuconfig: toggle the sections of a CLAUDE.md file on and off.
#![allow(clippy::multiple_crate_versions)]

use claude_menuconfig::app_state::{self, AppState};
use claude_menuconfig::formats::markdown::MarkdownFormat;
use claude_menuconfig::selection::SelectionPlan;
use claude_menuconfig::{config, input, ui, Result};
use clap::Parser;
use edtui::EditorEventHandler;
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

#[derive(Parser)]
#[command(name = "menuconfig")]
#[command(
    about = "Menuconfig-style editor for CLAUDE.md files",
    long_about = None
)]
struct Args {
    /// Path to CLAUDE.md file (defaults to project or global CLAUDE.md)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Apply a saved selection plan (JSON) before starting
    #[arg(long, value_name = "JSON")]
    load_selection: Option<PathBuf>,

    /// Print the selection plan as JSON on exit
    #[arg(long)]
    print_selection: bool,

    /// Print the section tree and exit
    #[arg(long, conflicts_with_all = ["print_selection", "batch"])]
    outline: bool,

    /// Save the current selection without opening the menu
    #[arg(long)]
    batch: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_file.as_deref()) {
        eprintln!("Error: cannot open log file: {e}");
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    if let Some(path) = log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let cfg = config::Config::load();
    let path = input::resolve_target(args.file, &cfg)?;
    let outline = input::extract_sections(&path, &MarkdownFormat)?;
    let mut state = AppState::new(path, outline, &cfg);

    if let Some(load_path) = args.load_selection {
        let plan = SelectionPlan::load(&load_path)?;
        let applied = plan.apply(&mut state.outline);
        tracing::info!(applied, plan = %load_path.display(), "loaded selection");
    }

    if args.outline {
        print_outline(&state);
        return Ok(());
    }

    if args.batch {
        let backup = state.write_document()?;
        eprintln!(
            "Saved {} (backup: {})",
            state.file_path.display(),
            backup.display()
        );
    } else {
        tracing::info!(file = %state.file_path.display(), "starting menuconfig");
        run_tui(&mut state, &cfg)?;
    }

    if args.print_selection {
        println!("{}", state.selection_plan().to_json()?);
    }

    Ok(())
}

fn print_outline(state: &AppState) {
    for (id, section) in state.outline.iter() {
        let indent = "    ".repeat(state.outline.depth(id));
        println!("{indent}{}", section.label());
    }
}

fn run_tui(app: &mut AppState, cfg: &config::Config) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut editor_handler = EditorEventHandler::default();

    let result = run_app(&mut terminal, app, cfg, &mut editor_handler);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    cfg: &config::Config,
    editor_handler: &mut EditorEventHandler,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app, cfg))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.current_view {
            app_state::View::Tree => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    if app.request_quit() {
                        return Ok(());
                    }
                }
                KeyCode::Up | KeyCode::Char('k') => app.move_up(),
                KeyCode::Down | KeyCode::Char('j') => app.move_down(),
                KeyCode::Home => app.move_first(),
                KeyCode::End => app.move_last(),
                KeyCode::Right | KeyCode::Char('l') => {
                    app.expand();
                }
                KeyCode::Left | KeyCode::Char('h') => app.collapse(),
                KeyCode::Enter => app.toggle_expand(),
                KeyCode::Char(' ') => {
                    app.message = None;
                    app.toggle_selected();
                }
                KeyCode::Char('s') => app.save(),
                KeyCode::Char('/') => app.begin_search(),
                KeyCode::Char('n') => app.next_match(),
                KeyCode::Char('p') => app.enter_preview(),
                KeyCode::Char('?') => app.show_help(),
                _ => {}
            },
            app_state::View::Search => match key.code {
                KeyCode::Char(c) => app.search_buffer.push(c),
                KeyCode::Backspace => {
                    app.search_buffer.pop();
                }
                KeyCode::Enter => app.submit_search(),
                KeyCode::Esc => app.cancel_search(),
                _ => {}
            },
            app_state::View::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q' | '?')) {
                    app.close_help();
                }
            }
            app_state::View::Preview => {
                let in_normal_mode = app
                    .editor_state
                    .as_ref()
                    .is_none_or(|state| state.mode == edtui::EditorMode::Normal);

                if key.code == KeyCode::Esc && in_normal_mode {
                    app.exit_preview();
                } else {
                    app.preview_key(key, editor_handler);
                }
            }
        }
    }
}
