//! claude-menuconfig: menuconfig-style section toggling for CLAUDE.md files.
//!
//! A document is split into a tree of heading sections by [`parser::parse`], the user (or a
//! saved [`selection::SelectionPlan`]) switches sections on and off, and
//! [`projector::project`] regenerates the document from whatever is still enabled.

pub mod app_state;
pub mod config;
pub mod error;
pub mod formats;
pub mod input;
pub mod outline;
pub mod parser;
pub mod persist;
pub mod projector;
pub mod section;
pub mod selection;
pub mod ui;

pub use error::{Error, Result};
