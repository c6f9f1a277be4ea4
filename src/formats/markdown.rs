//! Markdown format implementation for ATX-style headings (# syntax).
//!
//! Only `#` through `######` headings and triple-backtick fences are interpreted; every other
//! line is inert content.

use crate::formats::{Format, Heading};
use regex::Regex;
use std::sync::LazyLock;

static ATX_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("heading pattern is valid"));

const FENCE_MARKER: &str = "```";

/// Heading and fence rules for ATX-style markdown.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn heading(&self, line: &str) -> Option<Heading> {
        let captures = ATX_HEADING.captures(line.trim())?;
        Some(Heading {
            level: captures[1].len(),
            title: captures[2].trim().to_string(),
        })
    }

    fn is_fence(&self, line: &str) -> bool {
        line.trim().starts_with(FENCE_MARKER)
    }
}
