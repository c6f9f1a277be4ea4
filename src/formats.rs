//! Format trait and implementations for different document types.
//!
//! This module defines the `Format` trait which abstracts over the two pieces of syntax the
//! section parser cares about: what a heading looks like and what fences off a literal block.

pub mod markdown;

/// A heading recognised on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Nesting depth (1 for top-level).
    pub level: usize,
    /// Heading text without markup.
    pub title: String,
}

/// Line-level syntax needed to split a document into sections.
pub trait Format {
    /// Returns the heading on this line, if the line is one.
    fn heading(&self, line: &str) -> Option<Heading>;
    /// Whether this line opens or closes a literal block.
    fn is_fence(&self, line: &str) -> bool;
}
