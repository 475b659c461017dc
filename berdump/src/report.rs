//! Accumulated text output of a walk

use std::fmt;
use std::fmt::Write as _;

use crate::render::Rendering;
use crate::tag::TagDescriptor;

/// Default number of spaces per nesting level
pub const DEFAULT_INDENT: usize = 4;

/// One line per visited node, indented by nesting depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    text: String,
    nodes: usize,
    indent: usize,
}

impl Report {
    pub fn new(indent: usize) -> Self {
        Self {
            text: String::new(),
            nodes: 0,
            indent,
        }
    }

    /// Append a `group` line for a constructed node
    pub fn group(&mut self, depth: usize, descriptor: &TagDescriptor) {
        self.line(depth, format_args!("group {}", descriptor));
    }

    /// Append an `element` line for a primitive node
    pub fn element(&mut self, depth: usize, descriptor: &TagDescriptor, rendering: &Rendering) {
        self.line(depth, format_args!("element {} {}", descriptor, rendering));
    }

    fn line(&mut self, depth: usize, content: fmt::Arguments<'_>) {
        let pad = self.indent * depth;
        // Writing into a String cannot fail
        let _ = writeln!(self.text, "{:pad$}{}", "", content, pad = pad);
        self.nodes += 1;
    }

    /// Number of lines emitted so far
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes == 0
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
