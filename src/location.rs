//! Source locations - 1-based regions derived from tree-sitter points
//!
//! Tree-sitter reports 0-based rows and columns. Editors and analysis
//! consumers expect 1-based coordinates, so every point is shifted by +1 in
//! both dimensions exactly once, here.

use serde::{Deserialize, Serialize};
use std::fmt;
use tree_sitter::Point;

/// A 1-based source region (line/column start and inclusive end point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Starting line (1-indexed)
    pub start_line: u32,
    /// Starting column (1-indexed)
    pub start_column: u32,
    /// Ending line (1-indexed)
    pub end_line: u32,
    /// Ending column (1-indexed)
    pub end_column: u32,
}

impl Region {
    /// Build a region from tree-sitter's 0-based start/end points.
    pub fn from_points(start: Point, end: Point) -> Self {
        Self {
            start_line: start.row as u32 + 1,
            start_column: start.column as u32 + 1,
            end_line: end.row as u32 + 1,
            end_column: end.column as u32 + 1,
        }
    }

    /// Build a region for a syntax node.
    pub fn from_node(node: &tree_sitter::Node) -> Self {
        Self::from_points(node.start_position(), node.end_position())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start_line, self.start_column, self.end_line, self.end_column
        )
    }
}
