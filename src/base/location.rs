//! Source locations attached to AST nodes and errors.
//!
//! Lines and columns are 1-based, offsets are 0-based byte offsets into the
//! source text. This matches what the grammar reports.

use serde::{Deserialize, Serialize};

/// A single point in a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

/// A range in a named source text.
///
/// `filename` is absent until the location has been overlaid onto a unit,
/// which is the case for raw grammar failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub start: Position,
    pub end: Position,
}

impl Location {
    pub fn new(filename: Option<String>, start: Position, end: Position) -> Self {
        Self {
            filename,
            start,
            end,
        }
    }

    /// Create an empty location at a single position
    pub fn at(filename: Option<String>, position: Position) -> Self {
        Self::new(filename, position, position)
    }

    /// Overlay this location onto `{filename}`: a filename already carried by
    /// the location wins.
    pub fn with_default_filename(mut self, filename: &str) -> Self {
        if self.filename.is_none() {
            self.filename = Some(filename.to_string());
        }
        self
    }
}
