//! Foundation types shared by the parser, the errors and the value model.
//!
//! - [`Position`] - offset plus 1-based line/column
//! - [`Location`] - a filename and a start/end range
//!
//! This module has NO dependencies on other juttle modules.

mod location;

pub use location::{Location, Position};
