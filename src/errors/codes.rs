//! Error code definitions for structured diagnostics
//!
//! Codes are stable strings (e.g. `MODULE-NOT-FOUND`) used to look up message
//! templates. Each code belongs to exactly one [`ErrorKind`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The three classes of user-facing failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed source text
    Syntax,
    /// Well-formed source that violates a static constraint
    Compile,
    /// A value-kind contract violated while evaluating
    Runtime,
}

impl ErrorKind {
    /// Name of the error class (e.g., "SyntaxError")
    pub fn name(&self) -> &'static str {
        match self {
            Self::Syntax => "SyntaxError",
            Self::Compile => "CompileError",
            Self::Runtime => "RuntimeError",
        }
    }

    /// Message used when no template produced anything
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Syntax => "Juttle syntax error",
            Self::Compile => "Juttle compile error",
            Self::Runtime => "Juttle runtime error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error codes produced by the parser pipeline and the value model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax
    // =========================================================================
    /// The grammar reported which alternatives it expected
    SyntaxErrorWithExpected,
    /// The grammar failed with a bare message
    SyntaxErrorWithoutExpected,

    // =========================================================================
    // Compile
    // =========================================================================
    /// Import module name is not a plain string literal
    ImportInterpolation,
    /// The module resolver could not produce the imported module
    ModuleNotFound,

    // =========================================================================
    // Runtime
    // =========================================================================
    /// A value has the wrong kind
    TypeError,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 5] = [
        Self::SyntaxErrorWithExpected,
        Self::SyntaxErrorWithoutExpected,
        Self::ImportInterpolation,
        Self::ModuleNotFound,
        Self::TypeError,
    ];

    /// Get the string representation of the error code (e.g., "TYPE-ERROR")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SyntaxErrorWithExpected => "SYNTAX-ERROR-WITH-EXPECTED",
            Self::SyntaxErrorWithoutExpected => "SYNTAX-ERROR-WITHOUT-EXPECTED",
            Self::ImportInterpolation => "IMPORT-INTERPOLATION",
            Self::ModuleNotFound => "MODULE-NOT-FOUND",
            Self::TypeError => "TYPE-ERROR",
        }
    }

    /// The error class this code is raised as
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SyntaxErrorWithExpected | Self::SyntaxErrorWithoutExpected => ErrorKind::Syntax,
            Self::ImportInterpolation | Self::ModuleNotFound => ErrorKind::Compile,
            Self::TypeError => ErrorKind::Runtime,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| format!("unknown error code: {s}"))
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
