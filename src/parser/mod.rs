//! Juttle parser
//!
//! ```text
//! Source Text
//!     ↓
//! Grammar (pest, juttle.pest) → pairs
//!     ↓
//! builder → AST (Program / Expr)        or  RawParseFailure
//!                                                ↓
//!                                        classify → JuttleError (Syntax)
//! ```
//!
//! Module resolution on top of this lives in [`crate::program`].

pub mod ast;
mod builder;
mod classify;
pub mod grammar;

pub use ast::*;
pub use classify::classify;
pub use grammar::{
    Expectation, Grammar, GrammarError, JuttleParser, PestGrammar, RawParseFailure, Rule, StartRule,
};

use crate::errors::{Error, MessageCatalog, Result};

/// Parse one unit with `grammar`, classifying malformed input as a syntax error.
///
/// Grammar-internal failures pass through as [`Error::Internal`].
pub(crate) fn parse_unit(
    grammar: &dyn Grammar,
    source: &str,
    rule: StartRule,
    filename: &str,
    catalog: &dyn MessageCatalog,
) -> Result<Parsed> {
    grammar
        .parse(source, rule, filename)
        .map_err(|err| match err {
            GrammarError::Failure(raw) => Error::Juttle(classify(raw, filename, catalog)),
            GrammarError::Internal(err) => Error::Internal(err),
        })
}
