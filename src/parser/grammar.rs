//! Grammar adapter: source text in, AST or raw parse failure out.
//!
//! The [`Grammar`] trait is the boundary the rest of the pipeline depends on.
//! [`PestGrammar`] is the built-in implementation over `juttle.pest`.

use std::fmt;
use std::str::FromStr;

use pest::Parser;
use pest::error::{ErrorVariant, InputLocation};
use pest_derive::Parser;

use super::ast::Parsed;
use super::builder::{self, BuildError};
use crate::base::{Location, Position};

#[derive(Parser)]
#[grammar = "parser/juttle.pest"]
pub struct JuttleParser;

// ============================================================================
// Start rules
// ============================================================================

/// Entry points of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StartRule {
    /// A full program (`start`)
    #[default]
    Program,
    /// A standalone filter expression (`startFilter`)
    Filter,
    /// A literal value without variable references (`startValue`)
    Value,
}

impl StartRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Program => "start",
            Self::Filter => "startFilter",
            Self::Value => "startValue",
        }
    }

    fn rule(&self) -> Rule {
        match self {
            Self::Program => Rule::start,
            Self::Filter => Rule::start_filter,
            Self::Value => Rule::start_value,
        }
    }
}

impl fmt::Display for StartRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StartRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Program),
            "startFilter" => Ok(Self::Filter),
            "startValue" => Ok(Self::Value),
            other => Err(format!("unknown start rule: {other}")),
        }
    }
}

// ============================================================================
// Raw failures
// ============================================================================

/// One alternative the grammar would have accepted.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Expectation {
    /// Human description (e.g. `identifier`, `"as"`)
    pub description: String,
    /// Grammar rule that produced it, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
}

impl Expectation {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            rule: None,
        }
    }
}

/// The grammar's native failure, before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct RawParseFailure {
    pub message: String,
    /// Location without filename
    pub location: Location,
    /// Alternatives expected at the failure point; absent for custom failures
    pub expected: Option<Vec<Expectation>>,
    /// The offending input (a single character), `None` at end of input
    pub found: Option<String>,
}

/// Anything a grammar can fail with.
#[derive(Debug)]
pub enum GrammarError {
    /// Malformed input
    Failure(RawParseFailure),
    /// A defect in the grammar or the AST builder
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

/// Turns source text into an AST.
pub trait Grammar: Send + Sync {
    fn parse(&self, source: &str, rule: StartRule, filename: &str) -> Result<Parsed, GrammarError>;
}

// ============================================================================
// Pest implementation
// ============================================================================

/// The built-in grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct PestGrammar;

impl Grammar for PestGrammar {
    fn parse(&self, source: &str, rule: StartRule, filename: &str) -> Result<Parsed, GrammarError> {
        tracing::trace!(filename, rule = %rule, "parsing");

        let mut pairs = JuttleParser::parse(rule.rule(), source)
            .map_err(|err| GrammarError::Failure(raw_failure(source, &err)))?;
        let root = pairs
            .next()
            .ok_or_else(|| GrammarError::Internal("grammar produced no root pair".into()))?;

        let built = match rule {
            StartRule::Program => builder::build_program(root, filename).map(Parsed::Program),
            StartRule::Filter | StartRule::Value => {
                builder::build_start_expression(root, filename).map(Parsed::Expression)
            }
        };

        built.map_err(|err| match err {
            BuildError::Invalid { message, location } => GrammarError::Failure(RawParseFailure {
                message,
                location: Location {
                    filename: None,
                    ..location
                },
                expected: None,
                found: None,
            }),
            BuildError::Unexpected(message) => GrammarError::Internal(message.into()),
        })
    }
}

/// Convert a pest error into the raw failure shape.
fn raw_failure(source: &str, err: &pest::error::Error<Rule>) -> RawParseFailure {
    let offset = match err.location {
        InputLocation::Pos(pos) => pos,
        InputLocation::Span((start, _)) => start,
    };
    let position = position_at(source, offset);

    match &err.variant {
        ErrorVariant::ParsingError { positives, .. } => {
            let mut expected: Vec<Expectation> = Vec::new();
            for rule in positives {
                let description = describe(*rule);
                if expected.iter().all(|e| e.description != description) {
                    expected.push(Expectation {
                        description,
                        rule: Some(format!("{rule:?}")),
                    });
                }
            }

            RawParseFailure {
                message: err.variant.message().into_owned(),
                location: Location::at(None, position),
                expected: Some(expected),
                found: source[offset.min(source.len())..]
                    .chars()
                    .next()
                    .map(String::from),
            }
        }
        ErrorVariant::CustomError { message } => RawParseFailure {
            message: message.clone(),
            location: Location::at(None, position),
            expected: None,
            found: None,
        },
    }
}

/// Position of a byte offset, with 1-based line and column.
pub(crate) fn position_at(source: &str, offset: usize) -> Position {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;

    Position::new(offset, line, column)
}

/// User-facing description of a grammar rule.
fn describe(rule: Rule) -> String {
    let text = match rule {
        Rule::EOI => "end of input",
        Rule::import_statement => "import statement",
        Rule::const_statement => "const statement",
        Rule::sub_definition => "sub definition",
        Rule::parameters => "parameter list",
        Rule::parameter => "parameter",
        Rule::block => "block",
        Rule::flowgraph | Rule::parallel => "flowgraph",
        Rule::proc => "processor",
        Rule::proc_option | Rule::option_name => "option",
        Rule::assignments | Rule::assignment => "assignment",
        Rule::qualified_name => "name",
        Rule::expression
        | Rule::logical_or
        | Rule::logical_and
        | Rule::equality
        | Rule::relational
        | Rule::additive
        | Rule::multiplicative
        | Rule::unary
        | Rule::postfix
        | Rule::string_interpolation => "expression",
        Rule::member => "member access",
        Rule::call => "argument list",
        Rule::index => "index",
        Rule::array_literal | Rule::value_array => "array",
        Rule::object_literal | Rule::value_object => "object",
        Rule::property | Rule::value_property => "property",
        Rule::op_or => "\"||\"",
        Rule::op_and => "\"&&\"",
        Rule::op_equality => "equality operator",
        Rule::op_relational => "relational operator",
        Rule::op_additive => "additive operator",
        Rule::op_multiplicative => "multiplicative operator",
        Rule::op_unary => "unary operator",
        Rule::op_negate => "\"-\"",
        Rule::null_literal => "null",
        Rule::boolean_literal => "boolean",
        Rule::number_literal | Rule::value_number => "number",
        Rule::string_literal | Rule::value_string | Rule::string_text | Rule::string_escape | Rule::string_dollar => {
            "string"
        }
        Rule::regex_literal | Rule::regex_body | Rule::regex_flags => "regular expression",
        Rule::identifier | Rule::identifier_text | Rule::keyword => "identifier",
        Rule::kw_import => "\"import\"",
        Rule::kw_as => "\"as\"",
        Rule::kw_const => "\"const\"",
        Rule::kw_sub => "\"sub\"",
        Rule::kw_export => "\"export\"",
        Rule::assign => "\"=\"",
        Rule::pipe => "\"|\"",
        Rule::separator => "\";\"",
        Rule::start | Rule::start_filter | Rule::start_value => "input",
        // silent rules never reach an error report
        _ => return format!("{rule:?}"),
    };
    text.to_string()
}
