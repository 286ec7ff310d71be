//! Runtime value representation.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use indexmap::IndexMap;
use thiserror::Error;

use crate::errors::Result;
use crate::parser::Expr;
use crate::program::parse_filter;

/// Failure to classify host data as a Juttle value.
///
/// Signals a bug in the embedding, never a user error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid Juttle value: {0}.")]
pub struct InvalidValue(pub String);

/// A Juttle runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    RegExp(RegExp),
    /// `Date` or `Duration`, see [`Moment`]
    Moment(Moment),
    Filter(Filter),
    Array(Vec<Value>),
    /// Keys keep insertion order
    Object(IndexMap<String, Value>),
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<RegExp> for Value {
    fn from(value: RegExp) -> Self {
        Self::RegExp(value)
    }
}

impl From<Moment> for Value {
    fn from(value: Moment) -> Self {
        Self::Moment(value)
    }
}

impl From<Filter> for Value {
    fn from(value: Filter) -> Self {
        Self::Filter(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::Array(value)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(value: IndexMap<String, Value>) -> Self {
        Self::Object(value)
    }
}

/// Build an object from key/value pairs.
///
/// A repeated key overwrites the earlier value but keeps its position.
pub fn build_object<K, I>(entries: I) -> Value
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    let mut object = IndexMap::new();
    for (key, value) in entries {
        object.insert(key.into(), value);
    }
    Value::Object(object)
}

/// Dates and durations collapse to their millisecond value; anything else is
/// returned as is.
pub fn value_of(value: &Value) -> Value {
    match value {
        Value::Moment(moment) => Value::Number(moment.value_of() as f64),
        other => other.clone(),
    }
}

// ============================================================================
// Moment
// ============================================================================

/// The time payload shared by the `Date` and `Duration` kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Moment {
    /// An absolute instant
    Date(DateTime<Utc>),
    /// An elapsed length of time
    Duration(TimeDelta),
}

impl Moment {
    /// Milliseconds since the epoch, or the duration length in milliseconds.
    pub fn value_of(&self) -> i64 {
        match self {
            Self::Date(date) => date.timestamp_millis(),
            Self::Duration(duration) => duration.num_milliseconds(),
        }
    }
}

// ============================================================================
// RegExp
// ============================================================================

/// A regular expression literal: source text plus flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RegExp {
    pub source: String,
    pub global: bool,
    pub ignore_case: bool,
    pub multiline: bool,
    pub sticky: bool,
}

impl RegExp {
    /// Create a regular expression from its source and a flag string made of
    /// `g`, `i`, `m` and `y`, each at most once.
    pub fn new(source: impl Into<String>, flags: &str) -> Result<Self, InvalidValue> {
        let mut regexp = Self {
            source: source.into(),
            ..Self::default()
        };

        for flag in flags.chars() {
            let slot = match flag {
                'g' => &mut regexp.global,
                'i' => &mut regexp.ignore_case,
                'm' => &mut regexp.multiline,
                'y' => &mut regexp.sticky,
                _ => return Err(InvalidValue(format!("regular expression flags \"{flags}\""))),
            };
            if *slot {
                return Err(InvalidValue(format!("regular expression flags \"{flags}\"")));
            }
            *slot = true;
        }

        Ok(regexp)
    }

    /// Flags in canonical `gimy` order.
    pub fn flags(&self) -> String {
        [
            (self.global, 'g'),
            (self.ignore_case, 'i'),
            (self.multiline, 'm'),
            (self.sticky, 'y'),
        ]
        .into_iter()
        .filter_map(|(set, flag)| set.then_some(flag))
        .collect()
    }
}

impl fmt::Display for RegExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = if self.source.is_empty() {
            "(?:)"
        } else {
            &self.source
        };
        write!(f, "/{}/{}", source, self.flags())
    }
}

// ============================================================================
// Filter
// ============================================================================

#[derive(Debug)]
struct CompiledFilter {
    text: String,
    ast: Expr,
}

/// A compiled filter expression.
///
/// Cloning shares the compiled filter; two filters are equal only when they
/// share it.
#[derive(Debug, Clone)]
pub struct Filter(Arc<CompiledFilter>);

impl Filter {
    /// Compile `text` as a filter expression.
    pub fn compile(text: &str) -> Result<Self> {
        let ast = parse_filter(text)?;
        Ok(Self::from_ast(text, ast))
    }

    /// Wrap an already parsed filter.
    pub fn from_ast(text: impl Into<String>, ast: Expr) -> Self {
        Self(Arc::new(CompiledFilter {
            text: text.into(),
            ast,
        }))
    }

    pub fn text(&self) -> &str {
        &self.0.text
    }

    pub fn ast(&self) -> &Expr {
        &self.0.ast
    }
}

impl PartialEq for Filter {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
