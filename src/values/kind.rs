//! Value kinds and type predicates.

use std::fmt;

use super::value::{Moment, Value};

/// The ten kinds a [`Value`] can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    RegExp,
    Date,
    Duration,
    Filter,
    Array,
    Object,
}

impl ValueKind {
    pub const ALL: [ValueKind; 10] = [
        Self::Null,
        Self::Boolean,
        Self::Number,
        Self::String,
        Self::RegExp,
        Self::Date,
        Self::Duration,
        Self::Filter,
        Self::Array,
        Self::Object,
    ];

    /// Kind name, e.g. `RegExp`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Boolean => "Boolean",
            Self::Number => "Number",
            Self::String => "String",
            Self::RegExp => "RegExp",
            Self::Date => "Date",
            Self::Duration => "Duration",
            Self::Filter => "Filter",
            Self::Array => "Array",
            Self::Object => "Object",
        }
    }

    /// Name used in user-facing messages, e.g. `regular expression`
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::RegExp => "regular expression",
            Self::Date => "date",
            Self::Duration => "duration",
            Self::Filter => "filter expression",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn type_of(value: &Value) -> ValueKind {
    match value {
        Value::Null => ValueKind::Null,
        Value::Boolean(_) => ValueKind::Boolean,
        Value::Number(_) => ValueKind::Number,
        Value::String(_) => ValueKind::String,
        Value::RegExp(_) => ValueKind::RegExp,
        Value::Moment(Moment::Date(_)) => ValueKind::Date,
        Value::Moment(Moment::Duration(_)) => ValueKind::Duration,
        Value::Filter(_) => ValueKind::Filter,
        Value::Array(_) => ValueKind::Array,
        Value::Object(_) => ValueKind::Object,
    }
}

// Predicates match directly instead of going through `type_of`.

pub fn is_null(value: &Value) -> bool {
    matches!(value, Value::Null)
}

pub fn is_boolean(value: &Value) -> bool {
    matches!(value, Value::Boolean(_))
}

pub fn is_number(value: &Value) -> bool {
    matches!(value, Value::Number(_))
}

pub fn is_string(value: &Value) -> bool {
    matches!(value, Value::String(_))
}

pub fn is_regexp(value: &Value) -> bool {
    matches!(value, Value::RegExp(_))
}

pub fn is_date(value: &Value) -> bool {
    matches!(value, Value::Moment(Moment::Date(_)))
}

pub fn is_duration(value: &Value) -> bool {
    matches!(value, Value::Moment(Moment::Duration(_)))
}

pub fn is_filter(value: &Value) -> bool {
    matches!(value, Value::Filter(_))
}

pub fn is_array(value: &Value) -> bool {
    matches!(value, Value::Array(_))
}

pub fn is_object(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}
