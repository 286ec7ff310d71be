//! String renderings of values.
//!
//! [`to_string`] favors readability (charts, gadgets), [`inspect`] favors
//! exactness (error messages, logs) and uses source syntax where one exists.

use super::value::Value;

/// Human-oriented rendering.
pub fn to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Boolean(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => s.clone(),
        Value::RegExp(regexp) => regexp.to_string(),
        Value::Moment(moment) => moment.value_of().to_string(),
        Value::Filter(filter) => filter.text().to_string(),
        Value::Array(items) => join(items.iter().map(to_string)),
        Value::Object(object) => join(
            object
                .iter()
                .map(|(key, value)| format!("{key}: {}", to_string(value))),
        ),
    }
}

/// Exact rendering.
///
/// Object values are rendered with [`to_string`], not recursively inspected.
pub fn inspect(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => serde_json::Value::String(s.clone()).to_string(),
        Value::Moment(moment) => format!(":{}:", moment.value_of()),
        Value::Filter(filter) => format!("filter({})", filter.text()),
        Value::Array(items) => format!("[{}]", join(items.iter().map(inspect))),
        Value::Object(object) => format!(
            "{{ {} }}",
            join(
                object
                    .iter()
                    .map(|(key, value)| format!("{key}: {}", to_string(value)))
            )
        ),
        Value::Boolean(_) | Value::Number(_) | Value::RegExp(_) => to_string(value),
    }
}

fn join(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(", ")
}

/// Render a number the way the language prints numbers: no trailing `.0`,
/// `NaN`, `Infinity`, and exponent notation outside `[1e-6, 1e21)`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }

    let formatted = format!("{n:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}
