//! Structural equality of values.

use indexmap::IndexMap;

use super::kind::type_of;
use super::value::Value;

/// Whether two values are equal.
///
/// Values of different kinds are never equal. Numbers compare by value
/// (`NaN` is unequal to itself), filters by identity, dates and durations by
/// their millisecond value. Arrays compare element-wise in order, objects by
/// key set and per-key value regardless of key order.
pub fn equal(a: &Value, b: &Value) -> bool {
    if type_of(a) != type_of(b) {
        return false;
    }

    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Filter(a), Value::Filter(b)) => a == b,
        (Value::RegExp(a), Value::RegExp(b)) => {
            a.source == b.source
                && a.global == b.global
                && a.ignore_case == b.ignore_case
                && a.multiline == b.multiline
                && a.sticky == b.sticky
        }
        (Value::Moment(a), Value::Moment(b)) => a.value_of() == b.value_of(),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| equal(a, b))
        }
        (Value::Object(a), Value::Object(b)) => equal_objects(a, b),
        _ => false,
    }
}

fn equal_objects(a: &IndexMap<String, Value>, b: &IndexMap<String, Value>) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut keys_a: Vec<&String> = a.keys().collect();
    let mut keys_b: Vec<&String> = b.keys().collect();
    keys_a.sort();
    keys_b.sort();

    keys_a
        .into_iter()
        .zip(keys_b)
        .all(|(key_a, key_b)| key_a == key_b && equal(&a[key_a], &b[key_b]))
}
