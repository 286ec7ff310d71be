//! Inline kind checks for runtime code.

use serde_json::Value as Json;

use super::kind::{is_boolean, is_number, is_string, type_of};
use super::value::Value;
use crate::errors::{ErrorCode, Info, JuttleError};

/// `value` if it is a boolean, else a `TYPE-ERROR` runtime error.
///
/// Every `<type>` in `template` is replaced with the display name of the
/// value's actual kind.
pub fn ensure_boolean<'v>(value: &'v Value, template: &str) -> Result<&'v Value, JuttleError> {
    ensure(value, is_boolean, template)
}

pub fn ensure_number<'v>(value: &'v Value, template: &str) -> Result<&'v Value, JuttleError> {
    ensure(value, is_number, template)
}

pub fn ensure_string<'v>(value: &'v Value, template: &str) -> Result<&'v Value, JuttleError> {
    ensure(value, is_string, template)
}

fn ensure<'v>(
    value: &'v Value,
    accepts: fn(&Value) -> bool,
    template: &str,
) -> Result<&'v Value, JuttleError> {
    if accepts(value) {
        return Ok(value);
    }

    let message = template.replace("<type>", type_of(value).display_name());
    let mut info = Info::new();
    info.insert("message".into(), Json::String(message));
    Err(JuttleError::new(ErrorCode::TypeError, info))
}
