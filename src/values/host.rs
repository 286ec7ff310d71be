//! Host data to values.
//!
//! JSON scalars, arrays and objects map to the matching kinds. The kinds
//! without a JSON counterpart are written as objects tagged with `"$type"`:
//!
//! ```text
//! {"$type": "date", "value": "2016-01-01T00:00:00Z"}   or ms since epoch
//! {"$type": "duration", "value": 1500}                 ms
//! {"$type": "regexp", "source": "a+", "flags": "gi"}
//! {"$type": "filter", "text": "x > 1"}
//! ```

use chrono::{DateTime, TimeDelta, Utc};
use indexmap::IndexMap;
use serde_json::{Map, Value as Json};

use super::value::{Filter, InvalidValue, Moment, RegExp, Value};

const TYPE_TAG: &str = "$type";

impl TryFrom<Json> for Value {
    type Error = InvalidValue;

    fn try_from(json: Json) -> Result<Self, Self::Error> {
        match json {
            Json::Null => Ok(Value::Null),
            Json::Bool(b) => Ok(Value::Boolean(b)),
            Json::Number(n) => n
                .as_f64()
                .map(Value::Number)
                .ok_or_else(|| InvalidValue(n.to_string())),
            Json::String(s) => Ok(Value::String(s)),
            Json::Array(items) => items
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Json::Object(object) if object.contains_key(TYPE_TAG) => tagged(object),
            Json::Object(object) => object
                .into_iter()
                .map(|(key, value)| Ok((key, Value::try_from(value)?)))
                .collect::<Result<IndexMap<_, _>, _>>()
                .map(Value::Object),
        }
    }
}

fn tagged(object: Map<String, Json>) -> Result<Value, InvalidValue> {
    let invalid = || InvalidValue(Json::Object(object.clone()).to_string());

    match object.get(TYPE_TAG).and_then(Json::as_str) {
        Some("date") => {
            let date = match object.get("value") {
                Some(Json::String(text)) => DateTime::parse_from_rfc3339(text)
                    .ok()
                    .map(|date| date.with_timezone(&Utc)),
                Some(Json::Number(ms)) => ms.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
                _ => None,
            };
            date.map(|date| Value::Moment(Moment::Date(date)))
                .ok_or_else(invalid)
        }
        Some("duration") => object
            .get("value")
            .and_then(Json::as_i64)
            .and_then(TimeDelta::try_milliseconds)
            .map(|duration| Value::Moment(Moment::Duration(duration)))
            .ok_or_else(invalid),
        Some("regexp") => {
            let source = object.get("source").and_then(Json::as_str).ok_or_else(invalid)?;
            let flags = match object.get("flags") {
                None => "",
                Some(flags) => flags.as_str().ok_or_else(invalid)?,
            };
            RegExp::new(source, flags).map(Value::RegExp)
        }
        Some("filter") => {
            let text = object.get("text").and_then(Json::as_str).ok_or_else(invalid)?;
            Filter::compile(text)
                .map(Value::Filter)
                .map_err(|err| InvalidValue(format!("filter \"{text}\" ({err})")))
        }
        _ => Err(invalid()),
    }
}
