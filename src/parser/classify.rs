//! Raw parse failures to structured syntax errors.

use std::fmt::Write;

use serde_json::{Value as Json, json};

use super::grammar::{Expectation, RawParseFailure};
use crate::errors::{ErrorCode, Info, JuttleError, MessageCatalog, location_to_json};

/// Expectations that are parsing artifacts rather than user-meaningful alternatives.
const TRIVIAL_EXPECTATIONS: [&str; 3] = ["whitespace", "end of line", "comment"];

/// Description used when every expectation was trivial.
const NOTHING_EXPECTED: &str = "valid input";

/// Classify a raw failure as a syntax error in `filename`.
///
/// A failure with an `expected` list becomes `SYNTAX-ERROR-WITH-EXPECTED`,
/// one without becomes `SYNTAX-ERROR-WITHOUT-EXPECTED` carrying the raw message.
pub fn classify(raw: RawParseFailure, filename: &str, catalog: &dyn MessageCatalog) -> JuttleError {
    let location = location_to_json(&raw.location.with_default_filename(filename));
    let mut info = Info::new();

    let Some(expected) = raw.expected else {
        info.insert("message".into(), Json::String(raw.message));
        info.insert("location".into(), location);
        return JuttleError::with_catalog(ErrorCode::SyntaxErrorWithoutExpected, info, catalog);
    };

    let expected: Vec<Expectation> = expected
        .into_iter()
        .filter(|e| !TRIVIAL_EXPECTATIONS.contains(&e.description.as_str()))
        .collect();
    let expected_description = describe_expected(&expected);
    let found_description = describe_found(raw.found.as_deref());

    info.insert("expected".into(), json!(expected));
    info.insert("expectedDescription".into(), Json::String(expected_description));
    info.insert("found".into(), json!(raw.found));
    info.insert("foundDescription".into(), Json::String(found_description));
    info.insert("location".into(), location);

    JuttleError::with_catalog(ErrorCode::SyntaxErrorWithExpected, info, catalog)
}

/// `a`, `a or b`, `a, b or c`
fn describe_expected(expected: &[Expectation]) -> String {
    match expected {
        [] => NOTHING_EXPECTED.to_string(),
        [only] => only.description.clone(),
        [init @ .., last] => {
            let init: Vec<&str> = init.iter().map(|e| e.description.as_str()).collect();
            format!("{} or {}", init.join(", "), last.description)
        }
    }
}

fn describe_found(found: Option<&str>) -> String {
    match found {
        Some(found) => format!("\"{}\"", escape(found)),
        None => "end of input".to_string(),
    }
}

/// Escape text for embedding in a double-quoted literal.
///
/// Non-printable and non-ASCII characters become `\xHH` or `\uHHHH`
/// (upper-case hex); characters beyond the BMP are written as surrogate pairs.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);

    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            '\u{0}'..='\u{1f}' | '\u{80}'..='\u{ff}' => {
                let _ = write!(out, "\\x{:02X}", c as u32);
            }
            '\u{100}'..='\u{ffff}' => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            '\u{10000}'..='\u{10ffff}' => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{:04X}", unit);
                }
            }
            _ => out.push(c),
        }
    }

    out
}
