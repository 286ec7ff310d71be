//! Message templates keyed by error code.
//!
//! The catalog is a lookup the error constructors call into; embedders can
//! supply their own (e.g. a localized one) through [`MessageCatalog`].
//! Templates reference `info` entries as `{{key}}`.

use std::collections::HashMap;

use serde_json::Value as Json;

use super::Info;

/// A code → template lookup.
pub trait MessageCatalog: Send + Sync {
    /// Template for `code`, or `None` when the catalog does not know it.
    fn template(&self, code: &str) -> Option<&str>;

    /// Render the message for `code` against `info`.
    ///
    /// Unknown codes render as the code itself.
    fn render(&self, code: &str, info: &Info) -> String {
        match self.template(code) {
            Some(template) => render_template(template, info),
            None => code.to_string(),
        }
    }
}

/// The built-in en-US messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishMessages;

impl MessageCatalog for EnglishMessages {
    fn template(&self, code: &str) -> Option<&str> {
        let template = match code {
            "SYNTAX-ERROR-WITH-EXPECTED" => {
                "Expected {{expectedDescription}} but {{foundDescription}} found."
            }
            "SYNTAX-ERROR-WITHOUT-EXPECTED" => "{{message}}",
            "IMPORT-INTERPOLATION" => "Import module name must be a string literal.",
            "MODULE-NOT-FOUND" => "Error: could not find module \"{{module}}\"",
            "TYPE-ERROR" => "{{message}}",
            _ => return None,
        };
        Some(template)
    }
}

impl MessageCatalog for HashMap<String, String> {
    fn template(&self, code: &str) -> Option<&str> {
        self.get(code).map(String::as_str)
    }
}

/// Substitute every `{{key}}` in `template` with `info[key]`.
///
/// Strings are inserted raw, other values in their JSON form, missing keys and
/// nulls as nothing. An unterminated `{{` is kept literally.
pub fn render_template(template: &str, info: &Info) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };

        let key = after[..close].trim();
        let key = key.strip_prefix("info.").unwrap_or(key);
        match info.get(key) {
            Some(Json::String(s)) => out.push_str(s),
            Some(Json::Null) | None => {}
            Some(other) => out.push_str(&other.to_string()),
        }
        rest = &after[close + 2..];
    }

    out.push_str(rest);
    out
}
