#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use juttle::values::{
    Filter, RegExp, Value, ValueKind, ensure_boolean, ensure_number, ensure_string, equal,
    format_number, from_literal, inspect, to_string, type_of,
};
use juttle::{ErrorCode, parse_value};
use rstest::rstest;
use serde_json::json;

fn literal(source: &str) -> Value {
    let expr = parse_value(source).unwrap_or_else(|err| panic!("{source}: {err}"));
    from_literal(&expr).unwrap_or_else(|| panic!("{source} is not a literal"))
}

fn host(json: serde_json::Value) -> Value {
    Value::try_from(json).unwrap()
}

// ============================================================================
// Kinds
// ============================================================================

#[rstest]
#[case::null(json!(null), ValueKind::Null)]
#[case::boolean(json!(true), ValueKind::Boolean)]
#[case::number(json!(-3.5), ValueKind::Number)]
#[case::string(json!("s"), ValueKind::String)]
#[case::date(json!({"$type": "date", "value": 0}), ValueKind::Date)]
#[case::duration(json!({"$type": "duration", "value": 10}), ValueKind::Duration)]
#[case::regexp(json!({"$type": "regexp", "source": "x"}), ValueKind::RegExp)]
#[case::filter(json!({"$type": "filter", "text": "a = 1"}), ValueKind::Filter)]
#[case::array(json!([]), ValueKind::Array)]
#[case::object(json!({}), ValueKind::Object)]
fn test_type_of_host_values(#[case] json: serde_json::Value, #[case] kind: ValueKind) {
    assert_eq!(type_of(&host(json)), kind);
}

#[test]
fn test_every_kind_has_distinct_names() {
    let mut names: Vec<&str> = ValueKind::ALL.iter().map(ValueKind::as_str).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), ValueKind::ALL.len());
}

// ============================================================================
// Rendering
// ============================================================================

#[rstest]
#[case::integer(42.0, "42")]
#[case::fraction(0.25, "0.25")]
#[case::negative_zero(-0.0, "0")]
#[case::small(1e-6, "0.000001")]
#[case::tiny(1.5e-7, "1.5e-7")]
#[case::large(1e20, "100000000000000000000")]
#[case::huge(1e21, "1e+21")]
#[case::nan(f64::NAN, "NaN")]
#[case::infinity(f64::NEG_INFINITY, "-Infinity")]
fn test_format_number(#[case] n: f64, #[case] expected: &str) {
    assert_eq!(format_number(n), expected);
}

#[rstest]
#[case::null("null", "", "null")]
#[case::string(r#""hi""#, "hi", r#""hi""#)]
#[case::boolean("false", "false", "false")]
#[case::regexp("/a.b/i", "/a.b/i", "/a.b/i")]
#[case::array(r#"[1, "x", null]"#, "1, x, ", r#"[1, "x", null]"#)]
#[case::object(r#"{ a: "x", b: [1, 2] }"#, "a: x, b: 1, 2", "{ a: x, b: 1, 2 }")]
fn test_renderings_of_literals(#[case] source: &str, #[case] readable: &str, #[case] exact: &str) {
    let value = literal(source);
    assert_eq!(to_string(&value), readable);
    assert_eq!(inspect(&value), exact);
}

#[test]
fn test_moment_renderings() {
    let date = host(json!({"$type": "date", "value": "1970-01-01T00:00:02.5Z"}));
    assert_eq!(to_string(&date), "2500");
    assert_eq!(inspect(&date), ":2500:");
}

#[test]
fn test_filter_renderings_use_source_text() {
    let filter = Value::Filter(Filter::compile("host =~ /web/ AND code >= 500").unwrap());
    assert_eq!(to_string(&filter), "host =~ /web/ AND code >= 500");
    assert_eq!(inspect(&filter), "filter(host =~ /web/ AND code >= 500)");
}

// ============================================================================
// Equality
// ============================================================================

#[rstest]
#[case::nested_arrays("[[1], [2, [3]]]", "[[1], [2, [3]]]", true)]
#[case::array_order("[1, 2]", "[2, 1]", false)]
#[case::object_key_order("{ a: 1, b: 2 }", "{ b: 2, a: 1 }", true)]
#[case::object_extra_key("{ a: 1 }", "{ a: 1, b: 2 }", false)]
#[case::string_vs_number(r#""1""#, "1", false)]
#[case::null_vs_false("null", "false", false)]
#[case::regexp_flags("/a/gi", "/a/ig", true)]
#[case::regexp_source("/a/", "/b/", false)]
fn test_equal_literals(#[case] left: &str, #[case] right: &str, #[case] expected: bool) {
    assert_eq!(equal(&literal(left), &literal(right)), expected);
}

#[test]
fn test_dates_and_durations_never_equal() {
    let date = host(json!({"$type": "date", "value": 60000}));
    let duration = host(json!({"$type": "duration", "value": 60000}));
    assert!(!equal(&date, &duration));
    assert!(equal(&date, &host(json!({"$type": "date", "value": "1970-01-01T00:01:00Z"}))));
}

// ============================================================================
// Ensure
// ============================================================================

#[rstest]
#[case::number_for_boolean(Value::Number(1.0), "expected boolean, got <type>", "expected boolean, got number")]
#[case::regexp_for_boolean(
    Value::RegExp(RegExp::new("x", "").unwrap()),
    "<type> is not a boolean",
    "regular expression is not a boolean"
)]
fn test_ensure_boolean_errors(#[case] value: Value, #[case] template: &str, #[case] message: &str) {
    let err = ensure_boolean(&value, template).unwrap_err();
    assert_eq!(err.code, ErrorCode::TypeError);
    assert_eq!(err.message, message);
    assert_eq!(err.info["message"], message);
}

#[test]
fn test_ensure_mixed() {
    let filter = Value::Filter(Filter::compile("x").unwrap());
    assert_eq!(
        ensure_number(&filter, "<type>").unwrap_err().message,
        "filter expression"
    );
    assert!(ensure_string(&Value::from(""), "<type>").is_ok());
    assert!(ensure_number(&Value::Number(f64::NAN), "<type>").is_ok());
}

#[test]
fn test_type_errors_are_runtime_errors_without_location() {
    let err = ensure_string(&Value::Array(vec![]), "<type>").unwrap_err();
    assert!(err.is_runtime());
    assert!(!err.has_location());
}
