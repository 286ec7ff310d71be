#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use juttle::parser::{Element, ExprKind, Grammar, Parsed, PestGrammar, Stage, StartRule};
use juttle::{ParseOptions, parse_filter, parse_sync, parse_value};
use rstest::rstest;

use crate::helpers::source_fixtures::EMIT_TO_TABLE;

fn program_elements(source: &str) -> Vec<Element> {
    parse_sync(source, &ParseOptions::new())
        .unwrap_or_else(|e| panic!("Failed to parse {source:?}: {e}"))
        .elements
}

#[rstest]
#[case("emit")]
#[case(EMIT_TO_TABLE)]
#[case("emit; emit")]
#[case("const x = 1; emit -limit x")]
#[case("export const s = \"a${1 + 2}b\";")]
#[case("sub s(a, b = 2) { emit -limit a + b }")]
#[case("export sub s() { emit | head 1 }")]
#[case("(emit; emit -limit 2) | put x = 1")]
#[case("read file -file \"x.json\" | filter a.b[0] =~ /x+/i AND NOT c")]
#[case("emit | reduce avg = avg(v), total = sum(v) by host")]
#[case("// only a comment")]
#[case("")]
fn test_programs_parse(#[case] source: &str) {
    parse_sync(source, &ParseOptions::new())
        .unwrap_or_else(|e| panic!("Failed to parse {source:?}: {e}"));
}

#[rstest]
#[case("null")]
#[case("true")]
#[case("-12.5e-3")]
#[case("0xff")]
#[case("Infinity")]
#[case("\"text with ${ dollar\"")]
#[case("/re/gimy")]
#[case("[]")]
#[case("[1, [2, [3]], {}]")]
#[case("{a: 1, \"b c\": [null]}")]
fn test_values_parse(#[case] source: &str) {
    parse_value(source).unwrap_or_else(|e| panic!("Failed to parse value {source:?}: {e}"));
}

#[rstest]
#[case("x")]
#[case("[a]")]
#[case("1 + 1")]
#[case("\"${x}\" + 1")]
#[case("{a: b}")]
fn test_values_reject_expressions(#[case] source: &str) {
    assert!(parse_value(source).is_err(), "{source:?} parsed as a value");
}

#[rstest]
#[case("a == 1", "==")]
#[case("a != 1 || b", "||")]
#[case("a < 1 and b > 2", "AND")]
#[case("x + 1 * 2", "+")]
#[case("s !~ /re/", "!~")]
fn test_filter_top_operator(#[case] source: &str, #[case] operator: &str) {
    let expr = parse_filter(source).unwrap();

    let ExprKind::BinaryExpression { operator: actual, .. } = &expr.kind else {
        panic!("expected a binary expression for {source:?}");
    };
    assert_eq!(actual, operator);
}

#[test]
fn test_filter_expression_location() {
    let expr = parse_filter("  a == 1").unwrap();

    assert_eq!(expr.location.start.column, 3);
    assert_eq!(expr.location.end.column, 9);
    assert_eq!(expr.location.filename.as_deref(), Some("main"));
}

#[test]
fn test_flowgraph_shape() {
    let elements = program_elements(EMIT_TO_TABLE);

    let [Element::Flowgraph(graph)] = elements.as_slice() else {
        panic!("expected a single flowgraph");
    };
    let names: Vec<String> = graph
        .stages
        .iter()
        .map(|stage| match stage {
            Stage::Proc(proc) => proc.name.join("."),
            Stage::Parallel(_) => "(parallel)".to_string(),
        })
        .collect();
    assert_eq!(names, vec!["emit", "view"]);
}

#[test]
fn test_grammar_trait_object() {
    let grammar: &dyn Grammar = &PestGrammar;

    let parsed = grammar.parse("a", StartRule::Filter, "f").unwrap();
    assert!(matches!(parsed, Parsed::Expression(_)));
}

#[test]
fn test_program_serializes_with_type_tags() {
    let program = parse_sync("import \"m\" as m;", &ParseOptions::new().with_module("m", "emit"))
        .unwrap();

    let json = serde_json::to_value(&program).unwrap();
    assert_eq!(json["type"], "MainModule");
    assert_eq!(json["elements"][0]["type"], "ImportStatement");
    assert_eq!(json["elements"][0]["modulename"]["type"], "StringLiteral");
    assert_eq!(json["modules"][0]["type"], "ModuleDef");
    assert_eq!(json["modules"][0]["name"], "m");
}
