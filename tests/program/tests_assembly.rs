#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use juttle::parser::Element;
use juttle::{
    ErrorCode, ModuleMap, ParseOptions, Program, ResolveError, ResolvedModule, parse, parse_sync,
};
use rstest::rstest;

use crate::helpers::source_fixtures::{
    DIAMOND_MAIN, chain_modules, diamond_modules, self_importing_modules,
};
use crate::helpers::{assert_code, juttle_error};

#[derive(Debug, Clone, Copy)]
enum Mode {
    Sync,
    Async,
}

fn assemble(mode: Mode, source: &str, modules: ModuleMap) -> juttle::Result<Program> {
    let options = ParseOptions {
        modules,
        ..ParseOptions::default()
    };
    assemble_with(mode, source, &options)
}

fn assemble_with(mode: Mode, source: &str, options: &ParseOptions) -> juttle::Result<Program> {
    match mode {
        Mode::Sync => parse_sync(source, options),
        Mode::Async => tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(parse(source, options)),
    }
}

fn sorted_names(program: &Program) -> Vec<&str> {
    let mut names = program.module_names();
    names.sort_unstable();
    names
}

#[rstest]
fn test_diamond_yields_one_module_each(#[values(Mode::Sync, Mode::Async)] mode: Mode) {
    let program = assemble(mode, DIAMOND_MAIN, diamond_modules()).unwrap();

    assert_eq!(sorted_names(&program), vec!["b", "c", "d"]);
    assert_eq!(program.module("d").unwrap().elements.len(), 1);
}

#[rstest]
fn test_self_import(#[values(Mode::Sync, Mode::Async)] mode: Mode) {
    let program = assemble(mode, "import \"m\" as m; emit | m.top", self_importing_modules()).unwrap();

    assert_eq!(program.module_names(), vec!["m"]);
    let module = program.module("m").unwrap();
    assert!(module.elements[0].is_import());
    assert!(matches!(module.elements[1], Element::Sub(_)));
}

#[rstest]
fn test_import_chain(#[values(Mode::Sync, Mode::Async)] mode: Mode) {
    let program = assemble(mode, "import \"l1\" as l1;", chain_modules()).unwrap();

    assert_eq!(program.module_names(), vec!["l1", "l2", "l3"]);
}

#[rstest]
fn test_modes_agree(#[values("emit", DIAMOND_MAIN, "import \"d\" as d; import \"b\" as b;")] source: &str) {
    let sync = assemble(Mode::Sync, source, diamond_modules()).unwrap();
    let asynchronous = assemble(Mode::Async, source, diamond_modules()).unwrap();

    assert_eq!(sync.elements, asynchronous.elements);
    assert_eq!(sorted_names(&sync), sorted_names(&asynchronous));
    for name in sync.module_names() {
        assert_eq!(sync.module(name), asynchronous.module(name));
    }
}

#[rstest]
fn test_unused_modules_are_not_attached(#[values(Mode::Sync, Mode::Async)] mode: Mode) {
    let program = assemble(mode, "emit", diamond_modules()).unwrap();
    assert!(program.modules.is_empty());
}

#[rstest]
#[case::concatenation("import \"a\" + \"b\" as m;", 8)]
#[case::template("emit;\nimport \"lib/${name}\" as m;", 8)]
#[case::variable("const p = \"d\";\nimport p as m;", 8)]
fn test_import_interpolation(
    #[values(Mode::Sync, Mode::Async)] mode: Mode,
    #[case] source: &str,
    #[case] column: usize,
) {
    let err = juttle_error(assemble(mode, source, diamond_modules()));

    let location = assert_code(&err, ErrorCode::ImportInterpolation);
    assert!(err.is_compile());
    assert_eq!(location.start.column, column);
    assert_eq!(err.message, "Import module name must be a string literal.");
}

#[rstest]
fn test_interpolated_import_checked_before_any_resolution(
    #[values(Mode::Sync, Mode::Async)] mode: Mode,
) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let options = ParseOptions::new().with_resolver(
        move |path: &str, _: &str| -> Result<ResolvedModule, ResolveError> {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(ResolveError::NotFound(path.to_string()))
        },
    );

    let err = juttle_error(assemble_with(
        mode,
        "import \"missing\" as a; import \"x\" + \"y\" as b;",
        &options,
    ));

    let location = assert_code(&err, ErrorCode::ImportInterpolation);
    assert_eq!(location.start.column, 31);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[rstest]
#[case::in_main("import \"missing\" as m;", 1)]
#[case::after_statements("emit;\n\nimport \"missing\" as m;", 3)]
fn test_module_not_found(
    #[values(Mode::Sync, Mode::Async)] mode: Mode,
    #[case] source: &str,
    #[case] line: usize,
) {
    let err = juttle_error(assemble(mode, source, ModuleMap::new()));

    let location = assert_code(&err, ErrorCode::ModuleNotFound);
    assert!(err.is_compile());
    assert_eq!(err.info["module"], "missing");
    assert_eq!(location.start.line, line);
    assert_eq!(location.filename.as_deref(), Some("main"));
}

#[rstest]
fn test_missing_transitive_module(#[values(Mode::Sync, Mode::Async)] mode: Mode) {
    let modules: ModuleMap = [("a", "import \"gone\" as g;")].into_iter().collect();

    let err = juttle_error(assemble(mode, "import \"a\" as a;", modules));

    let location = assert_code(&err, ErrorCode::ModuleNotFound);
    assert_eq!(err.info["module"], "gone");
    assert_eq!(location.filename.as_deref(), Some("a"));
}

#[rstest]
fn test_syntax_error_in_imported_module(#[values(Mode::Sync, Mode::Async)] mode: Mode) {
    let modules: ModuleMap = [("bad", "export const = ;")].into_iter().collect();

    let err = juttle_error(assemble(mode, "import \"bad\" as bad;", modules));

    let location = assert_code(&err, ErrorCode::SyntaxErrorWithExpected);
    assert_eq!(location.filename.as_deref(), Some("bad"));
}
