#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use async_trait::async_trait;
use juttle::{
    AsyncModuleResolver, Error, ErrorCode, ModuleResolver, ParseOptions, ResolveError,
    ResolvedModule, parse, parse_sync,
};
use parking_lot::Mutex;

use crate::helpers::source_fixtures::{DIAMOND_MAIN, diamond_modules};
use crate::helpers::{assert_code, juttle_error};

/// Strips a leading `./` and a trailing `.juttle` so several spellings of an
/// import path name the same module.
fn canonical(path: &str) -> &str {
    let path = path.strip_prefix("./").unwrap_or(path);
    path.strip_suffix(".juttle").unwrap_or(path)
}

#[derive(Clone, Default)]
struct Recording {
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl ModuleResolver for Recording {
    fn resolve(&self, path: &str, local_name: &str) -> Result<ResolvedModule, ResolveError> {
        self.calls.lock().push((path.to_string(), local_name.to_string()));
        let name = canonical(path);
        diamond_modules()
            .get(name)
            .map(|source| ResolvedModule::new(name, source))
            .ok_or_else(|| ResolveError::NotFound(path.to_string()))
    }
}

#[async_trait]
impl AsyncModuleResolver for Recording {
    async fn resolve(&self, path: &str, local_name: &str) -> Result<ResolvedModule, ResolveError> {
        tokio::task::yield_now().await;
        ModuleResolver::resolve(self, path, local_name)
    }
}

const ALIASED_MAIN: &str = "import \"./d.juttle\" as one;\nimport \"d\" as two;";

#[test]
fn test_resolver_receives_path_and_alias() {
    let resolver = Recording::default();
    let options = ParseOptions::new().with_resolver(resolver.clone());

    parse_sync("import \"./b\" as first;", &options).unwrap();

    let calls = resolver.calls.lock();
    assert_eq!(calls[0], ("./b".to_string(), "first".to_string()));
    assert_eq!(calls[1], ("d".to_string(), "d".to_string()));
}

#[test]
fn test_canonical_name_dedupes_spellings() {
    let options = ParseOptions::new().with_resolver(Recording::default());

    let program = parse_sync(ALIASED_MAIN, &options).unwrap();

    assert_eq!(program.module_names(), vec!["d"]);
    assert_eq!(program.imports().count(), 2);
}

#[tokio::test]
async fn test_canonical_name_dedupes_spellings_async() {
    let options = ParseOptions::new().with_async_resolver(Recording::default());

    let program = parse(ALIASED_MAIN, &options).await.unwrap();

    assert_eq!(program.module_names(), vec!["d"]);
}

#[tokio::test]
async fn test_blocking_resolver_serves_async_parse() {
    let options = ParseOptions::new().with_resolver(Recording::default());

    let program = parse(DIAMOND_MAIN, &options).await.unwrap();

    let mut names = program.module_names();
    names.sort_unstable();
    assert_eq!(names, vec!["b", "c", "d"]);
}

#[tokio::test]
async fn test_resolver_failure_is_module_not_found() {
    let options = ParseOptions::new().with_resolver(
        |path: &str, _: &str| -> Result<ResolvedModule, ResolveError> {
            Err(ResolveError::Other(format!("{path}: permission denied").into()))
        },
    );

    let err = juttle_error(parse("\nimport \"secret\" as s;", &options).await);

    let location = assert_code(&err, ErrorCode::ModuleNotFound);
    assert_eq!(err.info["module"], "secret");
    assert_eq!(location.start.line, 2);
}

#[test]
fn test_deferred_resolver_needs_async_parse() {
    let options = ParseOptions::new().with_async_resolver(Recording::default());

    let result = parse_sync("emit", &options);

    assert!(matches!(result, Err(Error::Internal(_))));
}
