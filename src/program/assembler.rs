//! Program assembly: the main unit plus every transitively imported module.
//!
//! One [`Assembly`] holds the state of a single `parse`/`parse_sync` call:
//! the set of claimed module names and the parsed units in resolution order.
//! The two drivers below share it and differ only in how resolver calls are
//! scheduled.
//!
//! A unit is claimed (name inserted into the resolved set) before it is parsed,
//! under one lock acquisition, so a module reached along several import paths
//! is parsed once, and a self-import ends at the second visit.

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, try_join_all};
use indexmap::IndexMap;
use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use serde_json::Value as Json;
use thiserror::Error;

use super::MAIN_MODULE;
use super::options::ParseOptions;
use super::resolver::{AsyncModuleResolver, ModuleResolver, ResolveError, ResolvedModule};
use crate::base::Location;
use crate::errors::{Error, ErrorCode, Info, JuttleError, Result, location_to_json};
use crate::parser::{ModuleDef, Parsed, Program, StartRule, parse_unit};

/// Misuse of the assembly API; surfaces as [`Error::Internal`].
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("start rule `{0}` does not produce a program")]
    NotAProgram(StartRule),

    #[error("start rule `{0}` does not produce an expression")]
    NotAnExpression(StartRule),

    #[error("an asynchronous resolver cannot be used for synchronous parsing")]
    DeferredResolver,

    #[error("main unit missing after assembly")]
    MissingMain,
}

/// An import found in a unit, ready for the resolver.
#[derive(Debug, Clone)]
pub(crate) struct ImportRequest {
    pub path: String,
    pub local_name: String,
    pub location: Location,
}

pub(crate) struct Assembly<'o> {
    options: &'o ParseOptions,
    resolved: Mutex<FxHashSet<String>>,
    units: Mutex<IndexMap<String, Program>>,
}

impl<'o> Assembly<'o> {
    pub fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            resolved: Mutex::new(FxHashSet::default()),
            units: Mutex::new(IndexMap::new()),
        }
    }

    /// Mark `name` as resolved; `false` if it already was.
    fn claim(&self, name: &str) -> bool {
        let claimed = self.resolved.lock().insert(name.to_string());
        if claimed {
            tracing::debug!(module = name, "resolving module");
        } else {
            tracing::debug!(module = name, "module already resolved");
        }
        claimed
    }

    /// Parse a claimed unit and store it.
    ///
    /// Returns its imports in declaration order; an import whose module name
    /// is not a string literal is returned as its `IMPORT-INTERPOLATION` error.
    /// Both drivers raise the first such error before any resolver call.
    fn process(
        &self,
        name: &str,
        source: &str,
        rule: StartRule,
    ) -> Result<Vec<Result<ImportRequest, JuttleError>>> {
        let filename = if name == MAIN_MODULE {
            self.options.filename.as_str()
        } else {
            name
        };

        let program = match parse_unit(
            self.options.grammar.as_ref(),
            source,
            rule,
            filename,
            self.options.catalog.as_ref(),
        )? {
            Parsed::Program(program) => program,
            Parsed::Expression(_) => return Err(Error::internal(AssemblyError::NotAProgram(rule))),
        };

        let requests = program
            .imports()
            .map(|import| match import.literal_path() {
                Some(path) => Ok(ImportRequest {
                    path: path.to_string(),
                    local_name: import.localname.to_string(),
                    location: import.location.clone(),
                }),
                None => Err(self.error(
                    ErrorCode::ImportInterpolation,
                    [("location", location_to_json(&import.modulename.location))],
                )),
            })
            .collect();

        self.units.lock().insert(name.to_string(), program);
        Ok(requests)
    }

    fn module_not_found(&self, request: &ImportRequest, err: ResolveError) -> Error {
        tracing::debug!(module = %request.path, error = %err, "module resolution failed");

        self.error(
            ErrorCode::ModuleNotFound,
            [
                ("module", Json::String(request.path.clone())),
                ("location", location_to_json(&request.location)),
            ],
        )
        .into()
    }

    fn error<const N: usize>(&self, code: ErrorCode, entries: [(&str, Json); N]) -> JuttleError {
        let info: Info = entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        JuttleError::with_catalog(code, info, self.options.catalog.as_ref())
    }

    /// Attach every unit except main to main, in resolution order.
    pub fn finish(self) -> Result<Program> {
        let mut units = self.units.into_inner();
        let mut main = units
            .shift_remove(MAIN_MODULE)
            .ok_or_else(|| Error::internal(AssemblyError::MissingMain))?;

        main.modules.extend(
            units
                .into_iter()
                .map(|(name, unit)| ModuleDef {
                    name,
                    elements: unit.elements,
                }),
        );
        Ok(main)
    }
}

// ============================================================================
// Synchronous driver
// ============================================================================

/// Check every import of the unit, resolve them one by one in declaration
/// order, then recurse.
pub(crate) fn visit_sync(
    assembly: &Assembly<'_>,
    resolver: &dyn ModuleResolver,
    name: &str,
    source: &str,
    rule: StartRule,
) -> Result<()> {
    if !assembly.claim(name) {
        return Ok(());
    }

    let requests = assembly
        .process(name, source, rule)?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;
    let mut modules = Vec::with_capacity(requests.len());
    for request in requests {
        let module = resolver
            .resolve(&request.path, &request.local_name)
            .map_err(|err| assembly.module_not_found(&request, err))?;
        modules.push(module);
    }

    for module in modules {
        visit_sync(assembly, resolver, &module.name, &module.source, StartRule::Program)?;
    }
    Ok(())
}

// ============================================================================
// Asynchronous driver
// ============================================================================

/// Resolve sibling imports concurrently, then visit the resolved modules
/// concurrently. The first failure aborts the whole assembly.
pub(crate) fn visit_async<'a>(
    assembly: &'a Assembly<'a>,
    resolver: &'a dyn AsyncModuleResolver,
    name: String,
    source: String,
    rule: StartRule,
) -> BoxFuture<'a, Result<()>> {
    async move {
        if !assembly.claim(&name) {
            return Ok(());
        }

        let requests = assembly
            .process(&name, &source, rule)?
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        let modules: Vec<ResolvedModule> = try_join_all(requests.iter().map(|request| async move {
            resolver
                .resolve(&request.path, &request.local_name)
                .await
                .map_err(|err| assembly.module_not_found(request, err))
        }))
        .await?;

        try_join_all(modules.into_iter().map(|module| {
            visit_async(assembly, resolver, module.name, module.source, StartRule::Program)
        }))
        .await?;

        Ok(())
    }
    .boxed()
}
