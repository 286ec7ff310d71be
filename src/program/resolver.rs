//! Module resolver contract.
//!
//! A resolver maps an import path (and the alias it is imported under) to the
//! module's canonical name and source text. Failing means "module not found";
//! the assembler turns any failure into a `MODULE-NOT-FOUND` error.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use thiserror::Error;

/// A module located by a resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    /// Canonical module name, unique per module
    pub name: String,
    pub source: String,
}

impl ResolvedModule {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Could not find module: {0}")]
    NotFound(String),

    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Blocking resolver, used by [`parse_sync`](super::parse_sync) and, through an
/// adapter, by [`parse`](super::parse).
pub trait ModuleResolver: Send + Sync {
    fn resolve(&self, path: &str, local_name: &str) -> Result<ResolvedModule, ResolveError>;
}

impl<F> ModuleResolver for F
where
    F: Fn(&str, &str) -> Result<ResolvedModule, ResolveError> + Send + Sync,
{
    fn resolve(&self, path: &str, local_name: &str) -> Result<ResolvedModule, ResolveError> {
        self(path, local_name)
    }
}

/// Deferred resolver, only usable by [`parse`](super::parse).
#[async_trait]
pub trait AsyncModuleResolver: Send + Sync {
    async fn resolve(&self, path: &str, local_name: &str) -> Result<ResolvedModule, ResolveError>;
}

// ============================================================================
// In-memory modules
// ============================================================================

/// Module sources keyed by import path; the path doubles as the module name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleMap {
    modules: IndexMap<String, String>,
}

impl ModuleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, source: impl Into<String>) -> Option<String> {
        self.modules.insert(path.into(), source.into())
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.modules.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ModuleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            modules: iter
                .into_iter()
                .map(|(path, source)| (path.into(), source.into()))
                .collect(),
        }
    }
}

impl ModuleResolver for ModuleMap {
    fn resolve(&self, path: &str, _local_name: &str) -> Result<ResolvedModule, ResolveError> {
        self.get(path)
            .map(|source| ResolvedModule::new(path, source))
            .ok_or_else(|| ResolveError::NotFound(path.to_string()))
    }
}

#[async_trait]
impl AsyncModuleResolver for ModuleMap {
    async fn resolve(&self, path: &str, local_name: &str) -> Result<ResolvedModule, ResolveError> {
        ModuleResolver::resolve(self, path, local_name)
    }
}

// ============================================================================
// Resolver selection
// ============================================================================

/// Which resolver an assembly uses.
#[derive(Clone, Default)]
pub enum Resolver {
    /// Look import paths up in [`ParseOptions::modules`](super::ParseOptions)
    #[default]
    Modules,
    /// A blocking resolver, usable in both modes
    Blocking(Arc<dyn ModuleResolver>),
    /// A deferred resolver, asynchronous mode only
    Deferred(Arc<dyn AsyncModuleResolver>),
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Modules => f.write_str("Modules"),
            Self::Blocking(_) => f.write_str("Blocking(..)"),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// Runs a blocking resolver where a deferred one is expected.
pub(crate) struct BlockingAdapter(pub(crate) Arc<dyn ModuleResolver>);

#[async_trait]
impl AsyncModuleResolver for BlockingAdapter {
    async fn resolve(&self, path: &str, local_name: &str) -> Result<ResolvedModule, ResolveError> {
        self.0.resolve(path, local_name)
    }
}
