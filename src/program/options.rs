//! Parse options

use std::fmt;
use std::sync::Arc;

use super::resolver::{AsyncModuleResolver, ModuleMap, ModuleResolver, Resolver};
use crate::errors::{EnglishMessages, MessageCatalog};
use crate::parser::{Grammar, PestGrammar, StartRule};

/// Options for [`parse`](super::parse) and [`parse_sync`](super::parse_sync).
#[derive(Clone)]
pub struct ParseOptions {
    /// Filename reported in locations of the main unit
    pub filename: String,
    /// Start rule for the main unit; imported modules always use `start`
    pub start_rule: StartRule,
    /// In-memory modules for [`Resolver::Modules`]
    pub modules: ModuleMap,
    pub resolver: Resolver,
    pub grammar: Arc<dyn Grammar>,
    /// Templates for every error the parse produces
    pub catalog: Arc<dyn MessageCatalog>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            filename: super::MAIN_MODULE.to_string(),
            start_rule: StartRule::Program,
            modules: ModuleMap::new(),
            resolver: Resolver::Modules,
            grammar: Arc::new(PestGrammar),
            catalog: Arc::new(EnglishMessages),
        }
    }
}

impl fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("filename", &self.filename)
            .field("start_rule", &self.start_rule)
            .field("modules", &self.modules)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn with_start_rule(mut self, rule: StartRule) -> Self {
        self.start_rule = rule;
        self
    }

    /// Add an in-memory module; the path is also its name.
    pub fn with_module(mut self, path: impl Into<String>, source: impl Into<String>) -> Self {
        self.modules.insert(path, source);
        self
    }

    pub fn with_resolver(mut self, resolver: impl ModuleResolver + 'static) -> Self {
        self.resolver = Resolver::Blocking(Arc::new(resolver));
        self
    }

    pub fn with_async_resolver(mut self, resolver: impl AsyncModuleResolver + 'static) -> Self {
        self.resolver = Resolver::Deferred(Arc::new(resolver));
        self
    }

    pub fn with_grammar(mut self, grammar: impl Grammar + 'static) -> Self {
        self.grammar = Arc::new(grammar);
        self
    }

    pub fn with_catalog(mut self, catalog: impl MessageCatalog + 'static) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }
}
