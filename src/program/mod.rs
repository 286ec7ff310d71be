//! Public parsing entry points
//!
//! - [`parse_filter`] / [`parse_value`]: one standalone expression, no modules
//! - [`parse_sync`] / [`parse`]: a full program with its imported modules
//!   merged in as [`ModuleDef`](crate::parser::ModuleDef)s
//!
//! Both program entry points run the same assembly (see [`assembler`]); they
//! differ only in how resolver calls are scheduled.

mod assembler;
mod options;
mod resolver;

pub use assembler::AssemblyError;
pub use options::ParseOptions;
pub use resolver::{
    AsyncModuleResolver, ModuleMap, ModuleResolver, ResolveError, ResolvedModule, Resolver,
};

use assembler::{Assembly, visit_async, visit_sync};
use resolver::BlockingAdapter;

use crate::errors::{EnglishMessages, Error, Result};
use crate::parser::{Expr, Parsed, PestGrammar, Program, StartRule, parse_unit};

/// Unit name of the program being parsed; imported modules are named by
/// their resolver.
pub const MAIN_MODULE: &str = "main";

/// Parse a standalone filter expression.
pub fn parse_filter(source: &str) -> Result<Expr> {
    parse_expression(source, StartRule::Filter)
}

/// Parse a literal value; the grammar admits no variable references.
pub fn parse_value(source: &str) -> Result<Expr> {
    parse_expression(source, StartRule::Value)
}

fn parse_expression(source: &str, rule: StartRule) -> Result<Expr> {
    match parse_unit(&PestGrammar, source, rule, MAIN_MODULE, &EnglishMessages)? {
        Parsed::Expression(expr) => Ok(expr),
        Parsed::Program(_) => Err(Error::internal(AssemblyError::NotAnExpression(rule))),
    }
}

/// Parse a program and its imports, blocking on every resolver call.
///
/// # Errors
///
/// Syntax errors of any unit, `IMPORT-INTERPOLATION` and `MODULE-NOT-FOUND`
/// compile errors. A [`Resolver::Deferred`] resolver is an internal error.
pub fn parse_sync(source: &str, options: &ParseOptions) -> Result<Program> {
    let assembly = Assembly::new(options);

    match &options.resolver {
        Resolver::Modules => {
            visit_sync(&assembly, &options.modules, MAIN_MODULE, source, options.start_rule)?;
        }
        Resolver::Blocking(resolver) => {
            visit_sync(&assembly, resolver.as_ref(), MAIN_MODULE, source, options.start_rule)?;
        }
        Resolver::Deferred(_) => return Err(Error::internal(AssemblyError::DeferredResolver)),
    }

    assembly.finish()
}

/// Parse a program and its imports, resolving sibling imports concurrently.
///
/// Produces the same program as [`parse_sync`] for the same input.
pub async fn parse(source: &str, options: &ParseOptions) -> Result<Program> {
    let adapter;
    let resolver: &dyn AsyncModuleResolver = match &options.resolver {
        Resolver::Modules => &options.modules,
        Resolver::Blocking(resolver) => {
            adapter = BlockingAdapter(resolver.clone());
            &adapter
        }
        Resolver::Deferred(resolver) => resolver.as_ref(),
    };

    let assembly = Assembly::new(options);
    visit_async(
        &assembly,
        resolver,
        MAIN_MODULE.to_string(),
        source.to_string(),
        options.start_rule,
    )
    .await?;

    assembly.finish()
}
