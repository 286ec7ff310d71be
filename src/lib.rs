//! # juttle-front
//!
//! Front end of the Juttle dataflow language: parsing with module resolution,
//! structured errors, and the runtime value model.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! values    → Value, type_of, equal, to_string, inspect, ensure_*
//!   ↓
//! program   → parse / parse_sync / parse_filter / parse_value, module assembly
//!   ↓
//! parser    → pest grammar, AST, syntax error classification
//!   ↓
//! errors    → ErrorKind / ErrorCode / JuttleError, message catalogs, locate
//!   ↓
//! base      → Location, Position
//! ```

// ============================================================================
// MODULES (dependency order: base → errors → parser → program → values)
// ============================================================================

/// Foundation types: Location, Position
pub mod base;

/// Error taxonomy, message templates, location backfill
pub mod errors;

/// Grammar adapter, AST, error classifier
pub mod parser;

/// Public parsing entry points and module assembly
pub mod program;

/// Runtime value model
pub mod values;

pub use base::{Location, Position};
pub use errors::{Error, ErrorCode, ErrorKind, JuttleError, Result, locate};
pub use parser::{Expr, ModuleDef, Program, StartRule};
pub use program::{
    AsyncModuleResolver, ModuleMap, ModuleResolver, ParseOptions, ResolveError, ResolvedModule,
    Resolver, parse, parse_filter, parse_sync, parse_value,
};
pub use values::{Value, ValueKind};
