//! Juttle abstract syntax tree.
//!
//! Nodes serialize with a `type` tag (`ImportStatement`, `StringLiteral`, ...)
//! and carry the [`Location`] they were parsed from.

use serde::Serialize;
use smol_str::SmolStr;

use crate::base::Location;

// ============================================================================
// Root
// ============================================================================

/// A parsed program unit.
///
/// `modules` is empty after parsing a single unit; assembly fills it with one
/// [`ModuleDef`] per transitively imported module.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "MainModule")]
pub struct Program {
    pub elements: Vec<Element>,
    pub modules: Vec<ModuleDef>,
    pub location: Location,
}

impl Program {
    /// Top-level import statements, in declaration order.
    pub fn imports(&self) -> impl Iterator<Item = &ImportStatement> + '_ {
        self.elements.iter().filter_map(|element| match element {
            Element::Import(import) => Some(import),
            _ => None,
        })
    }

    /// Module definition by canonical name.
    pub fn module(&self, name: &str) -> Option<&ModuleDef> {
        self.modules.iter().find(|module| module.name == name)
    }

    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|module| module.name.as_str()).collect()
    }
}

/// The top-level elements of one imported module, attached to the main program.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "ModuleDef")]
pub struct ModuleDef {
    pub name: String,
    pub elements: Vec<Element>,
}

/// What a start rule produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Program(Program),
    Expression(Expr),
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Element {
    #[serde(rename = "ImportStatement")]
    Import(ImportStatement),
    #[serde(rename = "ConstStatement")]
    Const(ConstStatement),
    #[serde(rename = "SubDef")]
    Sub(SubDef),
    #[serde(rename = "Flowgraph")]
    Flowgraph(Flowgraph),
}

impl Element {
    pub fn location(&self) -> &Location {
        match self {
            Self::Import(node) => &node.location,
            Self::Const(node) => &node.location,
            Self::Sub(node) => &node.location,
            Self::Flowgraph(node) => &node.location,
        }
    }

    pub fn is_import(&self) -> bool {
        matches!(self, Self::Import(_))
    }
}

/// `import <modulename> as <localname>`
///
/// The grammar accepts any expression as the module name; only a plain
/// string literal survives assembly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportStatement {
    pub modulename: Expr,
    pub localname: SmolStr,
    pub location: Location,
}

impl ImportStatement {
    /// The module path, if the module name is a plain string literal.
    pub fn literal_path(&self) -> Option<&str> {
        match &self.modulename.kind {
            ExprKind::StringLiteral { value } => Some(value),
            _ => None,
        }
    }
}

/// `[export] const <name> = <expr>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstStatement {
    pub name: SmolStr,
    pub expr: Expr,
    pub exported: bool,
    pub location: Location,
}

/// `[export] sub <name>(<params>) { <elements> }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubDef {
    pub name: SmolStr,
    pub params: Vec<Param>,
    pub elements: Vec<Element>,
    pub exported: bool,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: SmolStr,
    pub default: Option<Expr>,
    pub location: Location,
}

// ============================================================================
// Flowgraphs
// ============================================================================

/// Stages connected by `|`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flowgraph {
    pub stages: Vec<Stage>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Stage {
    #[serde(rename = "Proc")]
    Proc(Proc),
    /// `( graph ; graph ; ... )`
    #[serde(rename = "ParallelGraph")]
    Parallel(ParallelGraph),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParallelGraph {
    pub graphs: Vec<Flowgraph>,
    pub location: Location,
}

/// A processor invocation: `name -option value args`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Proc {
    /// Dotted name, e.g. `["lib", "mysub"]`
    pub name: Vec<SmolStr>,
    pub options: Vec<ProcOption>,
    pub args: Vec<ProcArg>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcOption {
    pub name: SmolStr,
    pub expr: Option<Expr>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ProcArg {
    #[serde(rename = "Expression")]
    Expression { expr: Expr },
    #[serde(rename = "Assignments")]
    Assignments { assignments: Vec<Assignment> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub name: SmolStr,
    pub expr: Expr,
    pub location: Location,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expr {
    #[serde(flatten)]
    pub kind: ExprKind,
    pub location: Location,
}

impl Expr {
    pub fn new(kind: ExprKind, location: Location) -> Self {
        Self { kind, location }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ExprKind {
    NullLiteral,
    BooleanLiteral {
        value: bool,
    },
    NumericLiteral {
        value: f64,
    },
    StringLiteral {
        value: String,
    },
    /// A string with `${...}` interpolations
    StringTemplate {
        parts: Vec<TemplatePart>,
    },
    RegularExpressionLiteral {
        pattern: String,
        flags: String,
    },
    ArrayLiteral {
        elements: Vec<Expr>,
    },
    ObjectLiteral {
        properties: Vec<Property>,
    },
    Variable {
        name: SmolStr,
    },
    MemberExpression {
        object: Box<Expr>,
        property: SmolStr,
    },
    IndexExpression {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    CallExpression {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
    UnaryExpression {
        operator: SmolStr,
        argument: Box<Expr>,
    },
    BinaryExpression {
        operator: SmolStr,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum TemplatePart {
    Text { value: String },
    Expression { expr: Expr },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub key: String,
    pub value: Expr,
    pub location: Location,
}
