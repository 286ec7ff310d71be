//! Builds the AST from pest pairs.
//!
//! The grammar guarantees the pair shapes; a shape mismatch is a defect and is
//! reported as [`BuildError::Unexpected`]. Literals that match the grammar but
//! have no value (an out-of-range hex number, a bad escape) are user errors
//! and come back as [`BuildError::Invalid`].

use pest::iterators::{Pair, Pairs};
use smol_str::SmolStr;

use super::ast::*;
use super::grammar::Rule;
use crate::base::{Location, Position};

pub(crate) enum BuildError {
    Invalid { message: String, location: Location },
    Unexpected(String),
}

type BuildResult<T> = Result<T, BuildError>;

/// Build a [`Program`] from a `start` pair.
pub(crate) fn build_program(root: Pair<'_, Rule>, filename: &str) -> BuildResult<Program> {
    let builder = AstBuilder { filename };
    let location = builder.location(&root);
    let elements = builder.elements(root.into_inner())?;

    Ok(Program {
        elements,
        modules: Vec::new(),
        location,
    })
}

/// Build the expression under a `start_filter` or `start_value` pair.
pub(crate) fn build_start_expression(root: Pair<'_, Rule>, filename: &str) -> BuildResult<Expr> {
    let builder = AstBuilder { filename };
    let pair = root
        .into_inner()
        .find(|pair| pair.as_rule() != Rule::EOI)
        .ok_or_else(|| unexpected("empty start rule"))?;
    builder.expr(pair)
}

fn unexpected(what: impl Into<String>) -> BuildError {
    BuildError::Unexpected(what.into())
}

fn next<'i>(pairs: &mut Pairs<'i, Rule>, what: &str) -> BuildResult<Pair<'i, Rule>> {
    pairs.next().ok_or_else(|| unexpected(format!("missing {what}")))
}

struct AstBuilder<'f> {
    filename: &'f str,
}

impl AstBuilder<'_> {
    fn location(&self, pair: &Pair<'_, Rule>) -> Location {
        let span = pair.as_span();
        let (start_line, start_col) = span.start_pos().line_col();
        let (end_line, end_col) = span.end_pos().line_col();

        Location::new(
            Some(self.filename.to_string()),
            Position::new(span.start(), start_line, start_col),
            Position::new(span.end(), end_line, end_col),
        )
    }

    fn invalid(&self, pair: &Pair<'_, Rule>, message: impl Into<String>) -> BuildError {
        BuildError::Invalid {
            message: message.into(),
            location: self.location(pair),
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn elements(&self, pairs: Pairs<'_, Rule>) -> BuildResult<Vec<Element>> {
        let mut elements = Vec::new();
        for pair in pairs {
            match pair.as_rule() {
                Rule::separator | Rule::EOI => {}
                _ => elements.push(self.element(pair)?),
            }
        }
        Ok(elements)
    }

    fn element(&self, pair: Pair<'_, Rule>) -> BuildResult<Element> {
        match pair.as_rule() {
            Rule::import_statement => self.import(pair).map(Element::Import),
            Rule::const_statement => self.constant(pair).map(Element::Const),
            Rule::sub_definition => self.sub(pair).map(Element::Sub),
            Rule::flowgraph => self.flowgraph(pair).map(Element::Flowgraph),
            other => Err(unexpected(format!("element {other:?}"))),
        }
    }

    fn import(&self, pair: Pair<'_, Rule>) -> BuildResult<ImportStatement> {
        let location = self.location(&pair);
        let mut inner = pair.into_inner();
        next(&mut inner, "import keyword")?;
        let modulename = self.expr(next(&mut inner, "module name")?)?;
        next(&mut inner, "as keyword")?;
        let localname = SmolStr::new(next(&mut inner, "local name")?.as_str());

        Ok(ImportStatement {
            modulename,
            localname,
            location,
        })
    }

    fn constant(&self, pair: Pair<'_, Rule>) -> BuildResult<ConstStatement> {
        let location = self.location(&pair);
        let mut exported = false;
        let mut name = None;
        let mut expr = None;

        for child in pair.into_inner() {
            match child.as_rule() {
                Rule::kw_export => exported = true,
                Rule::identifier => name = Some(SmolStr::new(child.as_str())),
                Rule::expression => expr = Some(self.expr(child)?),
                _ => {}
            }
        }

        Ok(ConstStatement {
            name: name.ok_or_else(|| unexpected("const name"))?,
            expr: expr.ok_or_else(|| unexpected("const value"))?,
            exported,
            location,
        })
    }

    fn sub(&self, pair: Pair<'_, Rule>) -> BuildResult<SubDef> {
        let location = self.location(&pair);
        let mut exported = false;
        let mut name = None;
        let mut params = Vec::new();
        let mut elements = Vec::new();

        for child in pair.into_inner() {
            match child.as_rule() {
                Rule::kw_export => exported = true,
                Rule::identifier => name = Some(SmolStr::new(child.as_str())),
                Rule::parameters => {
                    params = child
                        .into_inner()
                        .map(|param| self.param(param))
                        .collect::<BuildResult<_>>()?;
                }
                Rule::block => elements = self.elements(child.into_inner())?,
                _ => {}
            }
        }

        Ok(SubDef {
            name: name.ok_or_else(|| unexpected("sub name"))?,
            params,
            elements,
            exported,
            location,
        })
    }

    fn param(&self, pair: Pair<'_, Rule>) -> BuildResult<Param> {
        let location = self.location(&pair);
        let mut inner = pair.into_inner();
        let name = SmolStr::new(next(&mut inner, "parameter name")?.as_str());
        let default = inner
            .find(|child| child.as_rule() == Rule::expression)
            .map(|child| self.expr(child))
            .transpose()?;

        Ok(Param {
            name,
            default,
            location,
        })
    }

    // ========================================================================
    // Flowgraphs
    // ========================================================================

    fn flowgraph(&self, pair: Pair<'_, Rule>) -> BuildResult<Flowgraph> {
        let location = self.location(&pair);
        let mut stages = Vec::new();

        for child in pair.into_inner() {
            match child.as_rule() {
                Rule::pipe => {}
                Rule::proc => stages.push(Stage::Proc(self.proc(child)?)),
                Rule::parallel => {
                    let location = self.location(&child);
                    let graphs = child
                        .into_inner()
                        .filter(|graph| graph.as_rule() == Rule::flowgraph)
                        .map(|graph| self.flowgraph(graph))
                        .collect::<BuildResult<_>>()?;
                    stages.push(Stage::Parallel(ParallelGraph { graphs, location }));
                }
                other => return Err(unexpected(format!("stage {other:?}"))),
            }
        }

        Ok(Flowgraph { stages, location })
    }

    fn proc(&self, pair: Pair<'_, Rule>) -> BuildResult<Proc> {
        let location = self.location(&pair);
        let mut inner = pair.into_inner();
        let name = next(&mut inner, "processor name")?
            .into_inner()
            .map(|part| SmolStr::new(part.as_str()))
            .collect();
        let mut options = Vec::new();
        let mut args = Vec::new();

        for child in inner {
            match child.as_rule() {
                Rule::proc_option => options.push(self.proc_option(child)?),
                Rule::assignments => {
                    let assignments = child
                        .into_inner()
                        .map(|assignment| self.assignment(assignment))
                        .collect::<BuildResult<_>>()?;
                    args.push(ProcArg::Assignments { assignments });
                }
                Rule::expression => args.push(ProcArg::Expression {
                    expr: self.expr(child)?,
                }),
                other => return Err(unexpected(format!("processor argument {other:?}"))),
            }
        }

        Ok(Proc {
            name,
            options,
            args,
            location,
        })
    }

    fn proc_option(&self, pair: Pair<'_, Rule>) -> BuildResult<ProcOption> {
        let location = self.location(&pair);
        let mut inner = pair.into_inner();
        let name = next(&mut inner, "option name")?.as_str();
        let expr = inner.next().map(|value| self.expr(value)).transpose()?;

        Ok(ProcOption {
            name: SmolStr::new(name.trim_start_matches('-')),
            expr,
            location,
        })
    }

    fn assignment(&self, pair: Pair<'_, Rule>) -> BuildResult<Assignment> {
        let location = self.location(&pair);
        let mut inner = pair.into_inner();
        let name = SmolStr::new(next(&mut inner, "assignment target")?.as_str());
        next(&mut inner, "=")?;
        let expr = self.expr(next(&mut inner, "assigned value")?)?;

        Ok(Assignment {
            name,
            expr,
            location,
        })
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn expr(&self, pair: Pair<'_, Rule>) -> BuildResult<Expr> {
        let location = self.location(&pair);

        match pair.as_rule() {
            Rule::expression => self.expr(next(&mut pair.into_inner(), "expression")?),
            Rule::logical_or
            | Rule::logical_and
            | Rule::equality
            | Rule::relational
            | Rule::additive
            | Rule::multiplicative => self.binary(pair),
            Rule::unary => self.unary(pair),
            Rule::postfix => self.postfix(pair),

            Rule::null_literal => Ok(Expr::new(ExprKind::NullLiteral, location)),
            Rule::boolean_literal => Ok(Expr::new(
                ExprKind::BooleanLiteral {
                    value: pair.as_str() == "true",
                },
                location,
            )),
            Rule::number_literal => {
                let value = self.number(&pair)?;
                Ok(Expr::new(ExprKind::NumericLiteral { value }, location))
            }
            Rule::value_number => {
                let mut negate = false;
                let mut value = None;
                for child in pair.into_inner() {
                    match child.as_rule() {
                        Rule::op_negate => negate = true,
                        _ => value = Some(self.number(&child)?),
                    }
                }
                let value = value.ok_or_else(|| unexpected("number digits"))?;
                Ok(Expr::new(
                    ExprKind::NumericLiteral {
                        value: if negate { -value } else { value },
                    },
                    location,
                ))
            }
            Rule::string_literal => self.string(pair),
            Rule::value_string => {
                let value = self.string_text(pair.into_inner())?;
                Ok(Expr::new(ExprKind::StringLiteral { value }, location))
            }
            Rule::regex_literal => {
                let mut inner = pair.into_inner();
                let pattern = next(&mut inner, "regex body")?.as_str().to_string();
                let flags = match inner.next() {
                    Some(flags) => {
                        let text = flags.as_str();
                        if text.char_indices().any(|(i, flag)| text[..i].contains(flag)) {
                            return Err(self.invalid(
                                &flags,
                                format!("Invalid regular expression flags: {text}"),
                            ));
                        }
                        text.to_string()
                    }
                    None => String::new(),
                };
                Ok(Expr::new(
                    ExprKind::RegularExpressionLiteral { pattern, flags },
                    location,
                ))
            }
            Rule::array_literal | Rule::value_array => {
                let elements = pair
                    .into_inner()
                    .map(|element| self.expr(element))
                    .collect::<BuildResult<_>>()?;
                Ok(Expr::new(ExprKind::ArrayLiteral { elements }, location))
            }
            Rule::object_literal | Rule::value_object => {
                let properties = pair
                    .into_inner()
                    .map(|property| self.property(property))
                    .collect::<BuildResult<_>>()?;
                Ok(Expr::new(ExprKind::ObjectLiteral { properties }, location))
            }
            Rule::identifier => Ok(Expr::new(
                ExprKind::Variable {
                    name: SmolStr::new(pair.as_str()),
                },
                location,
            )),
            other => Err(unexpected(format!("expression {other:?}"))),
        }
    }

    /// Left-associative chain: `operand (op operand)*`
    fn binary(&self, pair: Pair<'_, Rule>) -> BuildResult<Expr> {
        let mut inner = pair.into_inner();
        let mut left = self.expr(next(&mut inner, "left operand")?)?;

        while let Some(op) = inner.next() {
            let right = self.expr(next(&mut inner, "right operand")?)?;
            let location = Location::new(
                left.location.filename.clone(),
                left.location.start,
                right.location.end,
            );
            left = Expr::new(
                ExprKind::BinaryExpression {
                    operator: operator_name(op.as_str()),
                    left: Box::new(left),
                    right: Box::new(right),
                },
                location,
            );
        }

        Ok(left)
    }

    fn unary(&self, pair: Pair<'_, Rule>) -> BuildResult<Expr> {
        let mut operators = Vec::new();
        let mut operand = None;

        for child in pair.into_inner() {
            match child.as_rule() {
                Rule::op_unary => operators.push(child),
                _ => operand = Some(self.expr(child)?),
            }
        }

        let mut expr = operand.ok_or_else(|| unexpected("unary operand"))?;
        for op in operators.into_iter().rev() {
            let start = self.location(&op).start;
            let location = Location::new(expr.location.filename.clone(), start, expr.location.end);
            expr = Expr::new(
                ExprKind::UnaryExpression {
                    operator: operator_name(op.as_str()),
                    argument: Box::new(expr),
                },
                location,
            );
        }

        Ok(expr)
    }

    fn postfix(&self, pair: Pair<'_, Rule>) -> BuildResult<Expr> {
        let mut inner = pair.into_inner();
        let mut expr = self.expr(next(&mut inner, "primary expression")?)?;

        for suffix in inner {
            let end = self.location(&suffix).end;
            let location = Location::new(expr.location.filename.clone(), expr.location.start, end);
            let kind = match suffix.as_rule() {
                Rule::member => ExprKind::MemberExpression {
                    object: Box::new(expr),
                    property: SmolStr::new(next(&mut suffix.into_inner(), "member name")?.as_str()),
                },
                Rule::call => ExprKind::CallExpression {
                    callee: Box::new(expr),
                    arguments: suffix
                        .into_inner()
                        .map(|arg| self.expr(arg))
                        .collect::<BuildResult<_>>()?,
                },
                Rule::index => ExprKind::IndexExpression {
                    object: Box::new(expr),
                    index: Box::new(self.expr(next(&mut suffix.into_inner(), "index")?)?),
                },
                other => return Err(unexpected(format!("postfix {other:?}"))),
            };
            expr = Expr::new(kind, location);
        }

        Ok(expr)
    }

    fn property(&self, pair: Pair<'_, Rule>) -> BuildResult<Property> {
        let location = self.location(&pair);
        let mut inner = pair.into_inner();
        let key_pair = next(&mut inner, "property key")?;
        let key = match key_pair.as_rule() {
            Rule::identifier => key_pair.as_str().to_string(),
            Rule::value_string => self.string_text(key_pair.into_inner())?,
            Rule::string_literal => match self.string(key_pair.clone())?.kind {
                ExprKind::StringLiteral { value } => value,
                _ => return Err(self.invalid(&key_pair, "Object keys cannot be interpolated")),
            },
            other => return Err(unexpected(format!("property key {other:?}"))),
        };
        let value = self.expr(next(&mut inner, "property value")?)?;

        Ok(Property {
            key,
            value,
            location,
        })
    }

    // ========================================================================
    // Literals
    // ========================================================================

    fn number(&self, pair: &Pair<'_, Rule>) -> BuildResult<f64> {
        let text = pair.as_str();
        let value = match text {
            "NaN" => Some(f64::NAN),
            "Infinity" => Some(f64::INFINITY),
            _ if text.len() > 2 && text[..2].eq_ignore_ascii_case("0x") => {
                u64::from_str_radix(&text[2..], 16).ok().map(|n| n as f64)
            }
            _ => text.parse::<f64>().ok(),
        };

        value.ok_or_else(|| self.invalid(pair, format!("Invalid number literal: {text}")))
    }

    fn string(&self, pair: Pair<'_, Rule>) -> BuildResult<Expr> {
        let location = self.location(&pair);
        let mut parts = Vec::new();
        let mut interpolated = false;

        for child in pair.into_inner() {
            match child.as_rule() {
                Rule::string_text => parts.push(TemplatePart::Text {
                    value: self.unescape(&child)?,
                }),
                Rule::string_interpolation => {
                    interpolated = true;
                    let expr = self.expr(next(&mut child.into_inner(), "interpolated expression")?)?;
                    parts.push(TemplatePart::Expression { expr });
                }
                other => return Err(unexpected(format!("string part {other:?}"))),
            }
        }

        if interpolated {
            return Ok(Expr::new(ExprKind::StringTemplate { parts }, location));
        }

        let value = parts
            .into_iter()
            .map(|part| match part {
                TemplatePart::Text { value } => value,
                TemplatePart::Expression { .. } => String::new(),
            })
            .collect();
        Ok(Expr::new(ExprKind::StringLiteral { value }, location))
    }

    /// Concatenate the text pieces of a value string.
    fn string_text(&self, pairs: Pairs<'_, Rule>) -> BuildResult<String> {
        let mut value = String::new();
        for child in pairs {
            match child.as_rule() {
                Rule::string_text => value.push_str(&self.unescape(&child)?),
                Rule::string_dollar => value.push('$'),
                other => return Err(unexpected(format!("string part {other:?}"))),
            }
        }
        Ok(value)
    }

    fn unescape(&self, pair: &Pair<'_, Rule>) -> BuildResult<String> {
        unescape(pair.as_str()).map_err(|message| self.invalid(pair, message))
    }
}

/// Canonical operator spelling: keyword forms are upper-cased.
fn operator_name(text: &str) -> SmolStr {
    if text.chars().all(|c| c.is_ascii_alphabetic()) {
        SmolStr::new(text.to_ascii_uppercase())
    } else {
        SmolStr::new(text)
    }
}

/// Resolve backslash escapes in string literal text.
pub(crate) fn unescape(text: &str) -> Result<String, String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some(escaped) = chars.next() else {
            return Err("Unterminated escape sequence".to_string());
        };
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            'x' => {
                let code = hex_digits(&mut chars, 2)?;
                out.push(char::from_u32(code).ok_or("Invalid \\x escape")?);
            }
            'u' => {
                let mut code = hex_digits(&mut chars, 4)?;
                // surrogate pair written as two \u escapes
                if (0xD800..0xDC00).contains(&code) {
                    let rest = chars.as_str();
                    if let Some(low) = rest.strip_prefix("\\u") {
                        let mut low_chars = low.chars();
                        let low_code = hex_digits(&mut low_chars, 4)?;
                        if (0xDC00..0xE000).contains(&low_code) {
                            code = 0x10000 + ((code - 0xD800) << 10) + (low_code - 0xDC00);
                            chars = low_chars;
                        }
                    }
                }
                out.push(char::from_u32(code).ok_or("Invalid \\u escape")?);
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

fn hex_digits(chars: &mut std::str::Chars<'_>, count: usize) -> Result<u32, String> {
    let mut code = 0;
    for _ in 0..count {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| "Invalid escape sequence".to_string())?;
        code = code * 16 + digit;
    }
    Ok(code)
}
