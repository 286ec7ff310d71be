//! Literal folding: constant AST expressions to values.

use super::value::{RegExp, Value, build_object};
use crate::parser::{Expr, ExprKind};

/// The value of a literal expression, `None` if the expression is not one.
///
/// Accepts everything [`parse_value`](crate::program::parse_value) produces,
/// plus unary minus on any foldable number.
pub fn from_literal(expr: &Expr) -> Option<Value> {
    match &expr.kind {
        ExprKind::NullLiteral => Some(Value::Null),
        ExprKind::BooleanLiteral { value } => Some(Value::Boolean(*value)),
        ExprKind::NumericLiteral { value } => Some(Value::Number(*value)),
        ExprKind::StringLiteral { value } => Some(Value::String(value.clone())),
        ExprKind::RegularExpressionLiteral { pattern, flags } => {
            RegExp::new(pattern.as_str(), flags).ok().map(Value::RegExp)
        }
        ExprKind::ArrayLiteral { elements } => elements
            .iter()
            .map(from_literal)
            .collect::<Option<Vec<_>>>()
            .map(Value::Array),
        ExprKind::ObjectLiteral { properties } => properties
            .iter()
            .map(|property| Some((property.key.clone(), from_literal(&property.value)?)))
            .collect::<Option<Vec<_>>>()
            .map(build_object),
        ExprKind::UnaryExpression { operator, argument } if operator == "-" => {
            match from_literal(argument)? {
                Value::Number(n) => Some(Value::Number(-n)),
                _ => None,
            }
        }
        _ => None,
    }
}
