//! Juttle value model
//!
//! Every value the later compilation and runtime stages handle is a [`Value`],
//! one variant per kind. `Date` and `Duration` share the [`Moment`] payload.
//!
//! ## Operations
//!
//! - [`type_of`] and the `is_*` predicates classify values
//! - [`equal`] compares values structurally
//! - [`to_string`] renders for humans, [`inspect`] renders exactly
//! - [`ensure_boolean`], [`ensure_number`], [`ensure_string`] validate inline
//! - [`from_literal`] folds literal expressions; `Value::try_from(json)`
//!   classifies host data

mod ensure;
mod equality;
mod host;
mod kind;
mod literal;
mod render;
mod value;

pub use ensure::{ensure_boolean, ensure_number, ensure_string};
pub use equality::equal;
pub use kind::{
    ValueKind, is_array, is_boolean, is_date, is_duration, is_filter, is_null, is_number,
    is_object, is_regexp, is_string, type_of,
};
pub use literal::from_literal;
pub use render::{format_number, inspect, to_string};
pub use value::{Filter, InvalidValue, Moment, RegExp, Value, build_object, value_of};
