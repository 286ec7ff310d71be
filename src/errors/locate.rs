//! Location backfill for errors escaping a fallible operation.

use super::error::{Error, Result};
use crate::base::Location;

/// Run `f`; a structured error escaping it without a location gets `location`.
///
/// Errors that already carry a location keep it, so an outer frame never
/// overwrites a more precise inner one. Internal errors pass through as is.
pub fn locate<T>(location: &Location, f: impl FnOnce() -> Result<T>) -> Result<T> {
    f().map_err(|err| match err {
        Error::Juttle(err) => Error::Juttle(err.with_location(location)),
        internal => internal,
    })
}
