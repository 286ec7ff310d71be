//! Shared fixtures and assertions for the integration tests.

#![allow(dead_code)]

pub mod source_fixtures;

use juttle::{Error, ErrorCode, JuttleError, Location};

/// Unwrap a structured error, failing on success and on internal errors.
pub fn juttle_error<T: std::fmt::Debug>(result: Result<T, Error>) -> JuttleError {
    match result {
        Ok(value) => panic!("expected an error, got {value:?}"),
        Err(Error::Juttle(err)) => err,
        Err(err) => panic!("expected a structured error, got {err}"),
    }
}

/// Assert the error code and return the error's location.
pub fn assert_code(err: &JuttleError, code: ErrorCode) -> Location {
    assert_eq!(err.code, code, "unexpected error: {}", err.message);
    err.location()
        .unwrap_or_else(|| panic!("{code} error without location"))
}
