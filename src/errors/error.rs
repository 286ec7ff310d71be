//! Structured error types
//!
//! A [`JuttleError`] is created once, at the point of failure, and is never
//! reclassified afterwards. The only permitted change is backfilling
//! `info.location` when it is still absent.

use thiserror::Error;

use super::codes::{ErrorCode, ErrorKind};
use super::messages::{EnglishMessages, MessageCatalog};
use crate::base::Location;

/// Metadata attached to an error, addressable from message templates.
pub type Info = serde_json::Map<String, serde_json::Value>;

/// A classified, codeful error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct JuttleError {
    /// Error class
    pub kind: ErrorKind,
    /// Stable error code
    pub code: ErrorCode,
    /// Rendered message
    pub message: String,
    /// Template inputs, possibly including `location`
    pub info: Info,
}

impl JuttleError {
    /// Create an error of the code's kind, rendering the message with the
    /// built-in English catalog.
    pub fn new(code: ErrorCode, info: Info) -> Self {
        Self::with_catalog(code, info, &EnglishMessages)
    }

    /// Create an error rendering its message with `catalog`.
    pub fn with_catalog(code: ErrorCode, info: Info, catalog: &dyn MessageCatalog) -> Self {
        let mut message = catalog.render(code.as_str(), &info);
        if message.is_empty() {
            message = code.kind().default_message().to_string();
        }

        Self {
            kind: code.kind(),
            code,
            message,
            info,
        }
    }

    /// Re-render the message from code and info with another catalog.
    pub fn localize(self, catalog: &dyn MessageCatalog) -> Self {
        Self::with_catalog(self.code, self.info, catalog)
    }

    pub fn is_syntax(&self) -> bool {
        self.kind == ErrorKind::Syntax
    }

    pub fn is_compile(&self) -> bool {
        self.kind == ErrorKind::Compile
    }

    pub fn is_runtime(&self) -> bool {
        self.kind == ErrorKind::Runtime
    }

    /// The location stored in `info`, if any.
    pub fn location(&self) -> Option<Location> {
        self.info
            .get("location")
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    pub fn has_location(&self) -> bool {
        self.info.contains_key("location")
    }

    /// Attach `location` unless one is already present (first attachment wins).
    pub fn with_location(mut self, location: &Location) -> Self {
        if !self.has_location() {
            self.info
                .insert("location".to_string(), location_to_json(location));
        }
        self
    }
}

/// Serialize a location for storage in [`Info`].
pub(crate) fn location_to_json(location: &Location) -> serde_json::Value {
    serde_json::to_value(location).unwrap_or(serde_json::Value::Null)
}

/// Crate-level error.
///
/// Anything that is not a [`JuttleError`] signals a defect in the host or in
/// this crate and is passed through verbatim.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Juttle(#[from] JuttleError),

    #[error(transparent)]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap an unclassified failure.
    pub fn internal(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Internal(err.into())
    }

    /// The structured error, when this is one.
    pub fn as_juttle(&self) -> Option<&JuttleError> {
        match self {
            Self::Juttle(err) => Some(err),
            Self::Internal(_) => None,
        }
    }

    pub fn into_juttle(self) -> Option<JuttleError> {
        match self {
            Self::Juttle(err) => Some(err),
            Self::Internal(_) => None,
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.as_juttle().map(|err| err.code)
    }
}

/// Result alias for the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;
