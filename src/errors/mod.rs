//! Error taxonomy shared by the parser pipeline and the value model
//!
//! - [`ErrorKind`]: Syntax / Compile / Runtime
//! - [`ErrorCode`]: stable codes looked up in a [`MessageCatalog`]
//! - [`JuttleError`]: the structured error, [`Error`]: structured or internal
//! - [`locate`]: backfill a location on errors escaping an operation

mod codes;
mod error;
mod locate;
mod messages;

pub use codes::{ErrorCode, ErrorKind};
pub(crate) use error::location_to_json;
pub use error::{Error, Info, JuttleError, Result};
pub use locate::locate;
pub use messages::{EnglishMessages, MessageCatalog, render_template};
