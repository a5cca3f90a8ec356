//! Error classification shared by every resource.
//!
//! Each actor has its own error enum (see `user_actor::error`, `product_actor::error`, ...).
//! Callers that only need to decide *how* to react (reject, retry, report) ask
//! the error for its [`ErrorKind`].

use serde::Serialize;
use std::fmt::Display;

/// Coarse category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// The addressed entity does not exist.
    NotFound,
    /// The request itself is wrong: bad input, empty selection, unsellable product.
    InvalidRequest,
    /// The caller is not allowed to touch the entity.
    Forbidden,
    /// The request lost a race or collided with a unique value.
    Conflict,
    /// An actor could not be reached or did not answer in time.
    Unavailable,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::NotFound => "not found",
            ErrorKind::InvalidRequest => "invalid request",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Unavailable => "unavailable",
        };
        f.write_str(name)
    }
}
