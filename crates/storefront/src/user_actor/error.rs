//! Error types for the User actor.

use crate::cart_actor::CartError;
use crate::error::ErrorKind;
use crate::model::UserId;
use actor_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// The requested user was not found.
    #[error("User not found: {0}")]
    NotFound(String),

    /// A user with the same name or e-mail already exists.
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    /// The user data provided is invalid.
    #[error("User validation error: {0}")]
    ValidationError(String),

    /// The root administrator can't be edited or removed.
    #[error("User {0} is a system account and cannot be modified")]
    SystemAccount(UserId),

    /// Removing the user's cart lines failed, so the user was kept.
    #[error("Could not clear cart: {0}")]
    Cart(#[from] CartError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl UserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::NotFound(_) => ErrorKind::NotFound,
            UserError::AlreadyExists(_) => ErrorKind::Conflict,
            UserError::ValidationError(_) | UserError::SystemAccount(_) => {
                ErrorKind::InvalidRequest
            }
            UserError::Cart(inner) => inner.kind(),
            UserError::ActorCommunicationError(_) => ErrorKind::Unavailable,
        }
    }
}

impl From<FrameworkError> for UserError {
    fn from(e: FrameworkError) -> Self {
        match e.downcast_entity::<UserError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => UserError::NotFound(id),
            Err(FrameworkError::Conflict(key)) => UserError::AlreadyExists(key),
            Err(other) => UserError::ActorCommunicationError(other.to_string()),
        }
    }
}
