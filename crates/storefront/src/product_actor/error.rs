//! Error types for the Product actor.

use crate::error::ErrorKind;
use actor_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The product data provided is invalid.
    #[error("Product validation error: {0}")]
    ValidationError(String),

    /// The product has been taken off sale.
    #[error("Product \"{0}\" is no longer available")]
    Inactive(String),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock for \"{name}\": requested {requested}, available {available}")]
    InsufficientStock {
        name: String,
        requested: u32,
        available: u32,
    },

    /// Products are taken off sale, never removed.
    #[error("Product {0} cannot be deleted; deactivate it instead")]
    DeleteRefused(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl ProductError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProductError::NotFound(_) => ErrorKind::NotFound,
            ProductError::ValidationError(_)
            | ProductError::Inactive(_)
            | ProductError::InsufficientStock { .. }
            | ProductError::DeleteRefused(_) => ErrorKind::InvalidRequest,
            ProductError::ActorCommunicationError(_) => ErrorKind::Unavailable,
        }
    }
}

impl From<FrameworkError> for ProductError {
    fn from(e: FrameworkError) -> Self {
        match e.downcast_entity::<ProductError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => ProductError::NotFound(id),
            Err(other) => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}
