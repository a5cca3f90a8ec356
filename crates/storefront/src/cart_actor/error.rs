//! Error types for the Cart actor.

use crate::error::ErrorKind;
use crate::model::CartLineId;
use crate::product_actor::ProductError;
use actor_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The requested cart line was not found.
    #[error("Cart item not found: {0}")]
    NotFound(String),

    /// The cart line belongs to another user.
    #[error("Cart item {0} belongs to another user")]
    Forbidden(CartLineId),

    /// Quantities start at one.
    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    /// The product has nothing on hand.
    #[error("Product \"{0}\" is out of stock")]
    OutOfStock(String),

    /// The line would hold more than the product has on hand.
    #[error("Quantity exceeds stock for \"{name}\": {available} left")]
    ExceedsStock { name: String, available: u32 },

    /// Two writers raced to create the same (user, product) line.
    #[error("Cart item already exists: {0}")]
    Conflict(String),

    /// The catalog rejected or could not resolve the product.
    #[error(transparent)]
    Product(#[from] ProductError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl CartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartError::NotFound(_) => ErrorKind::NotFound,
            CartError::Forbidden(_) => ErrorKind::Forbidden,
            CartError::InvalidQuantity
            | CartError::OutOfStock(_)
            | CartError::ExceedsStock { .. } => ErrorKind::InvalidRequest,
            CartError::Conflict(_) => ErrorKind::Conflict,
            CartError::Product(inner) => inner.kind(),
            CartError::ActorCommunicationError(_) => ErrorKind::Unavailable,
        }
    }
}

impl From<FrameworkError> for CartError {
    fn from(e: FrameworkError) -> Self {
        match e.downcast_entity::<CartError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => CartError::NotFound(id),
            Err(FrameworkError::Conflict(key)) => CartError::Conflict(key),
            Err(other) => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}
