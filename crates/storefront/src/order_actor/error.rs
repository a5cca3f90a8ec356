//! Error types for the Order actor.

use crate::error::ErrorKind;
use crate::model::{OrderId, ProductId, UserId};
use actor_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during checkout and order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The order belongs to another user.
    #[error("Order {0} belongs to another user")]
    Forbidden(OrderId),

    /// Shipping details are missing or malformed.
    #[error("Invalid shipping details: {0}")]
    InvalidShipping(String),

    /// The buyer does not exist.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// The buyer's account is disabled.
    #[error("User {0} is disabled")]
    UserDisabled(UserId),

    /// No cart line is selected for checkout.
    #[error("No cart items are selected for checkout")]
    EmptySelection,

    /// A selected line points at a product that no longer exists.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// A selected line points at a product taken off sale.
    #[error("Product \"{0}\" is no longer available; remove it from the cart")]
    ProductInactive(String),

    /// A selected line asks for more than is on hand.
    #[error("Only {available} of \"{name}\" left in stock; adjust the quantity")]
    InsufficientStock { name: String, available: u32 },

    /// Stock for the product was taken between validation and reservation.
    #[error("Stock for \"{0}\" was taken by a concurrent order")]
    ReservationLost(String),

    /// Another order already holds this code.
    #[error("Order code already in use: {0}")]
    Conflict(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::NotFound(_)
            | OrderError::UserNotFound(_)
            | OrderError::ProductNotFound(_) => ErrorKind::NotFound,
            OrderError::InvalidShipping(_)
            | OrderError::EmptySelection
            | OrderError::ProductInactive(_)
            | OrderError::InsufficientStock { .. } => ErrorKind::InvalidRequest,
            OrderError::Forbidden(_) | OrderError::UserDisabled(_) => ErrorKind::Forbidden,
            OrderError::ReservationLost(_) | OrderError::Conflict(_) => ErrorKind::Conflict,
            OrderError::ActorCommunicationError(_) => ErrorKind::Unavailable,
        }
    }

    /// Wraps a failure of a dependency the checkout could not work around.
    pub(crate) fn upstream(e: impl std::fmt::Display) -> Self {
        OrderError::ActorCommunicationError(e.to_string())
    }
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e.downcast_entity::<OrderError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(FrameworkError::Conflict(key)) => OrderError::Conflict(key),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
