//! # Framework Errors
//!
//! Errors raised by the runtime itself (mailbox plumbing, lookups, unique-key
//! collisions) plus a carrier for the entity's own error type.

use std::time::Duration;

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    /// Another stored entity already holds this unique key.
    #[error("Unique key already taken: {0}")]
    Conflict(String),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the typed error an entity hook returned.
    ///
    /// Hooks report failures through [`FrameworkError::EntityError`], which erases the
    /// concrete type. Clients that want to match on their own error enum call this and
    /// get the original value back; any other framework error is handed back unchanged.
    pub fn downcast_entity<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }

    /// True for failures of the channel rather than of the request itself.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FrameworkError::ActorClosed | FrameworkError::ActorDropped | FrameworkError::Timeout(_)
        )
    }
}
