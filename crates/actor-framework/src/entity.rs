//! # ActorEntity Trait
//!
//! The contract a resource type (catalog entry, cart line, order, user, ...) satisfies
//! to be stored and served by a [`ResourceActor`](crate::ResourceActor).
//!
//! Associated types pin down every payload the actor accepts, so a cart-line update can
//! never be sent to the order ledger. Hooks have default implementations where an empty
//! behaviour makes sense; `on_update` and `handle_action` must always be written out.
//!
//! Hooks run inside the actor's message loop. While a hook is awaiting, the actor
//! handles nothing else, so a hook is a serialized unit of work over the whole store.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are async so they can call other actors. The `Context` value passed to
/// [`ResourceActor::run`](crate::ResourceActor::run) is handed to every hook, which lets
/// dependencies be wired after all actors exist ("late binding").
#[async_trait]
pub trait ActorEntity: Clone + Debug + Send + Sync + 'static {
    /// Identifier, generated by the actor from a sequential `u32`.
    type Id: Eq + Hash + Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload used to build a new instance.
    type Create: Send + Sync + Debug;

    /// Payload used to modify an existing instance.
    type Update: Send + Sync + Debug;

    /// Filter accepted by `list`. Use `()` when listing everything is enough.
    type Query: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `ReserveStock`).
    type Action: Send + Sync + Debug;

    /// Result of a custom action.
    type ActionResult: Send + Sync + Debug;

    /// Runtime dependencies injected into the actor. Use `()` if none are needed.
    type Context: Send + Sync;

    /// Error type for this entity.
    ///
    /// One enum per actor, not per message: every hook and action reports through it.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the entity from its generated id and the create payload.
    /// Called synchronously before the unique-key check and `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Keys that must not be shared with any other stored entity.
    ///
    /// The actor rejects a create or update whose keys collide with another entity with
    /// [`FrameworkError::Conflict`](crate::FrameworkError::Conflict). Keys should carry a
    /// prefix naming the field (`"email:ann@example.com"`) so conflicts read well.
    fn unique_keys(&self) -> Vec<String> {
        Vec::new()
    }

    /// Whether this entity belongs in the result of `list(query)`.
    fn matches(&self, _query: &Self::Query) -> bool {
        true
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction and the unique-key check, before the entity is stored.
    /// An error here means the entity is never stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update. Runs against a copy; the copy is only kept on success.
    async fn on_update(
        &mut self,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the entity is removed. An error cancels the removal.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
