//! # User Actor
//!
//! Identity records: registration, profile edits, removal, and the root-admin account.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`User`]
//! - [`error`] - [`UserError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Context
//!
//! The actor runs with a [`CartClient`](crate::clients::CartClient) as context so that
//! removing a user also removes their cart lines. The cart actor never calls back, so
//! the wiring stays acyclic.
//!
//! ```rust
//! use storefront::clients::ProductClient;
//! use storefront::model::UserCreate;
//! use storefront::{cart_actor, product_actor, user_actor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (product_actor, products) = product_actor::new(8);
//!     let (cart_actor, carts) = cart_actor::new(8, products);
//!     let (user_actor, users) = user_actor::new(8);
//!     tokio::spawn(product_actor.run(()));
//!     tokio::spawn(cart_actor.run(()));
//!     tokio::spawn(user_actor.run(carts));
//!
//!     let id = users
//!         .register(UserCreate {
//!             name: "Alice".to_string(),
//!             email: "alice@example.com".to_string(),
//!             role: None,
//!         })
//!         .await?;
//!     users.remove_user(id).await?;
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use entity::UserAction;
pub use error::*;

use crate::clients::UserClient;
use crate::model::User;
use actor_framework::ResourceActor;

/// Creates a new User actor and its client.
pub fn new(mailbox_capacity: usize) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(mailbox_capacity);
    (actor, UserClient::new(generic_client))
}
