//! # Order Actor
//!
//! The order ledger and the checkout orchestrator.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for
//!   [`Order`]; `on_create` runs the checkout
//! - [`error`] - [`OrderError`]
//! - [`OrderContext`] - the clients checkout needs
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Dependencies
//!
//! ```text
//! order ──► user ──► cart ──► (catalog reads in CartClient)
//!   ├─────────────► cart
//!   └─────────────► product
//! ```
//!
//! No actor in that graph calls back into the order actor, so dropping the public
//! clients shuts everything down.

pub mod entity;
pub mod error;

pub use entity::OrderAction;
pub use error::*;

use crate::clients::{CartClient, OrderClient, ProductClient, UserClient};
use crate::model::Order;
use actor_framework::ResourceActor;

/// Runtime dependencies of the order actor.
#[derive(Clone)]
pub struct OrderContext {
    pub users: UserClient,
    pub products: ProductClient,
    pub carts: CartClient,
}

/// Creates a new Order actor and its client.
pub fn new(mailbox_capacity: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(mailbox_capacity);
    (actor, OrderClient::new(generic_client))
}
