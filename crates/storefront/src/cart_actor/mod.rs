//! # Cart Actor
//!
//! Stores cart lines for every user. It has no dependencies of its own (`Context = ()`);
//! the [`CartClient`] combines it with the catalog to enforce stock and availability.
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`CartLine`]
//! - [`error`] - [`CartError`]

pub mod entity;
pub mod error;

pub use entity::CartAction;
pub use error::*;

use crate::clients::{CartClient, ProductClient};
use crate::model::CartLine;
use actor_framework::ResourceActor;

/// Creates a new Cart actor and its client.
pub fn new(
    mailbox_capacity: usize,
    products: ProductClient,
) -> (ResourceActor<CartLine>, CartClient) {
    let (actor, generic_client) = ResourceActor::new(mailbox_capacity);
    (actor, CartClient::new(generic_client, products))
}
