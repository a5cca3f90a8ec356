//! # Product Actor
//!
//! The catalog: product details, soft-delete lifecycle and the inventory counters that
//! checkout reserves against.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`] for stock management
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use storefront::clients::ProductClient;
//! use storefront::model::ProductCreate;
//! use storefront::product_actor;
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = product_actor::new(16);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client
//!         .create_product(ProductCreate {
//!             name: "Widget".to_string(),
//!             description: "A widget".to_string(),
//!             price: Decimal::new(2999, 2),
//!             stock: Some(100),
//!             image_url: None,
//!         })
//!         .await?;
//!
//!     assert_eq!(client.reserve_stock(id, 5).await?, 95);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use actor_framework::ResourceActor;

/// Creates a new Product actor and its client.
pub fn new(mailbox_capacity: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(mailbox_capacity);
    (actor, ProductClient::new(generic_client))
}
