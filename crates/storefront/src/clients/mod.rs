//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient).
//!
//! Each client implements [`ActorClient`](actor_framework::ActorClient) for the shared
//! `get`/`list`/`delete` and adds its resource's domain operations.

pub mod cart_client;
pub mod order_client;
pub mod product_client;
pub mod user_client;

pub use cart_client::*;
pub use order_client::*;
pub use product_client::*;
pub use user_client::*;
