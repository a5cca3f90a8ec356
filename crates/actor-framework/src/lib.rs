//! # Actor Framework
//!
//! Building blocks for stateful services made of **resource actors**: one Tokio task per
//! resource type, owning that resource's store and answering typed requests from a mailbox.
//!
//! Each resource (a product catalog, a cart, an order ledger) exposes the same surface:
//! create, get, list, update, delete, batch delete, plus resource-specific **actions**
//! (e.g. reserving stock). Resources that need each other talk through clients handed in
//! as context, never through shared memory.
//!
//! **Further Reading**:
//! - [Actors with Tokio](https://ryhl.io/blog/actors-with-tokio/) - the mailbox + oneshot pattern
//! - [Actor Model (Wikipedia)](https://en.wikipedia.org/wiki/Actor_model)
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - domain model, validation and hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - the sequential message loop and the store
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed requests and replies
//!
//! ## Defining a Resource
//!
//! ```rust
//! use actor_framework::{ActorEntity, FrameworkError, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Coupon {
//!     id: u32,
//!     code: String,
//!     uses_left: u32,
//! }
//!
//! #[derive(Debug)] struct CouponCreate { code: String, uses: u32 }
//! #[derive(Debug)] struct CouponUpdate { uses: u32 }
//! #[derive(Debug)] struct CouponQuery { usable_only: bool }
//! #[derive(Debug)] enum CouponAction { Redeem }
//!
//! #[derive(Debug, thiserror::Error)]
//! enum CouponError {
//!     #[error("coupon code must not be empty")]
//!     EmptyCode,
//!     #[error("coupon exhausted")]
//!     Exhausted,
//! }
//!
//! #[async_trait]
//! impl ActorEntity for Coupon {
//!     type Id = u32;
//!     type Create = CouponCreate;
//!     type Update = CouponUpdate;
//!     type Query = CouponQuery;
//!     type Action = CouponAction;
//!     type ActionResult = u32;
//!     type Context = ();
//!     type Error = CouponError;
//!
//!     fn from_create_params(id: u32, p: CouponCreate) -> Result<Self, Self::Error> {
//!         if p.code.is_empty() {
//!             return Err(CouponError::EmptyCode);
//!         }
//!         Ok(Self { id, code: p.code, uses_left: p.uses })
//!     }
//!
//!     fn unique_keys(&self) -> Vec<String> {
//!         vec![format!("code:{}", self.code)]
//!     }
//!
//!     fn matches(&self, q: &CouponQuery) -> bool {
//!         !q.usable_only || self.uses_left > 0
//!     }
//!
//!     async fn on_update(&mut self, u: CouponUpdate, _: &()) -> Result<(), Self::Error> {
//!         self.uses_left = u.uses;
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, a: CouponAction, _: &()) -> Result<u32, Self::Error> {
//!         match a {
//!             CouponAction::Redeem if self.uses_left == 0 => Err(CouponError::Exhausted),
//!             CouponAction::Redeem => {
//!                 self.uses_left -= 1;
//!                 Ok(self.uses_left)
//!             }
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Coupon>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(CouponCreate { code: "SPRING".into(), uses: 1 }).await.unwrap();
//!     assert_eq!(client.perform_action(id, CouponAction::Redeem).await.unwrap(), 0);
//!
//!     // The code is a unique key.
//!     let dup = client.create(CouponCreate { code: "SPRING".into(), uses: 5 }).await;
//!     assert!(matches!(dup, Err(FrameworkError::Conflict(_))));
//!
//!     let usable = client.list(CouponQuery { usable_only: true }).await.unwrap();
//!     assert!(usable.is_empty());
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are passed to [`ResourceActor::run`], not to the constructor, so every
//! actor and client can be created first and wired afterwards. An actor that coordinates
//! others (say, an order ledger calling the catalog) takes their clients as its
//! `Context` and uses them inside its hooks.
//!
//! Keep the wiring a DAG. A dependent actor holds clients of its dependencies, so each
//! actor only stops once everything that can reach it has stopped.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task; different actors run in parallel.
//! - Requests to one actor are processed **sequentially**, including the awaits inside
//!   its hooks. A check-then-act inside a single action can't race.
//! - Create and update work on a candidate value; the store only changes on success.
//!
//! ## Testing
//!
//! [`mock::MockClient`] hands out a real [`ResourceClient`] backed by scripted replies,
//! for testing client logic without the dependency's actor. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
