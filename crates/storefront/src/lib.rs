//! # Storefront
//!
//! Catalog, cart and checkout backend built on [`actor_framework`] resource actors.
//!
//! - **[model]**: plain records and request types ([`model::Product`], [`model::CartLine`], ...)
//! - **[product_actor]**, **[cart_actor]**, **[user_actor]**, **[order_actor]**: one
//!   entity per resource, with its validation and hooks
//! - **[checkout]**: the pieces of a checkout (shipping validation, order codes,
//!   pricing plan, stock reservation with compensation)
//! - **[clients]**: the typed operations callers use
//! - **[lifecycle]**: wiring, start-up reconciliation, shutdown, tracing
//! - **[config]**: CLI and environment configuration
//! - **[error]**: the error classification shared by every domain error

pub mod cart_actor;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod user_actor;
