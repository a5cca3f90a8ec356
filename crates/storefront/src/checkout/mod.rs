//! # Checkout
//!
//! The pieces of the checkout orchestrator. The orchestration itself runs in the order
//! actor's `on_create` hook (see [`crate::order_actor`]); this module holds the parts
//! that don't depend on the hook:
//!
//! - [`shipping`] - shipping-detail validation, done before the order actor is involved
//! - [`code`] - order code generation
//! - [`plan`] - validation of the selected lines against the live catalog, line snapshots
//!   and totals
//! - [`reservation`] - the stock compensation log that keeps reserve/cart-delete/insert
//!   all-or-nothing

pub mod code;
pub mod plan;
pub mod reservation;
pub mod shipping;

pub use code::order_code;
pub use plan::{plan_checkout, CheckoutPlan};
pub use reservation::StockReservation;
pub use shipping::validate_shipping;
