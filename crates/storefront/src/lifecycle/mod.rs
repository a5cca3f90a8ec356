//! # System Lifecycle
//!
//! Starting, wiring and stopping the storefront's actors, plus tracing setup.
//!
//! ## Wiring
//!
//! Actors are created first and receive their dependencies through `run(context)`:
//!
//! | actor   | context                                   |
//! |---------|-------------------------------------------|
//! | product | `()`                                      |
//! | cart    | `()`                                      |
//! | user    | `CartClient`                              |
//! | order   | `OrderContext { users, products, carts }` |
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all public clients**. The order actor's mailbox closes.
//! 2. The order actor finishes its queue and exits, dropping its context clients, which
//!    closes the user actor's mailbox, and so on down the graph.
//! 3. [`Storefront::shutdown`] awaits the tasks in that order.
//!
//! This only terminates because the graph is acyclic; a cycle would keep both
//! mailboxes open forever.
//!
//! ## Start-up reconciliation
//!
//! [`Storefront::start`] calls
//! [`UserClient::ensure_root_admin`](crate::clients::UserClient::ensure_root_admin)
//! before handing out the clients, so the root administrator always exists with its
//! admin role and system flag, however the store was left.

pub mod storefront;
pub mod tracing;

pub use self::storefront::*;
pub use self::tracing::*;
