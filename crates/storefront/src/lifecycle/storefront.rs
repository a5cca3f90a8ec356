use crate::cart_actor;
use crate::clients::{CartClient, OrderClient, ProductClient, UserClient};
use crate::config::StorefrontConfig;
use crate::model::UserId;
use crate::order_actor::{self, OrderContext};
use crate::product_actor;
use crate::user_actor::{self, UserError};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Root admin reconciliation failed: {0}")]
    RootAdmin(#[from] UserError),

    #[error("Actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),
}

/// The running storefront: four resource actors and the clients to reach them.
///
/// # Architecture
///
/// - **Product actor**: catalog and stock counters (no dependencies)
/// - **Cart actor**: cart lines (no dependencies; its client also reads the catalog)
/// - **User actor**: identity records; clears carts on removal (context: cart client)
/// - **Order actor**: order ledger and checkout (context: user, product, cart clients)
///
/// # Example
///
/// ```rust
/// use storefront::config::StorefrontConfig;
/// use storefront::lifecycle::Storefront;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let storefront = Storefront::start(&StorefrontConfig::default()).await?;
///     assert_eq!(storefront.users.users().await?.len(), 1); // the root admin
///     storefront.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct Storefront {
    pub users: UserClient,
    pub products: ProductClient,
    pub carts: CartClient,
    pub orders: OrderClient,
    /// The reconciled root administrator.
    pub root_admin: UserId,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Storefront {
    /// Spawns and wires every actor, then reconciles the root admin account.
    ///
    /// Every client handed out, and every client injected as context, carries the
    /// configured request timeout. The exceptions are the checkout request itself and
    /// the stock/cart writes inside it, which always wait for their reply.
    pub async fn start(config: &StorefrontConfig) -> Result<Self, LifecycleError> {
        let capacity = config.runtime.mailbox_capacity;

        // 1. Create actors (no dependencies yet)
        let (product_actor, mut products) = product_actor::new(capacity);
        let (user_actor, mut users) = user_actor::new(capacity);
        let (order_actor, mut orders) = order_actor::new(capacity);
        if let Some(timeout) = config.runtime.request_timeout() {
            products = products.with_timeout(timeout);
            users = users.with_timeout(timeout);
            orders = orders.with_timeout(timeout);
        }
        let (cart_actor, carts) = cart_actor::new(capacity, products.clone());
        let carts = match config.runtime.request_timeout() {
            Some(timeout) => carts.with_timeout(timeout),
            None => carts,
        };

        // 2. Start actors with their dependencies injected
        let product_handle = tokio::spawn(product_actor.run(()));
        let cart_handle = tokio::spawn(cart_actor.run(()));
        let user_handle = tokio::spawn(user_actor.run(carts.clone()));
        let order_handle = tokio::spawn(order_actor.run(OrderContext {
            users: users.clone(),
            products: products.clone(),
            carts: carts.clone(),
        }));

        let root = config.root_admin.root_admin();
        let root_admin = users.ensure_root_admin(&root).await?;
        info!(user_id = %root_admin, email = %root.email, "Storefront started");

        Ok(Self {
            users,
            products,
            carts,
            orders,
            root_admin,
            // Dependents first, so each actor's context clients are gone before its
            // dependencies are awaited.
            handles: vec![order_handle, user_handle, cart_handle, product_handle],
        })
    }

    /// Drops every client and waits for each actor to drain its mailbox and stop.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down storefront...");
        drop(self.orders);
        drop(self.users);
        drop(self.carts);
        drop(self.products);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }
        info!("Storefront shutdown complete.");
        Ok(())
    }
}
