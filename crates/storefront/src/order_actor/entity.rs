//! [`ActorEntity`] implementation for orders, including the checkout.
//!
//! Creating an order *is* the checkout. The actor builds a placeholder from
//! [`OrderCreate`], rejects it if its code is taken, and then runs `on_create`, which:
//!
//! 1. resolves the buyer (must exist and be enabled),
//! 2. loads the buyer's selected cart lines,
//! 3. re-reads every referenced product and plans the order against the live catalog,
//! 4. reserves stock line by line,
//! 5. removes the consumed cart lines in one batch,
//! 6. fills in the snapshot (buyer, lines, total).
//!
//! Any failure after step 4 began releases the reserved stock before the error is
//! returned, and the actor never stores the order. Because the hook runs inside the
//! order actor's loop, checkouts are serialized: each one plans against the stock the
//! previous one left.

use super::error::OrderError;
use super::OrderContext;
use crate::checkout::{plan_checkout, StockReservation};
use crate::model::{
    Order, OrderCreate, OrderId, OrderQuery, OrderStatus, OrderUpdate, UserSummary,
};
use actor_framework::{ActorClient, ActorEntity};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub enum OrderAction {}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Query = OrderQuery;
    type Action = OrderAction;
    type ActionResult = ();
    type Context = OrderContext;
    type Error = OrderError;

    /// Placeholder: buyer details, lines and total are filled in by `on_create`.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            code: params.code,
            user: UserSummary {
                id: params.user_id,
                name: String::new(),
                email: String::new(),
            },
            items: Vec::new(),
            total_amount: Decimal::ZERO,
            status: OrderStatus::Pending,
            shipping: params.shipping,
            created_at: params.placed_at,
            updated_at: params.placed_at,
        })
    }

    fn unique_keys(&self) -> Vec<String> {
        vec![format!("code:{}", self.code)]
    }

    fn matches(&self, query: &OrderQuery) -> bool {
        query.user_id.map_or(true, |owner| owner == self.user.id)
    }

    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), Self::Error> {
        let user_id = self.user.id;
        info!(%user_id, order_code = %self.code, "Checkout started");

        let user = ctx
            .users
            .get(user_id)
            .await
            .map_err(OrderError::upstream)?
            .ok_or(OrderError::UserNotFound(user_id))?;
        if !user.enabled {
            return Err(OrderError::UserDisabled(user_id));
        }

        let cart = ctx
            .carts
            .list_selected(user_id)
            .await
            .map_err(OrderError::upstream)?;
        if cart.is_empty() {
            return Err(OrderError::EmptySelection);
        }

        let mut catalog = HashMap::new();
        for line in &cart {
            if catalog.contains_key(&line.product_id) {
                continue;
            }
            if let Some(product) = ctx
                .products
                .get(line.product_id)
                .await
                .map_err(OrderError::upstream)?
            {
                catalog.insert(product.id, product);
            }
        }
        let plan = plan_checkout(&cart, &catalog)?;

        let mut reservation = StockReservation::new(&ctx.products);
        if let Err(e) = reservation.reserve_lines(&plan.lines).await {
            warn!(%user_id, order_code = %self.code, error = %e, "Checkout aborted");
            reservation.release().await;
            return Err(e);
        }

        let cleanup = ctx
            .carts
            .without_timeout()
            .remove_lines(plan.consumed.clone())
            .await;
        match cleanup {
            Ok(removed) if removed.len() < plan.consumed.len() => {
                warn!(
                    %user_id,
                    expected = plan.consumed.len(),
                    removed = removed.len(),
                    "Some cart lines were already gone"
                );
            }
            Ok(_) => {}
            Err(e) => {
                warn!(
                    %user_id,
                    order_code = %self.code,
                    error = %e,
                    "Cart cleanup failed, checkout aborted"
                );
                reservation.release().await;
                return Err(OrderError::upstream(e));
            }
        }
        reservation.commit();

        self.user = UserSummary::from(&user);
        self.items = plan.lines;
        self.total_amount = plan.total;
        info!(
            %user_id,
            order_code = %self.code,
            lines = self.items.len(),
            total = %self.total_amount,
            "Checkout complete"
        );
        Ok(())
    }

    /// Any status may follow any other; payment is confirmed by hand.
    async fn on_update(
        &mut self,
        update: OrderUpdate,
        _ctx: &OrderContext,
    ) -> Result<(), Self::Error> {
        if self.status != update.status {
            info!(
                order_id = %self.id,
                from = %self.status,
                to = %update.status,
                "Status changed"
            );
        }
        self.status = update.status;
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &OrderContext,
    ) -> Result<(), Self::Error> {
        match action {}
    }
}
