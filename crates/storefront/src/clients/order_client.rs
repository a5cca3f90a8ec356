//! # Order Client
//!
//! Checkout, status changes and order queries. Wraps a `ResourceClient<Order>`; the
//! orchestration itself happens in the Order actor's `on_create` hook.
use crate::checkout::{order_code, validate_shipping};
use crate::model::{
    Order, OrderCreate, OrderId, OrderQuery, OrderStatus, OrderUpdate, ShippingInfo, UserId,
};
use crate::order_actor::OrderError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        OrderError::from(e)
    }
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Bounds reads and status updates. Checkout ignores the bound, see
    /// [`checkout_at`](Self::checkout_at).
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self::new(self.inner.with_timeout(timeout))
    }

    /// Places an order from the caller's selected cart lines.
    pub async fn checkout(
        &self,
        user_id: UserId,
        shipping: ShippingInfo,
    ) -> Result<Order, OrderError> {
        self.checkout_at(user_id, shipping, Utc::now()).await
    }

    /// [`checkout`](Self::checkout) with an explicit placement instant, which also
    /// determines the order code.
    ///
    /// Both the request and the read of the stored order wait for the order actor
    /// however long it takes: once the order is stored, the caller gets it back.
    #[instrument(skip(self, shipping))]
    pub async fn checkout_at(
        &self,
        user_id: UserId,
        shipping: ShippingInfo,
        placed_at: DateTime<Utc>,
    ) -> Result<Order, OrderError> {
        let shipping = validate_shipping(shipping)?;
        let code = order_code(placed_at);
        debug!(%code, "Sending checkout to actor");

        let untimed = self.inner.without_timeout();
        let id = untimed
            .create(OrderCreate {
                code,
                user_id,
                shipping,
                placed_at,
            })
            .await?;
        let order = untimed
            .get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;
        info!(
            order_id = %order.id,
            order_code = %order.code,
            total = %order.total_amount,
            "Order placed"
        );
        Ok(order)
    }

    /// Sets the status of any order. Transitions are not restricted.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrderError> {
        self.inner
            .update(id, OrderUpdate { status })
            .await
            .map_err(OrderError::from)
    }

    /// The caller's orders, newest first.
    #[instrument(skip(self))]
    pub async fn my_orders(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        let mut orders = self
            .list(OrderQuery {
                user_id: Some(user_id),
            })
            .await?;
        orders.reverse();
        Ok(orders)
    }

    /// One of the caller's orders.
    #[instrument(skip(self))]
    pub async fn my_order(&self, user_id: UserId, id: OrderId) -> Result<Order, OrderError> {
        let order = self.order(id).await?;
        if order.user.id != user_id {
            return Err(OrderError::Forbidden(id));
        }
        Ok(order)
    }

    /// Every order, newest first.
    pub async fn orders(&self) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.list(OrderQuery::default()).await?;
        orders.reverse();
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::MockClient;

    fn shipping() -> ShippingInfo {
        ShippingInfo {
            name: "Ann".into(),
            phone: "0901234567".into(),
            address: "1 Main St".into(),
        }
    }

    #[tokio::test]
    async fn invalid_shipping_never_reaches_the_actor() {
        let mock = MockClient::<Order>::new();
        let client = OrderClient::new(mock.client());

        let mut bad = shipping();
        bad.phone = "12-34".into();
        let err = client.checkout(UserId(1), bad).await.unwrap_err();
        assert!(matches!(err, OrderError::InvalidShipping(_)));
        mock.verify();
    }

    #[tokio::test]
    async fn checkout_errors_from_the_hook_arrive_typed() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_create()
            .return_err(FrameworkError::EntityError(Box::new(OrderError::EmptySelection)));

        let client = OrderClient::new(mock.client());
        let err = client.checkout(UserId(1), shipping()).await.unwrap_err();
        assert_eq!(err, OrderError::EmptySelection);
        mock.verify();
    }

    #[tokio::test]
    async fn code_collision_is_a_conflict() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_create()
            .return_err(FrameworkError::Conflict("code:ORD-240101-000001".into()));

        let client = OrderClient::new(mock.client());
        let err = client.checkout(UserId(1), shipping()).await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn missing_order_is_not_found() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_get(OrderId(3)).return_ok(None);

        let client = OrderClient::new(mock.client());
        assert_eq!(
            client.my_order(UserId(1), OrderId(3)).await,
            Err(OrderError::NotFound("order_3".into()))
        );
        mock.verify();
    }
}
