//! # Cart Client
//!
//! The cart API a customer sees, plus the collaborator calls checkout and user removal
//! rely on. Wraps a `ResourceClient<CartLine>` and reads the catalog through a
//! [`ProductClient`] to keep lines pointed at sellable products.
use crate::cart_actor::CartError;
use crate::clients::ProductClient;
use crate::model::{
    AddToCart, CartItemView, CartLine, CartLineCreate, CartLineId, CartLineUpdate, CartQuery,
    CartView, Product, UserId,
};
use crate::product_actor::ProductError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<CartLine>,
    products: ProductClient,
}

#[async_trait]
impl ActorClient<CartLine> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<CartLine> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        CartError::from(e)
    }
}

impl CartClient {
    pub fn new(inner: ResourceClient<CartLine>, products: ProductClient) -> Self {
        Self { inner, products }
    }

    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self::new(
            self.inner.with_timeout(timeout),
            self.products.with_timeout(timeout),
        )
    }

    pub fn without_timeout(&self) -> Self {
        Self::new(self.inner.without_timeout(), self.products.without_timeout())
    }

    /// Resolves a product a customer wants to put in the cart.
    async fn sellable(&self, product_id: crate::model::ProductId) -> Result<Product, CartError> {
        let product = self
            .products
            .get(product_id)
            .await?
            .ok_or_else(|| ProductError::NotFound(product_id.to_string()))?;
        if !product.is_active() {
            return Err(ProductError::Inactive(product.name).into());
        }
        Ok(product)
    }

    /// Loads a line and checks it belongs to `user_id`.
    async fn owned_line(
        &self,
        user_id: UserId,
        line_id: CartLineId,
    ) -> Result<CartLine, CartError> {
        let line = self
            .get(line_id)
            .await?
            .ok_or_else(|| CartError::NotFound(line_id.to_string()))?;
        if line.user_id != user_id {
            return Err(CartError::Forbidden(line_id));
        }
        Ok(line)
    }

    /// Adds `quantity` units of a product, merging with an existing line.
    ///
    /// A merged line is selected again. The resulting quantity may not exceed the
    /// product's stock.
    #[instrument(skip(self))]
    pub async fn add_to_cart(
        &self,
        user_id: UserId,
        item: AddToCart,
    ) -> Result<CartLine, CartError> {
        if item.quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        let product = self.sellable(item.product_id).await?;
        if product.stock == 0 {
            return Err(CartError::OutOfStock(product.name));
        }

        let existing = self
            .list(CartQuery::for_user(user_id))
            .await?
            .into_iter()
            .find(|line| line.product_id == item.product_id);
        let current = existing.as_ref().map_or(0, |line| line.quantity);
        let wanted = current.saturating_add(item.quantity);
        if wanted > product.stock {
            return Err(CartError::ExceedsStock {
                name: product.name,
                available: product.stock,
            });
        }

        match existing {
            Some(line) => {
                debug!(line_id = %line.id, wanted, "Merging into existing line");
                self.inner
                    .update(
                        line.id,
                        CartLineUpdate {
                            quantity: Some(wanted),
                            selected: Some(true),
                        },
                    )
                    .await
                    .map_err(CartError::from)
            }
            None => {
                let id = self
                    .inner
                    .create(CartLineCreate {
                        user_id,
                        product_id: item.product_id,
                        quantity: item.quantity,
                    })
                    .await?;
                self.get(id)
                    .await?
                    .ok_or_else(|| CartError::NotFound(id.to_string()))
            }
        }
    }

    /// Changes quantity and/or selection of one of the caller's lines.
    #[instrument(skip(self))]
    pub async fn update_cart_item(
        &self,
        user_id: UserId,
        line_id: CartLineId,
        update: CartLineUpdate,
    ) -> Result<CartLine, CartError> {
        let line = self.owned_line(user_id, line_id).await?;
        let product = self
            .products
            .get(line.product_id)
            .await?
            .ok_or_else(|| ProductError::NotFound(line.product_id.to_string()))?;
        if !product.is_active() {
            return Err(ProductError::Inactive(product.name).into());
        }
        if let Some(quantity) = update.quantity {
            if quantity == 0 {
                return Err(CartError::InvalidQuantity);
            }
            if quantity > product.stock {
                return Err(CartError::ExceedsStock {
                    name: product.name,
                    available: product.stock,
                });
            }
        }
        self.inner
            .update(line_id, update)
            .await
            .map_err(CartError::from)
    }

    #[instrument(skip(self))]
    pub async fn remove_cart_item(
        &self,
        user_id: UserId,
        line_id: CartLineId,
    ) -> Result<(), CartError> {
        self.owned_line(user_id, line_id).await?;
        self.delete(line_id).await
    }

    /// The caller's cart, priced at current catalog prices.
    ///
    /// Lines whose product is gone or off sale are dropped from the store as part of
    /// the read.
    #[instrument(skip(self))]
    pub async fn cart(&self, user_id: UserId) -> Result<CartView, CartError> {
        let lines = self.list(CartQuery::for_user(user_id)).await?;

        let mut items = Vec::with_capacity(lines.len());
        let mut stale = Vec::new();
        for line in lines {
            match self.products.get(line.product_id).await? {
                Some(product) if product.is_active() => items.push(CartItemView { line, product }),
                _ => stale.push(line.id),
            }
        }

        if !stale.is_empty() {
            let removed = self.remove_lines(stale).await?;
            info!(%user_id, removed = removed.len(), "Pruned unavailable cart lines");
        }
        Ok(CartView::new(items))
    }

    /// The caller's lines marked for checkout, in the order they were added.
    #[instrument(skip(self))]
    pub async fn list_selected(&self, user_id: UserId) -> Result<Vec<CartLine>, CartError> {
        self.list(CartQuery::selected(user_id)).await
    }

    /// Removes all of `ids` or none of them.
    #[instrument(skip(self))]
    pub async fn remove_lines(&self, ids: Vec<CartLineId>) -> Result<Vec<CartLineId>, CartError> {
        self.inner.delete_many(ids).await.map_err(CartError::from)
    }

    /// Removes every line of `user_id`. Returns how many were removed.
    #[instrument(skip(self))]
    pub async fn purge_user(&self, user_id: UserId) -> Result<usize, CartError> {
        let ids = self
            .list(CartQuery::for_user(user_id))
            .await?
            .into_iter()
            .map(|line| line.id)
            .collect::<Vec<_>>();
        if ids.is_empty() {
            return Ok(0);
        }
        Ok(self.remove_lines(ids).await?.len())
    }
}
