//! # Product Client
//!
//! Catalog administration, customer-facing catalog reads, and the stock actions used by
//! checkout. It wraps a `ResourceClient<Product>`.
use crate::model::{Lifecycle, Product, ProductCreate, ProductId, ProductQuery, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        ProductError::from(e)
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("unexpected action result {result:?}"))
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    /// Same actor, requests bounded by `timeout`.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self::new(self.inner.with_timeout(timeout))
    }

    /// Same actor, requests wait for their reply however long it takes.
    pub fn without_timeout(&self) -> Self {
        Self::new(self.inner.without_timeout())
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(ProductError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(ProductError::from)
    }

    /// Takes the product off sale. It stays in the store for carts and order history.
    #[instrument(skip(self))]
    pub async fn deactivate_product(&self, id: ProductId) -> Result<Product, ProductError> {
        self.update_product(
            id,
            ProductUpdate {
                lifecycle: Some(Lifecycle::Inactive),
                ..Default::default()
            },
        )
        .await
    }

    /// Products on sale, newest first, optionally filtered by a search term.
    #[instrument(skip(self))]
    pub async fn list_products(&self, search: Option<&str>) -> Result<Vec<Product>, ProductError> {
        let query = ProductQuery {
            search: search.map(str::to_string),
            include_inactive: false,
        };
        let mut products = self.list(query).await?;
        products.reverse();
        Ok(products)
    }

    /// A product as a customer may see it: inactive entries count as missing.
    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Result<Product, ProductError> {
        match self.get(id).await? {
            Some(product) if product.is_active() => Ok(product),
            _ => Err(ProductError::NotFound(id.to_string())),
        }
    }

    /// Check the current stock level for a product.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Checking stock");
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await?
        {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Atomically takes `quantity` units. Returns the stock left.
    ///
    /// Fails with [`ProductError::InsufficientStock`] and changes nothing when fewer
    /// units are on hand.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Reserving stock");
        match self
            .inner
            .perform_action(id, ProductAction::ReserveStock(quantity))
            .await?
        {
            ProductActionResult::ReserveStock(left) => Ok(left),
            other => Err(unexpected(other)),
        }
    }

    /// Puts back `quantity` units taken by [`reserve_stock`](Self::reserve_stock).
    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Releasing stock");
        match self
            .inner
            .perform_action(id, ProductAction::ReleaseStock(quantity))
            .await?
        {
            ProductActionResult::ReleaseStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }
}
