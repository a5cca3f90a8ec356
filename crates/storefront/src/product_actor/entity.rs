//! [`ActorEntity`] implementation for the catalog.
//!
//! Validation lives in `from_create_params` and `on_update`, so no path into the store
//! can produce an unnamed product or a negative price. Stock is a `u32` and every
//! decrement is checked.

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::model::{Lifecycle, Product, ProductCreate, ProductId, ProductQuery, ProductUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

fn require_text(field: &str, value: &str) -> Result<(), ProductError> {
    if value.trim().is_empty() {
        return Err(ProductError::ValidationError(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

fn require_price(price: Decimal) -> Result<(), ProductError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ProductError::ValidationError(format!(
            "price must not be negative, got {price}"
        )));
    }
    Ok(())
}

fn require_quantity(quantity: u32) -> Result<(), ProductError> {
    if quantity == 0 {
        return Err(ProductError::ValidationError(
            "quantity must be at least 1".into(),
        ));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Query = ProductQuery;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    /// Creates an active product. Missing stock means none on hand.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        require_text("name", &params.name)?;
        require_text("description", &params.description)?;
        require_price(params.price)?;

        let now = Utc::now();
        Ok(Self {
            id,
            name: params.name.trim().to_string(),
            description: params.description.trim().to_string(),
            price: params.price,
            stock: params.stock.unwrap_or(0),
            image_url: params.image_url,
            lifecycle: Lifecycle::Active,
            created_at: now,
            updated_at: now,
        })
    }

    fn matches(&self, query: &ProductQuery) -> bool {
        if !query.include_inactive && !self.is_active() {
            return false;
        }
        match query.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => self.mentions(needle),
            _ => true,
        }
    }

    /// Handles updates to the Product entity.
    ///
    /// # Fields Updated
    /// - `name`, `description`: must stay non-empty
    /// - `price`: must stay non-negative
    /// - `stock`, `image_url`
    /// - `lifecycle`: `Inactive` takes the product off sale
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            require_text("name", &name)?;
            self.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            require_text("description", &description)?;
            self.description = description.trim().to_string();
        }
        if let Some(price) = update.price {
            require_price(price)?;
            self.price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(image_url) = update.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(lifecycle) = update.lifecycle {
            self.lifecycle = lifecycle;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        Err(ProductError::DeleteRefused(self.id.to_string()))
    }

    /// Handles custom actions for the Product entity.
    ///
    /// # Actions
    /// - `CheckStock`: returns the current level
    /// - `ReserveStock`: decrements if enough is on hand and the product is on sale
    /// - `ReleaseStock`: increments, allowed for inactive products too
    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.stock)),
            ProductAction::ReserveStock(quantity) => {
                require_quantity(quantity)?;
                if !self.is_active() {
                    return Err(ProductError::Inactive(self.name.clone()));
                }
                let Some(left) = self.stock.checked_sub(quantity) else {
                    return Err(ProductError::InsufficientStock {
                        name: self.name.clone(),
                        requested: quantity,
                        available: self.stock,
                    });
                };
                self.stock = left;
                self.updated_at = Utc::now();
                Ok(ProductActionResult::ReserveStock(left))
            }
            ProductAction::ReleaseStock(quantity) => {
                require_quantity(quantity)?;
                self.stock = self.stock.checked_add(quantity).ok_or_else(|| {
                    ProductError::ValidationError(format!(
                        "releasing {quantity} units would overflow the stock of {}",
                        self.id
                    ))
                })?;
                self.updated_at = Utc::now();
                Ok(ProductActionResult::ReleaseStock(self.stock))
            }
        }
    }
}
