//! A user's cart, stored as one line per (user, product) pair.

use crate::model::{Product, ProductId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartLineId(pub u32);

impl From<u32> for CartLineId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CartLineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cart_line_{}", self.0)
    }
}

/// One product in one user's cart.
///
/// `selected` marks the line for the next checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: CartLineId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub selected: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Store-level payload. Callers go through [`AddToCart`] on the cart client.
#[derive(Debug, Clone)]
pub struct CartLineCreate {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// What a user asks for when adding to the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToCart {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartLineUpdate {
    pub quantity: Option<u32>,
    pub selected: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct CartQuery {
    pub user_id: Option<UserId>,
    pub selected_only: bool,
}

impl CartQuery {
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            selected_only: false,
        }
    }

    pub fn selected(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            selected_only: true,
        }
    }
}

/// A cart line with the product it currently points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemView {
    pub line: CartLine,
    pub product: Product,
}

impl CartItemView {
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.line.quantity)
    }
}

/// The cart as shown to its owner, priced at current catalog prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total_items: u32,
    pub total_price: Decimal,
    pub selected_total_price: Decimal,
}

impl CartView {
    pub fn new(items: Vec<CartItemView>) -> Self {
        let total_items = items.iter().map(|item| item.line.quantity).sum();
        let total_price = items.iter().map(CartItemView::line_total).sum();
        let selected_total_price = items
            .iter()
            .filter(|item| item.line.selected)
            .map(CartItemView::line_total)
            .sum();
        Self {
            items,
            total_items,
            total_price,
            selected_total_price,
        }
    }
}
