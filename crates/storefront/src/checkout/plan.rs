//! Turns the selected cart lines and the current catalog into order lines.
//!
//! Pure: no actor calls, so every validation rule is unit-tested here.

use crate::model::{CartLine, CartLineId, OrderLine, Product, ProductId};
use crate::order_actor::OrderError;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// What a checkout will write if every reservation succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutPlan {
    /// Snapshotted lines, numbered from 1 in cart order.
    pub lines: Vec<OrderLine>,
    /// Cart lines the order consumes.
    pub consumed: Vec<CartLineId>,
    pub total: Decimal,
}

/// Validates `cart` against `catalog` and snapshots name and price of each product.
///
/// Fails on the first line whose product is missing, off sale, or short of stock.
pub fn plan_checkout(
    cart: &[CartLine],
    catalog: &HashMap<ProductId, Product>,
) -> Result<CheckoutPlan, OrderError> {
    if cart.is_empty() {
        return Err(OrderError::EmptySelection);
    }

    let mut lines = Vec::with_capacity(cart.len());
    let mut consumed = Vec::with_capacity(cart.len());
    let mut total = Decimal::ZERO;

    for (position, item) in (1..).zip(cart) {
        let product = catalog
            .get(&item.product_id)
            .ok_or(OrderError::ProductNotFound(item.product_id))?;
        if !product.is_active() {
            return Err(OrderError::ProductInactive(product.name.clone()));
        }
        if item.quantity > product.stock {
            return Err(OrderError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock,
            });
        }

        let total_price = product.price * Decimal::from(item.quantity);
        total += total_price;
        consumed.push(item.id);
        lines.push(OrderLine {
            id: position,
            product_id: product.id,
            product_name: product.name.clone(),
            unit_price: product.price,
            quantity: item.quantity,
            total_price,
        });
    }

    Ok(CheckoutPlan {
        lines,
        consumed,
        total,
    })
}
