//! [`ActorEntity`] implementation for cart lines.
//!
//! The store only guards what it can see on its own: quantities of at least one and a
//! single line per (user, product). Stock and product checks need the catalog and live
//! in [`CartClient`](crate::clients::CartClient).

use super::error::CartError;
use crate::model::{CartLine, CartLineCreate, CartLineId, CartLineUpdate, CartQuery};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

#[derive(Debug, Clone)]
pub enum CartAction {}

#[async_trait]
impl ActorEntity for CartLine {
    type Id = CartLineId;
    type Create = CartLineCreate;
    type Update = CartLineUpdate;
    type Query = CartQuery;
    type Action = CartAction;
    type ActionResult = ();
    type Context = ();
    type Error = CartError;

    /// New lines start selected.
    fn from_create_params(id: CartLineId, params: CartLineCreate) -> Result<Self, Self::Error> {
        if params.quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        let now = Utc::now();
        Ok(Self {
            id,
            user_id: params.user_id,
            product_id: params.product_id,
            quantity: params.quantity,
            selected: true,
            created_at: now,
            updated_at: now,
        })
    }

    fn unique_keys(&self) -> Vec<String> {
        vec![format!("line:{}:{}", self.user_id, self.product_id)]
    }

    fn matches(&self, query: &CartQuery) -> bool {
        query.user_id.map_or(true, |owner| owner == self.user_id)
            && (!query.selected_only || self.selected)
    }

    async fn on_update(&mut self, update: CartLineUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(quantity) = update.quantity {
            if quantity == 0 {
                return Err(CartError::InvalidQuantity);
            }
            self.quantity = quantity;
        }
        if let Some(selected) = update.selected {
            self.selected = selected;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn handle_action(&mut self, action: CartAction, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
