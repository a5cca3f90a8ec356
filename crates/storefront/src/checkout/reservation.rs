//! Compensation log for stock taken during a checkout.
//!
//! Every successful `ReserveStock` is recorded. If a later step fails, [`release`]
//! returns all of it; once the order is stored, [`commit`] forgets the log.
//!
//! [`release`]: StockReservation::release
//! [`commit`]: StockReservation::commit

use crate::clients::ProductClient;
use crate::model::{OrderLine, ProductId};
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const RELEASE_ATTEMPTS: u32 = 3;
const RELEASE_BACKOFF: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Taken {
    product_id: ProductId,
    quantity: u32,
}

/// Stock reserved so far by one checkout.
pub struct StockReservation {
    products: ProductClient,
    taken: Vec<Taken>,
}

impl StockReservation {
    /// Reservations and releases wait for their reply without a deadline: a timed-out
    /// reservation could still be applied later, leaving stock nobody owns.
    pub fn new(products: &ProductClient) -> Self {
        Self {
            products: products.without_timeout(),
            taken: Vec::new(),
        }
    }

    pub fn reserved(&self) -> Vec<(ProductId, u32)> {
        self.taken
            .iter()
            .map(|t| (t.product_id, t.quantity))
            .collect()
    }

    /// Reserves every line in order, stopping at the first refusal.
    ///
    /// A refusal here means stock moved after validation (a concurrent writer won), so it
    /// surfaces as [`OrderError::ReservationLost`]. Stock already taken stays recorded;
    /// the caller decides whether to [`release`](Self::release).
    pub async fn reserve_lines(&mut self, lines: &[OrderLine]) -> Result<(), OrderError> {
        for line in lines {
            match self
                .products
                .reserve_stock(line.product_id, line.quantity)
                .await
            {
                Ok(left) => {
                    self.taken.push(Taken {
                        product_id: line.product_id,
                        quantity: line.quantity,
                    });
                    info!(
                        product_id = %line.product_id,
                        quantity = line.quantity,
                        left,
                        "Stock reserved"
                    );
                }
                Err(ProductError::ActorCommunicationError(msg)) => {
                    return Err(OrderError::ActorCommunicationError(msg));
                }
                Err(e) => {
                    warn!(product_id = %line.product_id, error = %e, "Reservation refused");
                    return Err(OrderError::ReservationLost(line.product_name.clone()));
                }
            }
        }
        Ok(())
    }

    /// Returns all reserved stock, most recent first.
    ///
    /// Each release is retried a few times. A release that still fails is logged at
    /// `error` with the product and quantity so the drift can be fixed by hand.
    pub async fn release(self) {
        for taken in self.taken.into_iter().rev() {
            let mut attempt = 1;
            loop {
                match self
                    .products
                    .release_stock(taken.product_id, taken.quantity)
                    .await
                {
                    Ok(level) => {
                        info!(
                            product_id = %taken.product_id,
                            quantity = taken.quantity,
                            level,
                            "Stock released"
                        );
                        break;
                    }
                    Err(e) if attempt < RELEASE_ATTEMPTS => {
                        warn!(
                            product_id = %taken.product_id,
                            attempt,
                            error = %e,
                            "Release failed, retrying"
                        );
                        tokio::time::sleep(RELEASE_BACKOFF * attempt).await;
                        attempt += 1;
                    }
                    Err(e) => {
                        error!(
                            product_id = %taken.product_id,
                            quantity = taken.quantity,
                            error = %e,
                            "Stock release failed; inventory is short by this quantity"
                        );
                        break;
                    }
                }
            }
        }
    }

    /// The order is stored: the reserved stock now belongs to it.
    pub fn commit(self) {
        for taken in self.taken {
            debug!(
                product_id = %taken.product_id,
                quantity = taken.quantity,
                "Reservation committed"
            );
        }
    }
}
