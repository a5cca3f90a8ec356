//! Custom actions for the Product actor.
//!
//! Stock is only ever changed through these actions (or an admin update), and each one
//! runs inside the product actor's loop. `ReserveStock` is therefore an atomic
//! check-and-decrement: two reservations can never both take the last unit.

/// Custom actions for Product entities.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Takes `u32` units if at least that many are on hand, otherwise fails
    /// and changes nothing.
    ReserveStock(u32),
    /// Returns `u32` previously reserved units.
    ReleaseStock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    /// Current stock level
    CheckStock(u32),
    /// Stock left after the reservation
    ReserveStock(u32),
    /// Stock after the release
    ReleaseStock(u32),
}
