//! Pure data structures managed by the resource actors.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::*;
pub use order::*;
pub use product::*;
pub use user::*;
