//! Shopping cart module.
//!
//! Contains the cart value and its lines. The persisted, storage-mirrored
//! store lives in `shop-app`; this is only the math.

mod cart;

pub use cart::{Cart, CartLine};
