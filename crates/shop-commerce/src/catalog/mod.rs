//! Product catalog module.
//!
//! Contains the product record served by the backend plus the display
//! helpers the listing and admin table share.

mod product;
mod rating;

pub use product::{Product, Review, StockLevel};
pub use rating::StarRating;
