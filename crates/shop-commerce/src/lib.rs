//! Storefront domain types and logic.
//!
//! This crate holds the value objects the storefront client works with:
//!
//! - **Catalog**: Products, reviews, star ratings, stock badges
//! - **Cart**: Cart lines keyed by product, item and price totals
//! - **Checkout**: Staged orders, payment details, order history records
//!
//! Nothing here performs I/O. Persistence lives in `shop-store`, the REST
//! client in `shop-data`, and the flows that tie them together in `shop-app`.
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_commerce::prelude::*;
//!
//! let mut cart = Cart::new();
//! cart.add(&product)?;
//! cart.add(&product)?;
//!
//! assert_eq!(cart.total_items(), 2);
//! println!("Total: {}", cart.total_price()?);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Product, Review, StarRating, StockLevel};

    // Cart
    pub use crate::cart::{Cart, CartLine};

    // Checkout
    pub use crate::checkout::{
        NewOrder, Order, OrderItem, OrderStatus, PaymentDetails, ShippingAddress, StagedOrder,
        StagedOrderError, StatusTone,
    };
}
