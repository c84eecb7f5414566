//! Checkout module.
//!
//! Contains the staged order handed from checkout to payment, the payment
//! form, and the order records the backend returns.

mod address;
mod order;
mod staged;

pub use address::{PaymentDetails, ShippingAddress};
pub use order::{NewOrder, Order, OrderItem, OrderProduct, OrderStatus, StatusTone, PAYMENT_METHOD_LABEL};
pub use staged::{StagedOrder, StagedOrderError};
