//! Order types.
//!
//! Orders are owned by the backend. The client creates them through
//! [`NewOrder`] and otherwise only displays what it gets back.

use crate::cart::CartLine;
use crate::checkout::{ShippingAddress, StagedOrder};
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Payment method label sent with every order. Payment is simulated.
pub const PAYMENT_METHOD_LABEL: &str = "Credit Card";

/// Order status as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Order being prepared.
    Processing,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
    /// A status this client does not know about.
    Other(String),
}

impl OrderStatus {
    /// Parse a status string, case-insensitively.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "pending" => OrderStatus::Pending,
            "processing" => OrderStatus::Processing,
            "shipped" => OrderStatus::Shipped,
            "delivered" => OrderStatus::Delivered,
            "cancelled" | "canceled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Other(s) => s,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Other(s) => s,
        }
    }

    /// Badge colour for the status.
    pub fn tone(&self) -> StatusTone {
        match self {
            OrderStatus::Pending => StatusTone::Yellow,
            OrderStatus::Processing => StatusTone::Blue,
            OrderStatus::Shipped => StatusTone::Purple,
            OrderStatus::Delivered => StatusTone::Green,
            OrderStatus::Cancelled => StatusTone::Red,
            OrderStatus::Other(_) => StatusTone::Gray,
        }
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_name())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(OrderStatus::parse(&s))
    }
}

/// Badge colours used for order statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTone {
    Yellow,
    Blue,
    Purple,
    Green,
    Red,
    Gray,
}

/// An order as returned by `GET /api/orders/myorders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: OrderId,
    /// Ordered items.
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    /// Total charged.
    pub total_price: Money,
    /// Fulfilment status.
    #[serde(default)]
    pub order_status: OrderStatus,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub is_delivered: bool,
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default)]
    pub payment_method: Option<String>,
    /// When the order was placed.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Total item count.
    pub fn item_count(&self) -> i64 {
        self.order_items.iter().map(|i| i.quantity).sum()
    }

    /// Payment method, defaulting to the card label.
    pub fn payment_method_label(&self) -> &str {
        self.payment_method.as_deref().unwrap_or(PAYMENT_METHOD_LABEL)
    }

    /// Placement date, e.g. "May 3, 2025, 02:15 PM".
    pub fn placed_on(&self) -> Option<String> {
        self.created_at
            .map(|t| t.format("%B %-d, %Y, %I:%M %p").to_string())
    }
}

/// A line of a backend order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Product reference; populated or bare id depending on the endpoint.
    #[serde(default)]
    pub product: Option<OrderProduct>,
    /// Units ordered.
    pub quantity: i64,
    /// Unit price at time of order.
    pub price: Money,
}

impl OrderItem {
    /// Product name, or "Product" when the reference is not populated.
    pub fn display_name(&self) -> &str {
        match &self.product {
            Some(OrderProduct::Populated { name: Some(name), .. }) => name,
            _ => "Product",
        }
    }

    /// `unit price * quantity`.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// Product reference inside an order line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum OrderProduct {
    /// The backend populated the product document.
    Populated {
        #[serde(rename = "_id")]
        id: ProductId,
        #[serde(default)]
        name: Option<String>,
    },
    /// Only the id.
    Id(ProductId),
}

impl OrderProduct {
    pub fn id(&self) -> &ProductId {
        match self {
            OrderProduct::Populated { id, .. } | OrderProduct::Id(id) => id,
        }
    }
}

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub order_items: Vec<CartLine>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub total_price: Money,
}

impl NewOrder {
    /// Build the order request from a staged order.
    pub fn from_staged(staged: &StagedOrder, shipping_address: ShippingAddress) -> Self {
        Self {
            order_items: staged.items.clone(),
            shipping_address,
            payment_method: PAYMENT_METHOD_LABEL.to_string(),
            total_price: staged.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::catalog::Product;

    const ORDER_JSON: &str = r#"{
        "_id": "665f1a2b3c4d5e6f70819203",
        "orderItems": [
            {"product": {"_id": "p1", "name": "Honey"}, "quantity": 2, "price": 10},
            {"product": "p2", "quantity": 1, "price": 5.5}
        ],
        "totalPrice": 25.5,
        "orderStatus": "Shipped",
        "isPaid": true,
        "isDelivered": false,
        "shippingAddress": {"address": "Main St 1", "city": "Warsaw", "postalCode": "00-001", "country": "Poland"},
        "createdAt": "2025-05-03T14:15:00.000Z"
    }"#;

    #[test]
    fn test_order_from_backend_json() {
        let order: Order = serde_json::from_str(ORDER_JSON).unwrap();
        assert_eq!(order.id.short_ref(), "70819203");
        assert_eq!(order.order_status, OrderStatus::Shipped);
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.total_price.amount_cents, 2550);
        assert_eq!(order.order_items[0].display_name(), "Honey");
        assert_eq!(order.order_items[1].display_name(), "Product");
        assert_eq!(order.order_items[1].product.as_ref().unwrap().id().as_str(), "p2");
        assert_eq!(order.payment_method_label(), "Credit Card");
        assert_eq!(order.placed_on().unwrap(), "May 3, 2025, 02:15 PM");
    }

    #[test]
    fn test_status_tones() {
        assert_eq!(OrderStatus::parse("pending").tone(), StatusTone::Yellow);
        assert_eq!(OrderStatus::parse("PROCESSING").tone(), StatusTone::Blue);
        assert_eq!(OrderStatus::parse("shipped").tone(), StatusTone::Purple);
        assert_eq!(OrderStatus::parse("Delivered").tone(), StatusTone::Green);
        assert_eq!(OrderStatus::parse("cancelled").tone(), StatusTone::Red);
        assert_eq!(OrderStatus::parse("on hold").tone(), StatusTone::Gray);
    }

    #[test]
    fn test_unknown_status_keeps_text() {
        let status = OrderStatus::parse("On Hold");
        assert_eq!(status, OrderStatus::Other("On Hold".to_string()));
        assert_eq!(status.display_name(), "On Hold");
    }

    #[test]
    fn test_new_order_body() {
        let mut cart = Cart::new();
        cart.add(&Product::new("p1", "Honey", Money::new(1000), 3)).unwrap();
        let staged = StagedOrder::from_cart(&cart).unwrap();
        let address = ShippingAddress {
            address: "Main St 1".to_string(),
            city: "Warsaw".to_string(),
            postal_code: "00-001".to_string(),
            country: "Poland".to_string(),
        };

        let body = serde_json::to_value(NewOrder::from_staged(&staged, address)).unwrap();
        assert_eq!(body["paymentMethod"], "Credit Card");
        assert_eq!(body["totalPrice"], 10.0);
        assert_eq!(body["orderItems"][0]["_id"], "p1");
        assert_eq!(body["orderItems"][0]["quantity"], 1);
        assert_eq!(body["shippingAddress"]["city"], "Warsaw");
    }
}
