//! Product types.

use crate::catalog::StarRating;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Stock count above which a product is considered well stocked.
pub const PLENTY_THRESHOLD: i64 = 10;

/// A product in the catalog.
///
/// Field names follow the backend's JSON (`_id`, `numReviews`). Only the
/// admin console creates or edits products; everything else treats them as
/// read-only snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Description shown on the card and in the admin table.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: Money,
    /// Free-form category label.
    #[serde(default)]
    pub category: String,
    /// Units in stock.
    #[serde(default)]
    pub stock: i64,
    /// Average rating, 0 to 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Number of reviews behind the rating.
    #[serde(default)]
    pub num_reviews: u32,
    /// Individual reviews, when the backend includes them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<Review>,
}

impl Product {
    /// Create a product with the required fields and no rating.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        stock: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            category: String::new(),
            stock,
            rating: None,
            num_reviews: 0,
            reviews: Vec::new(),
        }
    }

    /// Zero stock disables "add to cart".
    pub fn can_add_to_cart(&self) -> bool {
        self.stock > 0
    }

    /// Price as rendered: never negative.
    pub fn display_price(&self) -> Money {
        self.price.non_negative()
    }

    /// Stock as rendered: never negative.
    pub fn display_stock(&self) -> i64 {
        self.stock.max(0)
    }

    /// Badge bucket for the stock column.
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::from_stock(self.stock)
    }

    /// Label for the product card ("3 in stock" / "Out of stock").
    pub fn availability_label(&self) -> String {
        if self.can_add_to_cart() {
            format!("{} in stock", self.display_stock())
        } else {
            "Out of stock".to_string()
        }
    }

    /// Star breakdown, if the product has a positive rating.
    pub fn star_rating(&self) -> Option<StarRating> {
        self.rating
            .filter(|r| *r > 0.0)
            .map(StarRating::from_rating)
    }
}

/// A customer review attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    /// Reviewer display name.
    pub name: String,
    /// Rating given, 0 to 5.
    pub rating: f64,
    /// Review text.
    #[serde(default)]
    pub comment: String,
}

/// Stock badge buckets used by the admin table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockLevel {
    /// More than ten units.
    Plenty,
    /// One to ten units.
    Low,
    /// Nothing left.
    OutOfStock,
}

impl StockLevel {
    pub fn from_stock(stock: i64) -> Self {
        if stock > PLENTY_THRESHOLD {
            StockLevel::Plenty
        } else if stock > 0 {
            StockLevel::Low
        } else {
            StockLevel::OutOfStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockLevel::Plenty => "plenty",
            StockLevel::Low => "low",
            StockLevel::OutOfStock => "out_of_stock",
        }
    }
}
