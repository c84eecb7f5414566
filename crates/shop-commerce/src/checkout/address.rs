//! Shipping address and payment form types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Shipping address sent with a new order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    /// Street line.
    #[serde(default)]
    pub address: String,
    /// City.
    #[serde(default)]
    pub city: String,
    /// Postal code.
    #[serde(default)]
    pub postal_code: String,
    /// Country.
    #[serde(default)]
    pub country: String,
}

impl ShippingAddress {
    /// Single-line form used in order listings.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {}, {}",
            self.address, self.city, self.postal_code, self.country
        )
    }
}

/// The payment form.
///
/// Card fields are never checked beyond being non-empty: payment is
/// simulated, there is no gateway behind it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PaymentDetails {
    pub card_holder: String,
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
    /// Billing address, reused as the shipping address.
    pub billing: ShippingAddress,
}

impl PaymentDetails {
    /// Names of required card fields that are blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("card holder", &self.card_holder),
            ("card number", &self.card_number),
            ("expiry date", &self.expiry),
            ("CVV", &self.cvv),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// True when every required card field is filled in.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Shipping address built from the billing fields.
    pub fn shipping_address(&self) -> ShippingAddress {
        self.billing.clone()
    }
}

impl fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last4: String = {
            let digits: Vec<char> = self.card_number.chars().filter(char::is_ascii_digit).collect();
            digits[digits.len().saturating_sub(4)..].iter().collect()
        };
        f.debug_struct("PaymentDetails")
            .field("card_holder", &self.card_holder)
            .field("card_number", &format_args!("****{}", last4))
            .field("expiry", &self.expiry)
            .field("cvv", &"***")
            .field("billing", &self.billing)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> PaymentDetails {
        PaymentDetails {
            card_holder: "Jan Kowalski".to_string(),
            card_number: "4111 1111 1111 1111".to_string(),
            expiry: "12/30".to_string(),
            cvv: "123".to_string(),
            billing: ShippingAddress {
                address: "Main St 1".to_string(),
                city: "Warsaw".to_string(),
                postal_code: "00-001".to_string(),
                country: "Poland".to_string(),
            },
        }
    }

    #[test]
    fn test_complete_form() {
        assert!(filled().is_complete());
    }

    #[test]
    fn test_missing_fields_listed_in_order() {
        let mut form = filled();
        form.card_number = "  ".to_string();
        form.cvv.clear();
        assert_eq!(form.missing_fields(), vec!["card number", "CVV"]);
    }

    #[test]
    fn test_no_card_validation_beyond_presence() {
        let mut form = filled();
        form.card_number = "not a card".to_string();
        form.expiry = "whenever".to_string();
        assert!(form.is_complete());
    }

    #[test]
    fn test_address_wire_names() {
        let json = serde_json::to_value(filled().shipping_address()).unwrap();
        assert_eq!(json["postalCode"], "00-001");
        assert_eq!(json["address"], "Main St 1");
    }

    #[test]
    fn test_debug_redacts_card() {
        let debug = format!("{:?}", filled());
        assert!(debug.contains("****1111"));
        assert!(!debug.contains("4111 1111"));
        assert!(!debug.contains("123"));
    }
}
