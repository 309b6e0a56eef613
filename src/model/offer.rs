//! A promotional offer redeemable at checkout with a code.

use super::round_cents;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

super::record_id!(OfferId, "offer");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub title: String,
    pub description: Option<String>,
    /// Stored upper-case; matched case-insensitively.
    pub code: String,
    /// 1..=90
    pub discount_percent: u8,
    pub min_order: f64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Offer {
    /// Whether the offer can be applied to a cart worth `subtotal`.
    pub fn applies_to(&self, subtotal: f64) -> bool {
        self.active && subtotal >= self.min_order
    }

    /// Discount on `subtotal`, rounded to cents.
    pub fn discount_on(&self, subtotal: f64) -> f64 {
        round_cents(subtotal * f64::from(self.discount_percent) / 100.0)
    }
}

/// Normalizes a customer-entered code for lookup.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

#[derive(Debug, Clone)]
pub struct OfferDraft {
    pub title: String,
    pub description: Option<String>,
    pub code: String,
    pub discount_percent: u8,
    pub min_order: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfferPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub discount_percent: Option<u8>,
    pub min_order: Option<f64>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OfferFilter {
    Active,
    Code(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(percent: u8, min_order: f64) -> Offer {
        Offer {
            id: OfferId(1),
            title: "Weekend".into(),
            description: None,
            code: "FRESH10".into(),
            discount_percent: percent,
            min_order,
            active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_discount_rounds_to_cents() {
        assert_eq!(offer(10, 0.0).discount_on(333.33), 33.33);
        assert_eq!(offer(15, 0.0).discount_on(99.99), 15.0);
    }

    #[test]
    fn test_applies_only_above_minimum_when_active() {
        let mut o = offer(10, 500.0);
        assert!(!o.applies_to(499.99));
        assert!(o.applies_to(500.0));
        o.active = false;
        assert!(!o.applies_to(900.0));
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("  fresh10 "), "FRESH10");
    }
}
