//! A product on the shelf.
//!
//! See [`impl Record for Product`](crate::product_actor) for stock actions
//! ([`ProductAction`](crate::product_actor::ProductAction)).

use super::CategoryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

super::record_id!(
    /// Type-safe identifier for Products.
    ProductId,
    "product"
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    /// Discounted price. Expected to be at most `price`, not enforced.
    #[serde(default)]
    pub sale_price: Option<f64>,
    pub category_id: CategoryId,
    pub in_stock: bool,
    pub stock_quantity: u32,
    /// Selling unit shown next to the price ("kg", "dozen", "500 ml").
    pub unit: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Creates an in-stock product with no sale price and ten units on hand.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        category_id: CategoryId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            price,
            sale_price: None,
            category_id,
            in_stock: true,
            stock_quantity: 10,
            unit: "each".to_string(),
            image_url: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_sale_price(mut self, sale_price: f64) -> Self {
        self.sale_price = Some(sale_price);
        self
    }

    pub fn with_stock(mut self, stock_quantity: u32) -> Self {
        self.stock_quantity = stock_quantity;
        self.in_stock = stock_quantity > 0;
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn is_on_sale(&self) -> bool {
        self.sale_price.is_some()
    }

    /// The price a customer pays per unit.
    pub fn effective_price(&self) -> f64 {
        self.sale_price.unwrap_or(self.price)
    }

    /// Whether `quantity` units can be sold right now.
    pub fn can_supply(&self, quantity: u32) -> bool {
        self.in_stock && self.stock_quantity >= quantity
    }
}

/// Payload for creating a product. `in_stock` follows `stock_quantity`.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub sale_price: Option<f64>,
    pub category_id: CategoryId,
    pub stock_quantity: u32,
    pub unit: String,
    pub image_url: Option<String>,
}

/// Payload for updating a product's listing. Stock moves through
/// [`ProductAction`](crate::product_actor::ProductAction) instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    /// `Some(None)` ends a sale.
    pub sale_price: Option<Option<f64>>,
    pub category_id: Option<CategoryId>,
    pub unit: Option<String>,
    pub image_url: Option<String>,
}

/// Selects products in a `List` request.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductFilter {
    Category(CategoryId),
    OnSale,
    InStock,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_price_prefers_sale_price() {
        let plain = Product::new(ProductId(1), "Apples", 120.0, CategoryId(1));
        assert_eq!(plain.effective_price(), 120.0);
        assert!(!plain.is_on_sale());

        let discounted = plain.with_sale_price(99.5);
        assert_eq!(discounted.effective_price(), 99.5);
        assert!(discounted.is_on_sale());
    }

    #[test]
    fn test_can_supply_respects_flag_and_quantity() {
        let milk = Product::new(ProductId(2), "Milk", 60.0, CategoryId(2)).with_stock(3);
        assert!(milk.can_supply(3));
        assert!(!milk.can_supply(4));

        let gone = milk.with_stock(0);
        assert!(!gone.in_stock);
        assert!(!gone.can_supply(1));
    }

    #[test]
    fn test_product_row_decodes_with_optional_fields_missing() {
        let row = r#"{
            "id": 10, "name": "Bananas", "price": 40.0, "category_id": 1,
            "in_stock": true, "stock_quantity": 5, "unit": "dozen",
            "created_at": "2024-03-01T08:00:00Z"
        }"#;
        let product: Product = serde_json::from_str(row).unwrap();
        assert_eq!(product.id, ProductId(10));
        assert_eq!(product.sale_price, None);
        assert_eq!(product.description, None);
        assert_eq!(product.unit, "dozen");
    }
}
