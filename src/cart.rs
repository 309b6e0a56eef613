//! The shopping cart.
//!
//! Lines keep the price and stock seen when the product was added; checkout prices the
//! order from these lines and the order store re-checks stock when it reserves.

use crate::model::{round_cents, OrderLine, Product, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Quantity must be at least 1")]
    ZeroQuantity,

    #[error("{0} is out of stock")]
    OutOfStock(ProductId),

    #[error("Only {available} of {product_id} available, requested {requested}")]
    ExceedsStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("{0} is not in the cart")]
    NotInCart(ProductId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit: String,
    pub price: f64,
    pub sale_price: Option<f64>,
    pub quantity: u32,
    /// Stock on hand when the line was last touched.
    pub available: u32,
}

impl CartLine {
    pub fn unit_price(&self) -> f64 {
        self.sale_price.unwrap_or(self.price)
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price() * f64::from(self.quantity)
    }

    /// What the sale price saves on this line.
    pub fn savings(&self) -> f64 {
        match self.sale_price {
            Some(sale) if sale < self.price => (self.price - sale) * f64::from(self.quantity),
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of `product`, merging with an existing line. Returns the
    /// line's new quantity.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<u32, CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        if !product.in_stock || product.stock_quantity == 0 {
            return Err(CartError::OutOfStock(product.id));
        }
        let current = self.line(product.id).map_or(0, |l| l.quantity);
        let requested = current.saturating_add(quantity);
        if requested > product.stock_quantity {
            return Err(CartError::ExceedsStock {
                product_id: product.id,
                requested,
                available: product.stock_quantity,
            });
        }

        let line = CartLine {
            product_id: product.id,
            name: product.name.clone(),
            unit: product.unit.clone(),
            price: product.price,
            sale_price: product.sale_price,
            quantity: requested,
            available: product.stock_quantity,
        };
        match self.lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(existing) => *existing = line,
            None => self.lines.push(line),
        }
        Ok(requested)
    }

    /// Sets a line's quantity. Zero removes the line.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove(product_id).map(|_| ()).ok_or(CartError::NotInCart(product_id));
        }
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        if quantity > line.available {
            return Err(CartError::ExceedsStock {
                product_id,
                requested: quantity,
                available: line.available,
            });
        }
        line.quantity = quantity;
        Ok(())
    }

    pub fn remove(&mut self, product_id: ProductId) -> Option<CartLine> {
        let index = self.lines.iter().position(|l| l.product_id == product_id)?;
        Some(self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Takes `ordered` out of the cart: each line loses the quantity that was ordered
    /// and is removed once nothing is left. Lines added after the order was priced stay.
    pub fn settle(&mut self, ordered: &[OrderLine]) {
        for placed in ordered {
            if let Some(line) = self
                .lines
                .iter_mut()
                .find(|l| l.product_id == placed.product_id)
            {
                line.quantity = line.quantity.saturating_sub(placed.quantity);
            }
        }
        self.lines.retain(|l| l.quantity > 0);
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn subtotal(&self) -> f64 {
        round_cents(self.lines.iter().map(CartLine::line_total).sum())
    }

    pub fn savings(&self) -> f64 {
        round_cents(self.lines.iter().map(CartLine::savings).sum())
    }

    pub fn to_order_lines(&self) -> Vec<OrderLine> {
        self.lines
            .iter()
            .map(|l| OrderLine {
                product_id: l.product_id,
                name: l.name.clone(),
                unit: l.unit.clone(),
                unit_price: l.unit_price(),
                quantity: l.quantity,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategoryId;

    fn apples() -> Product {
        Product::new(ProductId(1), "Apples", 120.0, CategoryId(1))
            .with_stock(5)
            .with_unit("kg")
    }

    fn milk() -> Product {
        Product::new(ProductId(2), "Milk", 60.0, CategoryId(2))
            .with_sale_price(50.0)
            .with_stock(10)
    }

    #[test]
    fn test_add_merges_lines_and_keeps_order() {
        let mut cart = Cart::new();
        cart.add(&apples(), 2).unwrap();
        cart.add(&milk(), 1).unwrap();
        assert_eq!(cart.add(&apples(), 1), Ok(3));

        let ids: Vec<ProductId> = cart.lines().iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![ProductId(1), ProductId(2)]);
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn test_add_checks_stock() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(&apples(), 0), Err(CartError::ZeroQuantity));
        assert_eq!(
            cart.add(&apples(), 6),
            Err(CartError::ExceedsStock {
                product_id: ProductId(1),
                requested: 6,
                available: 5
            })
        );
        assert_eq!(
            cart.add(&apples().with_stock(0), 1),
            Err(CartError::OutOfStock(ProductId(1)))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_use_sale_price() {
        let mut cart = Cart::new();
        cart.add(&apples(), 2).unwrap();
        cart.add(&milk(), 3).unwrap();
        assert_eq!(cart.subtotal(), 390.0);
        assert_eq!(cart.savings(), 30.0);

        let lines = cart.to_order_lines();
        assert_eq!(lines[1].unit_price, 50.0);
        assert_eq!(lines[0].unit, "kg");
    }

    #[test]
    fn test_settle_keeps_what_was_not_ordered() {
        let mut cart = Cart::new();
        cart.add(&apples(), 2).unwrap();
        let ordered = cart.to_order_lines();

        cart.add(&apples(), 1).unwrap();
        cart.add(&milk(), 4).unwrap();
        cart.settle(&ordered);

        assert_eq!(cart.line(ProductId(1)).map(|l| l.quantity), Some(1));
        assert_eq!(cart.line(ProductId(2)).map(|l| l.quantity), Some(4));

        let rest = cart.to_order_lines();
        cart.settle(&rest);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add(&apples(), 1).unwrap();
        cart.set_quantity(ProductId(1), 4).unwrap();
        assert_eq!(cart.item_count(), 4);
        assert!(cart.set_quantity(ProductId(1), 9).is_err());
        cart.set_quantity(ProductId(1), 0).unwrap();
        assert!(cart.is_empty());
        assert_eq!(
            cart.set_quantity(ProductId(1), 1),
            Err(CartError::NotInCart(ProductId(1)))
        );
    }
}
