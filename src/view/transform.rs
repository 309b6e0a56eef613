//! Derived views over a fetched product list.
//!
//! Every function here only filters, stably reorders and truncates a borrowed slice: the
//! result never holds a product the input did not, and the input is left untouched.

use crate::model::{CategoryId, Product};

/// How many products the home page shows per highlight row.
pub const TOP_N: usize = 4;

/// Products with a sale price, in source order, at most [`TOP_N`].
pub fn select_on_sale(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.sale_price.is_some())
        .take(TOP_N)
        .cloned()
        .collect()
}

/// The [`TOP_N`] products with the most units on hand. Ties keep source order.
pub fn select_most_stocked(products: &[Product]) -> Vec<Product> {
    let mut ranked: Vec<&Product> = products.iter().collect();
    // sort_by_key is stable
    ranked.sort_by_key(|p| std::cmp::Reverse(p.stock_quantity));
    ranked.into_iter().take(TOP_N).cloned().collect()
}

/// Products in `category_id`, in source order.
pub fn filter_by_category(products: &[Product], category_id: CategoryId) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.category_id == category_id)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductId;

    fn product(id: u32, category: u32, stock: u32) -> Product {
        Product::new(ProductId(id), format!("p{id}"), 50.0, CategoryId(category)).with_stock(stock)
    }

    fn ids(products: &[Product]) -> Vec<u32> {
        products.iter().map(|p| p.id.0).collect()
    }

    #[test]
    fn test_on_sale_keeps_only_discounted() {
        let products = vec![product(1, 1, 5), product(2, 1, 5).with_sale_price(80.0)];
        assert_eq!(ids(&select_on_sale(&products)), vec![2]);
    }

    #[test]
    fn test_on_sale_truncates_in_source_order() {
        let products: Vec<Product> = (1..=6)
            .map(|i| product(i, 1, 1).with_sale_price(1.0))
            .collect();
        assert_eq!(ids(&select_on_sale(&products)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_most_stocked_orders_descending() {
        let products = vec![product(10, 1, 5), product(11, 1, 20)];
        assert_eq!(ids(&select_most_stocked(&products)), vec![11, 10]);
    }

    #[test]
    fn test_most_stocked_ties_keep_source_order() {
        let products = vec![
            product(1, 1, 3),
            product(2, 1, 9),
            product(3, 1, 3),
            product(4, 1, 9),
            product(5, 1, 3),
        ];
        assert_eq!(ids(&select_most_stocked(&products)), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_filter_by_category() {
        let products = vec![product(1, 1, 1), product(2, 2, 1), product(3, 1, 1)];
        assert_eq!(ids(&filter_by_category(&products, CategoryId(1))), vec![1, 3]);
        assert!(filter_by_category(&products, CategoryId(9)).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(select_on_sale(&[]).is_empty());
        assert!(select_most_stocked(&[]).is_empty());
        assert!(filter_by_category(&[], CategoryId(1)).is_empty());
    }
}
