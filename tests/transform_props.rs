//! Property tests for the derived product views.

use proptest::prelude::*;

use grocer::model::{CategoryId, Product, ProductId};
use grocer::view::{filter_by_category, select_most_stocked, select_on_sale, TOP_N};

// =============================================================================
// Strategies
// =============================================================================

/// A product list with unique ids (the index), a handful of categories, and sale prices
/// on roughly half the products.
fn arb_products() -> impl Strategy<Value = Vec<Product>> {
    prop::collection::vec(
        (
            1u32..=4,                               // category
            0u32..=30,                              // stock
            prop::option::of(0u32..=50_000),        // sale price, in cents
        ),
        0..24,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (category, stock, sale))| {
                let id = ProductId(i as u32);
                let product = Product::new(id, format!("p{i}"), 500.0, CategoryId(category))
                    .with_stock(stock);
                match sale {
                    Some(cents) => product.with_sale_price(f64::from(cents) / 100.0),
                    None => product,
                }
            })
            .collect()
    })
}

fn ids(products: &[Product]) -> Vec<ProductId> {
    products.iter().map(|p| p.id).collect()
}

/// Whether `sub` appears in `source` in the same relative order.
fn is_subsequence(sub: &[ProductId], source: &[ProductId]) -> bool {
    let mut rest = source.iter();
    sub.iter().all(|id| rest.any(|s| s == id))
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn on_sale_is_a_short_discounted_subsequence(products in arb_products()) {
        let source = products.clone();
        let selected = select_on_sale(&products);

        prop_assert!(selected.len() <= TOP_N);
        prop_assert!(selected.iter().all(|p| p.sale_price.is_some()));
        prop_assert!(is_subsequence(&ids(&selected), &ids(&products)));

        let discounted = products.iter().filter(|p| p.sale_price.is_some()).count();
        prop_assert_eq!(selected.len(), discounted.min(TOP_N));
        prop_assert_eq!(products, source);
    }

    #[test]
    fn most_stocked_is_sorted_and_drawn_from_source(products in arb_products()) {
        let selected = select_most_stocked(&products);

        prop_assert_eq!(selected.len(), products.len().min(TOP_N));
        prop_assert!(selected.windows(2).all(|w| w[0].stock_quantity >= w[1].stock_quantity));

        let mut picked = ids(&selected);
        picked.sort();
        picked.dedup();
        prop_assert_eq!(picked.len(), selected.len());
        prop_assert!(selected.iter().all(|p| products.contains(p)));

        // Nothing left out has more stock than the last one kept.
        if let Some(last) = selected.last() {
            let left_out = products.iter().filter(|p| !selected.contains(p));
            for p in left_out {
                prop_assert!(p.stock_quantity <= last.stock_quantity);
            }
        }
    }

    #[test]
    fn most_stocked_ties_keep_source_order(products in arb_products()) {
        let selected = select_most_stocked(&products);
        for w in selected.windows(2) {
            if w[0].stock_quantity == w[1].stock_quantity {
                prop_assert!(w[0].id < w[1].id);
            }
        }
    }

    #[test]
    fn filter_by_category_is_exact(products in arb_products(), category in 1u32..=5) {
        let category = CategoryId(category);
        let filtered = filter_by_category(&products, category);
        let expected: Vec<Product> = products
            .iter()
            .filter(|p| p.category_id == category)
            .cloned()
            .collect();
        prop_assert_eq!(filtered, expected);
    }

    #[test]
    fn transforms_are_idempotent(products in arb_products()) {
        prop_assert_eq!(select_on_sale(&products), select_on_sale(&products));
        prop_assert_eq!(select_most_stocked(&products), select_most_stocked(&products));

        let once = select_most_stocked(&products);
        prop_assert_eq!(select_most_stocked(&once), once.clone());
        let on_sale = select_on_sale(&products);
        prop_assert_eq!(select_on_sale(&on_sale), on_sale.clone());
        let fruit = filter_by_category(&products, CategoryId(1));
        prop_assert_eq!(filter_by_category(&fruit, CategoryId(1)), fruit.clone());
    }
}
