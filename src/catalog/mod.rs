//! Product catalog: seed data, the listing query pipeline, and aggregates
//! derived from the live product list.

pub mod query;
pub mod seed;

pub use query::*;

use serde::Serialize;

use crate::domain::{Category, Product};

/// A category together with how many catalog products it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub product_count: usize,
}

/// Counts are computed from `products`, never stored.
pub fn category_counts(categories: &[Category], products: &[Product]) -> Vec<CategoryCount> {
    categories
        .iter()
        .map(|category| CategoryCount {
            category: category.clone(),
            product_count: products.iter().filter(|p| category.contains(p)).count(),
        })
        .collect()
}

/// Up to `limit` other products from the same category, in catalog order.
pub fn related_products(product: &Product, products: &[Product], limit: usize) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.category == product.category && p.id != product.id)
        .take(limit)
        .cloned()
        .collect()
}

/// Next id for an admin-created product: one past the highest numeric id.
pub fn next_product_id(products: &[Product]) -> u64 {
    products
        .iter()
        .filter_map(Product::numeric_id)
        .max()
        .map_or(1, |max| max + 1)
}
