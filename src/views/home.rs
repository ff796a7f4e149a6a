use serde::Serialize;

use crate::catalog::{category_counts, CategoryCount};
use crate::domain::{Category, Product};

/// Products shown in the home page's featured strip.
pub const FEATURED_COUNT: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeView {
    pub featured: Vec<Product>,
    pub categories: Vec<CategoryCount>,
}

pub fn home_view(products: &[Product], categories: &[Category]) -> HomeView {
    HomeView {
        featured: products.iter().take(FEATURED_COUNT).cloned().collect(),
        categories: category_counts(categories, products),
    }
}
