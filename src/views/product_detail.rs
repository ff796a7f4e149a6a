use serde::Serialize;
use tracing::info;

use super::NotFound;
use crate::cart::CartError;
use crate::catalog::related_products;
use crate::clients::CartClient;
use crate::domain::Product;

/// Related products shown under the detail page.
pub const RELATED_LIMIT: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetailView {
    pub product: Product,
    pub related: Vec<Product>,
    /// "Only N left in stock!" when a positive stock count is known.
    pub low_stock: Option<String>,
    pub category_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ProductPage {
    Found(Box<ProductDetailView>),
    NotFound(NotFound),
}

pub const PRODUCT_NOT_FOUND: NotFound = NotFound {
    title: "Product not found",
    back_link: "/products",
    back_label: "Back to Products",
};

pub fn product_page(id: &str, products: &[Product]) -> ProductPage {
    let Some(product) = products.iter().find(|p| p.id == id) else {
        return ProductPage::NotFound(PRODUCT_NOT_FOUND);
    };
    let low_stock = product
        .stock_count
        .filter(|&count| count > 0)
        .map(|count| format!("Only {count} left in stock!"));
    ProductPage::Found(Box::new(ProductDetailView {
        related: related_products(product, products, RELATED_LIMIT),
        low_stock,
        category_link: format!("/category/{}", product.category.to_lowercase()),
        product: product.clone(),
    }))
}

/// Variant and quantity picked on the detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseSelection {
    quantity: u32,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl Default for PurchaseSelection {
    fn default() -> Self {
        Self { quantity: 1, size: None, color: None }
    }
}

impl PurchaseSelection {
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Never drops below one.
    pub fn decrement(&mut self) {
        self.quantity = self.quantity.saturating_sub(1).max(1);
    }

    /// Adds the selection to the cart and returns the confirmation text.
    pub async fn add_to_cart(&self, product: &Product, cart: &CartClient) -> Result<String, CartError> {
        cart.add_to_cart(product.clone(), self.quantity, self.size.clone(), self.color.clone())
            .await?;
        info!(product_id = %product.id, quantity = self.quantity, "Added from detail page");
        Ok(format!("{} added to cart!", product.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed;

    #[test]
    fn found_page_has_related_and_hint() {
        let ProductPage::Found(view) = product_page("1", &seed::products()) else {
            panic!("expected product 1");
        };
        assert_eq!(view.related.len(), 3);
        assert_eq!(view.low_stock.as_deref(), Some("Only 15 left in stock!"));
        assert_eq!(view.category_link, "/category/electronics");
    }

    #[test]
    fn zero_stock_has_no_hint() {
        let ProductPage::Found(view) = product_page("9", &seed::products()) else {
            panic!("expected product 9");
        };
        assert_eq!(view.low_stock, None);
    }

    #[test]
    fn unknown_id_links_back_to_listing() {
        assert_eq!(product_page("404", &seed::products()), ProductPage::NotFound(PRODUCT_NOT_FOUND));
    }

    #[test]
    fn quantity_stays_positive() {
        let mut selection = PurchaseSelection::default();
        selection.decrement();
        assert_eq!(selection.quantity(), 1);
        selection.increment();
        selection.increment();
        assert_eq!(selection.quantity(), 3);
    }
}
