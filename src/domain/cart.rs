use serde::{Deserialize, Serialize};

use super::product::Product;

/// One line of the shopping cart.
///
/// The line id is the composite key of product, size and colour, so the same
/// product in two variants occupies two lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    #[serde(default)]
    pub product_id: String,
    pub name: String,
    pub image: String,
    pub price: u64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub in_stock: bool,
}

/// `"{product}-{size}-{color}"`, missing parts left empty.
pub fn line_key(product_id: &str, size: Option<&str>, color: Option<&str>) -> String {
    format!(
        "{}-{}-{}",
        product_id,
        size.unwrap_or_default(),
        color.unwrap_or_default()
    )
}

impl CartItem {
    /// Snapshots the product's name, image, price and stock flag.
    pub fn from_product(
        product: &Product,
        quantity: u32,
        size: Option<String>,
        color: Option<String>,
    ) -> Self {
        Self {
            id: line_key(&product.id, size.as_deref(), color.as_deref()),
            product_id: product.id.clone(),
            name: product.name.clone(),
            image: product.primary_image().to_string(),
            price: product.price,
            quantity,
            size,
            color,
            in_stock: product.in_stock,
        }
    }

    pub fn line_total(&self) -> u64 {
        self.price * u64::from(self.quantity)
    }

    /// Slots written before `productId` was stored only carry the composite
    /// key; recover the product id from its first segment.
    pub(crate) fn backfill_product_id(&mut self) {
        if self.product_id.is_empty() {
            if let Some((product_id, _)) = self.id.split_once('-') {
                self.product_id = product_id.to_string();
            }
        }
    }
}
