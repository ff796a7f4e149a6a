use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Merchandising badge shown on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Badge {
    Sale,
    New,
    #[serde(rename = "Low Stock")]
    LowStock,
    Bestseller,
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Badge::Sale => "Sale",
            Badge::New => "New",
            Badge::LowStock => "Low Stock",
            Badge::Bestseller => "Bestseller",
        };
        f.write_str(label)
    }
}

/// A selectable colour variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOption {
    pub name: String,
    pub hex: String,
}

impl ColorOption {
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }
}

/// Represents a product in the catalog.
///
/// Prices are whole rupees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u8>,
    pub rating: f32,
    pub reviews: u32,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    pub in_stock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<ColorOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub specifications: HashMap<String, String>,
}

/// Payload for creating a new product from the admin form.
#[derive(Debug, Clone, Default)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub original_price: Option<u64>,
    pub category: String,
    pub images: Vec<String>,
    pub in_stock: bool,
    pub stock_count: Option<u32>,
}

/// Payload for editing an existing product. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub original_price: Option<Option<u64>>,
    pub category: Option<String>,
    pub images: Option<Vec<String>>,
    pub in_stock: Option<bool>,
    pub stock_count: Option<u32>,
}

/// Image used when a product is created without any uploads.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400";

impl Product {
    /// Creates a bare product; optional merchandising fields start empty.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: u64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            original_price: None,
            discount: None,
            rating: 0.0,
            reviews: 0,
            category: category.into(),
            subcategory: None,
            images: vec![PLACEHOLDER_IMAGE.to_string()],
            badge: None,
            in_stock: true,
            stock_count: None,
            sizes: Vec::new(),
            colors: Vec::new(),
            highlights: Vec::new(),
            specifications: HashMap::new(),
        }
    }

    pub fn with_rating(mut self, rating: f32, reviews: u32) -> Self {
        self.rating = rating;
        self.reviews = reviews;
        self
    }

    pub fn with_stock(mut self, in_stock: bool, stock_count: Option<u32>) -> Self {
        self.in_stock = in_stock;
        self.stock_count = stock_count;
        self
    }

    /// Sets the list price and recomputes the discount percentage.
    pub fn with_original_price(mut self, original_price: u64) -> Self {
        self.original_price = Some(original_price);
        self.discount = discount_percent(self.price, Some(original_price));
        self
    }

    /// First image, used for cart lines and order previews.
    pub fn primary_image(&self) -> &str {
        self.images
            .first()
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Numeric form of the id; the seed catalog assigns sequential numbers.
    pub fn numeric_id(&self) -> Option<u64> {
        self.id.parse().ok()
    }
}

/// `round((original - price) / original * 100)`, only when the product is
/// actually marked down.
pub fn discount_percent(price: u64, original_price: Option<u64>) -> Option<u8> {
    let original = original_price.filter(|&o| o > price)?;
    let pct = ((original - price) as f64 / original as f64 * 100.0).round();
    Some(pct.clamp(0.0, 100.0) as u8)
}

/// A browsable product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub image: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: image.into(),
        }
    }

    /// Whether `product` belongs here. Products carry a category name whose
    /// lowercase form is the category id.
    pub fn contains(&self, product: &Product) -> bool {
        product.category.eq_ignore_ascii_case(&self.id)
            || product.category.eq_ignore_ascii_case(&self.name)
    }
}
