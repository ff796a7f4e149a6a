use std::collections::HashMap;

use super::actions::{ProductAction, ProductActionResult, StockLevel};
use super::error::ProductError;
use crate::actor_framework::Entity;
use crate::domain::{discount_percent, Product, ProductCreate, ProductPatch, PLACEHOLDER_IMAGE};

fn validate(name: &str, price: u64) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::ValidationError("Product name is required".into()));
    }
    if price == 0 {
        return Err(ProductError::ValidationError("Price must be greater than zero".into()));
    }
    Ok(())
}

impl Entity for Product {
    type Id = String;
    type CreatePayload = ProductCreate;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Error = ProductError;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a product from the admin form.
    ///
    /// New products start unrated, and fall back to a placeholder image when
    /// none were uploaded. The discount is derived from the list price.
    fn from_create(id: String, params: ProductCreate) -> Result<Self, ProductError> {
        validate(&params.name, params.price)?;
        let images = if params.images.is_empty() {
            vec![PLACEHOLDER_IMAGE.to_string()]
        } else {
            params.images
        };
        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            price: params.price,
            original_price: params.original_price,
            discount: discount_percent(params.price, params.original_price),
            rating: 0.0,
            reviews: 0,
            category: params.category,
            subcategory: None,
            images,
            badge: None,
            in_stock: params.in_stock,
            stock_count: params.stock_count,
            sizes: Vec::new(),
            colors: Vec::new(),
            highlights: Vec::new(),
            specifications: HashMap::new(),
        })
    }

    /// Applies an admin edit and re-derives the discount.
    ///
    /// An empty image list keeps the current images.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), ProductError> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(original_price) = patch.original_price {
            self.original_price = original_price;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(images) = patch.images.filter(|images| !images.is_empty()) {
            self.images = images;
        }
        if let Some(in_stock) = patch.in_stock {
            self.in_stock = in_stock;
        }
        if let Some(stock_count) = patch.stock_count {
            self.stock_count = Some(stock_count);
        }
        validate(&self.name, self.price)?;
        self.discount = discount_percent(self.price, self.original_price);
        Ok(())
    }

    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.stock_level())),
            ProductAction::UpdateStock { in_stock, stock_count } => {
                self.in_stock = in_stock;
                if stock_count.is_some() {
                    self.stock_count = stock_count;
                }
                Ok(ProductActionResult::UpdateStock(self.stock_level()))
            }
        }
    }
}

impl Product {
    pub fn stock_level(&self) -> StockLevel {
        StockLevel {
            in_stock: self.in_stock,
            stock_count: self.stock_count,
        }
    }
}
