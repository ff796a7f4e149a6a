//! Admin console: catalog management, order processing and the dashboard.
//!
//! Mutations go through the store clients and live in memory only. Every
//! successful operation returns the notification text the console shows.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{info, instrument};

use crate::clients::{OrderClient, ProductClient};
use crate::domain::{Order, OrderStatus, Product, ProductCreate, ProductPatch};
use crate::order_actor::OrderError;
use crate::orders::{dashboard, status_counts, Dashboard, OrderSearch};
use crate::product_actor::ProductError;

/// Products listed in the dashboard's best sellers panel.
pub const TOP_PRODUCTS: usize = 5;

/// Add/edit product form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub original_price: Option<u64>,
    pub category: String,
    /// Uploaded images; empty keeps the placeholder or the current images.
    pub images: Vec<String>,
    pub in_stock: bool,
    pub stock_count: Option<u32>,
}

impl ProductForm {
    /// Prefills the form for editing.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            original_price: product.original_price,
            category: product.category.clone(),
            images: product.images.clone(),
            in_stock: product.in_stock,
            stock_count: product.stock_count,
        }
    }

    fn into_create(self) -> ProductCreate {
        ProductCreate {
            name: self.name,
            description: self.description,
            price: self.price,
            original_price: self.original_price,
            category: self.category,
            images: self.images,
            in_stock: self.in_stock,
            stock_count: self.stock_count,
        }
    }

    fn into_patch(self) -> ProductPatch {
        ProductPatch {
            name: Some(self.name),
            description: Some(self.description),
            price: Some(self.price),
            original_price: Some(self.original_price),
            category: Some(self.category),
            images: Some(self.images),
            in_stock: Some(self.in_stock),
            stock_count: self.stock_count,
        }
    }
}

#[derive(Clone)]
pub struct ProductManager {
    products: ProductClient,
}

impl ProductManager {
    pub fn new(products: ProductClient) -> Self {
        Self { products }
    }

    pub async fn list(&self) -> Result<Vec<Product>, ProductError> {
        self.products.list_products().await
    }

    #[instrument(skip(self, form), fields(name = %form.name))]
    pub async fn add(&self, form: ProductForm) -> Result<String, ProductError> {
        let id = self.products.create_product(form.into_create()).await?;
        info!(product_id = %id, "Product added");
        Ok("Product added successfully!".to_string())
    }

    #[instrument(skip(self, form))]
    pub async fn edit(&self, id: String, form: ProductForm) -> Result<String, ProductError> {
        self.products.update_product(id, form.into_patch()).await?;
        Ok("Product updated successfully!".to_string())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: String) -> Result<String, ProductError> {
        self.products.delete_product(id).await?;
        Ok("Product deleted successfully!".to_string())
    }

    #[instrument(skip(self))]
    pub async fn update_stock(
        &self,
        id: String,
        in_stock: bool,
        stock_count: Option<u32>,
    ) -> Result<String, ProductError> {
        self.products.update_stock(id, in_stock, stock_count).await?;
        Ok("Stock updated successfully!".to_string())
    }
}

/// Everything the admin page shows on first load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminOverview {
    pub dashboard: Dashboard,
    pub products: Vec<Product>,
    pub orders: OrderConsoleView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderConsoleView {
    pub orders: Vec<Order>,
    pub status_counts: Vec<(OrderStatus, usize)>,
}

#[derive(Clone)]
pub struct OrderConsole {
    orders: OrderClient,
}

impl OrderConsole {
    pub fn new(orders: OrderClient) -> Self {
        Self { orders }
    }

    /// Orders matching `search`; counts always cover the whole store.
    pub async fn view(&self, search: &OrderSearch) -> Result<OrderConsoleView, OrderError> {
        let all = self.orders.list_orders().await?;
        Ok(OrderConsoleView {
            status_counts: status_counts(&all),
            orders: search.apply(&all),
        })
    }

    #[instrument(skip(self))]
    pub async fn change_status(
        &self,
        id: String,
        status: OrderStatus,
        at: NaiveDateTime,
    ) -> Result<String, OrderError> {
        self.orders.set_status(id.clone(), status, at).await?;
        Ok(format!("Order {id} status updated to {status}"))
    }

    #[instrument(skip(self))]
    pub async fn add_tracking(&self, id: String, number: String) -> Result<String, OrderError> {
        let number = self.orders.add_tracking(id.clone(), number).await?;
        Ok(format!("Tracking number {number} added to order {id}"))
    }

    pub async fn dashboard(&self) -> Result<Dashboard, OrderError> {
        let all = self.orders.list_orders().await?;
        Ok(dashboard(&all, TOP_PRODUCTS))
    }
}
