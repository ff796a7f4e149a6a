/// Custom actions for Product entities.
///
/// These go beyond the create/edit/delete the admin form performs.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the current stock flag and count without modifying them.
    CheckStock,
    /// Sets availability. A `None` count keeps the existing count.
    UpdateStock {
        in_stock: bool,
        stock_count: Option<u32>,
    },
}

/// Stock state of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLevel {
    pub in_stock: bool,
    pub stock_count: Option<u32>,
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductActionResult {
    CheckStock(StockLevel),
    UpdateStock(StockLevel),
}
