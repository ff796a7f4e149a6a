use tracing::{debug, info, warn};

use super::storage::CartStorage;
use super::CartError;
use crate::domain::{CartItem, Product};

/// How the cart came back at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartLoadOutcome {
    /// Slot absent; started empty.
    Empty,
    /// Slot restored with this many lines.
    Restored(usize),
    /// Slot unreadable or corrupt; started empty.
    Recovered(String),
}

/// Read-only view of the cart handed to views.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,
    pub count: u64,
    pub total: u64,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The cart state container.
///
/// Owns the line items and mirrors them into a storage slot after every
/// mutation. The in-memory list is authoritative: a failed write is logged
/// and the mutation stands.
pub struct Cart {
    items: Vec<CartItem>,
    storage: Box<dyn CartStorage>,
    slot: String,
}

impl Cart {
    /// Restores the cart from `slot`, falling back to empty on absence or
    /// corruption.
    pub fn load(storage: Box<dyn CartStorage>, slot: impl Into<String>) -> (Self, CartLoadOutcome) {
        let slot = slot.into();
        let (items, outcome) = match storage.read(&slot) {
            Ok(None) => (Vec::new(), CartLoadOutcome::Empty),
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartItem>>(&raw) {
                Ok(mut items) => {
                    items.iter_mut().for_each(CartItem::backfill_product_id);
                    let stored = items.len();
                    items.retain(|item| item.quantity >= 1);
                    if items.len() != stored {
                        warn!(slot = %slot, dropped = stored - items.len(), "Dropped stored lines with zero quantity");
                    }
                    let restored = items.len();
                    (items, CartLoadOutcome::Restored(restored))
                }
                Err(e) => {
                    warn!(slot = %slot, error = %e, "Stored cart is corrupt, starting empty");
                    (Vec::new(), CartLoadOutcome::Recovered(e.to_string()))
                }
            },
            Err(e) => {
                warn!(slot = %slot, error = %e, "Stored cart unreadable, starting empty");
                (Vec::new(), CartLoadOutcome::Recovered(e.to_string()))
            }
        };
        info!(slot = %slot, lines = items.len(), "Cart loaded");
        (Self { items, storage, slot }, outcome)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Adds `quantity` of a product variant, merging into an existing line
    /// with the same product, size and colour.
    pub fn add_to_cart(
        &mut self,
        product: &Product,
        quantity: u32,
        size: Option<String>,
        color: Option<String>,
    ) -> Result<CartItem, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        let existing = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product.id && item.size == size && item.color == color);
        let line = match existing {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(quantity);
                debug!(line_id = %existing.id, quantity = existing.quantity, "Merged into existing line");
                existing.clone()
            }
            None => {
                let mut item = CartItem::from_product(product, quantity, size, color);
                item.id = self.unused_line_id(&item.id);
                debug!(line_id = %item.id, "Appended new line");
                self.items.push(item.clone());
                item
            }
        };
        self.persist();
        Ok(line)
    }

    /// Returns whether a line was removed.
    pub fn remove_from_cart(&mut self, line_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != line_id);
        let removed = self.items.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Quantities below 1 are ignored; removal is explicit.
    pub fn update_quantity(&mut self, line_id: &str, quantity: u32) -> bool {
        if quantity < 1 {
            return false;
        }
        let Some(item) = self.items.iter_mut().find(|item| item.id == line_id) else {
            return false;
        };
        item.quantity = quantity;
        self.persist();
        true
    }

    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.persist();
    }

    pub fn cart_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn cart_total(&self) -> u64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            count: self.cart_count(),
            total: self.cart_total(),
        }
    }

    /// A size or colour containing `-` can spell another variant's key;
    /// such a line gets a `~n` suffix.
    fn unused_line_id(&self, key: &str) -> String {
        let taken = |id: &str| self.items.iter().any(|item| item.id == id);
        if !taken(key) {
            return key.to_string();
        }
        (2u32..)
            .map(|n| format!("{key}~{n}"))
            .find(|candidate| !taken(candidate))
            .unwrap_or_else(|| key.to_string())
    }

    fn persist(&mut self) {
        let encoded = match serde_json::to_string(&self.items) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(error = %e, "Failed to encode cart");
                return;
            }
        };
        if let Err(e) = self.storage.write(&self.slot, &encoded) {
            warn!(slot = %self.slot, error = %e, "Failed to persist cart");
        }
    }
}
