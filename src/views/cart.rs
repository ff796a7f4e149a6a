use serde::Serialize;
use tracing::{info, instrument};

use crate::cart::{apply_coupon, CartError, CartSnapshot, Coupon, PricingSummary};
use crate::clients::CartClient;
use crate::config::PricingConfig;
use crate::domain::CartItem;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub count: u64,
    pub summary: PricingSummary,
    pub coupon: Option<Coupon>,
    /// "You saved ₹500!" once a coupon applies.
    pub savings_note: Option<String>,
}

impl CartView {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub fn cart_view(snapshot: &CartSnapshot, coupon: Option<&Coupon>, pricing: &PricingConfig) -> CartView {
    let summary = PricingSummary::compute(snapshot.total, coupon, pricing);
    CartView {
        items: snapshot.items.clone(),
        count: snapshot.count,
        savings_note: (summary.discount > 0).then(|| format!("You saved ₹{}!", summary.discount)),
        summary,
        coupon: coupon.cloned(),
    }
}

/// Page-local state of the cart page: the coupon the shopper applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartPage {
    coupon: Option<Coupon>,
}

impl CartPage {
    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    /// A rejected code leaves any earlier coupon in place.
    pub fn apply_coupon(&mut self, code: &str, pricing: &PricingConfig) -> Result<&'static str, CartError> {
        self.coupon = Some(apply_coupon(code.trim(), pricing)?);
        Ok("Coupon applied successfully!")
    }

    pub async fn render(&self, cart: &CartClient, pricing: &PricingConfig) -> Result<CartView, CartError> {
        let snapshot = cart.snapshot().await?;
        Ok(cart_view(&snapshot, self.coupon.as_ref(), pricing))
    }

    /// Removes a line and returns the confirmation text.
    #[instrument(skip(self, cart, line), fields(line_id = %line.id))]
    pub async fn remove(&self, cart: &CartClient, line: &CartItem) -> Result<String, CartError> {
        cart.remove_from_cart(line.id.clone()).await?;
        info!("Removed from cart page");
        Ok(format!("{} removed from cart", line.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;

    fn snapshot(price: u64, quantity: u32) -> CartSnapshot {
        let product = Product::new("1", "Premium Wireless Headphones", price, "Electronics");
        let item = CartItem::from_product(&product, quantity, None, None);
        CartSnapshot {
            count: u64::from(quantity),
            total: item.line_total(),
            items: vec![item],
        }
    }

    #[test]
    fn summary_with_coupon() {
        let pricing = PricingConfig::default();
        let mut page = CartPage::default();
        assert_eq!(page.apply_coupon("SAVE10", &pricing), Ok("Coupon applied successfully!"));

        let view = cart_view(&snapshot(8999, 3), page.coupon(), &pricing);
        assert_eq!(view.summary.subtotal, 26997);
        assert_eq!(view.summary.discount, 500);
        assert_eq!(view.summary.shipping, 0);
        assert_eq!(view.summary.tax, 3180);
        assert_eq!(view.summary.total, 26997 - 500 + 3180);
        assert_eq!(view.savings_note.as_deref(), Some("You saved ₹500!"));
    }

    #[test]
    fn bad_code_keeps_previous_coupon() {
        let pricing = PricingConfig::default();
        let mut page = CartPage::default();
        page.apply_coupon("SAVE10", &pricing).unwrap();
        let err = page.apply_coupon("save10", &pricing).unwrap_err();
        assert_eq!(err.to_string(), "Invalid coupon code");
        assert_eq!(page.coupon().map(|c| c.code.as_str()), Some("SAVE10"));
    }

    #[tokio::test]
    async fn remove_line_through_the_service() {
        use crate::actors::CartService;
        use crate::cart::{Cart, MemoryStorage};

        let (cart, _) = Cart::load(Box::new(MemoryStorage::new()), "cart");
        let (service, client) = CartService::new(4, cart);
        tokio::spawn(service.run());
        let product = Product::new("7", "Stainless Steel Water Bottle", 1299, "Sports");
        let line = client.add_to_cart(product, 1, None, Some("Silver".into())).await.unwrap();

        let page = CartPage::default();
        let notice = page.remove(&client, &line).await.unwrap();
        assert_eq!(notice, "Stainless Steel Water Bottle removed from cart");
        assert!(page.render(&client, &PricingConfig::default()).await.unwrap().is_empty());
    }

    #[test]
    fn small_cart_pays_shipping() {
        let view = cart_view(&snapshot(799, 1), None, &PricingConfig::default());
        assert_eq!(view.summary.shipping, 50);
        assert_eq!(view.summary.tax, 96);
        assert_eq!(view.summary.total, 799 + 50 + 96);
        assert_eq!(view.savings_note, None);
    }
}
