use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::cart::{CartError, CartSnapshot, Coupon, PricingSummary};
use crate::clients::{CartClient, OrderClient};
use crate::config::PricingConfig;
use crate::domain::{CartItem, Order, OrderAmounts, OrderCreate, OrderItem, ShippingAddress};
use crate::order_actor::OrderError;

/// Reasons the checkout cannot advance. `Display` is the text shown to the
/// shopper.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,
    #[error("Please enter {0}")]
    MissingField(&'static str),
    #[error("Complete the {0} step first")]
    StepOutOfOrder(CheckoutStep),
    #[error("Please accept the Terms and Conditions")]
    TermsNotAccepted,
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Order(#[from] OrderError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum CheckoutStep {
    Shipping = 1,
    Payment = 2,
    Review = 3,
}

impl CheckoutStep {
    pub const ALL: [CheckoutStep; 3] = [CheckoutStep::Shipping, CheckoutStep::Payment, CheckoutStep::Review];

    pub fn label(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "Shipping",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Review => "Review",
        }
    }
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum PaymentMethod {
    #[default]
    Upi,
    Card,
    CashOnDelivery,
}

impl PaymentMethod {
    /// Stored on the order.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Card => "Card",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }

    /// Shown on the review step.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Upi => "UPI Payment",
            PaymentMethod::Card => "Credit / Debit Card",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }
}

/// New-address form. Landmark and state are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingForm {
    pub full_name: String,
    pub phone: String,
    pub pincode: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub landmark: String,
}

impl ShippingForm {
    /// Checks required fields in form order and builds the address.
    pub fn validate(&self) -> Result<ShippingAddress, CheckoutError> {
        let required = [
            (&self.full_name, "full name"),
            (&self.phone, "phone number"),
            (&self.pincode, "pincode"),
            (&self.city, "city"),
            (&self.address, "address"),
        ];
        if let Some((_, field)) = required.iter().find(|(value, _)| value.trim().is_empty()) {
            return Err(CheckoutError::MissingField(*field));
        }
        let landmark = self.landmark.trim();
        let address = if landmark.is_empty() {
            self.address.trim().to_string()
        } else {
            format!("{}, Near {}", self.address.trim(), landmark)
        };
        Ok(ShippingAddress {
            name: self.full_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address,
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            pincode: self.pincode.trim().to_string(),
        })
    }
}

/// The account's default address.
pub fn saved_address() -> ShippingAddress {
    ShippingAddress {
        name: "John Doe".into(),
        phone: "+91 98765 43210".into(),
        address: "123 Main Street, Apartment 4B".into(),
        city: "Mumbai".into(),
        state: "Maharashtra".into(),
        pincode: "400001".into(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressChoice {
    Saved,
    New(ShippingForm),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutReview {
    pub items: Vec<CartItem>,
    pub summary: PricingSummary,
    pub shipping_address: ShippingAddress,
    pub payment_label: &'static str,
    /// e.g. "Place Order - ₹12,488".
    pub place_order_label: String,
}

/// Three-step checkout: Shipping, Payment, Review.
///
/// Steps only advance once the current one is valid. Going back keeps what
/// was entered.
#[derive(Debug, Clone)]
pub struct CheckoutWizard {
    step: CheckoutStep,
    address: AddressChoice,
    shipping_address: Option<ShippingAddress>,
    payment: PaymentMethod,
    terms_accepted: bool,
    coupon: Option<Coupon>,
}

impl CheckoutWizard {
    /// Opens checkout for the current cart, carrying over an applied coupon.
    pub fn start(cart: &CartSnapshot, coupon: Option<Coupon>) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(Self {
            step: CheckoutStep::Shipping,
            address: AddressChoice::Saved,
            shipping_address: None,
            payment: PaymentMethod::default(),
            terms_accepted: false,
            coupon,
        })
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn payment(&self) -> PaymentMethod {
        self.payment
    }

    pub fn choose_address(&mut self, choice: AddressChoice) {
        self.address = choice;
    }

    pub fn continue_to_payment(&mut self) -> Result<(), CheckoutError> {
        let address = match &self.address {
            AddressChoice::Saved => saved_address(),
            AddressChoice::New(form) => form.validate()?,
        };
        self.shipping_address = Some(address);
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    pub fn choose_payment(&mut self, method: PaymentMethod) {
        self.payment = method;
    }

    pub fn continue_to_review(&mut self) -> Result<(), CheckoutError> {
        if self.step < CheckoutStep::Payment {
            return Err(CheckoutError::StepOutOfOrder(CheckoutStep::Shipping));
        }
        self.step = CheckoutStep::Review;
        Ok(())
    }

    /// Returns to an earlier step, e.g. from the review's "Edit" links.
    pub fn go_back_to(&mut self, step: CheckoutStep) {
        if step < self.step {
            self.step = step;
        }
    }

    pub fn accept_terms(&mut self, accepted: bool) {
        self.terms_accepted = accepted;
    }

    fn address(&self) -> Result<&ShippingAddress, CheckoutError> {
        self.shipping_address
            .as_ref()
            .ok_or(CheckoutError::StepOutOfOrder(CheckoutStep::Shipping))
    }

    pub fn review(&self, cart: &CartSnapshot, pricing: &PricingConfig) -> Result<CheckoutReview, CheckoutError> {
        if self.step != CheckoutStep::Review {
            return Err(CheckoutError::StepOutOfOrder(CheckoutStep::Payment));
        }
        let summary = PricingSummary::compute(cart.total, self.coupon.as_ref(), pricing);
        Ok(CheckoutReview {
            items: cart.items.clone(),
            summary,
            shipping_address: self.address()?.clone(),
            payment_label: self.payment.label(),
            place_order_label: format!("Place Order - ₹{}", group_thousands(summary.total)),
        })
    }

    /// Places the order for the cart's current contents and empties the cart.
    ///
    /// The cart is re-read here so the order matches what the shopper sees
    /// at the moment of placing it.
    #[instrument(skip_all, fields(payment = self.payment.as_str()))]
    pub async fn submit_order(
        &self,
        cart: &CartClient,
        orders: &OrderClient,
        pricing: &PricingConfig,
        placed_at: NaiveDateTime,
    ) -> Result<Order, CheckoutError> {
        if self.step != CheckoutStep::Review {
            return Err(CheckoutError::StepOutOfOrder(CheckoutStep::Payment));
        }
        if !self.terms_accepted {
            return Err(CheckoutError::TermsNotAccepted);
        }
        let snapshot = cart.snapshot().await?;
        if snapshot.is_empty() {
            warn!("Cart emptied before the order was placed");
            return Err(CheckoutError::EmptyCart);
        }

        let summary = PricingSummary::compute(snapshot.total, self.coupon.as_ref(), pricing);
        let payload = OrderCreate {
            items: snapshot.items.iter().map(order_item).collect(),
            amounts: OrderAmounts {
                subtotal: summary.subtotal,
                shipping: summary.shipping,
                tax: summary.tax,
                discount: summary.discount,
                total: summary.total,
            },
            shipping_address: self.address()?.clone(),
            payment_method: self.payment.as_str().to_string(),
            placed_at,
        };

        let id = orders.place_order(payload).await?;
        let order = orders
            .get_order(id.clone())
            .await?
            .ok_or(OrderError::NotFound(id))?;
        cart.clear_cart().await?;
        info!(order_number = %order.order_number, total = order.amounts.total, "Order placed");
        Ok(order)
    }
}

fn order_item(line: &CartItem) -> OrderItem {
    OrderItem {
        product_id: line.product_id.clone(),
        name: line.name.clone(),
        image: line.image.clone(),
        quantity: line.quantity,
        price: line.price,
        size: line.size.clone(),
        color: line.color.clone(),
    }
}

/// `12488` -> `12,488`.
pub fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;

    fn cart_with(price: u64, quantity: u32) -> CartSnapshot {
        let product = Product::new("3", "Designer Backpack", price, "Fashion");
        let item = CartItem::from_product(&product, quantity, None, Some("Navy".into()));
        CartSnapshot { count: u64::from(quantity), total: item.line_total(), items: vec![item] }
    }

    #[test]
    fn empty_cart_cannot_check_out() {
        let err = CheckoutWizard::start(&CartSnapshot::default(), None).unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Your cart is empty");
    }

    #[test]
    fn new_address_requires_fields_in_order() {
        let mut form = ShippingForm {
            full_name: "Asha Rao".into(),
            ..Default::default()
        };
        assert_eq!(form.validate().unwrap_err().to_string(), "Please enter phone number");
        form.phone = "+91 90000 00000".into();
        form.pincode = "411001".into();
        form.city = "Pune".into();
        form.address = "12 Lake Road".into();
        form.landmark = "City Park".into();
        let address = form.validate().unwrap();
        assert_eq!(address.address, "12 Lake Road, Near City Park");
    }

    #[test]
    fn invalid_address_keeps_shipping_step() {
        let mut wizard = CheckoutWizard::start(&cart_with(3499, 1), None).unwrap();
        wizard.choose_address(AddressChoice::New(ShippingForm::default()));
        assert!(wizard.continue_to_payment().is_err());
        assert_eq!(wizard.step(), CheckoutStep::Shipping);
        assert!(wizard.continue_to_review().is_err());
    }

    #[test]
    fn review_shows_totals_and_payment() {
        let cart = cart_with(3499, 1);
        let mut wizard = CheckoutWizard::start(&cart, None).unwrap();
        wizard.continue_to_payment().unwrap();
        wizard.choose_payment(PaymentMethod::CashOnDelivery);
        wizard.continue_to_review().unwrap();

        let review = wizard.review(&cart, &PricingConfig::default()).unwrap();
        assert_eq!(review.summary.total, 3499 + 420);
        assert_eq!(review.payment_label, "Cash on Delivery");
        assert_eq!(review.place_order_label, "Place Order - ₹3,919");
        assert_eq!(review.shipping_address.city, "Mumbai");

        wizard.go_back_to(CheckoutStep::Payment);
        assert_eq!(wizard.step(), CheckoutStep::Payment);
        assert_eq!(wizard.payment(), PaymentMethod::CashOnDelivery);
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(12488), "12,488");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
