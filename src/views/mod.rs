//! View models for each storefront page.
//!
//! Builders here read store snapshots and the cart and own only the
//! page's transient inputs. Nothing in this module renders markup.

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod listing;
pub mod orders;
pub mod product_detail;

use serde::Serialize;

/// Shown in place of a page whose record does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFound {
    pub title: &'static str,
    pub back_link: &'static str,
    pub back_label: &'static str,
}

/// A rendered page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum View {
    Home(home::HomeView),
    Listing(listing::ListingView),
    Product(product_detail::ProductPage),
    Cart(cart::CartView),
    Checkout(cart::CartView),
    Account(orders::AccountSummary),
    Orders(Vec<orders::OrderCard>),
    Order(orders::OrderPage),
    Admin(Box<admin::AdminOverview>),
}
