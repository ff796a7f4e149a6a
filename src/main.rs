use anyhow::{bail, Context};
use chrono::Local;
use tracing::{info, warn, Instrument};

use storefront::app_system::{setup_tracing, StorefrontSystem};
use storefront::config::StorefrontConfig;
use storefront::domain::OrderStatus;
use storefront::routes::Route;
use storefront::views::admin::OrderConsole;
use storefront::views::cart::CartPage;
use storefront::views::checkout::{CheckoutWizard, PaymentMethod};
use storefront::views::View;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => StorefrontConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => StorefrontConfig::default(),
    };

    info!("Starting storefront demo");
    let system = StorefrontSystem::new(config);

    // Browse: home, then the electronics shelf sorted as listed
    let span = tracing::info_span!("browsing");
    let picks = async {
        if let View::Home(home) = system.render(&Route::parse("/")).await? {
            info!(featured = home.featured.len(), categories = home.categories.len(), "Home rendered");
        }
        let View::Listing(listing) = system.render(&Route::parse("/category/electronics")).await? else {
            bail!("category route did not render a listing");
        };
        info!(heading = %listing.heading, summary = %listing.summary, "Listing rendered");
        Ok(listing.page.items.into_iter().filter(|p| p.in_stock).take(2).collect::<Vec<_>>())
    }
    .instrument(span)
    .await?;

    // Fill the cart
    for product in picks {
        let color = product.colors.first().map(|c| c.name.clone());
        let line = system.cart_client.add_to_cart(product, 1, None, color).await?;
        info!(line_id = %line.id, "Added to cart");
    }

    let pricing = system.config.pricing.clone();
    let mut cart_page = CartPage::default();
    let notice = cart_page.apply_coupon("SAVE10", &pricing)?;
    info!(%notice);
    let cart_view = cart_page.render(&system.cart_client, &pricing).await?;
    info!(items = cart_view.count, total = cart_view.summary.total, "Cart ready");

    // Check out
    let span = tracing::info_span!("checkout");
    let order = async {
        let snapshot = system.cart_client.snapshot().await?;
        let mut wizard = CheckoutWizard::start(&snapshot, cart_page.coupon().cloned())?;
        wizard.continue_to_payment()?;
        wizard.choose_payment(PaymentMethod::Upi);
        wizard.continue_to_review()?;
        wizard.accept_terms(true);
        let review = wizard.review(&snapshot, &pricing)?;
        info!(label = %review.place_order_label, "Reviewing order");
        wizard
            .submit_order(&system.cart_client, &system.order_client, &pricing, Local::now().naive_local())
            .await
    }
    .instrument(span)
    .await?;
    info!(order_number = %order.order_number, "Order placed");

    // Fulfil through the admin console
    let console = OrderConsole::new(system.order_client.clone());
    for status in [OrderStatus::Confirmed, OrderStatus::Processing, OrderStatus::Shipped] {
        let notice = console.change_status(order.id.clone(), status, Local::now().naive_local()).await?;
        info!(%notice);
    }
    if let Err(e) = console.change_status(order.id.clone(), OrderStatus::Pending, Local::now().naive_local()).await {
        warn!(error = %e, "Rejected as expected");
    }
    let notice = console.add_tracking(order.id.clone(), "TRK246813579".into()).await?;
    info!(%notice);

    let board = console.dashboard().await?;
    info!(
        revenue = board.revenue,
        orders = board.order_count,
        customers = board.customer_count,
        "Dashboard"
    );
    for top in &board.top_products {
        info!(name = %top.name, units = top.units, "Top product");
    }
    drop(console);

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
