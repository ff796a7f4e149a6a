use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::actor_framework::ResourceActor;
use crate::actors::CartService;
use crate::cart::{Cart, CartLoadOutcome, CartStorage, FileStorage, MemoryStorage};
use crate::catalog::{self, next_product_id, ListingState};
use crate::clients::{CartClient, OrderClient, ProductClient};
use crate::config::StorefrontConfig;
use crate::domain::{Category, Order, Product};
use crate::error::StorefrontError;
use crate::orders::{self, OrderSearch};
use crate::routes::Route;
use crate::views::admin::{AdminOverview, OrderConsole, TOP_PRODUCTS};
use crate::views::cart::{cart_view, CartPage};
use crate::views::home::home_view;
use crate::views::listing::{category_listing, listing_view};
use crate::views::orders::{account_summary, order_history, order_page};
use crate::views::product_detail::product_page;
use crate::views::View;

/// Sequential string ids starting at `start`.
fn id_counter(start: u64) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(start));
    move || counter.fetch_add(1, Ordering::SeqCst).to_string()
}

/// The storefront system that owns every store and the cart.
///
/// Responsible for starting the actors, wiring the clients together, and
/// handling shutdown.
pub struct StorefrontSystem {
    pub config: StorefrontConfig,
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    pub cart_client: CartClient,
    /// How the cart came back from its storage slot.
    pub cart_load: CartLoadOutcome,
    categories: Vec<Category>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StorefrontSystem {
    /// Boots with the seed catalog and orders. The cart uses file storage
    /// when `storage_dir` is set and process memory otherwise.
    pub fn new(config: StorefrontConfig) -> Self {
        let storage: Box<dyn CartStorage> = match &config.storage_dir {
            Some(dir) => Box::new(FileStorage::new(dir)),
            None => Box::new(MemoryStorage::new()),
        };
        Self::with_storage(config, storage)
    }

    pub fn with_storage(config: StorefrontConfig, storage: Box<dyn CartStorage>) -> Self {
        Self::with_seed(config, storage, catalog::seed::products(), orders::seed::orders())
    }

    /// Boots over explicit seed data.
    pub fn with_seed(
        config: StorefrontConfig,
        storage: Box<dyn CartStorage>,
        products: Vec<Product>,
        orders: Vec<Order>,
    ) -> Self {
        let buffer = config.channel_buffer;

        // 1. Catalog store
        let next_product = id_counter(next_product_id(&products));
        let (product_actor, product_inner) =
            ResourceActor::with_seed("products", buffer, products, next_product);
        let product_client = ProductClient::new(product_inner);
        let product_handle = tokio::spawn(product_actor.run());

        // 2. Order store; placement checks lines against the catalog
        let next_order = orders
            .iter()
            .filter_map(|o| o.id.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);
        let (order_actor, order_inner) =
            ResourceActor::with_seed("orders", buffer, orders, id_counter(next_order));
        let order_client = OrderClient::new(order_inner, product_client.clone());
        let order_handle = tokio::spawn(order_actor.run());

        // 3. Cart service
        let (cart, cart_load) = Cart::load(storage, config.cart_slot.clone());
        if let CartLoadOutcome::Recovered(reason) = &cart_load {
            warn!(%reason, "Cart was reset on startup");
        }
        let (cart_service, cart_client) = CartService::new(buffer, cart);
        let cart_handle = tokio::spawn(cart_service.run());

        info!("Storefront system started");
        Self {
            config,
            product_client,
            order_client,
            cart_client,
            cart_load,
            categories: catalog::seed::categories(),
            handles: vec![product_handle, order_handle, cart_handle],
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Builds the page for `route` from the live stores and cart.
    #[instrument(skip(self, route), fields(route = %route))]
    pub async fn render(&self, route: &Route) -> Result<View, StorefrontError> {
        let page_size = self.config.page_size;
        let pricing = &self.config.pricing;
        let view = match route {
            Route::Home | Route::Wishlist | Route::About | Route::Contact => {
                let products = self.product_client.list_products().await?;
                View::Home(home_view(&products, &self.categories))
            }
            Route::Products | Route::Deals => {
                let products = self.product_client.list_products().await?;
                View::Listing(listing_view(&ListingState::new(page_size), &products, &self.categories))
            }
            Route::Category(category) => {
                let products = self.product_client.list_products().await?;
                let state = category_listing(category, page_size);
                View::Listing(listing_view(&state, &products, &self.categories))
            }
            Route::Product(id) => {
                let products = self.product_client.list_products().await?;
                View::Product(product_page(id, &products))
            }
            Route::Cart => View::Cart(CartPage::default().render(&self.cart_client, pricing).await?),
            Route::Checkout => {
                let snapshot = self.cart_client.snapshot().await?;
                let summary = cart_view(&snapshot, None, pricing);
                if summary.is_empty() {
                    View::Cart(summary)
                } else {
                    View::Checkout(summary)
                }
            }
            Route::Account => {
                let orders = self.order_client.list_orders().await?;
                View::Account(account_summary(&orders))
            }
            Route::Orders => {
                let orders = self.order_client.list_orders().await?;
                View::Orders(order_history(&orders))
            }
            Route::Order(id) => {
                let orders = self.order_client.list_orders().await?;
                View::Order(order_page(id, &orders))
            }
            Route::Admin => {
                let console = OrderConsole::new(self.order_client.clone());
                let listing = console.view(&OrderSearch::default()).await?;
                View::Admin(Box::new(AdminOverview {
                    dashboard: orders::dashboard(&listing.orders, TOP_PRODUCTS),
                    products: self.product_client.list_products().await?,
                    orders: listing,
                }))
            }
        };
        Ok(view)
    }

    /// Stops the cart service, closes the store channels and waits for every
    /// actor task.
    pub async fn shutdown(self) -> Result<(), StorefrontError> {
        info!("Shutting down system...");
        self.cart_client.shutdown().await;

        // Stores stop once every sender is gone.
        drop(self.order_client);
        drop(self.product_client);
        drop(self.cart_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(StorefrontError::TaskFailed(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
