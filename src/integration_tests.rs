#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::actors::CartService;
    use crate::app_system::StorefrontSystem;
    use crate::cart::{Cart, CartStorage, MemoryStorage};
    use crate::catalog::seed;
    use crate::clients::{OrderClient, ProductClient};
    use crate::config::{PricingConfig, StorefrontConfig};
    use crate::domain::{Order, OrderStatus, Product};
    use crate::mock_framework::{create_mock_client, expect_create, expect_get};
    use crate::routes::Route;
    use crate::views::cart::CartPage;
    use crate::views::checkout::{CheckoutError, CheckoutWizard, PaymentMethod};
    use crate::views::orders::OrderPage;
    use crate::views::View;

    fn placed_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 2).unwrap().and_hms_opt(18, 5, 0).unwrap()
    }

    #[tokio::test]
    async fn test_checkout_flow_with_mocked_stores() {
        // 1. Real cart, mocked stores
        let (cart, _) = Cart::load(Box::new(MemoryStorage::new()), "cart");
        let (service, cart_client) = CartService::new(10, cart);
        tokio::spawn(service.run());

        let (product_inner, mut product_rx) = create_mock_client::<Product>(10);
        let (order_inner, mut order_rx) = create_mock_client::<Order>(10);
        let order_client = OrderClient::new(order_inner, ProductClient::new(product_inner));

        let headphones = seed::products().remove(0);
        cart_client.add_to_cart(headphones.clone(), 3, None, Some("Black".into())).await.unwrap();

        // 2. Walk the wizard
        let pricing = PricingConfig::default();
        let mut page = CartPage::default();
        page.apply_coupon("SAVE10", &pricing).unwrap();
        let snapshot = cart_client.snapshot().await.unwrap();
        let mut wizard = CheckoutWizard::start(&snapshot, page.coupon().cloned()).unwrap();
        wizard.continue_to_payment().unwrap();
        wizard.choose_payment(PaymentMethod::Card);
        wizard.continue_to_review().unwrap();
        wizard.accept_terms(true);

        let submit_cart = cart_client.clone();
        let submit = tokio::spawn(async move {
            wizard.submit_order(&submit_cart, &order_client, &pricing, placed_at()).await
        });

        // 3. Verify interactions
        let (product_id, responder) = expect_get(&mut product_rx).await.expect("Expected Product Get");
        assert_eq!(product_id, "1");
        responder.send(Ok(Some(headphones))).unwrap();

        let (payload, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        assert_eq!(payload.amounts.subtotal, 26997);
        assert_eq!(payload.amounts.discount, 500);
        assert_eq!(payload.amounts.tax, 3180);
        assert_eq!(payload.payment_method, "Card");
        assert_eq!(payload.items[0].color.as_deref(), Some("Black"));
        let order = <Order as crate::actor_framework::Entity>::from_create("4".into(), payload).unwrap();
        responder.send(Ok("4".into())).unwrap();

        let (order_id, responder) = expect_get(&mut order_rx).await.expect("Expected Order Get");
        assert_eq!(order_id, "4");
        responder.send(Ok(Some(order))).unwrap();

        let placed = submit.await.unwrap().unwrap();
        assert_eq!(placed.order_number, "ORD-2024-001237");
        assert!(cart_client.snapshot().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_terms_must_be_accepted() {
        let system = StorefrontSystem::with_storage(StorefrontConfig::default(), Box::new(MemoryStorage::new()));
        let product = seed::products().remove(3);
        system.cart_client.add_to_cart(product, 1, Some("M".into()), Some("White".into())).await.unwrap();

        let snapshot = system.cart_client.snapshot().await.unwrap();
        let mut wizard = CheckoutWizard::start(&snapshot, None).unwrap();
        wizard.continue_to_payment().unwrap();
        wizard.continue_to_review().unwrap();
        let err = wizard
            .submit_order(&system.cart_client, &system.order_client, &system.config.pricing, placed_at())
            .await
            .unwrap_err();
        assert_eq!(err, CheckoutError::TermsNotAccepted);
        assert_eq!(system.cart_client.snapshot().await.unwrap().count, 1);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_full_storefront_round() {
        let storage = MemoryStorage::new();
        let system = StorefrontSystem::with_storage(StorefrontConfig::default(), Box::new(storage.clone()));

        // Browse and fill the cart
        let View::Listing(listing) = system.render(&Route::parse("/products")).await.unwrap() else {
            panic!("expected listing");
        };
        let backpack = listing.page.items.iter().find(|p| p.id == "3").unwrap().clone();
        system.cart_client.add_to_cart(backpack, 2, None, Some("Navy".into())).await.unwrap();
        assert!(storage.read("cart").unwrap().unwrap().contains("3--Navy"));

        // Check out
        let snapshot = system.cart_client.snapshot().await.unwrap();
        let mut wizard = CheckoutWizard::start(&snapshot, None).unwrap();
        wizard.continue_to_payment().unwrap();
        wizard.continue_to_review().unwrap();
        wizard.accept_terms(true);
        let order = wizard
            .submit_order(&system.cart_client, &system.order_client, &system.config.pricing, placed_at())
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.amounts.total, 6998 + 840);
        assert_eq!(storage.read("cart").unwrap().as_deref(), Some("[]"));

        // Fulfil it
        for status in [OrderStatus::Confirmed, OrderStatus::Processing, OrderStatus::Shipped] {
            system.order_client.set_status(order.id.clone(), status, placed_at()).await.unwrap();
        }

        let View::Order(OrderPage::Found(detail)) =
            system.render(&Route::Order(order.id.clone())).await.unwrap()
        else {
            panic!("expected the new order");
        };
        let steps: Vec<&str> = detail.timeline.iter().map(|t| t.status.as_str()).collect();
        assert_eq!(steps, vec!["Order Placed", "Confirmed", "Processing", "Shipped"]);

        let View::Orders(cards) = system.render(&Route::Orders).await.unwrap() else {
            panic!("expected order history");
        };
        assert_eq!(cards[0].id, order.id);

        system.shutdown().await.unwrap();
    }
}
