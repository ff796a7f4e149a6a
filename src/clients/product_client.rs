use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Product, ProductCreate, ProductPatch};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError, StockLevel};

/// Client for the catalog store.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product);

impl ProductClient {
    /// Adds a product from the admin form; returns the assigned id.
    #[instrument(skip(self))]
    pub async fn create_product(&self, payload: ProductCreate) -> Result<String, ProductError> {
        debug!("Sending request");
        self.inner.create(payload).await.map_err(ProductError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_product(&self, id: String, patch: ProductPatch) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(ProductError::from)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: String) -> Result<(), ProductError> {
        debug!("Sending request");
        self.inner.delete(id).await.map_err(ProductError::from)
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: String) -> Result<StockLevel, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::CheckStock).await {
            Ok(ProductActionResult::CheckStock(level)) => Ok(level),
            Ok(_) => Err(ProductError::ActorCommunicationError("Unexpected result".to_string())),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    pub async fn update_stock(
        &self,
        id: String,
        in_stock: bool,
        stock_count: Option<u32>,
    ) -> Result<StockLevel, ProductError> {
        debug!("Sending request");
        let action = ProductAction::UpdateStock { in_stock, stock_count };
        match self.inner.perform_action(id, action).await {
            Ok(ProductActionResult::UpdateStock(level)) => Ok(level),
            Ok(_) => Err(ProductError::ActorCommunicationError("Unexpected result".to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::ResourceActor;
    use crate::catalog::{next_product_id, seed};
    use crate::mock_framework::{create_mock_client, expect_action};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    fn spawn_catalog() -> ProductClient {
        let products = seed::products();
        let counter = Arc::new(AtomicU64::new(next_product_id(&products)));
        let (actor, inner) = ResourceActor::with_seed("products", 8, products, move || {
            counter.fetch_add(1, Ordering::SeqCst).to_string()
        });
        tokio::spawn(actor.run());
        ProductClient::new(inner)
    }

    #[tokio::test]
    async fn admin_crud_round() {
        let client = spawn_catalog();
        let id = client
            .create_product(ProductCreate {
                name: "Ceramic Mug".into(),
                price: 499,
                original_price: Some(699),
                category: "Home".into(),
                in_stock: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(id, "11");

        let created = client.get_product(id.clone()).await.unwrap().unwrap();
        assert_eq!(created.discount, Some(29));

        let edited = client
            .update_product(id.clone(), ProductPatch { price: Some(599), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(edited.discount, Some(14));

        client.delete_product(id.clone()).await.unwrap();
        assert_eq!(client.get_product(id).await.unwrap(), None);
        assert_eq!(client.list_products().await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn missing_product_maps_to_not_found() {
        let client = spawn_catalog();
        let err = client.delete_product("99".into()).await.unwrap_err();
        assert_eq!(err, ProductError::NotFound("99".into()));
    }

    #[tokio::test]
    async fn stock_actions_round_trip_through_actor() {
        let client = spawn_catalog();
        let level = client.update_stock("9".into(), true, Some(12)).await.unwrap();
        assert_eq!(level, StockLevel { in_stock: true, stock_count: Some(12) });
        assert_eq!(client.check_stock("9".into()).await.unwrap(), level);
    }

    #[tokio::test]
    async fn mismatched_action_result_is_rejected() {
        let (inner, mut receiver) = create_mock_client::<Product>(4);
        let client = ProductClient::new(inner);
        let task = tokio::spawn(async move { client.check_stock("1".into()).await });

        let (id, action, respond_to) = expect_action(&mut receiver).await.unwrap();
        assert_eq!(id, "1");
        assert!(matches!(action, ProductAction::CheckStock));
        let level = StockLevel { in_stock: true, stock_count: None };
        respond_to.send(Ok(ProductActionResult::UpdateStock(level))).unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert!(matches!(err, ProductError::ActorCommunicationError(_)));
    }
}
