//! Catalog side of the fulfillment stock ports.

use async_trait::async_trait;
use fulfillment::{FulfillmentError, ProductInfo, ProductInfoLookup, StockReservation};
use ordering::Quantity;

use crate::error::CatalogError;
use crate::product::ProductId;
use crate::service::StockService;
use crate::store::ProductStore;

/// Serves stock reservations and product info to the order side.
///
/// Translates the order side's product ids into catalog ids and catalog
/// errors into fulfillment errors, so neither side imports the other's
/// model.
#[derive(Clone)]
pub struct CatalogAdapter<P: ProductStore> {
    service: StockService<P>,
}

impl<P: ProductStore> CatalogAdapter<P> {
    pub fn new(service: StockService<P>) -> Self {
        Self { service }
    }

    /// Returns the wrapped stock service.
    pub fn service(&self) -> &StockService<P> {
        &self.service
    }
}

fn catalog_id(product_id: ordering::ProductId) -> Result<ProductId, FulfillmentError> {
    ProductId::new(product_id.value()).map_err(|_| FulfillmentError::ProductNotFound(product_id))
}

fn to_fulfillment_error(err: CatalogError, product_id: ordering::ProductId) -> FulfillmentError {
    match err {
        CatalogError::InsufficientStock {
            requested,
            available,
            ..
        } => FulfillmentError::InsufficientStock {
            product_id,
            requested,
            available,
        },
        CatalogError::Store(e) => FulfillmentError::Store(e),
        // Stock calls never construct products, so anything else means the
        // id did not resolve.
        CatalogError::ProductNotFound(_)
        | CatalogError::InvalidProductId(_)
        | CatalogError::InvalidProductName
        | CatalogError::NegativePrice(_) => FulfillmentError::ProductNotFound(product_id),
    }
}

#[async_trait]
impl<P: ProductStore> StockReservation for CatalogAdapter<P> {
    async fn reserve(
        &self,
        product_id: ordering::ProductId,
        quantity: Quantity,
    ) -> fulfillment::error::Result<()> {
        self.service
            .reserve_stock(catalog_id(product_id)?, quantity.value())
            .await
            .map(|_| ())
            .map_err(|e| to_fulfillment_error(e, product_id))
    }

    async fn release(
        &self,
        product_id: ordering::ProductId,
        quantity: Quantity,
    ) -> fulfillment::error::Result<()> {
        self.service
            .release_stock(catalog_id(product_id)?, quantity.value())
            .await
            .map(|_| ())
            .map_err(|e| to_fulfillment_error(e, product_id))
    }
}

#[async_trait]
impl<P: ProductStore> ProductInfoLookup for CatalogAdapter<P> {
    async fn load_product_info(
        &self,
        product_id: ordering::ProductId,
    ) -> fulfillment::error::Result<Option<ProductInfo>> {
        let product = self
            .service
            .get_product(catalog_id(product_id)?)
            .await
            .map_err(|e| to_fulfillment_error(e, product_id))?;

        Ok(product.map(|p| ProductInfo {
            product_id,
            name: p.name().to_string(),
            manufacturer: p.manufacturer().to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryProductStore;

    async fn adapter() -> CatalogAdapter<InMemoryProductStore> {
        let store = InMemoryProductStore::with_demo_catalog().await.unwrap();
        CatalogAdapter::new(StockService::new(store))
    }

    fn order_pid(id: i64) -> ordering::ProductId {
        ordering::ProductId::new(id).unwrap()
    }

    fn qty(n: i64) -> Quantity {
        Quantity::new(n).unwrap()
    }

    #[tokio::test]
    async fn test_reserve_and_release_through_port() {
        let adapter = adapter().await;

        adapter.reserve(order_pid(3), qty(5)).await.unwrap();
        let hub = adapter
            .service()
            .get_product(ProductId::new(3).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hub.stock_quantity(), 20);

        adapter.release(order_pid(3), qty(5)).await.unwrap();
        let hub = adapter
            .service()
            .get_product(ProductId::new(3).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hub.stock_quantity(), 25);
    }

    #[tokio::test]
    async fn test_errors_are_translated() {
        let adapter = adapter().await;

        assert_eq!(
            adapter.reserve(order_pid(4), qty(10)).await.unwrap_err(),
            FulfillmentError::InsufficientStock {
                product_id: order_pid(4),
                requested: 10,
                available: 5,
            }
        );
        assert_eq!(
            adapter.reserve(order_pid(99), qty(1)).await.unwrap_err(),
            FulfillmentError::ProductNotFound(order_pid(99))
        );
    }

    #[tokio::test]
    async fn test_product_info() {
        let adapter = adapter().await;

        let info = adapter.load_product_info(order_pid(1)).await.unwrap().unwrap();
        assert_eq!(info.name, "Laptop Pro 15");
        assert_eq!(info.manufacturer, "Apple");
        assert!(adapter.load_product_info(order_pid(99)).await.unwrap().is_none());
    }
}
