//! Integration tests for stock handling in the catalog.

use std::sync::Arc;

use catalog::{CatalogAdapter, CatalogError, InMemoryProductStore, ProductId, StockService};
use fulfillment::{FulfillmentError, StockReservation};
use ordering::Quantity;

async fn demo_service() -> StockService<InMemoryProductStore> {
    StockService::new(InMemoryProductStore::with_demo_catalog().await.unwrap())
}

#[tokio::test]
async fn test_reservation_beyond_stock_leaves_product_untouched() {
    let service = demo_service().await;
    let keyboard = ProductId::new(4).unwrap();

    let err = service.reserve_stock(keyboard, 10).await.unwrap_err();

    assert_eq!(
        err,
        CatalogError::InsufficientStock {
            product_id: keyboard,
            requested: 10,
            available: 5,
        }
    );
    let product = service.get_product(keyboard).await.unwrap().unwrap();
    assert_eq!(product.stock_quantity(), 5);
}

#[tokio::test]
async fn test_competing_reservations_never_oversell() {
    let service = Arc::new(demo_service().await);
    let keyboard = ProductId::new(4).unwrap();

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.reserve_stock(keyboard, 3).await })
        })
        .collect();

    let mut succeeded = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(CatalogError::InsufficientStock { .. }) | Err(CatalogError::Store(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(succeeded, 1);
    let product = service.get_product(keyboard).await.unwrap().unwrap();
    assert_eq!(product.stock_quantity(), 2);
}

#[tokio::test]
async fn test_adapter_reports_order_side_ids() {
    let adapter = CatalogAdapter::new(demo_service().await);
    let monitor = ordering::ProductId::new(5).unwrap();

    adapter
        .reserve(monitor, Quantity::new(8).unwrap())
        .await
        .unwrap();
    let err = adapter
        .reserve(monitor, Quantity::new(1).unwrap())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        FulfillmentError::InsufficientStock {
            product_id: monitor,
            requested: 1,
            available: 0,
        }
    );
}
