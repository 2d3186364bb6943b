//! Stock service: the application layer over the product store.

use crate::error::CatalogError;
use crate::product::{Product, ProductId};
use crate::store::ProductStore;

/// Reserves and releases product stock.
///
/// Each stock call is a load, mutate, save cycle. A concurrent writer that
/// saved the same product in between surfaces as a store conflict instead
/// of overwriting its change.
#[derive(Clone)]
pub struct StockService<P: ProductStore> {
    products: P,
}

impl<P: ProductStore> StockService<P> {
    /// Creates a stock service over a product store.
    pub fn new(products: P) -> Self {
        Self { products }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &P {
        &self.products
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_product(&self, product_id: ProductId) -> Result<Option<Product>, CatalogError> {
        self.products.load_by_id(product_id).await
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.products.list().await
    }

    /// Takes stock out of a product.
    ///
    /// Fails with `ProductNotFound` or `InsufficientStock`; stock is unchanged
    /// on failure.
    #[tracing::instrument(skip(self))]
    pub async fn reserve_stock(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Product, CatalogError> {
        let mut product = self.load_existing(product_id).await?;
        product.reserve_stock(quantity)?;
        let product = self.products.save(product).await?;

        tracing::info!(
            %product_id,
            name = %product.name(),
            quantity,
            remaining = product.stock_quantity(),
            "stock reserved"
        );
        Ok(product)
    }

    /// Puts stock back into a product.
    #[tracing::instrument(skip(self))]
    pub async fn release_stock(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Product, CatalogError> {
        let mut product = self.load_existing(product_id).await?;
        product.release_stock(quantity);
        let product = self.products.save(product).await?;

        tracing::info!(
            %product_id,
            name = %product.name(),
            quantity,
            remaining = product.stock_quantity(),
            "stock released"
        );
        Ok(product)
    }

    async fn load_existing(&self, product_id: ProductId) -> Result<Product, CatalogError> {
        self.products
            .load_by_id(product_id)
            .await?
            .ok_or(CatalogError::ProductNotFound(product_id))
    }
}
