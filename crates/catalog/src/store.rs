//! Product store trait and in-memory implementation.

use async_trait::async_trait;
use common::{InMemoryRepository, Money};
use rust_decimal::Decimal;

use crate::error::CatalogError;
use crate::product::{Price, Product, ProductId, ProductName};

/// Persistence for Product aggregates.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Loads a product, returning None if it doesn't exist.
    async fn load_by_id(&self, product_id: ProductId) -> Result<Option<Product>, CatalogError>;

    /// Saves a product and returns it at its new version.
    async fn save(&self, product: Product) -> Result<Product, CatalogError>;

    /// Returns every product, ordered by id.
    async fn list(&self) -> Result<Vec<Product>, CatalogError>;
}

/// In-memory product store. Clones share the same storage.
#[derive(Clone, Default)]
pub struct InMemoryProductStore {
    products: InMemoryRepository<Product>,
}

impl InMemoryProductStore {
    /// Creates an empty product store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the demo catalog.
    pub async fn with_demo_catalog() -> Result<Self, CatalogError> {
        let store = Self::new();
        let demo = [
            (1, "Laptop Pro 15", "Apple", Decimal::new(129999, 2), 10),
            (2, "Wireless Mouse", "Logitech", Decimal::new(4999, 2), 50),
            (3, "USB-C Hub", "Anker", Decimal::new(7999, 2), 25),
            (4, "Mechanical Keyboard", "Corsair", Decimal::new(14999, 2), 5),
            (5, "Monitor 27\"", "Dell", Decimal::new(39999, 2), 8),
        ];

        for (id, name, manufacturer, price, stock) in demo {
            let product = Product::create(
                ProductId::new(id)?,
                ProductName::new(name)?,
                Price::new(Money::of(price))?,
            )
            .with_manufacturer(manufacturer)
            .with_stock(stock);
            store.save(product).await?;
        }

        let products = store.products.len().await;
        tracing::debug!(products, "demo catalog seeded");
        Ok(store)
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn load_by_id(&self, product_id: ProductId) -> Result<Option<Product>, CatalogError> {
        Ok(self.products.load(&product_id).await)
    }

    async fn save(&self, product: Product) -> Result<Product, CatalogError> {
        Ok(self.products.save(product).await?)
    }

    async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        let mut products = self.products.all().await;
        products.sort_by_key(|p| p.product_id());
        Ok(products)
    }
}
