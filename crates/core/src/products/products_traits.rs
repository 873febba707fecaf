use async_trait::async_trait;
use tokio::sync::watch;

use super::products_model::{Product, ProductCreate, ProductUpdate};
use crate::cache::Cleanable;
use crate::errors::Result;
use crate::pagination::Page;

/// Contract for the remote product collection.
#[async_trait]
pub trait ProductRemoteTrait: Send + Sync {
    async fn add_product(&self, product: &ProductCreate) -> Result<Product>;
    async fn list_products(&self, limit: u32, offset: u32) -> Result<Page<Product>>;
    async fn get_product(&self, product_id: &str) -> Result<Product>;
    async fn update_product(&self, product_id: &str, update: &ProductUpdate) -> Result<Product>;
    async fn delete_product(&self, product_id: &str) -> Result<()>;
}

/// Remote product operations plus the locally mirrored listing.
#[async_trait]
pub trait ProductRepositoryTrait: Cleanable {
    fn products(&self) -> Vec<Product>;

    fn subscribe(&self) -> watch::Receiver<Vec<Product>>;

    async fn add(&self, product: ProductCreate) -> Result<Product>;

    /// Fetches one page. `offset == 0` refreshes the cache, later offsets
    /// append to it.
    async fn list(&self, limit: u32, offset: u32) -> Result<Page<Product>>;

    async fn update(&self, product_id: &str, update: ProductUpdate) -> Result<Product>;

    async fn delete(&self, product_id: &str) -> Result<()>;

    async fn details(&self, product_id: &str) -> Result<Product>;
}
