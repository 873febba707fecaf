use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::watch;

use super::products_model::{Product, ProductCreate, ProductUpdate};
use super::products_traits::{ProductRemoteTrait, ProductRepositoryTrait};
use crate::cache::{apply_page, CachedList, Cleanable, Identifiable};
use crate::errors::Result;
use crate::pagination::Page;

impl Identifiable for Product {
    fn id(&self) -> &str {
        &self.id
    }
}

pub struct ProductRepository {
    remote: Arc<dyn ProductRemoteTrait>,
    cache: CachedList<Product>,
}

impl ProductRepository {
    pub fn new(remote: Arc<dyn ProductRemoteTrait>) -> Self {
        Self {
            remote,
            cache: CachedList::new(),
        }
    }
}

impl Cleanable for ProductRepository {
    fn clear(&self) {
        self.cache.clear();
    }
}

#[async_trait]
impl ProductRepositoryTrait for ProductRepository {
    fn products(&self) -> Vec<Product> {
        self.cache.snapshot()
    }

    fn subscribe(&self) -> watch::Receiver<Vec<Product>> {
        self.cache.subscribe()
    }

    async fn add(&self, product: ProductCreate) -> Result<Product> {
        product.validate()?;
        let created = self
            .remote
            .add_product(&product)
            .await
            .inspect_err(|e| warn!("Failed to add product '{}': {}", product.name, e))?;
        debug!("Created product {}", created.id);
        self.cache.prepend(created.clone());
        Ok(created)
    }

    async fn list(&self, limit: u32, offset: u32) -> Result<Page<Product>> {
        let page = self.remote.list_products(limit, offset).await?;
        debug!(
            "Fetched {} products at offset {} (has_more: {})",
            page.items.len(),
            offset,
            page.has_more
        );
        apply_page(&self.cache, offset, page.items.clone());
        Ok(page)
    }

    async fn update(&self, product_id: &str, update: ProductUpdate) -> Result<Product> {
        update.validate()?;
        let updated = self
            .remote
            .update_product(product_id, &update)
            .await
            .inspect_err(|e| warn!("Failed to update product {}: {}", product_id, e))?;
        self.cache.replace(updated.clone());
        Ok(updated)
    }

    async fn delete(&self, product_id: &str) -> Result<()> {
        self.remote
            .delete_product(product_id)
            .await
            .inspect_err(|e| warn!("Failed to delete product {}: {}", product_id, e))?;
        self.cache.remove(product_id);
        Ok(())
    }

    async fn details(&self, product_id: &str) -> Result<Product> {
        let product = self.remote.get_product(product_id).await?;
        self.cache.replace(product.clone());
        Ok(product)
    }
}
