//! Brand dashboard: a brand's own products and their upkeep.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use bazaar_catalog::image::IMAGE_BUCKET;
use bazaar_catalog::{ImageUpload, ListQuery, Product, ProductDraft, ProductPage, ProductPatch};
use bazaar_core::{DomainError, ProductId};
use bazaar_infra::{CatalogGateway, ProductStore};

use crate::error::{ClientError, ClientResult};
use crate::session::Principal;

/// Product management for one signed-in brand.
pub struct BrandCatalog {
    catalog: Arc<dyn CatalogGateway>,
    store: Arc<dyn ProductStore>,
    principal: Principal,
}

impl BrandCatalog {
    /// Fails with [`ClientError::NotBrand`] for shopper accounts.
    pub fn open(
        catalog: Arc<dyn CatalogGateway>,
        store: Arc<dyn ProductStore>,
        principal: Principal,
    ) -> ClientResult<Self> {
        principal.require_brand()?;
        Ok(Self {
            catalog,
            store,
            principal,
        })
    }

    /// One page of this brand's products, newest first.
    pub async fn my_products(&self, page: u32) -> ClientResult<ProductPage> {
        let query = ListQuery::page(page).with_brand(self.principal.user_id);
        Ok(self.catalog.list_products(&query).await?)
    }

    pub async fn product(&self, id: ProductId) -> ClientResult<Option<Product>> {
        Ok(self.catalog.fetch_product(id).await?)
    }

    pub async fn create(&self, draft: ProductDraft) -> ClientResult<Product> {
        draft.validate()?;
        let product = Product::from_draft(ProductId::new(), self.principal.user_id, draft, Utc::now());
        let saved = self.store.insert_product(product).await?;
        tracing::info!(product_id = %saved.id, name = %saved.name, "product listed");
        Ok(saved)
    }

    pub async fn update(&self, id: ProductId, patch: ProductPatch) -> ClientResult<Product> {
        patch.validate()?;
        self.owned(id).await?;
        let saved = self.store.update_product(id, patch).await?;
        tracing::info!(product_id = %id, "product updated");
        Ok(saved)
    }

    pub async fn delete(&self, id: ProductId) -> ClientResult<()> {
        self.owned(id).await?;
        self.store.delete_product(id).await?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }

    /// Check an image before upload and pick its object path in
    /// [`IMAGE_BUCKET`].
    pub fn image_path(&self, upload: &ImageUpload) -> ClientResult<String> {
        upload.validate()?;
        let path = upload.object_path(self.principal.user_id, Uuid::new_v4());
        tracing::debug!(bucket = IMAGE_BUCKET, %path, "image upload accepted");
        Ok(path)
    }

    async fn owned(&self, id: ProductId) -> ClientResult<Product> {
        let product = self
            .catalog
            .fetch_product(id)
            .await?
            .ok_or_else(DomainError::not_found)?;
        if product.brand_id != self.principal.user_id {
            return Err(ClientError::NotOwner);
        }
        Ok(product)
    }
}

impl core::fmt::Debug for BrandCatalog {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BrandCatalog")
            .field("principal", &self.principal)
            .finish_non_exhaustive()
    }
}
