//! Catalog gateway over the hosted backend's PostgREST interface.
//!
//! Listing asks for an exact count (`Prefer: count=exact`) and reads the total
//! back from the `Content-Range` header (`0-11/42`), which is what `has_more`
//! is computed from.

use async_trait::async_trait;
use reqwest::header::{CONTENT_RANGE, HeaderMap};

use bazaar_catalog::{ListQuery, PAGE_SIZE, Product, ProductPage};
use bazaar_core::ProductId;

use crate::gateway::{CatalogGateway, GatewayError, GatewayResult};

const PRODUCTS_PATH: &str = "rest/v1/products";

/// HTTP catalog gateway.
#[derive(Debug, Clone)]
pub struct RestCatalog {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestCatalog {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            api_key: api_key.into(),
        }
    }

    fn products_url(&self) -> String {
        format!("{}/{}", self.base_url, PRODUCTS_PATH)
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> GatewayResult<reqwest::Response> {
        let resp = req
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Backend {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp)
    }
}

/// Query-string pairs for one listing page.
pub fn list_params(query: &ListQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("select", "*".to_string()),
        ("order", "created_at.desc".to_string()),
        ("offset", query.offset().to_string()),
        ("limit", PAGE_SIZE.to_string()),
    ];
    if let Some(category) = &query.category {
        params.push(("category", format!("eq.{category}")));
    }
    if let Some(brand_id) = query.brand_id {
        params.push(("brand_id", format!("eq.{brand_id}")));
    }
    params
}

async fn body(resp: reqwest::Response) -> GatewayResult<String> {
    resp.text()
        .await
        .map_err(|e| GatewayError::Network(e.to_string()))
}

/// Product rows from a JSON array body.
pub fn decode_rows(body: &str) -> GatewayResult<Vec<Product>> {
    serde_json::from_str(body).map_err(|e| GatewayError::Decode(e.to_string()))
}

/// Total row count from a `Content-Range` header (`0-11/42`, `*/0`).
/// `None` when the header is missing or the total is unknown (`*`).
pub fn total_from_content_range(headers: &HeaderMap) -> Option<usize> {
    let value = headers.get(CONTENT_RANGE)?.to_str().ok()?;
    let (_, total) = value.rsplit_once('/')?;
    total.trim().parse().ok()
}

#[async_trait]
impl CatalogGateway for RestCatalog {
    async fn list_products(&self, query: &ListQuery) -> GatewayResult<ProductPage> {
        let req = self
            .request(&self.products_url())
            .header("Prefer", "count=exact")
            .query(&list_params(query));

        let resp = self.send(req).await?;
        let total = total_from_content_range(resp.headers());
        let items = decode_rows(&body(resp).await?)?;

        tracing::debug!(
            page = query.page,
            returned = items.len(),
            total = ?total,
            "fetched product page"
        );
        Ok(ProductPage::from_counted(items, query.offset(), total))
    }

    async fn fetch_product(&self, id: ProductId) -> GatewayResult<Option<Product>> {
        let req = self
            .request(&self.products_url())
            .query(&[("select", "*".to_string()), ("id", format!("eq.{id}"))]);

        let resp = self.send(req).await?;
        let mut rows = decode_rows(&body(resp).await?)?;
        Ok(rows.pop())
    }
}
