//! [`DataGateway`] over the hosted backend's REST interface.
//!
//! Tables are read with PostgREST-style query strings, for example
//! `GET {url}/rest/v1/products?select=*&category_id=eq.3&order=created_at.desc`. Every
//! request carries the project's anonymous key twice: as `apikey` and as a bearer token.

use super::{DataGateway, GatewayError};
use crate::model::{Category, CategoryId, Product};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

#[derive(Clone)]
pub struct RestGateway {
    http: Client,
    base_url: String,
    anon_key: String,
}

impl RestGateway {
    /// `timeout` bounds each HTTP request. The screen controller applies its own bound to
    /// the whole fetch on top of this.
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        })
    }

    fn table(&self, table: &str, query: &[(&str, String)]) -> RequestBuilder {
        self.http
            .get(format!("{}/rest/v1/{}", self.base_url, table))
            .query(query)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    fn categories_request(&self, slug: Option<&str>) -> RequestBuilder {
        let mut query = vec![("select", "*".to_string())];
        match slug {
            Some(slug) => {
                query.push(("slug", format!("eq.{slug}")));
                query.push(("limit", "1".to_string()));
            }
            None => query.push(("order", "name.asc".to_string())),
        }
        self.table("categories", &query)
    }

    fn products_request(&self, category_id: Option<CategoryId>) -> RequestBuilder {
        let mut query = vec![("select", "*".to_string())];
        if let Some(id) = category_id {
            query.push(("category_id", format!("eq.{}", id.0)));
        }
        query.push(("order", "created_at.desc".to_string()));
        self.table("products", &query)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Vec<T>, GatewayError> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Backend request failed");
            GatewayError::Unavailable(e.to_string())
        })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "Backend returned an error status");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message: body,
            });
        }
        decode_rows(&body)
    }
}

/// Decodes a JSON array of rows.
pub fn decode_rows<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, GatewayError> {
    let rows: Vec<T> = serde_json::from_str(body).map_err(|e| GatewayError::Decode(e.to_string()))?;
    debug!(rows = rows.len(), "Decoded rows");
    Ok(rows)
}

#[async_trait]
impl DataGateway for RestGateway {
    #[instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<Category>, GatewayError> {
        self.fetch(self.categories_request(None)).await
    }

    #[instrument(skip(self))]
    async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>, GatewayError> {
        let rows: Vec<Category> = self.fetch(self.categories_request(Some(slug))).await?;
        Ok(rows.into_iter().next())
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, GatewayError> {
        self.fetch(self.products_request(None)).await
    }

    #[instrument(skip(self))]
    async fn list_products_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Product>, GatewayError> {
        self.fetch(self.products_request(Some(category_id))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::CategoryIcon;

    fn gateway() -> RestGateway {
        RestGateway::new("https://shop.example.co/", "anon-key", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_category_requests() {
        let gw = gateway();
        let all = gw.categories_request(None).build().unwrap();
        assert_eq!(
            all.url().as_str(),
            "https://shop.example.co/rest/v1/categories?select=*&order=name.asc"
        );

        let one = gw.categories_request(Some("fruits")).build().unwrap();
        assert_eq!(
            one.url().as_str(),
            "https://shop.example.co/rest/v1/categories?select=*&slug=eq.fruits&limit=1"
        );
    }

    #[test]
    fn test_product_requests_and_headers() {
        let gw = gateway();
        let request = gw.products_request(Some(CategoryId(3))).build().unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://shop.example.co/rest/v1/products?select=*&category_id=eq.3&order=created_at.desc"
        );
        assert_eq!(request.headers()["apikey"], "anon-key");
        assert_eq!(request.headers()["authorization"], "Bearer anon-key");

        let all = gw.products_request(None).build().unwrap();
        assert_eq!(
            all.url().as_str(),
            "https://shop.example.co/rest/v1/products?select=*&order=created_at.desc"
        );
    }

    #[test]
    fn test_decode_rows() {
        let body = r#"[{"id":1,"name":"Fruits","slug":"fruits","icon":"fruits"}]"#;
        let rows: Vec<Category> = decode_rows(body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].icon, CategoryIcon::Fruits);

        let unknown_icon = r#"[{"id":1,"name":"Fruits","slug":"fruits","icon":"rocket"}]"#;
        assert!(matches!(
            decode_rows::<Category>(unknown_icon),
            Err(GatewayError::Decode(_))
        ));
        assert!(matches!(
            decode_rows::<Product>("{\"message\":\"oops\"}"),
            Err(GatewayError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_unavailable() {
        let gw = RestGateway::new("http://127.0.0.1:9", "k", Duration::from_millis(500)).unwrap();
        assert!(matches!(
            gw.list_categories().await,
            Err(GatewayError::Unavailable(_))
        ));
    }
}
