//! Public catalog endpoints

use crate::http::{HttpClient, NetworkHttpClient};
use crate::{ClientError, ClientResult};
use serde_json::Value;
use shared::CatalogItem;
use shared::client::paths;

/// Anonymous read access to one collection
#[derive(Debug, Clone)]
pub struct CatalogApi {
    http: NetworkHttpClient,
    collection: String,
}

impl CatalogApi {
    pub fn new(http: NetworkHttpClient, collection: impl Into<String>) -> Self {
        Self {
            http,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// `GET /api/<collection>`
    pub async fn list(&self) -> ClientResult<Vec<CatalogItem>> {
        let body: Value = self.http.get(&paths::public_list(&self.collection)).await?;
        let items = super::decode_items(body);
        tracing::debug!(collection = %self.collection, count = items.len(), "catalog loaded");
        Ok(items)
    }

    /// `GET /api/<collection>/:id`
    pub async fn get(&self, id: &str) -> ClientResult<CatalogItem> {
        let body: Value = self
            .http
            .get(&paths::public_item(&self.collection, &super::encode_segment(id)))
            .await?;
        if body.is_null() {
            return Err(ClientError::NotFound(format!("{} {}", self.collection, id)));
        }
        serde_json::from_value(body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}
