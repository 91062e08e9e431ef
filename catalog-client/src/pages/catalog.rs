//! Public catalog listing

use crate::api::CatalogApi;
use shared::catalog::FilterSpec;
use shared::{CatalogItem, CatalogSchema, FilterState, filter_items, filter_options};

/// Listing with free-text search and the schema's filter panel
#[derive(Debug, Clone)]
pub struct CatalogPage {
    api: CatalogApi,
    schema: CatalogSchema,
    loading: bool,
    items: Vec<CatalogItem>,
    query: String,
    filters: FilterState,
}

impl CatalogPage {
    pub fn new(api: CatalogApi, schema: CatalogSchema) -> Self {
        let filters = FilterState::cleared(&schema);
        Self {
            api,
            schema,
            loading: false,
            items: Vec::new(),
            query: String::new(),
            filters,
        }
    }

    /// Fetch the collection. A failed load leaves an empty list.
    pub async fn load(&mut self) {
        self.loading = true;
        self.items = match self.api.list().await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(collection = %self.schema.collection, error = %e, "catalog load failed");
                Vec::new()
            }
        };
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn schema(&self) -> &CatalogSchema {
        &self.schema
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.filters.set(key, value);
    }

    /// Reset the query and every filter
    pub fn clear_filters(&mut self) {
        self.query.clear();
        self.filters = FilterState::cleared(&self.schema);
    }

    /// Items passing the current query and filters
    pub fn filtered(&self) -> Vec<&CatalogItem> {
        filter_items(&self.items, &self.query, &self.filters, &self.schema)
    }

    pub fn result_count(&self) -> usize {
        self.filtered().len()
    }

    /// Select choices of one filter, drawn from the loaded items
    pub fn options(&self, spec: &FilterSpec) -> Vec<String> {
        filter_options(&self.items, spec)
    }

    /// Choices of every filter, in panel order
    pub fn all_options(&self) -> Vec<(&FilterSpec, Vec<String>)> {
        self.schema
            .filters
            .iter()
            .map(|spec| (spec, self.options(spec)))
            .collect()
    }
}
