//! Catalog Client - HTTP client for the catalog backend
//!
//! Public listing and detail pages, the token-gated admin panel, image URL
//! resolution and contact links.

pub mod api;
pub mod config;
pub mod contact;
pub mod error;
pub mod http;
pub mod images;
pub mod pages;
pub mod session;

pub use api::{AdminApi, CatalogApi};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient, UploadFile};
pub use images::{ImageResolver, PLACEHOLDER_IMAGE};
pub use pages::{AdminPanel, CatalogPage, Confirm, DetailPage, Route};
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};

// Re-export shared types for convenience
pub use shared::{CatalogItem, CatalogSchema, FilterState, ItemForm, PhotoRef};

/// Everything a front-end needs for one collection
#[derive(Debug, Clone)]
pub struct CatalogClient {
    pub schema: CatalogSchema,
    pub catalog: CatalogApi,
    pub admin: AdminApi,
    pub images: ImageResolver,
}

impl CatalogClient {
    /// Build the APIs for `config.collection`, with the session stored in
    /// `config.token_path`
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Self::with_session(config, Session::file(&config.token_path))
    }

    pub fn with_session(config: &ClientConfig, session: Session) -> ClientResult<Self> {
        let schema = CatalogSchema::for_collection(&config.collection).ok_or_else(|| {
            ClientError::Config(format!("unknown collection: {}", config.collection))
        })?;
        let http = config.build_http_client()?;
        Ok(Self {
            catalog: CatalogApi::new(http.clone(), &config.collection),
            admin: AdminApi::new(http, session, &config.collection),
            images: ImageResolver::new(config.backend_origin.clone()),
            schema,
        })
    }

    pub fn catalog_page(&self) -> CatalogPage {
        CatalogPage::new(self.catalog.clone(), self.schema.clone())
    }

    pub async fn detail_page(&self, id: &str) -> DetailPage {
        DetailPage::load(&self.catalog, self.schema.clone(), id).await
    }

    pub fn admin_panel(&self) -> AdminPanel {
        AdminPanel::new(self.admin.clone(), self.schema.clone())
    }
}
