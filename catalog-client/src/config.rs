//! Client configuration

use std::path::PathBuf;

/// Default API origin during development
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";
/// Default collection
pub const DEFAULT_COLLECTION: &str = "planes";
/// Default location of the persisted session
pub const DEFAULT_TOKEN_PATH: &str = ".catalog/session.json";

/// Client configuration for talking to the catalog backend
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | CATALOG_API_URL | http://localhost:4000 | API origin |
/// | CATALOG_BACKEND_ORIGIN | (unset) | Origin serving `/uploads/...` |
/// | CATALOG_COLLECTION | planes | Collection segment |
/// | CATALOG_TOKEN_PATH | .catalog/session.json | Session file |
/// | CATALOG_TIMEOUT_SECS | (unset) | Request timeout |
/// | WHATSAPP_PHONE | (unset) | Contact number for WhatsApp links |
/// | CONTACT_PHONE | (unset) | Contact number for call links |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:4000")
    pub base_url: String,

    /// Origin used to resolve `/uploads/...` image paths
    pub backend_origin: Option<String>,

    /// Collection segment, e.g. "planes" or "vehiculos"
    pub collection: String,

    /// File holding the admin bearer token
    pub token_path: PathBuf,

    /// Request timeout in seconds; `None` keeps the transport default
    pub timeout: Option<u64>,

    /// WhatsApp contact number (any formatting, digits are extracted)
    pub whatsapp_phone: Option<String>,

    /// Phone contact number
    pub contact_phone: Option<String>,
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

impl ClientConfig {
    /// Create a configuration with defaults for everything but the base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            backend_origin: None,
            collection: DEFAULT_COLLECTION.to_string(),
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
            timeout: None,
            whatsapp_phone: None,
            contact_phone: None,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::new(env_opt("CATALOG_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()));
        config.backend_origin = env_opt("CATALOG_BACKEND_ORIGIN");
        if let Some(collection) = env_opt("CATALOG_COLLECTION") {
            config.collection = collection;
        }
        if let Some(path) = env_opt("CATALOG_TOKEN_PATH") {
            config.token_path = PathBuf::from(path);
        }
        config.timeout = env_opt("CATALOG_TIMEOUT_SECS").and_then(|s| s.parse().ok());
        config.whatsapp_phone = env_opt("WHATSAPP_PHONE");
        config.contact_phone = env_opt("CONTACT_PHONE");
        config
    }

    /// Set the image origin
    pub fn with_backend_origin(mut self, origin: impl Into<String>) -> Self {
        self.backend_origin = Some(origin.into());
        self
    }

    /// Set the collection
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Set the session file
    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = path.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Set the contact numbers
    pub fn with_phones(mut self, whatsapp: Option<String>, contact: Option<String>) -> Self {
        self.whatsapp_phone = whatsapp;
        self.contact_phone = contact;
        self
    }

    /// Create an anonymous HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::NetworkHttpClient> {
        crate::NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
