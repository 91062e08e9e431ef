//! Request/response types of the catalog REST API
//!
//! Shared between catalog-client and catalog-mock.

use serde::{Deserialize, Serialize};

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub user: String,
    pub pass: String,
}

/// Login response body (`token` is absent when the backend misbehaves)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// Multipart upload response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub paths: Vec<String>,
}

/// Error body returned by the backend on non-2xx responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

/// Multipart field name carrying uploaded files
pub const UPLOAD_FIELD: &str = "files";

/// Endpoint paths, relative to the API base URL.
///
/// Item ids are inserted verbatim; callers pass them already percent-encoded.
pub mod paths {
    pub const ADMIN_LOGIN: &str = "/api/admin/login";
    pub const UPLOAD_MULTIPLE: &str = "/api/upload/multiple";

    pub fn public_list(collection: &str) -> String {
        format!("/api/{collection}")
    }

    pub fn public_item(collection: &str, id: &str) -> String {
        format!("/api/{collection}/{id}")
    }

    pub fn admin_list(collection: &str) -> String {
        format!("/api/admin/{collection}")
    }

    pub fn admin_item(collection: &str, id: &str) -> String {
        format!("/api/admin/{collection}/{id}")
    }
}
