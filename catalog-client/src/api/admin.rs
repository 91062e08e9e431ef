//! Admin endpoints (bearer token)

use crate::http::{HttpClient, NetworkHttpClient, UploadFile};
use crate::session::Session;
use crate::{ClientError, ClientResult};
use serde_json::{Map, Value};
use shared::CatalogItem;
use shared::client::{LoginRequest, LoginResponse, UploadResponse, paths};
use std::path::Path;

/// Authenticated CRUD over one collection
#[derive(Debug, Clone)]
pub struct AdminApi {
    http: NetworkHttpClient,
    session: Session,
    collection: String,
}

impl AdminApi {
    /// `http` is wrapped with `session` so every request carries the token
    pub fn new(http: NetworkHttpClient, session: Session, collection: impl Into<String>) -> Self {
        Self {
            http: http.with_session(session.clone()),
            session,
            collection: collection.into(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Exchange credentials for a token and store it
    pub async fn login(&self, user: &str, pass: &str) -> ClientResult<()> {
        let request = LoginRequest {
            user: user.trim().to_string(),
            pass: pass.to_string(),
        };
        let response: LoginResponse = self.http.post(paths::ADMIN_LOGIN, &request).await?;
        let token = response
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ClientError::InvalidResponse("login response has no token".into()))?;
        self.session.begin(&token)?;
        tracing::info!(user = %request.user, "admin logged in");
        Ok(())
    }

    /// Forget the stored token; the backend keeps no session to close
    pub fn logout(&self) -> ClientResult<()> {
        self.session.end()?;
        tracing::info!("admin logged out");
        Ok(())
    }

    /// `GET /api/admin/<collection>`, inactive items included
    pub async fn list(&self) -> ClientResult<Vec<CatalogItem>> {
        let body: Value = self.http.get(&paths::admin_list(&self.collection)).await?;
        Ok(super::decode_items(body))
    }

    /// Look a record up in the admin list
    pub async fn find(&self, id: &str) -> ClientResult<CatalogItem> {
        self.list()
            .await?
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("{} {}", self.collection, id)))
    }

    pub async fn create(&self, payload: &Map<String, Value>) -> ClientResult<Value> {
        let created: Value = self
            .http
            .post(&paths::admin_list(&self.collection), payload)
            .await?;
        tracing::info!(collection = %self.collection, "item created");
        Ok(created)
    }

    pub async fn update(&self, id: &str, payload: &Map<String, Value>) -> ClientResult<Value> {
        let updated: Value = self
            .http
            .put(&paths::admin_item(&self.collection, &super::encode_segment(id)), payload)
            .await?;
        tracing::info!(collection = %self.collection, id, "item updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let _: Value = self
            .http
            .delete(&paths::admin_item(&self.collection, &super::encode_segment(id)))
            .await?;
        tracing::info!(collection = %self.collection, id, "item deleted");
        Ok(())
    }

    /// Upload files; returns the stored paths in upload order
    pub async fn upload(&self, files: Vec<UploadFile>) -> ClientResult<Vec<String>> {
        if !self.session.is_authenticated() {
            return Err(ClientError::Unauthorized("No autorizado".into()));
        }
        if files.is_empty() {
            return Ok(Vec::new());
        }
        let response: UploadResponse = self
            .http
            .post_multipart(paths::UPLOAD_MULTIPLE, files)
            .await?;
        tracing::info!(count = response.paths.len(), "files uploaded");
        Ok(response.paths)
    }

    /// Read files from disk and upload them
    pub async fn upload_paths<P: AsRef<Path>>(&self, files: &[P]) -> ClientResult<Vec<String>> {
        if !self.session.is_authenticated() {
            return Err(ClientError::Unauthorized("No autorizado".into()));
        }
        let mut parts = Vec::with_capacity(files.len());
        for path in files {
            parts.push(read_upload(path.as_ref()).await?);
        }
        self.upload(parts).await
    }
}

/// Load one file as an upload part, guessing its type from the extension
pub async fn read_upload(path: &Path) -> ClientResult<UploadFile> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let mime = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    Ok(UploadFile {
        file_name,
        mime,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_upload_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frente.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let file = read_upload(&path).await.unwrap();
        assert_eq!(file.file_name, "frente.png");
        assert_eq!(file.mime, "image/png");
        assert_eq!(file.bytes.len(), 4);
    }

    #[tokio::test]
    async fn test_upload_without_token_is_rejected_locally() {
        let http = NetworkHttpClient::new(&crate::ClientConfig::new("http://127.0.0.1:9")).unwrap();
        let api = AdminApi::new(http, Session::memory(), "planes");
        let err = api
            .upload(vec![UploadFile {
                file_name: "a.jpg".into(),
                mime: "image/jpeg".into(),
                bytes: vec![1],
            }])
            .await
            .unwrap_err();
        assert!(err.is_auth_failure());
    }
}
