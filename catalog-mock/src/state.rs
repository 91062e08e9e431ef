//! In-memory backend state

use serde_json::{Map, Value, json};
use shared::CatalogSchema;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One request as seen by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
}

/// Uploaded file kept in memory
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Backend state shared by all handlers
#[derive(Debug)]
pub struct MockState {
    user: String,
    pass: String,
    collections: Mutex<BTreeMap<String, Vec<Map<String, Value>>>>,
    tokens: Mutex<HashSet<String>>,
    uploads: Mutex<BTreeMap<String, StoredUpload>>,
    journal: Mutex<Vec<RecordedRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockState {
    /// Empty collections, one admin account
    pub fn new(user: impl Into<String>, pass: impl Into<String>) -> Self {
        let collections = ["vehiculos", "planes"]
            .into_iter()
            .map(|c| (c.to_string(), Vec::new()))
            .collect();
        Self {
            user: user.into(),
            pass: pass.into(),
            collections: Mutex::new(collections),
            tokens: Mutex::new(HashSet::new()),
            uploads: Mutex::new(BTreeMap::new()),
            journal: Mutex::new(Vec::new()),
        }
    }

    /// Sample vehicles and plans
    pub fn seeded(user: impl Into<String>, pass: impl Into<String>) -> Self {
        let state = Self::new(user, pass);
        for item in seed_vehicles() {
            state.insert("vehiculos", item);
        }
        for item in seed_plans() {
            state.insert("planes", item);
        }
        state
    }

    pub fn check_credentials(&self, user: &str, pass: &str) -> bool {
        user == self.user && pass == self.pass
    }

    pub fn issue_token(&self) -> String {
        let token = uuid::Uuid::new_v4().simple().to_string();
        lock(&self.tokens).insert(token.clone());
        token
    }

    pub fn is_valid_token(&self, token: &str) -> bool {
        lock(&self.tokens).contains(token)
    }

    /// Invalidate every issued token (simulates expiry)
    pub fn revoke_tokens(&self) {
        lock(&self.tokens).clear();
    }

    pub fn has_collection(&self, collection: &str) -> bool {
        lock(&self.collections).contains_key(collection)
    }

    /// Store an item, assigning an id when it has none. Returns the id.
    pub fn insert(&self, collection: &str, value: Value) -> String {
        let mut item = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let id = match item.get("id") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => uuid::Uuid::new_v4().simple().to_string(),
        };
        item.insert("id".into(), Value::String(id.clone()));
        lock(&self.collections)
            .entry(collection.to_string())
            .or_default()
            .push(item);
        id
    }

    /// All items of a collection, inactive ones included
    pub fn items(&self, collection: &str) -> Vec<Map<String, Value>> {
        lock(&self.collections)
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Items shown to the public: explicit `false` on the active flag hides an item
    pub fn public_items(&self, collection: &str) -> Vec<Map<String, Value>> {
        let active_field = CatalogSchema::for_collection(collection).and_then(|s| s.active_field);
        self.items(collection)
            .into_iter()
            .filter(|item| match &active_field {
                Some(field) => item.get(field) != Some(&Value::Bool(false)),
                None => true,
            })
            .collect()
    }

    pub fn find(&self, collection: &str, id: &str) -> Option<Map<String, Value>> {
        lock(&self.collections)
            .get(collection)?
            .iter()
            .find(|item| item_id(item) == Some(id))
            .cloned()
    }

    /// Replace the fields of an item, keeping its id
    pub fn replace(&self, collection: &str, id: &str, mut fields: Map<String, Value>) -> Option<Map<String, Value>> {
        let mut collections = lock(&self.collections);
        let item = collections
            .get_mut(collection)?
            .iter_mut()
            .find(|item| item_id(item) == Some(id))?;
        fields.insert("id".into(), Value::String(id.to_string()));
        *item = fields;
        Some(item.clone())
    }

    pub fn remove(&self, collection: &str, id: &str) -> bool {
        let mut collections = lock(&self.collections);
        let Some(items) = collections.get_mut(collection) else {
            return false;
        };
        let before = items.len();
        items.retain(|item| item_id(item) != Some(id));
        items.len() < before
    }

    pub fn store_upload(&self, name: &str, upload: StoredUpload) -> String {
        let stored = format!("{}-{}", uuid::Uuid::new_v4().simple(), sanitize_file_name(name));
        lock(&self.uploads).insert(stored.clone(), upload);
        format!("/uploads/{}", stored)
    }

    pub fn upload(&self, name: &str) -> Option<StoredUpload> {
        lock(&self.uploads).get(name).cloned()
    }

    pub fn record(&self, request: RecordedRequest) {
        lock(&self.journal).push(request);
    }

    /// Every request received so far, oldest first
    pub fn journal(&self) -> Vec<RecordedRequest> {
        lock(&self.journal).clone()
    }

    pub fn clear_journal(&self) {
        lock(&self.journal).clear();
    }

    /// Number of recorded requests with this method and path
    pub fn count(&self, method: &str, path: &str) -> usize {
        lock(&self.journal)
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

fn item_id(item: &Map<String, Value>) -> Option<&str> {
    item.get("id").and_then(Value::as_str)
}

fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

fn seed_vehicles() -> Vec<Value> {
    vec![
        json!({
            "id": "v1",
            "marca": "Mercedes-Benz",
            "modelo": "Clase E Carroza",
            "anio": 2019,
            "precio": 85000,
            "color": "Negro",
            "pasajeros": 4,
            "transmision": "Automática",
            "caracteristicas": ["Aire acondicionado", "Iluminación LED"],
            "fotoPrincipal": "/uploads/mb-frente.jpg",
            "galeriaFotos": ["/uploads/mb-frente.jpg", "/uploads/mb-lateral.jpg"]
        }),
        json!({
            "id": "v2",
            "marca": "Cadillac",
            "modelo": "XTS Limusina",
            "anio": 2016,
            "precio": "62000",
            "color": "Negro",
            "pasajeros": 7,
            "caracteristicas": "Bar, Cortinas"
        }),
        json!({
            "id": "v3",
            "marca": "Toyota",
            "modelo": "Hiace",
            "anio": 2021,
            "precio": 41000,
            "color": "Gris",
            "pasajeros": 12,
            "galeriaFotos": [{"src": "/uploads/hiace.jpg", "titulo": "Frente"}]
        }),
    ]
}

fn seed_plans() -> Vec<Value> {
    vec![
        json!({
            "id": "p1",
            "nombre": "Plan Básico",
            "descripcionCorta": "Traslado y velatorio",
            "tipo": "Inhumación",
            "precio": 1200,
            "activo": true,
            "incluye": ["Traslado", "Velatorio 24h"],
            "ataudes": ["Pino"],
            "tags": ["economico"]
        }),
        json!({
            "id": "p2",
            "nombre": "Plan Premium",
            "descripcionCorta": "Servicio completo",
            "tipo": "Cremación",
            "precio": 4500,
            "activo": true,
            "incluye": ["Traslado", "Velatorio 48h", "Cremación"],
            "ataudes": ["Caoba", "Roble"],
            "tags": ["premium", "cremacion"],
            "fotoPrincipal": "/uploads/premium.jpg"
        }),
        json!({
            "id": "p3",
            "nombre": "Plan Retirado",
            "precio": 900,
            "activo": false,
            "tags": ["economico"]
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_items_hide_inactive() {
        let state = MockState::seeded("admin", "secret");
        assert_eq!(state.items("planes").len(), 3);
        let public: Vec<_> = state
            .public_items("planes")
            .into_iter()
            .filter_map(|i| i.get("id").and_then(Value::as_str).map(str::to_string))
            .collect();
        assert_eq!(public, vec!["p1", "p2"]);
        assert_eq!(state.public_items("vehiculos").len(), 3);
    }

    #[test]
    fn test_crud() {
        let state = MockState::new("admin", "secret");
        let id = state.insert("planes", json!({"nombre": "Nuevo"}));
        assert!(state.find("planes", &id).is_some());

        let mut fields = Map::new();
        fields.insert("nombre".into(), json!("Cambiado"));
        let updated = state.replace("planes", &id, fields).unwrap();
        assert_eq!(updated.get("id"), Some(&json!(id)));
        assert_eq!(updated.get("nombre"), Some(&json!("Cambiado")));

        assert!(state.remove("planes", &id));
        assert!(!state.remove("planes", &id));
        assert!(state.replace("planes", &id, Map::new()).is_none());
    }

    #[test]
    fn test_tokens() {
        let state = MockState::new("admin", "secret");
        assert!(state.check_credentials("admin", "secret"));
        assert!(!state.check_credentials("admin", "nope"));
        let token = state.issue_token();
        assert!(state.is_valid_token(&token));
        state.revoke_tokens();
        assert!(!state.is_valid_token(&token));
    }

    #[test]
    fn test_upload_names() {
        let state = MockState::new("admin", "secret");
        let path = state.store_upload(
            "mi foto.jpg",
            StoredUpload {
                content_type: "image/jpeg".into(),
                bytes: vec![1, 2],
            },
        );
        assert!(path.starts_with("/uploads/"));
        assert!(path.ends_with("-mi_foto.jpg"));
        let name = path.trim_start_matches("/uploads/");
        assert_eq!(state.upload(name).unwrap().bytes, vec![1, 2]);
    }
}
