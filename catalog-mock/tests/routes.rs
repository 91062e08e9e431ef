use catalog_mock::{MockState, spawn};
use serde_json::{Value, json};
use std::sync::Arc;

async fn start() -> (Arc<MockState>, String) {
    let state = Arc::new(MockState::seeded("admin", "secret"));
    let addr = spawn(state.clone()).await.unwrap();
    (state, format!("http://{addr}"))
}

async fn login(base: &str) -> String {
    let body: Value = reqwest::Client::new()
        .post(format!("{base}/api/admin/login"))
        .json(&json!({"user": "admin", "pass": "secret"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn public_routes_hide_inactive_plans() {
    let (_state, base) = start().await;

    let list: Vec<Value> = reqwest::get(format!("{base}/api/planes"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.len(), 2);

    let hidden = reqwest::get(format!("{base}/api/planes/p3")).await.unwrap();
    assert_eq!(hidden.status(), 404);
    let body: Value = hidden.json().await.unwrap();
    assert!(body["message"].is_string());

    let unknown = reqwest::get(format!("{base}/api/barcos")).await.unwrap();
    assert_eq!(unknown.status(), 404);
}

#[tokio::test]
async fn admin_routes_require_bearer_token() {
    let (state, base) = start().await;
    let client = reqwest::Client::new();

    let denied = client
        .get(format!("{base}/api/admin/planes"))
        .send()
        .await
        .unwrap();
    assert_eq!(denied.status(), 401);
    let body: Value = denied.json().await.unwrap();
    assert_eq!(body["message"], "No autorizado");

    let token = login(&base).await;
    let list: Vec<Value> = client
        .get(format!("{base}/api/admin/planes"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.len(), 3);

    let recorded = state.journal();
    let last = recorded.last().unwrap();
    assert_eq!(last.path, "/api/admin/planes");
    assert_eq!(last.authorization.as_deref(), Some(format!("Bearer {token}").as_str()));
}

#[tokio::test]
async fn bad_credentials_are_rejected() {
    let (_state, base) = start().await;
    let response = reqwest::Client::new()
        .post(format!("{base}/api/admin/login"))
        .json(&json!({"user": "admin", "pass": "wrong"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Credenciales inválidas");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn create_validates_required_fields() {
    let (state, base) = start().await;
    let token = login(&base).await;
    let client = reqwest::Client::new();

    let rejected = client
        .post(format!("{base}/api/admin/vehiculos"))
        .bearer_auth(&token)
        .json(&json!({"marca": "Ford", "modelo": " "}))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), 400);
    let body: Value = rejected.json().await.unwrap();
    assert_eq!(body["message"], "Faltan campos: Modelo");

    let created = client
        .post(format!("{base}/api/admin/vehiculos"))
        .bearer_auth(&token)
        .json(&json!({"marca": "Ford", "modelo": "Transit"}))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), 201);
    assert_eq!(state.items("vehiculos").len(), 4);
}
