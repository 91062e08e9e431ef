use crate::error::{ApiError, ApiResult};
use crate::state::{MockState, RecordedRequest, StoredUpload};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Multipart, Path, Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::{Map, Value};
use shared::CatalogSchema;
use shared::client::{ApiMessage, LoginRequest, LoginResponse, UPLOAD_FIELD, UploadResponse};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

type SharedState = Arc<MockState>;

/// Full backend router
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/admin/login", post(login))
        .route("/api/upload/multiple", post(upload_multiple))
        .route("/api/admin/{collection}", get(admin_list).post(admin_create))
        .route(
            "/api/admin/{collection}/{id}",
            put(admin_update).delete(admin_delete),
        )
        .route("/api/{collection}", get(public_list))
        .route("/api/{collection}/{id}", get(public_item))
        .route("/uploads/{name}", get(serve_upload))
        .layer(middleware::from_fn_with_state(state.clone(), journal))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Record method, path and authorization header of every request
async fn journal(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    state.record(RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        authorization: request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string),
    });
    next.run(request).await
}

fn require_token(state: &MockState, headers: &HeaderMap) -> ApiResult<()> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .unwrap_or("");
    if token.is_empty() || !state.is_valid_token(token) {
        return Err(ApiError::Unauthorized);
    }
    Ok(())
}

fn require_collection(state: &MockState, collection: &str) -> ApiResult<()> {
    if state.has_collection(collection) {
        Ok(())
    } else {
        Err(ApiError::NotFound(format!("Colección no encontrada: {}", collection)))
    }
}

fn not_found() -> ApiError {
    ApiError::NotFound("No encontrado".into())
}

/// Reject records missing a required field of the collection
fn validate(collection: &str, fields: &Map<String, Value>) -> ApiResult<()> {
    let Some(schema) = CatalogSchema::for_collection(collection) else {
        return Ok(());
    };
    let missing: Vec<&str> = schema
        .fields
        .iter()
        .filter(|f| f.required)
        .filter(|f| match fields.get(&f.key) {
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(Value::Null) | None => true,
            _ => false,
        })
        .map(|f| f.label.as_str())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("Faltan campos: {}", missing.join(", "))))
    }
}

async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    if !state.check_credentials(&req.user, &req.pass) {
        tracing::info!(user = %req.user, "login rejected");
        return Err(ApiError::InvalidCredentials);
    }
    tracing::info!(user = %req.user, "login accepted");
    Ok(Json(LoginResponse {
        token: Some(state.issue_token()),
    }))
}

async fn public_list(
    State(state): State<SharedState>,
    Path(collection): Path<String>,
) -> ApiResult<Json<Vec<Map<String, Value>>>> {
    require_collection(&state, &collection)?;
    Ok(Json(state.public_items(&collection)))
}

async fn public_item(
    State(state): State<SharedState>,
    Path((collection, id)): Path<(String, String)>,
) -> ApiResult<Json<Map<String, Value>>> {
    require_collection(&state, &collection)?;
    state
        .public_items(&collection)
        .into_iter()
        .find(|item| item.get("id").and_then(Value::as_str) == Some(id.as_str()))
        .map(Json)
        .ok_or_else(not_found)
}

async fn admin_list(
    State(state): State<SharedState>,
    Path(collection): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Map<String, Value>>>> {
    require_token(&state, &headers)?;
    require_collection(&state, &collection)?;
    Ok(Json(state.items(&collection)))
}

async fn admin_create(
    State(state): State<SharedState>,
    Path(collection): Path<String>,
    headers: HeaderMap,
    Json(mut fields): Json<Map<String, Value>>,
) -> ApiResult<(StatusCode, Json<Map<String, Value>>)> {
    require_token(&state, &headers)?;
    require_collection(&state, &collection)?;
    validate(&collection, &fields)?;
    fields.remove("id");
    let id = state.insert(&collection, Value::Object(fields));
    let created = state.find(&collection, &id).ok_or_else(not_found)?;
    tracing::info!(%collection, %id, "item created");
    Ok((StatusCode::CREATED, Json(created)))
}

async fn admin_update(
    State(state): State<SharedState>,
    Path((collection, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(fields): Json<Map<String, Value>>,
) -> ApiResult<Json<Map<String, Value>>> {
    require_token(&state, &headers)?;
    require_collection(&state, &collection)?;
    validate(&collection, &fields)?;
    let updated = state
        .replace(&collection, &id, fields)
        .ok_or_else(not_found)?;
    tracing::info!(%collection, %id, "item updated");
    Ok(Json(updated))
}

async fn admin_delete(
    State(state): State<SharedState>,
    Path((collection, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> ApiResult<Json<ApiMessage>> {
    require_token(&state, &headers)?;
    require_collection(&state, &collection)?;
    if !state.remove(&collection, &id) {
        return Err(not_found());
    }
    tracing::info!(%collection, %id, "item deleted");
    Ok(Json(ApiMessage::new("Eliminado")))
}

async fn upload_multiple(
    State(state): State<SharedState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    require_token(&state, &headers)?;

    let mut paths = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let name = field.file_name().unwrap_or("file").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?;
        paths.push(state.store_upload(
            &name,
            StoredUpload {
                content_type,
                bytes: bytes.to_vec(),
            },
        ));
    }

    if paths.is_empty() {
        return Err(ApiError::BadRequest("No se recibieron archivos".into()));
    }
    tracing::info!(count = paths.len(), "files uploaded");
    Ok(Json(UploadResponse { paths }))
}

async fn serve_upload(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> ApiResult<Response> {
    let upload = state.upload(&name).ok_or_else(not_found)?;
    Ok((
        [(header::CONTENT_TYPE, upload.content_type)],
        Bytes::from(upload.bytes),
    )
        .into_response())
}
