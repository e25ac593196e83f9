//! Generic handlers shared by every collection.
//!
//! Each collection gets its own sub-router whose state is that collection's
//! service. Methods not registered on a path answer 405.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, Uri},
    routing::get,
    Json, Router,
};
use models::{MutableRecord, Record};
use service::collections::CollectionService;

use crate::errors::JsonApiError;

pub async fn list<K: Record>(State(svc): State<CollectionService<K>>) -> Json<Vec<K>> {
    Json(svc.list().await)
}

/// The body is taken raw so any decode failure maps to 400, whatever the content type.
pub async fn create<K: Record>(
    State(svc): State<CollectionService<K>>,
    body: Bytes,
) -> Result<(StatusCode, Json<K>), JsonApiError> {
    let created = svc.create(&body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_one<K: Record>(
    State(svc): State<CollectionService<K>>,
    Path(id): Path<String>,
) -> Result<Json<K>, JsonApiError> {
    Ok(Json(svc.get(&id).await?))
}

pub async fn update<K: MutableRecord>(
    State(svc): State<CollectionService<K>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<K>, JsonApiError> {
    Ok(Json(svc.update(&id, &body).await?))
}

pub async fn remove<K: MutableRecord>(
    State(svc): State<CollectionService<K>>,
    Path(id): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    svc.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Anything below `/{collection}/{id}` is a malformed id (400).
pub async fn nested_path(uri: Uri) -> JsonApiError {
    JsonApiError::new(
        StatusCode::BAD_REQUEST,
        "Validation Error",
        Some(format!("invalid id in path {}", uri.path())),
    )
}

fn base_routes<K: Record>() -> Router<CollectionService<K>> {
    let base = format!("/{}", K::COLLECTION);
    Router::new()
        .route(&base, get(list::<K>).post(create::<K>))
        .route(&format!("{base}/"), get(list::<K>).post(create::<K>))
}

/// List, create and get-by-id only.
pub fn append_only_routes<K: Record>(svc: CollectionService<K>) -> Router {
    base_routes::<K>()
        .route(&format!("/{}/:id", K::COLLECTION), get(get_one::<K>))
        .route(&format!("/{}/:id/*rest", K::COLLECTION), get(nested_path))
        .with_state(svc)
}

/// Full CRUD.
pub fn mutable_routes<K: MutableRecord>(svc: CollectionService<K>) -> Router {
    base_routes::<K>()
        .route(
            &format!("/{}/:id", K::COLLECTION),
            get(get_one::<K>).put(update::<K>).delete(remove::<K>),
        )
        .route(
            &format!("/{}/:id/*rest", K::COLLECTION),
            get(nested_path).put(nested_path).delete(nested_path),
        )
        .with_state(svc)
}
