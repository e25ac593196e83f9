use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use models::{Car, FlowerLot, FurnitureItem};
use service::{collections::CollectionService, storage::SnapshotStore};

pub mod collections;

/// Services handed to the router; built once at startup around a single store.
#[derive(Clone)]
pub struct AppState {
    pub cars: CollectionService<Car>,
    pub furniture: CollectionService<FurnitureItem>,
    pub flowers: CollectionService<FlowerLot>,
}

impl AppState {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self {
            cars: CollectionService::new(Arc::clone(&store)),
            furniture: CollectionService::new(Arc::clone(&store)),
            flowers: CollectionService::new(store),
        }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> (StatusCode, String) {
    match service::metrics::encode_metrics() {
        Ok(text) => (StatusCode::OK, text),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}")),
    }
}

/// Build the full application router: the three collections plus health and metrics.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics));

    ops.merge(collections::mutable_routes(state.cars))
        .merge(collections::mutable_routes(state.furniture))
        .merge(collections::append_only_routes(state.flowers))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
