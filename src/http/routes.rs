//! HTTP route definitions

use axum::{
    error_handling::HandleErrorLayer,
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderValue, Method},
    middleware,
    response::Json,
    routing::get,
    BoxError, Router,
};
use serde::Serialize;
use serde_json::Value;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::app::AppState;
use crate::config::Config;
use crate::http::error::AppError;
use crate::http::middleware::limit_writes;
use crate::store::{from_json_object, CreateItemRequest, CreateStoreRequest, Item, Store};
use crate::util::time::uptime_secs;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let resource_routes = Router::new()
        .route("/store", get(list_stores_handler).post(create_store_handler))
        .route("/store/:store_id", get(get_store_handler))
        .route("/item", get(list_items_handler).post(create_item_handler))
        .route("/item/:item_id", get(get_item_handler))
        .layer(middleware::from_fn_with_state(state.clone(), limit_writes));

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(resource_routes)
        .fallback(fallback_handler);

    with_service_layers(router, &state.config).with_state(state)
}

/// Wrap a router in the timeout, compression, tracing and CORS layers
fn with_service_layers(router: Router<AppState>, config: &Config) -> Router<AppState> {
    router
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(timeout_error))
                .layer(TimeoutLayer::new(config.request_timeout)),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config.client_origins))
}

/// Render a failed or expired request as a JSON error
async fn timeout_error(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        AppError::Timeout
    } else {
        AppError::Internal(err.to_string())
    }
}

async fn fallback_handler() -> AppError {
    AppError::NotFound("Resource not found".to_string())
}

/// CORS for the configured origins, or any origin when none are configured
fn build_cors(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|s| s.parse::<HeaderValue>().ok())
        .collect();

    base.allow_origin(allowed_origins).allow_credentials(true)
}

// ============================================================================
// Health endpoint
// ============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
    stores: usize,
    items: usize,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: uptime_secs(),
        stores: state.catalog.store_count(),
        items: state.catalog.item_count(),
    })
}

// ============================================================================
// Store endpoints
// ============================================================================

#[derive(Serialize)]
struct StoreListResponse {
    stores: Vec<Store>,
}

async fn list_stores_handler(State(state): State<AppState>) -> Json<StoreListResponse> {
    Json(StoreListResponse {
        stores: state.catalog.list_stores(),
    })
}

async fn create_store_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Store>, AppError> {
    let Json(body) = payload?;
    let req: CreateStoreRequest = from_json_object(body)?;
    let store = state.catalog.create_store(req.validate()?);

    Ok(Json(store))
}

async fn get_store_handler(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<Json<Store>, AppError> {
    Ok(Json(state.catalog.get_store(&store_id)?))
}

// ============================================================================
// Item endpoints
// ============================================================================

#[derive(Serialize)]
struct ItemListResponse {
    items: Vec<Item>,
}

async fn list_items_handler(State(state): State<AppState>) -> Json<ItemListResponse> {
    Json(ItemListResponse {
        items: state.catalog.list_items(),
    })
}

async fn create_item_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Item>, AppError> {
    let Json(body) = payload?;
    let req: CreateItemRequest = from_json_object(body)?;
    let item = state.catalog.create_item(req.validate()?)?;

    Ok(Json(item))
}

async fn get_item_handler(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<Item>, AppError> {
    Ok(Json(state.catalog.get_item(&item_id)?))
}
