//! HTTP surface: the places proxy under `/api/foursquare` and the catalog
//! under `/api/restaurants`.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderValue, Method, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use crate::catalog::CatalogReader;
use crate::catalog::sqlite::SqliteCatalog;
use crate::config::ServerConfig;
use crate::model::{MenuItem, RestaurantSummary};
use crate::places::foursquare::FoursquareClient;
use crate::places::{CuisineResponse, NearbyResponse, PlacesService};

/// Shared handles for every request. Nothing in here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    pub places: Arc<PlacesService>,
    pub catalog: Arc<CatalogReader>,
}

impl AppState {
    pub fn new(places: PlacesService, catalog: CatalogReader) -> Self {
        Self {
            places: Arc::new(places),
            catalog: Arc::new(catalog),
        }
    }

    /// Wire the production collaborators: the provider over HTTP and the
    /// SQLite catalog at the configured path.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let api_key = match config.api_key() {
            Some(key) => key,
            None => {
                warn!("no places API key configured; /api/foursquare requests will be rejected upstream");
                ""
            }
        };
        let search = FoursquareClient::with_base_url(api_key, config.places_url.as_str());

        if let Some(parent) = config.db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let db_path = config
            .db_path
            .to_str()
            .context("catalog path is not valid UTF-8")?;
        let store = SqliteCatalog::open(db_path)?;

        Ok(Self::new(
            PlacesService::new(Arc::new(search)),
            CatalogReader::new(Arc::new(store)),
        ))
    }
}

/// Request failures, mapped onto status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("places provider unavailable: {0:#}")]
    Places(anyhow::Error),
    #[error("catalog unavailable: {0:#}")]
    Catalog(anyhow::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Places(_) => StatusCode::BAD_GATEWAY,
            ApiError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!("{}", self);
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// One CORS policy for every route: any origin, or exactly one.
pub fn cors_layer(origin: Option<&str>) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);
    match origin {
        None => Ok(layer.allow_origin(Any)),
        Some(origin) => {
            let value = HeaderValue::from_str(origin)
                .with_context(|| format!("invalid CORS origin: {origin}"))?;
            Ok(layer.allow_origin(value))
        }
    }
}

pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/foursquare/nearby", get(nearby_handler))
        .route("/api/foursquare/cuisine", get(cuisine_handler))
        .route("/api/restaurants", get(list_restaurants_handler))
        .route("/api/restaurants/{id}/menu", get(menu_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl+C.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let state = AppState::from_config(config)?;
    let app = router(state, cors_layer(config.cors_origin())?);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct Coordinates {
    lat: f64,
    lng: f64,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn nearby_handler(
    State(state): State<AppState>,
    Query(at): Query<Coordinates>,
) -> Result<Json<NearbyResponse>, ApiError> {
    let nearby = state
        .places
        .fetch_nearby(at.lat, at.lng)
        .await
        .map_err(ApiError::Places)?;
    Ok(Json(nearby))
}

async fn cuisine_handler(
    State(state): State<AppState>,
    Query(at): Query<Coordinates>,
) -> Result<Json<CuisineResponse>, ApiError> {
    let cuisine = state
        .places
        .fetch_cuisine(at.lat, at.lng)
        .await
        .map_err(ApiError::Places)?;
    Ok(Json(cuisine))
}

async fn list_restaurants_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantSummary>>, ApiError> {
    let restaurants = state
        .catalog
        .list_restaurants()
        .await
        .map_err(ApiError::Catalog)?;
    Ok(Json(restaurants))
}

async fn menu_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<MenuItem>>, ApiError> {
    let menu = state
        .catalog
        .get_menu(&id)
        .await
        .map_err(ApiError::Catalog)?;
    Ok(Json(menu))
}
