use anyhow::Result;
use axum::{
    extract::{Json, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::RwLock;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::{error, info, warn};

use crate::clustering::{ClusterMetrics, ClusteringEngine, ClusteringError, Hospital, House};
use crate::environment::ServerConfig;
use crate::TARGET_WEB_REQUEST;

/// The one engine every request works against. Mutations take the write lock.
pub type SharedEngine = Arc<RwLock<ClusteringEngine>>;

pub fn shared_engine(engine: ClusteringEngine) -> SharedEngine {
    Arc::new(RwLock::new(engine))
}

/// Request payload for `/config/set-grid`.
#[derive(Debug, Deserialize)]
pub struct GridRequest {
    pub m: i64,
}

/// Request payload for `/init/generate-data`.
#[derive(Debug, Deserialize)]
pub struct HousesRequest {
    pub n: i64,
}

/// Request payload for `/init/generate-hospitals`.
#[derive(Debug, Deserialize)]
pub struct HospitalsRequest {
    #[serde(rename = "A")]
    pub a: i64,
}

#[derive(Debug, Serialize)]
pub struct GridResponse {
    pub message: String,
    pub m: usize,
}

#[derive(Debug, Serialize)]
pub struct HousesResponse {
    pub data: Vec<House>,
    pub n: usize,
}

#[derive(Debug, Serialize)]
pub struct HospitalsResponse {
    pub hospitals: Vec<Hospital>,
    #[serde(rename = "A")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ClustersResponse {
    pub clusters: Vec<usize>,
}

/// Both error kinds are client errors; `kind` tells them apart.
impl IntoResponse for ClusteringError {
    fn into_response(self) -> Response {
        let body = json!({
            "kind": self.kind(),
            "detail": self.detail(),
        });
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// CORS for the listed browser origins, with credentials and any method or
/// header the preflight asks for.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(target: TARGET_WEB_REQUEST, "Ignoring invalid origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

pub fn router(engine: SharedEngine, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/status", get(status_check))
        .route("/config/set-grid", post(set_grid))
        .route("/init/generate-data", post(generate_data))
        .route("/init/generate-hospitals", post(generate_hospitals))
        .route("/run/assign-clusters", get(assign_clusters))
        .route("/run/update-hospitals", get(update_hospitals))
        .route("/metrics", get(metrics))
        .route("/state", get(current_state))
        .layer(cors_layer(allowed_origins))
        .with_state(engine)
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(config: &ServerConfig, engine: SharedEngine) -> Result<()> {
    let addr = config.addr();
    let app = router(engine, &config.allowed_origins);
    let listener = TcpListener::bind(&addr).await?;

    info!(target: TARGET_WEB_REQUEST, "Server running on http://{}", addr);
    info!(target: TARGET_WEB_REQUEST, "Allowed origins: {}", config.allowed_origins.join(", "));

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(target: TARGET_WEB_REQUEST, "Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if signal::ctrl_c().await.is_err() {
        error!(target: TARGET_WEB_REQUEST, "Failed to listen for ctrl-c");
    }
    info!(target: TARGET_WEB_REQUEST, "Ctrl-C received, shutting down.");
}

fn log_rejection(route: &str, err: &ClusteringError) {
    warn!(target: TARGET_WEB_REQUEST, "{} rejected ({}): {}", route, err.kind(), err.detail());
}

/// Always answers, whatever the engine holds.
pub async fn status_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn set_grid(
    State(engine): State<SharedEngine>,
    Json(payload): Json<GridRequest>,
) -> Result<Json<GridResponse>, ClusteringError> {
    info!(target: TARGET_WEB_REQUEST, "set-grid m={}", payload.m);
    let m = engine
        .write()
        .await
        .configure_grid(payload.m)
        .inspect_err(|e| log_rejection("set-grid", e))?;
    Ok(Json(GridResponse {
        message: format!("Grid configured to {}x{}.", m, m),
        m,
    }))
}

pub async fn generate_data(
    State(engine): State<SharedEngine>,
    Json(payload): Json<HousesRequest>,
) -> Result<Json<HousesResponse>, ClusteringError> {
    info!(target: TARGET_WEB_REQUEST, "generate-data n={}", payload.n);
    let mut engine = engine.write().await;
    let data = engine
        .generate_points(payload.n)
        .inspect_err(|e| log_rejection("generate-data", e))?
        .to_vec();
    Ok(Json(HousesResponse {
        n: data.len(),
        data,
    }))
}

pub async fn generate_hospitals(
    State(engine): State<SharedEngine>,
    Json(payload): Json<HospitalsRequest>,
) -> Result<Json<HospitalsResponse>, ClusteringError> {
    info!(target: TARGET_WEB_REQUEST, "generate-hospitals A={}", payload.a);
    let mut engine = engine.write().await;
    let hospitals = engine
        .generate_centroids(payload.a)
        .inspect_err(|e| log_rejection("generate-hospitals", e))?
        .to_vec();
    Ok(Json(HospitalsResponse {
        a: Some(hospitals.len()),
        hospitals,
    }))
}

pub async fn assign_clusters(
    State(engine): State<SharedEngine>,
) -> Result<Json<ClustersResponse>, ClusteringError> {
    let mut engine = engine.write().await;
    let clusters = engine
        .assign_step()
        .inspect_err(|e| log_rejection("assign-clusters", e))?
        .to_vec();
    Ok(Json(ClustersResponse { clusters }))
}

pub async fn update_hospitals(
    State(engine): State<SharedEngine>,
) -> Result<Json<HospitalsResponse>, ClusteringError> {
    let mut engine = engine.write().await;
    let hospitals = engine
        .update_step()
        .inspect_err(|e| log_rejection("update-hospitals", e))?
        .to_vec();
    Ok(Json(HospitalsResponse { hospitals, a: None }))
}

pub async fn metrics(State(engine): State<SharedEngine>) -> Json<ClusterMetrics> {
    Json(engine.read().await.metrics())
}

/// `{"state": false}` until houses exist, then the full snapshot.
pub async fn current_state(State(engine): State<SharedEngine>) -> Json<Value> {
    let snapshot = engine.read().await.snapshot();
    if !snapshot.has_data() {
        return Json(json!({ "state": false }));
    }

    Json(json!({
        "state": true,
        "phase": snapshot.phase,
        "m": snapshot.m,
        "n": snapshot.n,
        "A": snapshot.a,
        "data": snapshot.data,
        "hospitals": snapshot.hospitals,
        "clusters": snapshot.clusters,
    }))
}
