// Axum API Server Module
//
// Purpose: JSON REST surface over the diagnosis pipeline
// Routes: /health, /api/diagnose, /api/diagnose/explain, /api/diseases

#[cfg(feature = "api")]
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

#[cfg(feature = "api")]
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

#[cfg(feature = "api")]
use moka::future::Cache;

#[cfg(feature = "api")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "api")]
use std::sync::Arc;

#[cfg(feature = "api")]
use std::time::Duration;

#[cfg(feature = "api")]
use crate::diagnoser::{Diagnoser, DiagnosisOutcome};

// ============================================================================
// Application State
// ============================================================================

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    pub diagnoser: Arc<Diagnoser>,
    /// Normalized input → response
    pub cache: Cache<String, DiagnoseResponse>,
}

#[cfg(feature = "api")]
impl AppState {
    /// Wrap an already trained diagnoser
    ///
    /// Training is CPU-bound and done once before the server starts.
    pub fn new(diagnoser: Diagnoser) -> Self {
        tracing::info!("Initializing Moka cache...");
        let cache = Cache::builder()
            .max_capacity(10_000) // 10K entries
            .time_to_live(Duration::from_secs(300)) // 5 min TTL
            .build();

        Self {
            diagnoser: Arc::new(diagnoser),
            cache,
        }
    }
}

// ============================================================================
// Router Configuration
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Diagnosis endpoints (JSON API)
        .route("/api/diagnose", post(diagnose))
        .route("/api/diagnose/explain", post(explain))

        // Known diseases
        .route("/api/diseases", get(list_diseases))

        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Request / Response Types
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug, Deserialize)]
pub struct DiagnoseRequest {
    pub symptoms: String,
}

#[cfg(feature = "api")]
#[derive(Debug, Clone, Serialize)]
pub struct DiagnoseResponse {
    pub outcome: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disease: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(feature = "api")]
impl From<DiagnosisOutcome> for DiagnoseResponse {
    fn from(outcome: DiagnosisOutcome) -> Self {
        let kind = outcome.kind();
        let message = outcome.message().to_string();
        let (disease, description) = match outcome {
            DiagnosisOutcome::Diagnosis { disease, description } => (Some(disease), Some(description)),
            _ => (None, None),
        };

        Self {
            outcome: kind,
            message,
            disease,
            description,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

#[cfg(feature = "api")]
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(feature = "api")]
async fn diagnose(
    State(state): State<AppState>,
    payload: Result<Json<DiagnoseRequest>, JsonRejection>,
) -> Result<Json<DiagnoseResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    // The pipeline itself trims and lowercases, so this key is exact
    let cache_key = format!("diagnose:{}", request.symptoms.trim().to_lowercase());

    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for diagnosis");
        return Ok(Json(cached));
    }

    let diagnoser = Arc::clone(&state.diagnoser);
    let outcome = tokio::task::spawn_blocking(move || diagnoser.diagnose(&request.symptoms))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Diagnosis error: {}", e)))?;

    let response = DiagnoseResponse::from(outcome);
    state.cache.insert(cache_key, response.clone()).await;

    Ok(Json(response))
}

#[cfg(feature = "api")]
async fn explain(
    State(state): State<AppState>,
    payload: Result<Json<DiagnoseRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let diagnoser = Arc::clone(&state.diagnoser);
    let explanation = tokio::task::spawn_blocking(move || diagnoser.explain(&request.symptoms))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Diagnosis error: {}", e)))?;

    let value = serde_json::to_value(&explanation)
        .map_err(|e| AppError::Internal(format!("Serialization error: {}", e)))?;

    Ok(Json(value))
}

#[cfg(feature = "api")]
async fn list_diseases(State(state): State<AppState>) -> impl IntoResponse {
    let diseases: Vec<serde_json::Value> = state
        .diagnoser
        .diseases()
        .records()
        .iter()
        .map(|r| {
            serde_json::json!({
                "name": r.name,
                "characteristics": r.characteristics,
                "description": r.description,
            })
        })
        .collect();

    Json(serde_json::json!({
        "count": diseases.len(),
        "diseases": diseases,
    }))
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Internal(String),
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                tracing::error!("{}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
