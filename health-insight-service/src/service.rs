use axum::{
    Router,
    extract::{Request, State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode},
    middleware::{Next, from_fn},
    response::{Json, Response},
    routing::{get, post},
};
use prompt_flow::{Analysis, AnalysisRunner, TextGenerator};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Instrument, error, info};
use uuid::Uuid;

use crate::{
    analyses::{ActivityAnalysis, MedicalAnalysis, SymptomAnalysis},
    models::{
        ActivityRequest, ActivityResponse, ErrorResponse, Localized, MedicalRequest,
        MedicalResponse, SymptomRequest, SymptomResponse,
    },
};

pub const ACTIVITY_ROUTE: &str = "/api/analyze-activity";
pub const MEDICAL_ROUTE: &str = "/api/analyze-medical";
pub const SYMPTOMS_ROUTE: &str = "/api/analyze-symptoms";

pub const ACTIVITY_ERROR: &str = "Failed to analyze activity";
pub const MEDICAL_ERROR: &str = "Failed to analyze medical data";
pub const SYMPTOMS_ERROR: &str = "Failed to analyze symptoms";

const CORRELATION_HEADER: &str = "x-correlation-id";

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn internal_error(message: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

#[derive(Clone)]
pub struct AppState {
    pub runner: AnalysisRunner,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>, model_id: impl Into<String>) -> Self {
        Self {
            runner: AnalysisRunner::new(generator, model_id),
        }
    }
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route(ACTIVITY_ROUTE, post(analyze_activity))
        .route(MEDICAL_ROUTE, post(analyze_medical))
        .route(SYMPTOMS_ROUTE, post(analyze_symptoms))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(from_fn(correlation_id_middleware)),
        )
        .with_state(app_state)
}

/// Tag every request with a correlation id and run it inside a span carrying it
async fn correlation_id_middleware(mut request: Request, next: Next) -> Response {
    let correlation_id = Uuid::new_v4().to_string();
    let header = HeaderValue::from_str(&correlation_id).ok();

    if let Some(value) = header.clone() {
        request.headers_mut().insert(CORRELATION_HEADER, value);
    }

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
    let mut response = next.run(request).instrument(span).await;

    if let Some(value) = header {
        response.headers_mut().insert(CORRELATION_HEADER, value);
    }
    response
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "Health Insight Service",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Localized (Khmer/English) AI health analyses with static fallbacks",
        "endpoints": {
            "POST /api/analyze-activity": "Activity recommendation with weekly activity bars",
            "POST /api/analyze-medical": "Medical test explanation with quarterly trends",
            "POST /api/analyze-symptoms": "Likely condition for selected symptoms",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn analyze_activity(
    State(state): State<AppState>,
    payload: Result<Json<ActivityRequest>, JsonRejection>,
) -> ApiResult<ActivityResponse> {
    analyze(&state, &ActivityAnalysis, payload, ACTIVITY_ERROR).await
}

async fn analyze_medical(
    State(state): State<AppState>,
    payload: Result<Json<MedicalRequest>, JsonRejection>,
) -> ApiResult<MedicalResponse> {
    analyze(&state, &MedicalAnalysis, payload, MEDICAL_ERROR).await
}

async fn analyze_symptoms(
    State(state): State<AppState>,
    payload: Result<Json<SymptomRequest>, JsonRejection>,
) -> ApiResult<SymptomResponse> {
    analyze(&state, &SymptomAnalysis, payload, SYMPTOMS_ERROR).await
}

/// Shared handler body. Every failure collapses to a 500 carrying the
/// route's fixed message.
async fn analyze<A>(
    state: &AppState,
    analysis: &A,
    payload: Result<Json<A::Request>, JsonRejection>,
    failure: &'static str,
) -> ApiResult<A::Response>
where
    A: Analysis,
    A::Request: Localized,
{
    let Json(request) = payload.map_err(|rejection| {
        error!(analysis = %analysis.id(), error = %rejection, "Rejected request body");
        internal_error(failure)
    })?;

    let language = request.language();
    info!(analysis = %analysis.id(), language = %language, "Processing analysis request");

    match state.runner.run(analysis, request, language).await {
        Ok(analyzed) => Ok(Json(analyzed.response)),
        Err(e) => {
            error!(analysis = %analysis.id(), error = %e, "Analysis failed");
            Err(internal_error(failure))
        }
    }
}
