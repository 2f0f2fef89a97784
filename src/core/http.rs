//! HTTP endpoint server using Axum
//!
//! Every analysis endpoint takes a dataset key plus a declarative
//! filter spec, applies the filters, and runs the requested pipeline
//! stage. Analysis outcomes are returned with their `Computation` tag
//! so clients can tell a real result from a demo table or a missing
//! column.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::analysis::{
    aggregate, build_index_with_fallback, summarize_groups, AggregateOp, Computation,
    IndexFormula,
};
use crate::config::Config;
use crate::export;
use crate::filters::{self, FilterSpec};
use crate::insights::{comparison_insights, format_insights, survey_insights, trend_insights};
use crate::models::Dataset;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub start_time: Arc<Instant>,
    pub mental_health: Arc<Dataset>,
    pub career: Arc<Dataset>,
    pub demo_fallback: bool,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Which of the two loaded surveys a request addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKey {
    MentalHealth,
    Career,
}

impl Default for DatasetKey {
    fn default() -> Self {
        DatasetKey::MentalHealth
    }
}

impl AppState {
    fn dataset(&self, key: DatasetKey) -> &Arc<Dataset> {
        match key {
            DatasetKey::MentalHealth => &self.mental_health,
            DatasetKey::Career => &self.career,
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "mindmetrics-insight-engine",
        "datasets": {
            "mental_health": state.mental_health.len(),
            "career": state.career.len(),
        }
    })))
}

#[derive(Debug, Deserialize)]
struct AggregateRequest {
    #[serde(default)]
    dataset: DatasetKey,
    #[serde(default)]
    filters: FilterSpec,
    #[serde(default)]
    group_fields: Vec<String>,
    value_field: String,
    op: AggregateOp,
}

async fn aggregate_handler(
    State(state): State<AppState>,
    Json(request): Json<AggregateRequest>,
) -> Json<Value> {
    let filtered = filters::apply(state.dataset(request.dataset), &request.filters);
    let fields: Vec<&str> = request.group_fields.iter().map(String::as_str).collect();
    let result = aggregate(&filtered, &fields, &request.value_field, &request.op);
    Json(json!(result))
}

#[derive(Debug, Deserialize)]
struct SummariesRequest {
    #[serde(default)]
    dataset: DatasetKey,
    #[serde(default)]
    filters: FilterSpec,
    group_field: String,
    value_field: String,
}

async fn summaries_handler(
    State(state): State<AppState>,
    Json(request): Json<SummariesRequest>,
) -> Json<Value> {
    let filtered = filters::apply(state.dataset(request.dataset), &request.filters);
    let result = summarize_groups(&filtered, &request.group_field, &request.value_field);
    Json(json!(result))
}

fn default_index_group() -> String {
    crate::models::columns::COUNTRY.to_string()
}

#[derive(Debug, Deserialize)]
struct IndexRequest {
    #[serde(default)]
    dataset: DatasetKey,
    #[serde(default)]
    filters: FilterSpec,
    #[serde(default = "default_index_group")]
    group_field: String,
    /// Custom weighting; omitted means the default mental health
    /// formula.
    formula: Option<IndexFormula>,
}

async fn index_handler(
    State(state): State<AppState>,
    Json(request): Json<IndexRequest>,
) -> Json<Value> {
    let filtered = filters::apply(state.dataset(request.dataset), &request.filters);
    let formula = request
        .formula
        .unwrap_or_else(IndexFormula::mental_health_default);
    let result = build_index_with_fallback(
        &filtered,
        &request.group_field,
        &formula,
        state.demo_fallback,
    );
    Json(json!(result))
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum InsightKind {
    /// Relationship between two numeric columns, optionally broken out
    /// by a grouping column.
    Trend {
        x_field: String,
        y_field: String,
        group_field: Option<String>,
    },
    /// Category ranking over one value column.
    Comparison {
        category_field: String,
        value_field: String,
    },
    /// The fixed battery over both surveys.
    Survey,
}

#[derive(Debug, Deserialize)]
struct InsightsRequest {
    #[serde(default)]
    dataset: DatasetKey,
    #[serde(default)]
    filters: FilterSpec,
    #[serde(flatten)]
    kind: InsightKind,
}

#[derive(Debug, Serialize)]
struct InsightsResponse {
    insights: Vec<String>,
    formatted: String,
}

async fn insights_handler(
    State(state): State<AppState>,
    Json(request): Json<InsightsRequest>,
) -> Json<InsightsResponse> {
    let insights = match &request.kind {
        InsightKind::Trend {
            x_field,
            y_field,
            group_field,
        } => {
            let filtered = filters::apply(state.dataset(request.dataset), &request.filters);
            trend_insights(&filtered, x_field, y_field, group_field.as_deref())
        }
        InsightKind::Comparison {
            category_field,
            value_field,
        } => {
            let filtered = filters::apply(state.dataset(request.dataset), &request.filters);
            comparison_insights(&filtered, category_field, value_field)
        }
        InsightKind::Survey => {
            let mental_health = filters::apply(&state.mental_health, &request.filters);
            let career = filters::apply(&state.career, &request.filters);
            survey_insights(&mental_health, &career)
        }
    };

    let formatted = format_insights(&insights);
    Json(InsightsResponse { insights, formatted })
}

#[derive(Debug, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
enum ExportTarget {
    /// Filtered rows, optionally restricted to named columns.
    Records { columns: Option<Vec<String>> },
    Aggregation {
        group_fields: Vec<String>,
        value_field: String,
        op: AggregateOp,
    },
    Summaries {
        group_field: String,
        value_field: String,
    },
    Index {
        group_field: String,
        formula: Option<IndexFormula>,
    },
}

#[derive(Debug, Deserialize)]
struct ExportRequest {
    #[serde(default)]
    dataset: DatasetKey,
    #[serde(default)]
    filters: FilterSpec,
    #[serde(flatten)]
    target: ExportTarget,
}

async fn export_handler(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, StatusCode> {
    let filtered = filters::apply(state.dataset(request.dataset), &request.filters);

    let rendered = match &request.target {
        ExportTarget::Records { columns } => {
            export::dataset_to_csv(&filtered, columns.as_deref())
        }
        ExportTarget::Aggregation {
            group_fields,
            value_field,
            op,
        } => {
            let fields: Vec<&str> = group_fields.iter().map(String::as_str).collect();
            match aggregate(&filtered, &fields, value_field, op) {
                Computation::Computed(result) => {
                    let header = group_fields.first().map(String::as_str).unwrap_or("group");
                    export::aggregation_to_csv(&result, header, value_field)
                }
                other => return Ok(unavailable_response(&other)),
            }
        }
        ExportTarget::Summaries {
            group_field,
            value_field,
        } => match summarize_groups(&filtered, group_field, value_field) {
            Computation::Computed(summaries) => {
                export::summaries_to_csv(&summaries, group_field)
            }
            other => return Ok(unavailable_response(&other)),
        },
        ExportTarget::Index {
            group_field,
            formula,
        } => {
            let formula = formula
                .clone()
                .unwrap_or_else(IndexFormula::mental_health_default);
            match build_index_with_fallback(&filtered, group_field, &formula, state.demo_fallback)
            {
                Computation::Computed(index) | Computation::DemoFallback(index) => {
                    export::index_to_csv(&index, group_field)
                }
                other => return Ok(unavailable_response(&other)),
            }
        }
    };

    let body = rendered.map_err(|e| {
        error!(error = %e, "Failed to render export");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(([(header::CONTENT_TYPE, "text/csv")], body).into_response())
}

fn unavailable_response<T: Serialize>(computation: &Computation<T>) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(json!(computation))).into_response()
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/aggregate", post(aggregate_handler))
        .route("/api/summaries", post(summaries_handler))
        .route("/api/index", post(index_handler))
        .route("/api/insights", post(insights_handler))
        .route("/api/export", post(export_handler))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(
    config: &Config,
    mental_health: Arc<Dataset>,
    career: Arc<Dataset>,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        start_time: Arc::new(Instant::now()),
        mental_health,
        career,
        demo_fallback: config.demo_fallback,
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
