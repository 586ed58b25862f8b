use crate::chart::PUBLIC_PLOTS_PREFIX;
use crate::infra::{AppChatService, AppState};
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json};
use finbot::analytics::{CompanyComparison, Metric, NetIncomeChange};
use finbot::chat::chat_router;
use finbot::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

#[derive(Debug, Deserialize)]
pub(crate) struct TotalRevenueQuery {
    pub(crate) company: String,
    #[serde(default)]
    pub(crate) year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TotalRevenueResponse {
    pub(crate) company: String,
    pub(crate) year: Option<i32>,
    pub(crate) total_revenue: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NetIncomeChangeQuery {
    pub(crate) company: String,
    pub(crate) year1: i32,
    pub(crate) year2: i32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompareQuery {
    pub(crate) company_a: String,
    pub(crate) company_b: String,
    #[serde(default = "default_compare_metric")]
    pub(crate) metric: String,
    #[serde(default)]
    pub(crate) year: Option<i32>,
}

fn default_compare_metric() -> String {
    Metric::TotalRevenue.key().to_string()
}

pub(crate) fn with_api_routes(service: Arc<AppChatService>, plots_dir: &Path) -> axum::Router {
    chat_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/companies", get(companies_endpoint))
        .route(
            "/api/v1/metrics/total-revenue",
            get(total_revenue_endpoint),
        )
        .route(
            "/api/v1/metrics/net-income-change",
            get(net_income_change_endpoint),
        )
        .route("/api/v1/metrics/compare", get(compare_endpoint))
        .nest_service(PUBLIC_PLOTS_PREFIX, ServeDir::new(plots_dir))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready", "companies": state.dataset.companies().len() })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn companies_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<serde_json::Value> {
    Json(json!({ "companies": state.dataset.companies() }))
}

pub(crate) async fn total_revenue_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<TotalRevenueQuery>,
) -> Result<Json<TotalRevenueResponse>, AppError> {
    let total_revenue = state
        .dataset
        .total_revenue(&query.company, query.year)
        .ok_or_else(|| AppError::NotFound(format!("no rows for {}", query.company)))?;

    Ok(Json(TotalRevenueResponse {
        company: query.company,
        year: query.year,
        total_revenue,
    }))
}

pub(crate) async fn net_income_change_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<NetIncomeChangeQuery>,
) -> Result<Json<NetIncomeChange>, AppError> {
    state
        .dataset
        .net_income_change(&query.company, query.year1, query.year2)
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "net income for {} in {} and {}",
                query.company, query.year1, query.year2
            ))
        })
}

pub(crate) async fn compare_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<CompanyComparison>, AppError> {
    let comparable = Metric::from_key(&query.metric).is_some_and(|metric| metric.is_comparable());
    if !comparable {
        return Err(AppError::BadRequest(format!(
            "metric {} cannot be compared",
            query.metric
        )));
    }

    state
        .dataset
        .compare_companies(&query.company_a, &query.company_b, &query.metric, query.year)
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "{} for {} and {}",
                query.metric, query.company_a, query.company_b
            ))
        })
}
