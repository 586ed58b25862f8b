use crate::cli::ServeArgs;
use crate::infra::{build_chat_service, load_dataset, AppState};
use crate::routes::with_api_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use finbot::config::AppConfig;
use finbot::error::AppError;
use finbot::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(dataset) = args.dataset.take() {
        config.data.dataset_path = dataset;
    }
    if let Some(plots_dir) = args.plots_dir.take() {
        config.data.plots_dir = plots_dir;
    }

    telemetry::init(&config.telemetry)?;

    let dataset = load_dataset(&config.data.dataset_path)?;
    let chat_service = build_chat_service(dataset.clone(), &config.data.plots_dir);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        dataset,
    };

    let app = with_api_routes(chat_service, &config.data.plots_dir)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        dataset = %config.data.dataset_path.display(),
        "financial chatbot ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
