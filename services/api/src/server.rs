use crate::cli::ServeArgs;
use crate::infra::{load_tables, AppState, InMemorySessionRepository};
use crate::routes::with_borrowing_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use loan_ai::config::AppConfig;
use loan_ai::error::AppError;
use loan_ai::sessions::BorrowingService;
use loan_ai::telemetry;
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
    if let Some(path) = args.rate_tables.take() {
        config.rates.tables_path = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let tables = load_tables(&config.rates)?;
    let repository = Arc::new(InMemorySessionRepository::default());
    let borrowing_service = Arc::new(BorrowingService::new(repository, tables));

    let app = with_borrowing_routes(borrowing_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "borrowing power service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
