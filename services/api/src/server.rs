use crate::cli::ServeArgs;
use crate::infra::{load_registry, AppState};
use crate::routes::with_declaration_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use declara::config::AppConfig;
use declara::error::AppError;
use declara::telemetry;
use declara::workflows::declarations::DeclarationService;
use std::sync::atomic::{AtomicBool, Ordering};
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
    if let Some(output_dir) = args.output_dir.take() {
        config.export.output_dir = output_dir;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let registry = Arc::new(load_registry(config.registry.projects_csv.as_deref())?);
    let declaration_service = Arc::new(DeclarationService::with_output_dir(
        registry,
        config.export.output_dir.clone(),
    ));

    let app = with_declaration_routes(declaration_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        output_dir = %config.export.output_dir.display(),
        "declaration service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
