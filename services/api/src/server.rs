use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use course_enroll::config::AppConfig;
use course_enroll::error::AppError;
use course_enroll::telemetry;
use course_enroll::workflows::collaborator::InMemoryApplicationRepository;
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

    telemetry::init(&config.telemetry)?;

    let catalog = Arc::new(load_catalog(args.courses_csv.as_deref())?);
    info!(
        courses = catalog.courses.len(),
        categories = catalog.categories.len(),
        source = %args
            .courses_csv
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "demo".to_string()),
        "course catalog loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let applications = Arc::new(InMemoryApplicationRepository::default());
    let app = with_service_routes(catalog, applications)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "course API ready");

    axum::serve(listener, app).await?;
    Ok(())
}
