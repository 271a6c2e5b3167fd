use crate::cli::ServeArgs;
use crate::infra::{
    demo_directory, AppState, InMemoryDirectory, InMemoryOutcomeRepository,
    InMemoryQuestionRepository,
};
use crate::routes::with_evaluation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hr_evaluation::config::AppConfig;
use hr_evaluation::error::AppError;
use hr_evaluation::telemetry;
use hr_evaluation::workflows::evaluation::{DirectorySnapshot, EvaluationService};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let snapshot = match &config.directory.snapshot_path {
        Some(path) => {
            let snapshot = DirectorySnapshot::from_path(path)?;
            info!(
                path = %path.display(),
                jobs = snapshot.jobs.len(),
                applicants = snapshot.applicants.len(),
                "directory snapshot loaded"
            );
            snapshot
        }
        None => {
            warn!("no directory snapshot configured, serving demo jobs and applicants");
            demo_directory()
        }
    };

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(EvaluationService::new(
        Arc::new(InMemoryQuestionRepository::default()),
        Arc::new(InMemoryOutcomeRepository::default()),
        Arc::new(InMemoryDirectory::from(snapshot)),
    ));

    let app = with_evaluation_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "applicant evaluation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
