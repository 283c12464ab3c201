use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_advisor_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use leadflow::advisor::{AdvisorService, AnthropicModel, HeuristicScorer, SessionStore};
use leadflow::config::AppConfig;
use leadflow::error::AppError;
use leadflow::telemetry;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let model = Arc::new(AnthropicModel::new(config.advisor.clone())?);
    let sessions = Arc::new(SessionStore::new(config.sessions.clone()));
    let advisor_service = Arc::new(AdvisorService::new(
        model,
        sessions,
        HeuristicScorer::default(),
    ));

    let app = with_advisor_routes(advisor_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        model = %config.advisor.model,
        "lead advisor service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
