use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_feedback_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use edu_feedback::config::AppConfig;
use edu_feedback::error::AppError;
use edu_feedback::forms::{FeedbackService, LoggingSubmissionHandler};
use edu_feedback::telemetry;
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

    let redirect = config.forms.redirect_policy();
    let feedback_service = Arc::new(
        FeedbackService::new(Arc::new(LoggingSubmissionHandler), redirect.clone())
            .with_session_limit(config.forms.max_sessions),
    );

    let app = with_feedback_routes(feedback_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        redirect_route = %redirect.route,
        redirect_delay_ms = redirect.delay.as_millis() as u64,
        max_sessions = config.forms.max_sessions,
        "feedback portal ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
