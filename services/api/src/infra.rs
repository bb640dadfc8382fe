use edu_feedback::forms::{FormVariant, PresentationContext};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_variant(raw: &str) -> Result<FormVariant, String> {
    raw.trim()
        .to_ascii_lowercase()
        .parse::<FormVariant>()
        .map_err(|err| err.to_string())
}

pub(crate) fn parse_context(raw: &str) -> Result<PresentationContext, String> {
    raw.trim().to_ascii_lowercase().parse::<PresentationContext>()
}

/// Parse a `name=value` pair; the value may be empty or contain further `=` signs.
pub(crate) fn parse_field_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}
