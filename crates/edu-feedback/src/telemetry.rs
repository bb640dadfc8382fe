use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Target the submission sink logs under; kept at `info` whatever the base level is.
pub const SUBMISSIONS_TARGET: &str = "edu_feedback::submissions";

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(
                    f,
                    "invalid log level/filter '{}': unable to build EnvFilter",
                    value
                )
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Build the filter used when `RUST_LOG` is unset.
pub fn configured_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    let directives = format!("{},{SUBMISSIONS_TARGET}=info", config.log_level);
    EnvFilter::try_new(&directives).map_err(|source| TelemetryError::EnvFilter {
        value: config.log_level.clone(),
        source,
    })
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => configured_filter(config)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_filter_keeps_submission_target() {
        let config = TelemetryConfig {
            log_level: "warn".to_string(),
        };
        let filter = configured_filter(&config).expect("valid filter");
        let rendered = filter.to_string();
        assert!(rendered.contains("edu_feedback::submissions=info"));
    }

    #[test]
    fn invalid_level_is_reported() {
        let config = TelemetryConfig {
            log_level: "edu_feedback=loud".to_string(),
        };
        match configured_filter(&config) {
            Err(TelemetryError::EnvFilter { value, .. }) => assert_eq!(value, "edu_feedback=loud"),
            other => panic!("expected filter error, got {other:?}"),
        }
    }
}
