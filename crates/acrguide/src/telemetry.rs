use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("log filter '{value}' is not a valid level or directive list")]
    InvalidFilter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("log subscriber could not be installed: {0}")]
    SubscriberInstalled(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// `RUST_LOG` wins when it parses; otherwise the configured level is used.
pub fn resolve_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|source| {
            TelemetryError::InvalidFilter {
                value: config.log_level.clone(),
                source,
            }
        }),
    }
}

/// Installs the global compact subscriber. Fails if one is already installed.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = resolve_filter(config)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::SubscriberInstalled)
}
