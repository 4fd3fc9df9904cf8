use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8300;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Deployment stage the service runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

/// Top-level configuration for the guideline service and CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Reads `ACRGUIDE_*` variables, after loading a `.env` file if one exists.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; unset keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = lookup("ACRGUIDE_ENV")
            .map(|value| AppEnvironment::parse(&value))
            .unwrap_or(AppEnvironment::Development);

        let host = lookup("ACRGUIDE_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("ACRGUIDE_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value: raw })?,
            None => DEFAULT_PORT,
        };

        let log_level =
            lookup("ACRGUIDE_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost {
                host: self.host.clone(),
                source,
            })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort {
        value: String,
    },
    InvalidHost {
        host: String,
        source: std::net::AddrParseError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort { value } => {
                write!(f, "ACRGUIDE_PORT must be a valid u16, got '{value}'")
            }
            ConfigError::InvalidHost { host, .. } => {
                write!(f, "ACRGUIDE_HOST '{host}' must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort { .. } => None,
            ConfigError::InvalidHost { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("ACRGUIDE_ENV");
        env::remove_var("ACRGUIDE_HOST");
        env::remove_var("ACRGUIDE_PORT");
        env::remove_var("ACRGUIDE_LOG_LEVEL");
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8300);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn load_reads_process_environment() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ACRGUIDE_HOST", "localhost");
        env::set_var("ACRGUIDE_PORT", "9100");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 9100));
    }

    #[test]
    fn environment_aliases() {
        let config = AppConfig::from_lookup(lookup_from(&[("ACRGUIDE_ENV", " CI ")]))
            .expect("config builds");
        assert_eq!(config.environment, AppEnvironment::Test);

        let config = AppConfig::from_lookup(lookup_from(&[("ACRGUIDE_ENV", "prod")]))
            .expect("config builds");
        assert_eq!(config.environment.as_str(), "production");
    }

    #[test]
    fn rejects_invalid_port() {
        let err = AppConfig::from_lookup(lookup_from(&[("ACRGUIDE_PORT", "eighty")]))
            .expect_err("port must be numeric");
        assert!(matches!(err, ConfigError::InvalidPort { ref value } if value == "eighty"));
        assert!(err.to_string().contains("eighty"));
    }

    #[test]
    fn rejects_unparsable_host() {
        let config = AppConfig::from_lookup(lookup_from(&[("ACRGUIDE_HOST", "radiology.local")]))
            .expect("config builds");
        let err = config.server.socket_addr().expect_err("hostnames are not resolved");
        assert!(matches!(err, ConfigError::InvalidHost { .. }));
    }
}
