//! Log subscriber setup.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,api_server=debug,inkwell_infra=debug";

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// One JSON object per line instead of the multi-line pretty format.
    pub json_logs: bool,
    /// Tag written on the startup event so aggregated logs can be told apart.
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            json_logs: false,
            service_name: "inkwell-api".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// `LOG_FORMAT=json` and `OTEL_SERVICE_NAME`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            json_logs: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(defaults.json_logs),
            service_name: std::env::var("OTEL_SERVICE_NAME").unwrap_or(defaults.service_name),
        }
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_telemetry(config: &TelemetryConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let format = if config.json_logs {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().pretty().boxed()
    };

    tracing_subscriber::registry().with(filter).with(format).init();

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Logging initialized"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn test_defaults_to_pretty_logs() {
        let config = TelemetryConfig::default();
        assert!(!config.json_logs);
        assert_eq!(config.service_name, "inkwell-api");
    }
}
