use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub default_level: tracing::Level,
    pub show_targets: bool,
    pub show_logs: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: tracing::Level::INFO,
            show_targets: true,
            show_logs: true,
        }
    }
}

impl LogConfig {
    /// Development configuration (verbose)
    pub fn dev() -> Self {
        Self { default_level: tracing::Level::DEBUG, ..Default::default() }
    }

    /// Filter only, no output (for machine-readable stdout)
    pub fn quiet() -> Self {
        Self { show_logs: false, ..Default::default() }
    }

    pub fn init(self) -> Result<(), String> {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("cadence={}", self.default_level))
                .add_directive(format!("cadence_core={}", self.default_level).parse().unwrap())
                .add_directive(format!("cadence_client={}", self.default_level).parse().unwrap())
                .add_directive(format!("cadence_cli={}", self.default_level).parse().unwrap())
        });

        if self.show_logs {
            let fmt_layer = fmt::layer().with_target(self.show_targets);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|e| format!("Failed to initialize tracing: {}", e))
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .try_init()
                .map_err(|e| format!("Failed to initialize tracing: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();

        assert_eq!(config.default_level, tracing::Level::INFO);
        assert!(config.show_logs);
        assert!(config.show_targets);
    }

    #[test]
    fn test_dev_config() {
        let config = LogConfig::dev();

        assert_eq!(config.default_level, tracing::Level::DEBUG);
        assert!(config.show_logs);
    }

    #[test]
    fn test_quiet_config() {
        let config = LogConfig::quiet();

        assert!(!config.show_logs);
    }
}
