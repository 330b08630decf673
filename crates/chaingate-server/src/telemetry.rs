//! Tracing / logging initialisation.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Subscriber settings.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// `EnvFilter` directives, e.g. `"info"` or `"info,chaingate_core=debug"`
    pub level: String,
    /// Emit JSON structured logs (true) or human-readable text (false)
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LogConfig {
    /// The filter for `level`. An unparseable directive string falls back to
    /// `info`.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_tracing(config: &LogConfig) -> Result<(), TryInitError> {
    let filter = config.env_filter();

    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .try_init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::{Layer, Registry};

    fn max_level(config: &LogConfig) -> Option<LevelFilter> {
        <EnvFilter as Layer<Registry>>::max_level_hint(&config.env_filter())
    }

    #[test]
    fn default_is_info() {
        assert_eq!(max_level(&LogConfig::default()), Some(LevelFilter::INFO));
    }

    #[test]
    fn per_crate_directives_pass_through() {
        let config = LogConfig {
            level: "warn,chaingate_core=debug".into(),
            json: false,
        };
        assert_eq!(max_level(&config), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn bad_directives_fall_back_to_info() {
        let config = LogConfig {
            level: "chaingate_core=loud".into(),
            json: true,
        };
        assert_eq!(max_level(&config), Some(LevelFilter::INFO));
    }
}
