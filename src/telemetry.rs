use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::configuration::LogFormat;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set. JSON output is meant
/// for production log collectors, pretty output for local development.
pub fn init_telemetry(level: &str, format: LogFormat) {
    let env_filter = build_filter(level);

    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stdout)
                    .json(),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stdout)
                    .pretty(),
            )
            .init(),
    }
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_falls_back_to_configured_level() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let filter = build_filter("debug");
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_filter_accepts_directives() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let filter = build_filter("warn,jobpath_auth=debug");
        assert!(filter.to_string().contains("jobpath_auth=debug"));
    }
}
