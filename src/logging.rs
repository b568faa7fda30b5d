use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `FORECAST_LOG=debug`.
pub const LOG_ENV: &str = "FORECAST_LOG";

/// Initialize the tracing subscriber, writing to stderr so stdout only carries the report.
///
/// Defaults to `warn` when `FORECAST_LOG` is unset or invalid.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
