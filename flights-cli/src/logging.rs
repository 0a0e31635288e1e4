use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset: failures only.
const DEFAULT_FILTER: &str = "warn";

/// Install a stderr subscriber so stdout carries nothing but the report.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
