use tracing_subscriber::EnvFilter;

/// `RUST_LOG` overrides the default `info` level
pub fn initialize() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
