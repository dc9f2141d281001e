use tracing_subscriber::{EnvFilter, fmt};

/// Install the global tracing subscriber.
///
/// Honours `RUST_LOG`; falls back to `info,tower_http=info`.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    let _ = fmt().with_env_filter(env_filter).try_init();
}
