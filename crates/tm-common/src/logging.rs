/// Initialize structured logging with `tracing`.
///
/// `json`: when true, emit structured JSON lines; otherwise a human-readable
/// formatter. Respects `RUST_LOG` (default: `info`).
pub fn init_tracing(json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        fmt().json().with_env_filter(filter).with_target(true).init();
    } else {
        fmt().with_env_filter(filter).with_target(false).init();
    }
}
