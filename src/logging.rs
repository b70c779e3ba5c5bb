/// Install a `tracing` fmt subscriber and route `log` records through it.
///
/// Filter comes from `RUST_LOG`, defaulting to `info`.
pub fn init_tracing_from_env() {
    let _ = tracing_log::LogTracer::init();
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Whether `NAME_MATCHER_TRACING` asks for the tracing subscriber.
pub fn tracing_requested() -> bool {
    std::env::var("NAME_MATCHER_TRACING")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
