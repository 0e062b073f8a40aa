use env_logger::Env;

/// Info by default, `RUST_LOG` takes precedence when set.
pub fn setup_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}
