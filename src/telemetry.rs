use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `PLANBOARD_LOG=debug`.
pub const LOG_ENV: &str = "PLANBOARD_LOG";

/// Logs go to stderr so `--json` output on stdout stays parseable.
pub fn init_subscriber() {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
