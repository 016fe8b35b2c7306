// 📜 Logging - tracing subscriber setup shared by the CLI and the server

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `filter` (e.g. "info", "relay_catalog=debug").
///
/// An invalid directive falls back to "info". Calling this twice is harmless;
/// the first subscriber wins.
pub fn init(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
