//! Logging setup for the binary.
//!
//! - `BAYTHON_LOG` sets the filter (e.g. "debug" or "info,storage=debug").
//! - `BAYTHON_LOG_FORMAT=json` switches to structured JSON lines.
//!
//! Logs go to stderr so command output on stdout stays clean.

use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("BAYTHON_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match std::env::var("BAYTHON_LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}
