//! Tracing subscriber setup.
//!
//! Logs go to stderr so the chat itself owns stdout. Filter with `RUST_LOG`
//! (default `info`), e.g. `RUST_LOG=tara_lib=debug` to see match scores.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // No-op if a subscriber is already installed.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
