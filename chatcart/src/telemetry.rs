//! Telemetry initialization: normal rust tracing with an fmt subscriber.
//!
//! Log verbosity is controlled via the standard `RUST_LOG` environment variable
//! and defaults to `info` when unset, for example:
//!
//! ```bash
//! export RUST_LOG="chatcart=debug,sqlx=warn"
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize tracing for the process.
///
/// Sets up tracing-subscriber with console output (fmt layer) filtered by
/// `RUST_LOG`. Returns an error if a global subscriber is already installed.
pub fn init_telemetry() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    Ok(())
}
