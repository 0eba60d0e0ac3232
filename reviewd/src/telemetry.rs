//! Telemetry initialization (tracing subscriber with env-filter and fmt output).
//!
//! Log verbosity is controlled with the standard `RUST_LOG` environment
//! variable; the default filter is `info`.
//!
//! ```bash
//! RUST_LOG=reviewd=debug,tower_http=debug reviewd -f config.yaml
//! ```

use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber for the process.
pub fn init_telemetry() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    info!("Telemetry initialized");

    Ok(())
}
