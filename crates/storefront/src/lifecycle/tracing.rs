//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global `tracing` subscriber.
//!
//! Actors log with an `entity_type` field instead of a module path, so the compact
//! format hides targets. JSON output keeps them, together with the current span, for
//! log shippers.
//!
//! ```bash
//! RUST_LOG=info cargo run                          # lifecycle and checkout steps
//! RUST_LOG=debug cargo run                         # every request with its payload
//! RUST_LOG=storefront=debug,actor_framework=info cargo run
//! LOG_FORMAT=json cargo run
//! ```
//!
//! A checkout at `info` reads roughly:
//!
//! ```text
//! INFO Checkout started user_id=user_2 order_code=ORD-240307-512034
//! INFO Stock reserved product_id=product_1 quantity=2 left=8
//! INFO Deleted batch entity_type="CartLine" removed=1 size=0
//! INFO Checkout complete user_id=user_2 order_code=ORD-240307-512034 lines=1 total=49.98
//! INFO Created entity_type="Order" id=order_1 size=1
//! ```

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// Returns `false` when a subscriber was already installed (tests, embedding
/// applications); the existing one is kept.
pub fn setup_tracing(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = match config.log_format {
        LogFormat::Compact => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(true)
            .try_init(),
    };
    installed.is_ok()
}
