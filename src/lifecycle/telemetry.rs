//! # Observability & Tracing
//!
//! Structured logging for the bootstrap harness.
//!
//! ## What Gets Traced
//!
//! - **Startup**: the module name chosen for this process
//! - **Lifecycle**: `run()` and `close()` entry for every service
//! - **Shutdown**: completion of the run/close cycle
//! - **Errors**: a failing `close()` after a failing `run()` is logged here
//!   since only the `run()` error reaches the exit status
//!
//! ## Usage
//!
//! ```bash
//! # Lifecycle lines only (default)
//! cryptowelder
//!
//! # Include container wiring and latch details
//! RUST_LOG=debug cryptowelder
//!
//! # Filter to one module
//! RUST_LOG=cryptowelder::bootstrap=debug cryptowelder
//! ```
//!
//! ## Workflow Trace Example
//!
//! ```text
//! INFO Starting application module="cryptowelder::Main"
//! INFO Run. service="cryptowelder::Main"
//! INFO Close. service="cryptowelder::Main"
//! INFO Stopped application.
//! ```

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Installs the global `fmt` subscriber.
///
/// Filtering follows `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`].
/// Calling this more than once is harmless: later calls leave the first
/// subscriber in place, which lets tests call it freely.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Service names are logged as fields instead
        .compact()
        .try_init();
}
