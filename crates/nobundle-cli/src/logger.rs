//! Logging setup using the `tracing` ecosystem.
//!
//! # Example
//!
//! ```rust,no_run
//! use nobundle_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!("Starting build");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "nobundle=debug,nobundle_config=debug,nobundle_cli=debug";
const QUIET_FILTER: &str = "nobundle=error,nobundle_config=error";
const DEFAULT_FILTER: &str = "nobundle=info,nobundle_config=info";

/// Initialize the global tracing subscriber. Call once, before any logging.
///
/// The level is chosen in this order:
/// 1. `--verbose`: DEBUG for nobundle crates
/// 2. `--quiet`: ERROR only
/// 3. `RUST_LOG`
/// 4. INFO for nobundle crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
