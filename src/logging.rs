// src/logging.rs
// =============================================================================
// Sets up the global tracing subscriber.
//
// Diagnostics go to stderr so stdout stays clean for results (a tree, an
// exported artifact) that may be piped into another program.
//
// Level selection:
// - RUST_LOG, when set, wins
// - otherwise: no -v = warn, -v = info, -vv (or more) = debug
// =============================================================================

use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}

fn build_filter(verbose: u8) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level_for_verbosity(verbose).into())
        .from_env_lossy()
}

/// Installs the subscriber. Safe to call more than once; later calls are no-ops.
pub fn init(verbose: u8) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // try_init fails only if a subscriber is already set
    let _ = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(build_filter(verbose))
        .try_init();
}
