// src/logging.rs
// =============================================================================
// Structured logging with tracing.
//
// What happens here:
// - Logs go to stderr; stdout is reserved for the report itself, so piping
//   `counter` into another tool never mixes the two
// - The level comes from -v (warn, info, debug, trace)
// - RUST_LOG, when set, overrides the -v default
// =============================================================================

use tracing_subscriber::EnvFilter;

/// Maps the `-v` count to a default filter. `RUST_LOG` wins when it is set.
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info,counter=info",
        2 => "info,counter=debug",
        _ => "debug,counter=trace",
    }
}

pub fn init_logging(verbose: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    // try_init: a second call (e.g. from tests) must not panic.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
