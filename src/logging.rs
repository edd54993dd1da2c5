//! Log setup for the `linekit` binary.
//!
//! Events go to stderr. The filter comes from `LINEKIT_LOG` (in `EnvFilter`
//! syntax, e.g. `linekit=debug`) if it's set, and otherwise from the
//! `--verbose`/`--quiet` flags.
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "LINEKIT_LOG";

/// The default filter directive for a verbosity level
#[must_use]
pub fn default_directive(verbosity: i8) -> &'static str {
    match verbosity {
        i8::MIN..=-1 => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Does nothing if one is already installed.
pub fn init(verbosity: i8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
