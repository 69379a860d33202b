//! Diagnostic logging setup.
//!
//! Events go to stderr so stdout stays clean for JSON and plain output.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive (e.g. `nutrilens=debug`).
pub const LOG_ENV: &str = "NUTRILENS_LOG";

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "nutrilens=debug"
    } else {
        "nutrilens=warn"
    }
}

/// Install the global subscriber. `NUTRILENS_LOG` wins over `RUST_LOG`;
/// without either, `--verbose` selects debug and the default is warn.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
