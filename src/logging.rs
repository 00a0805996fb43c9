//! Diagnostic logging setup
//!
//! stdout carries reports (text or JSON); all log output goes to stderr.
//! `RUST_LOG` overrides the level chosen by `--verbose`.

use std::io::IsTerminal;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter directive used when `RUST_LOG` is unset
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "rigger=debug" } else { "rigger=warn" }
}

/// Install the global subscriber. Call once, before any logging.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time();

    // A second init (tests) is harmless
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "rigger=warn");
        assert_eq!(default_directive(true), "rigger=debug");
    }
}
