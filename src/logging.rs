//! Structured logging for tmps
//!
//! Logs go to stderr so that stdout carries only the JSON result.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive for a verbosity count (`-v` repetitions).
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "tmps=warn",
        1 => "tmps=info",
        2 => "tmps=debug",
        _ => "tmps=trace",
    }
}

/// Initialize the logging system
///
/// - `RUST_LOG` overrides the level when set
/// - otherwise the level follows `verbosity` (warn, info, debug, trace)
/// - compact single-line output on stderr, without timestamps
pub fn init(verbosity: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .try_init();
}

/// Initialize logging for tests
///
/// Uses try_init() to avoid panicking if called multiple times.
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new("tmps=trace"))
        .with(fmt::layer().with_test_writer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(default_directive(0), "tmps=warn");
        assert_eq!(default_directive(1), "tmps=info");
        assert_eq!(default_directive(2), "tmps=debug");
        assert_eq!(default_directive(9), "tmps=trace");
    }

    #[test]
    fn init_test_does_not_panic() {
        init_test();
        init_test();
        tracing::debug!("debug message");
    }
}
