//! Logging setup for contactbook.
//!
//! Server, client and CLI all log through `tracing`. Output goes to stderr so
//! `list --json` and other command output on stdout stay clean.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Third-party targets that are capped at `warn` unless `RUST_LOG` says
/// otherwise.
const QUIET_DEPENDENCIES: &[&str] = &["hyper", "hyper_util", "reqwest"];

/// How much the binary logs, chosen by `-q` and `-v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only (`-q`).
    Quiet,
    /// Requests, seeding and startup (the default).
    #[default]
    Normal,
    /// Store calls and client effects as well (`-v`).
    Verbose,
    /// Everything (`-vv`).
    Trace,
}

impl Verbosity {
    /// The most detailed level emitted for contactbook's own targets.
    #[must_use]
    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// The `EnvFilter` directive used when `RUST_LOG` is unset.
    #[must_use]
    pub fn filter_directive(self) -> String {
        let mut directive = format!("contactbook={}", self.level());
        for target in QUIET_DEPENDENCIES {
            directive.push_str(&format!(",{target}=warn"));
        }
        directive
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG`, when set, replaces the directive derived from `verbosity`.
/// Calling this again after a subscriber is installed has no effect.
///
/// ```no_run
/// use contactbook::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbosity != Verbosity::Normal),
        )
        .try_init();
}

/// Route warnings from code under test through the test harness writer.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("contactbook=warn")
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_follow_flags() {
        let levels: Vec<Level> = [
            Verbosity::Quiet,
            Verbosity::Normal,
            Verbosity::Verbose,
            Verbosity::Trace,
        ]
        .into_iter()
        .map(Verbosity::level)
        .collect();
        assert_eq!(levels, [Level::ERROR, Level::INFO, Level::DEBUG, Level::TRACE]);
        assert_eq!(Verbosity::default(), Verbosity::Normal);
    }

    #[test]
    fn test_filter_directive_caps_dependencies() {
        let directive = Verbosity::Verbose.filter_directive();
        assert!(directive.starts_with("contactbook=DEBUG"));
        assert!(directive.contains("hyper=warn"));
        assert!(directive.contains("reqwest=warn"));
        assert!(EnvFilter::try_new(&directive).is_ok());
    }

    #[test]
    fn test_init_is_repeatable() {
        init_test_logging();
        init_logging(Verbosity::Trace);
        init_logging(Verbosity::Quiet);
    }
}
