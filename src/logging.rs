//! Structured logging setup
//!
//! Diagnostics always go to stderr so they never interleave with data the
//! session writes to stdout.

use crate::error::{CpsError, Result};
use std::env;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding a filter directive, e.g. `cps=debug`
pub const LOG_ENV: &str = "CPS_LOG";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter directive passed to `EnvFilter`
    pub filter: String,
    /// Include module targets in each line
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
            with_target: false,
        }
    }
}

impl LogConfig {
    /// Level from the `-v` count: warn, info, debug, then trace
    pub fn from_verbosity(verbose: u8) -> Self {
        let filter = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        Self {
            filter: filter.to_string(),
            with_target: verbose >= 2,
        }
    }

    /// Like [`LogConfig::from_verbosity`], but `CPS_LOG` wins when set
    pub fn from_env(verbose: u8) -> Self {
        let mut config = Self::from_verbosity(verbose);
        if let Ok(filter) = env::var(LOG_ENV) {
            if !filter.trim().is_empty() {
                config.filter = filter;
            }
        }
        config
    }
}

/// Install the global subscriber
///
/// Fails if the filter does not parse or a subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.filter).map_err(|e| {
        CpsError::InvalidArguments(format!("invalid log filter {:?}: {}", config.filter, e))
    })?;

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.with_target)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| CpsError::InvalidArguments(format!("failed to initialize logging: {}", e)))
}
