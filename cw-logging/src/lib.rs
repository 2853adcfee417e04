//! Tracing initialization for the cw bridge
//!
//! Uses the standard `RUST_LOG` environment variable for filtering:
//! - `RUST_LOG=debug` - Set global level
//! - `RUST_LOG=cw_client=debug,cw_core=info` - Set per-crate levels
//!
//! Uses `RUST_LOG_FORMAT` for output format:
//! - `json` - JSON formatted output
//! - `compact` - Compact single-line output
//! - `pretty` - Pretty formatted output (default)
//!
//! Logs go to stderr so that JSON payloads printed on stdout stay parseable.

use cw_core::error::{CwError, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format selected by `RUST_LOG_FORMAT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Compact,
    Pretty,
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("RUST_LOG_FORMAT").unwrap_or_default())
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

/// Initialize the tracing subscriber with the `info` default filter
pub fn init() -> Result<()> {
    init_with_defaults("info")
}

/// Initialize with a default filter used when `RUST_LOG` is not set
pub fn init_with_defaults(default_filter: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);
    let layer = fmt::layer().with_writer(std::io::stderr);

    let result = match LogFormat::from_env() {
        LogFormat::Json => registry.with(layer.with_ansi(false).json()).try_init(),
        LogFormat::Compact => registry.with(layer.compact()).try_init(),
        LogFormat::Pretty => registry.with(layer.pretty()).try_init(),
    };

    result.map_err(|e| CwError::Internal(format!("Failed to initialize tracing: {}", e)))
}

/// Initialize for tests; output is captured by the test harness
pub fn init_for_testing() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::new("debug"))
        .with(fmt::layer().with_test_writer())
        .try_init()
        .map_err(|e| CwError::Internal(format!("Failed to initialize test tracing: {}", e)))
}
