//! Structure of the global `config.yaml`.

use cw_core::WaitPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root structure for the global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CliConfig {
    /// Pass `--insecure` so cwctl skips TLS verification for remote connections
    #[serde(default)]
    pub insecure: bool,

    /// Override for the per-version install base (default `~/.codewind`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_dir: Option<PathBuf>,

    /// Directory holding the bundled `<os>/cwctl` executables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_dir: Option<PathBuf>,

    /// Runtime version this bridge expects; defaults to the crate version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<String>,

    /// Exported as `JAVA_HOME` to cwctl when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_home: Option<PathBuf>,

    /// Wait budgets per operation class
    #[serde(default, skip_serializing_if = "TimeoutSettings::is_default")]
    pub timeouts: TimeoutSettings,
}

/// Classes of cwctl operations, each with its own wait budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationClass {
    Quick,
    Standard,
    Long,
}

/// Polling interval and iteration count as stored in YAML
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WaitSettings {
    pub interval_ms: u64,
    pub max_iterations: u32,
}

impl WaitSettings {
    pub fn to_policy(self) -> WaitPolicy {
        WaitPolicy::new(Duration::from_millis(self.interval_ms), self.max_iterations)
    }
}

impl From<WaitPolicy> for WaitSettings {
    fn from(policy: WaitPolicy) -> Self {
        Self {
            interval_ms: policy.interval.as_millis() as u64,
            max_iterations: policy.max_iterations,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeoutSettings {
    #[serde(default = "default_quick")]
    pub quick: WaitSettings,
    #[serde(default = "default_standard")]
    pub standard: WaitSettings,
    #[serde(default = "default_long")]
    pub long: WaitSettings,
}

fn default_quick() -> WaitSettings {
    WaitPolicy::QUICK.into()
}

fn default_standard() -> WaitSettings {
    WaitPolicy::STANDARD.into()
}

fn default_long() -> WaitSettings {
    WaitPolicy::LONG.into()
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self {
            quick: default_quick(),
            standard: default_standard(),
            long: default_long(),
        }
    }
}

impl TimeoutSettings {
    /// Check if these are the default settings (used by serde skip_serializing_if)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn policy(&self, class: OperationClass) -> WaitPolicy {
        match class {
            OperationClass::Quick => self.quick.to_policy(),
            OperationClass::Standard => self.standard.to_policy(),
            OperationClass::Long => self.long.to_policy(),
        }
    }
}

impl CliConfig {
    /// The expected runtime version, falling back to this crate's version
    pub fn expected_version(&self) -> &str {
        self.expected_version
            .as_deref()
            .unwrap_or(env!("CARGO_PKG_VERSION"))
    }

    pub fn policy(&self, class: OperationClass) -> WaitPolicy {
        self.timeouts.policy(class)
    }
}
