//! Snapshot of the local runtime's install state, derived from the
//! `cwctl status` document.

use std::fmt;

use cw_core::error::{CwError, Result};
use cw_messages::MESSAGES;
use serde_json::Value;
use tracing::warn;

/// Oldest runtime version this bridge can drive.
pub const MIN_SUPPORTED_VERSION: &str = "0.9.0";

const LATEST: &str = "latest";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstallStatus {
    Uninstalled,
    Stopped,
    Started,
    Error,
    Unknown,
}

impl InstallStatus {
    /// Map the `status` field. Anything unrecognized is an error state.
    pub fn from_status(status: &str) -> Self {
        match status {
            "uninstalled" => InstallStatus::Uninstalled,
            "stopped" => InstallStatus::Stopped,
            "started" => InstallStatus::Started,
            _ => InstallStatus::Error,
        }
    }

    pub fn is_started(self) -> bool {
        self == InstallStatus::Started
    }

    /// Started or stopped; the states in which versions are reported.
    pub fn has_installation(self) -> bool {
        matches!(self, InstallStatus::Started | InstallStatus::Stopped)
    }

    pub fn label(self) -> &'static str {
        let runtime = &MESSAGES.runtime;
        match self {
            InstallStatus::Uninstalled => runtime.status_uninstalled,
            InstallStatus::Stopped => runtime.status_stopped,
            InstallStatus::Started => runtime.status_started,
            InstallStatus::Error => runtime.status_error,
            InstallStatus::Unknown => runtime.status_unknown,
        }
    }
}

impl fmt::Display for InstallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable view over one status document. Replaced wholesale on refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallInfo {
    status: InstallStatus,
    expected_version: String,
    started_versions: Vec<String>,
    installed_versions: Vec<String>,
    url: Option<String>,
    supported_version: Option<String>,
    supported_is_started: bool,
}

impl InstallInfo {
    /// A snapshot that has not been queried, or whose query failed.
    pub fn unknown(expected_version: impl Into<String>) -> Self {
        Self {
            status: InstallStatus::Unknown,
            expected_version: expected_version.into(),
            started_versions: Vec::new(),
            installed_versions: Vec::new(),
            url: None,
            supported_version: None,
            supported_is_started: false,
        }
    }

    pub fn parse(document: &str, expected_version: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(document.trim()).map_err(|e| {
            warn!(error = %e, "unparsable cwctl status document");
            CwError::from(e)
        })?;
        Ok(Self::from_value(&value, expected_version))
    }

    pub fn from_value(value: &Value, expected_version: &str) -> Self {
        let status = value
            .get("status")
            .and_then(Value::as_str)
            .map(InstallStatus::from_status)
            .unwrap_or(InstallStatus::Error);

        let mut info = Self::unknown(expected_version);
        info.status = status;

        if status.is_started() {
            info.started_versions = string_list(value.get("started"));
            info.url = value
                .get("url")
                .and_then(Value::as_str)
                .filter(|url| !url.is_empty())
                .map(with_trailing_slash);
        }
        if status.has_installation() {
            info.installed_versions = string_list(value.get("installed-versions"));
        }

        let accept = |v: &&String| is_supported_version(v) && v.as_str() == expected_version;
        if let Some(v) = info.started_versions.iter().find(accept) {
            info.supported_version = Some(v.clone());
            info.supported_is_started = true;
        } else if let Some(v) = info.installed_versions.iter().find(accept) {
            info.supported_version = Some(v.clone());
        }

        info
    }

    pub fn status(&self) -> InstallStatus {
        self.status
    }

    pub fn expected_version(&self) -> &str {
        &self.expected_version
    }

    pub fn started_versions(&self) -> &[String] {
        &self.started_versions
    }

    pub fn installed_versions(&self) -> &[String] {
        &self.installed_versions
    }

    /// Runtime URL, always ending in `/`. Only present while started.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn supported_version(&self) -> Option<&str> {
        self.supported_version.as_deref()
    }

    pub fn has_installed_versions(&self) -> bool {
        !self.installed_versions.is_empty()
    }

    pub fn has_started_versions(&self) -> bool {
        !self.started_versions.is_empty()
    }

    pub fn is_installed(&self) -> bool {
        self.status.has_installation() && self.supported_version.is_some()
    }

    pub fn is_started(&self) -> bool {
        self.status.is_started() && self.supported_is_started
    }

    pub fn is_unknown(&self) -> bool {
        self.status == InstallStatus::Unknown
    }
}

/// `latest`, or a dotted numeric version at or above [`MIN_SUPPORTED_VERSION`].
pub fn is_supported_version(version: &str) -> bool {
    if version == LATEST {
        return true;
    }
    match (parse_version(version), parse_version(MIN_SUPPORTED_VERSION)) {
        (Some(v), Some(min)) => v >= min,
        _ => false,
    }
}

fn parse_version(version: &str) -> Option<Vec<u64>> {
    let mut parts: Vec<u64> = version
        .split('.')
        .map(|p| p.parse().ok())
        .collect::<Option<_>>()?;
    while parts.len() > 1 && parts.last() == Some(&0) {
        parts.pop();
    }
    Some(parts)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}
