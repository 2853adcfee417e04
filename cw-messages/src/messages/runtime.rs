//! Local runtime messages

pub struct RuntimeMessages {
    pub status_error: &'static str,
    pub status_header: &'static str,
    pub status_installed_versions: &'static str,
    pub status_not_supported: &'static str,
    pub status_started: &'static str,
    pub status_stopped: &'static str,
    pub status_uninstalled: &'static str,
    pub status_unknown: &'static str,
    pub status_url: &'static str,
}

pub const RUNTIME_MESSAGES: RuntimeMessages = RuntimeMessages {
    status_error: "🔴 Error",
    status_header: "📊 Local runtime status",
    status_installed_versions: "   Installed:  {versions}",
    status_not_supported: "⚠️  Installed versions do not include {version}",
    status_started: "🟢 Started",
    status_stopped: "🟡 Stopped",
    status_uninstalled: "⚪ Not installed",
    status_unknown: "❔ Unknown",
    status_url: "   URL:        {url}",
};
