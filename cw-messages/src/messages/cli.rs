//! Process execution and result interpretation messages

pub struct CliMessages {
    pub empty_output: &'static str,
    pub executable_missing: &'static str,
    pub exited_with_code: &'static str,
    pub extracting: &'static str,
    pub install_dir_failed: &'static str,
    pub permissions_failed: &'static str,
    pub spawn_failed: &'static str,
    pub timed_out: &'static str,
    pub wait_failed: &'static str,
}

pub const CLI_MESSAGES: CliMessages = CliMessages {
    empty_output: "cwctl returned no output for: {command}",
    executable_missing: "Bundled cwctl executable not found at {path}",
    exited_with_code: "cwctl exited with code {code}",
    extracting: "Extracting cwctl {version} to {path}",
    install_dir_failed: "Failed to create install directory {path}: {error}",
    permissions_failed: "Failed to set executable permissions on {path}: {error}",
    spawn_failed: "Failed to start '{command}': {error}",
    timed_out: "Command timed out after {budget}: {command}",
    wait_failed: "Error waiting for '{command}': {error}",
};
