//! Turning a finished cwctl process into a payload or a typed failure.
//!
//! cwctl can exit 0 while reporting a logical error purely through its JSON
//! output, so the exit code is consulted only after the JSON checks:
//!
//! 1. a JSON object with an `error` key fails with `error_description`
//! 2. a JSON object whose `status` is not the success token fails with
//!    `status_message`
//! 3. a non-zero exit fails with stderr, else stdout, else a generic message
//! 4. blank output fails when the caller required output
//! 5. otherwise stdout is the payload

use cw_core::error::{CwError, Result};
use cw_core::ProcessResult;
use cw_messages::{msg, MESSAGES};
use serde_json::{Map, Value};
use tracing::warn;

/// Success token used by most cwctl commands.
pub const STATUS_OK: &str = "OK";
/// Success token used by `project create` and `project validate`.
pub const STATUS_SUCCESS: &str = "success";

/// What a caller needs from a cwctl invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expect {
    /// Blank stdout is a failure
    pub require_output: bool,
    /// Value of `status` that counts as success; `None` skips the status check
    pub success_status: Option<&'static str>,
}

impl Expect {
    /// Commands whose stdout carries data the caller parses.
    pub const PAYLOAD: Expect = Expect {
        require_output: true,
        success_status: Some(STATUS_OK),
    };

    /// Commands run for their side effect; output may be empty.
    pub const ACTION: Expect = Expect {
        require_output: false,
        success_status: Some(STATUS_OK),
    };

    /// The install status document, whose `status` field is a runtime state
    /// rather than a command outcome.
    pub const STATUS_DOCUMENT: Expect = Expect {
        require_output: true,
        success_status: None,
    };

    /// Project commands that report `"status": "success"`.
    pub const PROJECT: Expect = Expect {
        require_output: true,
        success_status: Some(STATUS_SUCCESS),
    };
}

/// The command-outcome fields of a cwctl JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusResponse {
    pub status: Option<String>,
    pub status_message: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl StatusResponse {
    /// Parse stdout; `None` unless it is a JSON object.
    pub fn parse(stdout: &str) -> Option<Self> {
        match serde_json::from_str::<Value>(stdout.trim()) {
            Ok(Value::Object(map)) => Some(Self::from_map(&map)),
            _ => None,
        }
    }

    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            status: map.get("status").map(value_text),
            status_message: map.get("status_message").map(value_text),
            error: map.get("error").map(value_text),
            error_description: map.get("error_description").map(value_text),
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Message for an `error` response.
    pub fn error_text(&self) -> String {
        non_blank(self.error_description.as_deref())
            .or_else(|| non_blank(self.error.as_deref()))
            .unwrap_or("unknown error")
            .to_string()
    }

    /// Message for a non-OK `status` response.
    pub fn status_text(&self) -> String {
        non_blank(self.status_message.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| format!("status: {}", self.status.as_deref().unwrap_or("")))
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Decide success or failure for `result`. `command` is only used in log
/// lines and the empty-output message.
pub fn interpret(result: &ProcessResult, expect: Expect, command: &str) -> Result<String> {
    if let Some(response) = StatusResponse::parse(&result.stdout) {
        if response.has_error() {
            let message = response.error_text();
            warn!(command, exit_code = result.exit_code, error = %message, "cwctl reported an error");
            return Err(CwError::Protocol {
                status: response.status,
                message,
            });
        }

        if let (Some(token), Some(status)) = (expect.success_status, response.status.as_deref()) {
            if status != token {
                let message = response.status_text();
                warn!(command, exit_code = result.exit_code, status, error = %message, "cwctl reported a failed status");
                return Err(CwError::Protocol {
                    status: response.status.clone(),
                    message,
                });
            }
        }
    }

    if !result.success() {
        let message = result.error_message();
        warn!(command, exit_code = result.exit_code, error = %message, "cwctl failed");
        return Err(CwError::Process {
            exit_code: result.exit_code,
            message,
        });
    }

    if expect.require_output && result.stdout.trim().is_empty() {
        let message = msg!(MESSAGES.cli.empty_output, command = command);
        warn!(command, stderr = %result.stderr.trim(), "{}", message);
        return Err(CwError::EmptyOutput(message));
    }

    Ok(result.stdout.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(stdout: &str) -> ProcessResult {
        ProcessResult::new(0, stdout, "")
    }

    #[test]
    fn test_status_ok_is_success() {
        let out = interpret(&ok(r#"{"status":"OK"}"#), Expect::PAYLOAD, "x").unwrap();
        assert_eq!(out, r#"{"status":"OK"}"#);
    }

    #[test]
    fn test_no_status_with_output_is_success() {
        let payload = r#"[{"url":"https://a"}]"#;
        assert_eq!(interpret(&ok(payload), Expect::PAYLOAD, "x").unwrap(), payload);
    }

    #[test]
    fn test_error_key_wins_even_with_exit_zero() {
        let err = interpret(
            &ok(r#"{"error":"x","error_description":"y"}"#),
            Expect::PAYLOAD,
            "x",
        )
        .unwrap_err();
        assert!(matches!(err, CwError::Protocol { .. }));
        assert_eq!(err.message(), "y");
    }

    #[test]
    fn test_error_key_wins_over_exit_code() {
        let result = ProcessResult::new(
            1,
            r#"{"error":"invalid_grant","error_description":"Invalid user credentials"}"#,
            "stderr noise",
        );
        let err = interpret(&result, Expect::PAYLOAD, "x").unwrap_err();
        assert_eq!(err.message(), "Invalid user credentials");
    }

    #[test]
    fn test_error_without_description_uses_error_value() {
        let err = interpret(&ok(r#"{"error":"con_not_found"}"#), Expect::ACTION, "x").unwrap_err();
        assert_eq!(err.message(), "con_not_found");
    }

    #[test]
    fn test_non_ok_status_fails() {
        let err = interpret(
            &ok(r#"{"status":"FAILED","status_message":"Connection not found"}"#),
            Expect::ACTION,
            "x",
        )
        .unwrap_err();
        match err {
            CwError::Protocol { status, message } => {
                assert_eq!(status.as_deref(), Some("FAILED"));
                assert_eq!(message, "Connection not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status_document_skips_status_check() {
        let doc = r#"{"status":"stopped","installed-versions":["0.9.0"]}"#;
        assert!(interpret(&ok(doc), Expect::STATUS_DOCUMENT, "status").is_ok());
        assert!(interpret(&ok(doc), Expect::PAYLOAD, "status").is_err());
    }

    #[test]
    fn test_project_success_token() {
        let doc = r#"{"status":"success","projectPath":"/p"}"#;
        assert!(interpret(&ok(doc), Expect::PROJECT, "project create").is_ok());
    }

    #[test]
    fn test_non_zero_exit_prefers_stderr() {
        let result = ProcessResult::new(2, "some stdout", "the real problem\n");
        let err = interpret(&result, Expect::ACTION, "x").unwrap_err();
        assert_eq!(err.message(), "the real problem");
        assert!(matches!(err, CwError::Process { exit_code: 2, .. }));
    }

    #[test]
    fn test_non_zero_exit_falls_back_to_stdout() {
        let result = ProcessResult::new(2, "plain text failure", "");
        let err = interpret(&result, Expect::ACTION, "x").unwrap_err();
        assert_eq!(err.message(), "plain text failure");
    }

    #[test]
    fn test_non_zero_exit_generic_message() {
        let result = ProcessResult::new(5, "", "");
        let err = interpret(&result, Expect::ACTION, "x").unwrap_err();
        assert_eq!(err.message(), "cwctl exited with code 5");
    }

    #[test]
    fn test_required_output_blank_fails() {
        let err = interpret(&ok("  \n"), Expect::PAYLOAD, "templates list").unwrap_err();
        assert!(matches!(err, CwError::EmptyOutput(_)));
        assert!(err.message().contains("templates list"));
    }

    #[test]
    fn test_action_allows_blank_output() {
        assert_eq!(interpret(&ok(""), Expect::ACTION, "stop-all").unwrap(), "");
    }

    #[test]
    fn test_non_string_status_fields() {
        let response = StatusResponse::parse(r#"{"status":404,"status_message":null}"#).unwrap();
        assert_eq!(response.status.as_deref(), Some("404"));
        assert_eq!(response.status_text(), "null");
    }
}
