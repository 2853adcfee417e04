//! Descriptors parsed from cwctl JSON payloads.

use cw_core::error::{CwError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Connection id of the local runtime.
pub const LOCAL_CONNECTION_ID: &str = "local";

/// A runtime cwctl knows how to reach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clientid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Connection {
    pub fn is_local(&self) -> bool {
        self.id == LOCAL_CONNECTION_ID
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRepo {
    pub url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub protected: bool,
    #[serde(default)]
    pub project_styles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTemplate {
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub language: String,
    pub url: String,
    #[serde(default)]
    pub project_type: String,
    #[serde(default)]
    pub project_style: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Credentials for an image registry. The password is never reported back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySecret {
    pub address: String,
    #[serde(default)]
    pub username: String,
}

/// Language and build type detected for a project directory.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetails {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub project_type: String,
    #[serde(default)]
    pub build_type: Option<String>,
}

/// Result of `project create` or `project validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub status: String,
    #[serde(default)]
    pub project_path: String,
    #[serde(default)]
    pub result: ProjectDetails,
}

/// Result of `project bind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindResult {
    #[serde(rename = "projectID")]
    pub project_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Log and build the error for a payload cwctl should never have printed.
pub(crate) fn unexpected_output(command: &str, detail: impl std::fmt::Display) -> CwError {
    let message = format!("Unexpected output from {command}: {detail}");
    warn!("{}", message);
    CwError::Serialization(message)
}

/// Deserialize a payload, mapping failures to `CwError::Serialization`
/// with the offending command in the message.
pub fn parse_payload<T: DeserializeOwned>(payload: &str, command: &str) -> Result<T> {
    serde_json::from_str(payload.trim()).map_err(|e| unexpected_output(command, e))
}

/// Deserialize a list that cwctl prints either as a bare array or wrapped
/// in an object under `key`, e.g. `{"connections": [...]}`.
pub fn parse_list<T: DeserializeOwned>(payload: &str, key: &str, command: &str) -> Result<Vec<T>> {
    let value: Value = parse_payload(payload, command)?;
    let items = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => map.remove(key).unwrap_or(Value::Array(Vec::new())),
        Value::Null => Value::Array(Vec::new()),
        other => {
            return Err(unexpected_output(
                command,
                format_args!("expected a list, got {other}"),
            ))
        }
    };
    serde_json::from_value(items).map_err(|e| unexpected_output(command, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::captured_warnings;

    #[test]
    fn test_unexpected_payloads_are_logged() {
        let mut results = Vec::new();
        let logs = captured_warnings(|| {
            results.push(parse_payload::<Connection>("<html>", "connections get").map(|_| ()));
            results.push(parse_list::<Connection>("42", "connections", "connections list").map(|_| ()));
        });
        assert!(results
            .iter()
            .all(|r| matches!(r, Err(CwError::Serialization(_)))));
        assert!(logs.contains("Unexpected output from connections get"));
        assert!(logs.contains("Unexpected output from connections list: expected a list, got 42"));
    }

    #[test]
    fn test_wrapped_connection_list() {
        let payload = r#"{"schemaversion":1,"connections":[
            {"id":"local","label":"Local","url":""},
            {"id":"K1","label":"Remote","url":"https://gk.example.com","username":"dev"}
        ]}"#;
        let conns: Vec<Connection> = parse_list(payload, "connections", "connections list").unwrap();
        assert_eq!(conns.len(), 2);
        assert!(conns[0].is_local());
        assert_eq!(conns[1].username.as_deref(), Some("dev"));
    }

    #[test]
    fn test_bare_array_list() {
        let payload = r#"[{"address":"docker.io","username":"me"}]"#;
        let secrets: Vec<RegistrySecret> = parse_list(payload, "registrysecrets", "x").unwrap();
        assert_eq!(secrets[0].address, "docker.io");
    }

    #[test]
    fn test_template_repo_camel_case() {
        let payload = r#"[{"url":"https://r/index.json","description":"Default","enabled":true,
            "protected":true,"projectStyles":["Codewind"]}]"#;
        let repos: Vec<TemplateRepo> = parse_list(payload, "repos", "x").unwrap();
        assert!(repos[0].enabled);
        assert_eq!(repos[0].project_styles, vec!["Codewind"]);
    }

    #[test]
    fn test_project_info() {
        let info: ProjectInfo = parse_payload(
            r#"{"status":"success","projectPath":"/w/app","result":{"language":"java","projectType":"liberty"}}"#,
            "project create",
        )
        .unwrap();
        assert_eq!(info.result.language, "java");
        assert_eq!(info.project_path, "/w/app");
    }

    #[test]
    fn test_bad_payload_names_command() {
        let err = parse_payload::<BindResult>("{", "project bind").unwrap_err();
        assert!(err.message().contains("project bind"));
    }

    #[test]
    fn test_scalar_is_not_a_list() {
        assert!(parse_list::<Connection>("42", "connections", "x").is_err());
    }
}
