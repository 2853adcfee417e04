use std::path::{Path, PathBuf};

use cw_client::mock::MockRunner;
use cw_client::{BindRequest, CwctlClient, ExecutableSource, InstallStatus};
use cw_config::CliConfig;
use cw_core::{CwError, ProcessResult, WaitPolicy};

const CWCTL: &str = "/opt/codewind/cwctl";

fn client(runner: MockRunner) -> CwctlClient<MockRunner> {
    let config = CliConfig {
        expected_version: Some("0.9.0".to_string()),
        ..Default::default()
    };
    CwctlClient::new(runner, ExecutableSource::Fixed(PathBuf::from(CWCTL)), config)
}

#[test]
fn status_started_with_expected_version() {
    let client = client(MockRunner::new().ok(
        r#"{"status":"started","started":["0.9.0"],"installed-versions":["0.9.0"],"url":"http://127.0.0.1:10000"}"#,
    ));
    let info = client.status().unwrap();

    assert_eq!(info.status(), InstallStatus::Started);
    assert!(info.is_started());
    assert!(info.is_installed());
    assert_eq!(info.url(), Some("http://127.0.0.1:10000/"));

    let calls = client.runner().calls();
    assert_eq!(calls[0].executable(), Path::new(CWCTL));
    assert_eq!(calls[0].to_args(), vec!["--json", "status"]);
    assert_eq!(client.runner().policies(), vec![WaitPolicy::QUICK]);
}

#[test]
fn status_with_other_installed_version() {
    let client = client(MockRunner::new().ok(
        r#"{"status":"stopped","installed-versions":["0.8.0"]}"#,
    ));
    let info = client.status().unwrap();
    assert!(info.has_installed_versions());
    assert!(!info.is_installed());
}

#[test]
fn lifecycle_commands_use_tag_and_long_policy() {
    let runner = MockRunner::new().ok("").ok("").ok("").ok("");
    let client = client(runner);

    client.install("0.9.0").unwrap();
    client.start("0.9.0").unwrap();
    client.stop_all().unwrap();
    client.remove("0.9.0").unwrap();

    let args: Vec<Vec<String>> = client
        .runner()
        .calls()
        .iter()
        .map(|c| c.to_args())
        .collect();
    assert_eq!(args[0], vec!["--json", "install", "--tag", "0.9.0"]);
    assert_eq!(args[1], vec!["--json", "start", "--tag", "0.9.0"]);
    assert_eq!(args[2], vec!["--json", "stop-all"]);
    assert_eq!(args[3], vec!["--json", "remove", "--tag", "0.9.0"]);
    assert!(client
        .runner()
        .policies()
        .iter()
        .all(|p| *p == WaitPolicy::LONG));
}

#[test]
fn install_failure_reports_stderr() {
    let client = client(MockRunner::new().result(ProcessResult::new(
        1,
        "Pulling images...",
        "docker: permission denied",
    )));
    let err = client.install("0.9.0").unwrap_err();
    assert_eq!(err.message(), "docker: permission denied");
}

#[test]
fn list_connections() {
    let client = client(MockRunner::new().ok(
        r#"{"schemaversion":1,"connections":[{"id":"local","label":"Codewind local connection","url":""}]}"#,
    ));
    let connections = client.list_connections().unwrap();
    assert_eq!(connections.len(), 1);
    assert!(connections[0].is_local());
    assert_eq!(
        client.runner().last_args(),
        vec!["--json", "connections", "list"]
    );
}

#[test]
fn add_connection_returns_id() {
    let client = client(MockRunner::new().ok(r#"{"status":"OK","id":"K3F1SXW0"}"#));
    let id = client
        .add_connection("staging", "https://gk.example.com", None)
        .unwrap();
    assert_eq!(id, "K3F1SXW0");
    assert_eq!(
        client.runner().last_args(),
        vec![
            "--json",
            "connections",
            "add",
            "--label",
            "staging",
            "--url",
            "https://gk.example.com"
        ]
    );
}

#[test]
fn remove_connection_failed_status_with_exit_zero() {
    let client = client(MockRunner::new().ok(
        r#"{"status":"FAILED","status_message":"Connection K1 not found"}"#,
    ));
    let err = client.remove_connection("K1").unwrap_err();
    assert!(matches!(err, CwError::Protocol { .. }));
    assert_eq!(err.message(), "Connection K1 not found");
}

#[test]
fn get_access_token() {
    let client = client(MockRunner::new().ok(
        r#"{"access_token":"eyJhbGciOi","expires_in":60,"token_type":"bearer"}"#,
    ));
    let token = client.get_access_token("K1").unwrap();
    assert_eq!(token.access_token, "eyJhbGciOi");
    assert!(token.about_to_expire());
    assert_eq!(
        client.runner().last_args(),
        vec!["--json", "sectoken", "get", "--conid", "K1"]
    );
}

#[test]
fn access_token_error_description() {
    let client = client(MockRunner::new().result(ProcessResult::new(
        0,
        r#"{"error":"invalid_grant","error_description":"Invalid user credentials"}"#,
        "",
    )));
    let err = client.get_access_token("K1").unwrap_err();
    assert_eq!(err.message(), "Invalid user credentials");
}

#[test]
fn keyring_password_is_passed_but_masked() {
    let client = client(MockRunner::new().ok(r#"{"status":"OK"}"#));
    client.update_keyring("K1", "dev", "hunter2").unwrap();

    let calls = client.runner().calls();
    let call = &calls[0];
    assert_eq!(call.option("--password"), Some("hunter2"));
    assert!(!call.to_string().contains("hunter2"));
}

#[test]
fn templates_enabled_only_flag() {
    let client = client(MockRunner::new().ok(
        r#"[{"label":"Node.js Express","description":"Express","language":"nodejs","url":"https://t/node","projectType":"nodejs"}]"#,
    ));
    let templates = client.list_templates("local", true).unwrap();
    assert_eq!(templates[0].project_type, "nodejs");
    assert_eq!(
        client.runner().last_args(),
        vec![
            "--json",
            "templates",
            "list",
            "--conid",
            "local",
            "--showEnabledOnly"
        ]
    );
}

#[test]
fn empty_template_list_is_an_error() {
    let client = client(MockRunner::new().ok(""));
    let err = client.list_templates("local", false).unwrap_err();
    assert!(matches!(err, CwError::EmptyOutput(_)));
}

#[test]
fn template_repo_management() {
    let runner = MockRunner::new()
        .ok(r#"[{"url":"https://r/index.json","enabled":true,"protected":false}]"#)
        .ok(r#"{"status":"OK"}"#)
        .ok(r#"{"status":"OK"}"#)
        .ok(r#"{"status":"OK"}"#);
    let client = client(runner);

    let repos = client.list_template_repos("local").unwrap();
    assert_eq!(repos[0].url, "https://r/index.json");
    client
        .add_template_repo("local", "https://r2/index.json", Some("extra"), None)
        .unwrap();
    client
        .set_template_repo_enabled("local", "https://r2/index.json", false)
        .unwrap();
    client
        .remove_template_repo("local", "https://r2/index.json")
        .unwrap();

    let subcommands: Vec<String> = client
        .runner()
        .calls()
        .iter()
        .map(|c| c.subcommand_display())
        .collect();
    assert_eq!(
        subcommands,
        vec![
            "templates repos list",
            "templates repos add",
            "templates repos disable",
            "templates repos remove"
        ]
    );
    let calls = client.runner().calls();
    let add = &calls[1];
    assert_eq!(add.option("--name"), Some("extra"));
    assert!(!add.has_option("--description"));
}

#[test]
fn create_project_success_token() {
    let client = client(MockRunner::new().ok(
        r#"{"status":"success","projectPath":"/work/app","result":{"language":"nodejs","projectType":"nodejs"}}"#,
    ));
    let info = client
        .create_project("local", "https://t/node", Path::new("/work/app"))
        .unwrap();
    assert_eq!(info.result.language, "nodejs");
    assert_eq!(
        client.runner().last_args(),
        vec![
            "--json",
            "project",
            "create",
            "--url",
            "https://t/node",
            "--path",
            "/work/app",
            "--conid",
            "local"
        ]
    );
    assert_eq!(client.runner().policies(), vec![WaitPolicy::LONG]);
}

#[test]
fn validate_project_failure_status() {
    let client = client(MockRunner::new().ok(
        r#"{"status":"failed","status_message":"Path does not exist"}"#,
    ));
    let err = client
        .validate_project("local", Path::new("/missing"))
        .unwrap_err();
    assert_eq!(err.message(), "Path does not exist");
}

#[test]
fn bind_project() {
    let client = client(MockRunner::new().ok(
        r#"{"projectID":"a1b2","name":"app","status":"OK"}"#,
    ));
    let result = client
        .bind_project(
            "local",
            BindRequest {
                name: "app",
                language: "java",
                project_type: "liberty",
                path: Path::new("/work/app"),
            },
        )
        .unwrap();
    assert_eq!(result.project_id, "a1b2");
    assert_eq!(
        client.runner().last_args(),
        vec![
            "--json", "project", "bind", "--name", "app", "--language", "java", "--type",
            "liberty", "--path", "/work/app", "--conid", "local"
        ]
    );
}

#[test]
fn registry_secrets() {
    let runner = MockRunner::new()
        .ok(r#"[{"address":"docker.io","username":"me"}]"#)
        .ok(r#"[{"address":"docker.io","username":"me"},{"address":"quay.io","username":"me"}]"#)
        .ok("[]");
    let client = client(runner);

    assert_eq!(client.list_registry_secrets("K1").unwrap().len(), 1);
    client
        .add_registry_secret("K1", "quay.io", "me", "pw")
        .unwrap();
    client.remove_registry_secret("K1", "quay.io").unwrap();

    let calls = client.runner().calls();
    assert_eq!(calls[1].option("--address"), Some("quay.io"));
    assert_eq!(calls[2].subcommand_display(), "registrysecrets remove");
}

#[test]
fn insecure_config_adds_global_flag() {
    let config = CliConfig {
        insecure: true,
        ..Default::default()
    };
    let client = CwctlClient::new(
        MockRunner::new().ok(r#"{"connections":[]}"#),
        ExecutableSource::Fixed(PathBuf::from(CWCTL)),
        config,
    );
    assert!(client.list_connections().unwrap().is_empty());
    assert_eq!(
        client.runner().last_args(),
        vec!["--json", "--insecure", "connections", "list"]
    );
}
