use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use cw_client::mock::MockRunner;
use cw_client::{
    CwctlClient, ExecutableSource, InstallStatus, ListenerKey, RuntimeManager, UpdateEvent,
};
use cw_config::CliConfig;
use cw_core::{CwError, ProcessResult};

const STOPPED: &str = r#"{"status":"stopped","installed-versions":["0.9.0"]}"#;
const STARTED: &str =
    r#"{"status":"started","started":["0.9.0"],"installed-versions":["0.9.0"],"url":"http://localhost:9090"}"#;
const UNINSTALLED: &str = r#"{"status":"uninstalled"}"#;

fn manager(runner: MockRunner) -> RuntimeManager<MockRunner> {
    let config = CliConfig {
        expected_version: Some("0.9.0".to_string()),
        ..Default::default()
    };
    RuntimeManager::new(CwctlClient::new(
        runner,
        ExecutableSource::Fixed(PathBuf::from("cwctl")),
        config,
    ))
}

fn subcommands(manager: &RuntimeManager<MockRunner>) -> Vec<String> {
    manager
        .client()
        .runner()
        .calls()
        .iter()
        .map(|c| c.subcommand_display())
        .collect()
}

#[test]
fn snapshot_starts_unknown() {
    let manager = manager(MockRunner::new());
    assert!(manager.install_info().is_unknown());
    assert_eq!(manager.client().runner().call_count(), 0);
}

#[test]
fn refresh_replaces_snapshot() {
    let manager = manager(MockRunner::new().ok(STARTED));
    let before = manager.install_info();
    let info = manager.refresh();

    assert!(info.is_started());
    assert!(before.is_unknown());
    assert!(Arc::ptr_eq(&info, &manager.install_info()));
}

#[test]
fn failed_refresh_is_unknown() {
    let manager = manager(
        MockRunner::new()
            .ok(STARTED)
            .result(ProcessResult::new(1, "", "cannot reach docker")),
    );
    assert!(manager.refresh().is_started());
    let info = manager.refresh();
    assert_eq!(info.status(), InstallStatus::Unknown);
}

#[test]
fn lifecycle_refreshes_afterwards() {
    let manager = manager(MockRunner::new().ok("").ok(STOPPED));
    let info = manager.stop().unwrap();
    assert_eq!(info.status(), InstallStatus::Stopped);
    assert_eq!(subcommands(&manager), vec!["stop-all", "status"]);
}

#[test]
fn failed_lifecycle_still_refreshes() {
    let manager = manager(
        MockRunner::new()
            .result(ProcessResult::new(1, "", "port 9090 in use"))
            .ok(STOPPED),
    );
    let err = manager.start().unwrap_err();
    assert_eq!(err.message(), "port 9090 in use");
    assert_eq!(manager.install_info().status(), InstallStatus::Stopped);
}

#[test]
fn ensure_started_installs_and_starts() {
    let manager = manager(
        MockRunner::new()
            .ok(UNINSTALLED)
            .ok("")
            .ok(STOPPED)
            .ok("")
            .ok(STARTED),
    );
    let info = manager.ensure_started().unwrap();
    assert!(info.is_started());
    assert_eq!(
        subcommands(&manager),
        vec!["status", "install", "status", "start", "status"]
    );
    let calls = manager.client().runner().calls();
    assert_eq!(calls[1].option("--tag"), Some("0.9.0"));
}

#[test]
fn ensure_started_when_already_running() {
    let manager = manager(MockRunner::new().ok(STARTED));
    assert!(manager.ensure_started().unwrap().is_started());
    assert_eq!(subcommands(&manager), vec!["status"]);
}

#[test]
fn ensure_started_rejects_wrong_running_version() {
    let other = r#"{"status":"started","started":["0.8.0"],"installed-versions":["0.8.0","0.9.0"],"url":"http://x"}"#;
    let manager = manager(MockRunner::new().ok(other).ok("").ok(other));
    let err = manager.ensure_started().unwrap_err();
    assert!(matches!(err, CwError::Protocol { .. }));
}

#[test]
fn status_change_notifies_local_listeners() {
    let manager = manager(MockRunner::new().ok(STOPPED).ok(STOPPED).ok(STARTED));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    manager
        .listeners()
        .add(ListenerKey::connection("local"), move |event| {
            if let UpdateEvent::RuntimeStatusChanged(info) = event {
                sink.lock().unwrap().push(info.status());
            }
        });

    manager.refresh();
    manager.refresh();
    manager.refresh();

    // The second refresh saw no change
    assert_eq!(
        *seen.lock().unwrap(),
        vec![InstallStatus::Stopped, InstallStatus::Started]
    );
}

#[test]
fn cached_token_is_reused() {
    let manager = manager(MockRunner::new().ok(
        r#"{"access_token":"abc","token_type":"bearer","expires_in":3600}"#,
    ));
    let first = manager.access_token("K1").unwrap();
    let second = manager.access_token("K1").unwrap();
    assert_eq!(first, second);
    assert_eq!(manager.client().runner().call_count(), 1);
}

#[test]
fn expiring_token_is_refetched() {
    let manager = manager(
        MockRunner::new()
            .ok(r#"{"access_token":"short","token_type":"bearer","expires_in":60}"#)
            .ok(r#"{"access_token":"long","token_type":"bearer","expires_in":3600}"#),
    );
    assert_eq!(manager.access_token("K1").unwrap().access_token, "short");
    assert_eq!(manager.access_token("K1").unwrap().access_token, "long");
}

#[test]
fn just_issued_token_is_not_refetched() {
    let manager = manager(MockRunner::new().ok(
        r#"{"access_token":"abc","token_type":"bearer","expires_in":3600}"#,
    ));
    manager.access_token("K1").unwrap();
    let token = manager.refresh_token("K1").unwrap();
    assert_eq!(token.access_token, "abc");
    assert_eq!(manager.client().runner().call_count(), 1);
}

#[test]
fn credential_update_drops_token_and_notifies() {
    let manager = manager(
        MockRunner::new()
            .ok(r#"{"access_token":"old","token_type":"bearer"}"#)
            .ok(r#"{"status":"OK"}"#)
            .ok(r#"{"access_token":"new","token_type":"bearer"}"#),
    );
    let notified = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notified);
    manager
        .listeners()
        .add(ListenerKey::project("K1", "p1"), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

    assert_eq!(manager.access_token("K1").unwrap().access_token, "old");
    manager.update_credentials("K1", "dev", "pw").unwrap();
    assert_eq!(notified.load(Ordering::SeqCst), 1);
    assert_eq!(manager.access_token("K1").unwrap().access_token, "new");
}

#[test]
fn project_removal_notifies_only_that_project() {
    let manager = manager(MockRunner::new().ok(r#"{"status":"OK"}"#));
    let hits = Arc::new(AtomicUsize::new(0));
    let misses = Arc::new(AtomicUsize::new(0));
    let (h, m) = (Arc::clone(&hits), Arc::clone(&misses));
    manager
        .listeners()
        .add(ListenerKey::project("local", "p1"), move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });
    manager
        .listeners()
        .add(ListenerKey::project("local", "p2"), move |_| {
            m.fetch_add(1, Ordering::SeqCst);
        });

    manager.remove_project("local", "p1").unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(misses.load(Ordering::SeqCst), 0);
}
