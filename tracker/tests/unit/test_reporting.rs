//! Startup report and API view tests

use std::path::Path;

use fleet_tracker::deployment::state::HasDeployment;
use fleet_tracker::lifecycle::{Lifecycle, LifecycleEvent};
use fleet_tracker::models::server::Server;
use fleet_tracker::reporting::{Reporter, StartupReport};
use fleet_tracker::views::{deployment_status, server_list};

const STARTUP: &str = r#"{
    "plugin_versions": {"Commons": "1.4.2", "PGM": "0.9"},
    "protocol_versions": [47, 107, 110],
    "deploy_info": {
        "nextgen": {"version": {"commit": "deadbeef"}},
        "packages": {
            "SportBukkit": {"commit": "5b1e7a0"},
            "Plugins": {"commit": "abc123"}
        }
    }
}"#;

fn create_test_server() -> Server {
    let mut server = Server::new("lobby-1", "Lobby");
    server
        .deployment
        .plugin_versions
        .insert("Stale".to_string(), "0.1".to_string());
    server
}

#[test]
fn test_startup_applies_report() {
    let reporter = Reporter::new();
    let mut server = create_test_server();

    assert!(reporter.startup(&mut server, StartupReport::parse(STARTUP).unwrap()));

    let deployment = &server.deployment;
    assert_eq!(deployment.plugin_versions.len(), 2);
    assert!(!deployment.plugin_versions.contains_key("Stale"));
    assert_eq!(deployment.protocol_versions, vec![47, 107, 110]);
    assert_eq!(server.deployed_commit(None).unwrap(), Some("deadbeef"));
    assert_eq!(server.deployed_application_commit(), Some("5b1e7a0"));
}

#[test]
fn test_startup_clears_plugin_versions_when_omitted() {
    let reporter = Reporter::new();
    let mut server = create_test_server();
    server.deployment.protocol_versions = vec![47];

    assert!(reporter.startup(&mut server, StartupReport::default()));

    assert!(server.deployment.plugin_versions.is_empty());
    assert_eq!(server.deployment.protocol_versions, vec![47]);
}

#[test]
fn test_startup_replaces_report_wholesale() {
    let reporter = Reporter::new();
    let mut server = create_test_server();
    reporter.startup(&mut server, StartupReport::parse(STARTUP).unwrap());

    let update = StartupReport::parse(
        r#"{"deploy_info": {"nextgen": {"version": {"commit": "cafef00d"}}, "packages": {}}}"#,
    )
    .unwrap();
    reporter.startup(&mut server, update);

    assert_eq!(server.deployed_commit(None).unwrap(), Some("cafef00d"));
    assert_eq!(server.deployed_commit(Some("Plugins")).unwrap(), None);

    // A server that could not load its manifest reports nothing
    reporter.startup(&mut server, StartupReport::default());
    assert!(server.deployment.deploy_info.is_none());
    assert_eq!(server.deployed_commit(None).unwrap(), None);
}

#[test]
fn test_halted_startup_keeps_state() {
    let mut lifecycle = Lifecycle::new();
    lifecycle.before_event(LifecycleEvent::Startup, |_: &mut Server| false);
    let reporter = Reporter::with_lifecycle(lifecycle);
    let mut server = create_test_server();

    assert!(!reporter.startup(&mut server, StartupReport::parse(STARTUP).unwrap()));
    assert!(server.deployment.plugin_versions.contains_key("Stale"));
    assert!(server.deployment.deploy_info.is_none());
}

#[test]
fn test_status_renders_unknown() {
    let server = create_test_server();
    let status = deployment_status(&server, Path::new("/repo"));

    assert_eq!(status.runtime_commit, "unknown");
    assert_eq!(status.application_commit, "unknown");
    assert_eq!(status.plugins_commit, "unknown");
    assert_eq!(status.application_package, "SportBukkit");
    assert_eq!(status.deploy_path, "/minecraft/servers/lobby-1");
    assert_eq!(status.update_server_path, "/repo/nextgen/update-server");
}

#[test]
fn test_status_renders_malformed_report_as_unknown() {
    let reporter = Reporter::new();
    let mut server = create_test_server();
    let report = StartupReport::parse(
        r#"{"deploy_info": {"nextgen": {}, "packages": {"Plugins": {"commit": "abc123"}}}}"#,
    )
    .unwrap();
    reporter.startup(&mut server, report);

    let status = deployment_status(&server, Path::new("/repo"));
    assert_eq!(status.runtime_commit, "unknown");
    assert_eq!(status.plugins_commit, "abc123");
}

#[test]
fn test_status_renders_commits() {
    let reporter = Reporter::new();
    let mut server = create_test_server();
    reporter.startup(&mut server, StartupReport::parse(STARTUP).unwrap());

    let status = deployment_status(&server, Path::new("/repo"));
    assert_eq!(status.runtime_commit, "deadbeef");
    assert_eq!(status.application_commit, "5b1e7a0");
    assert_eq!(status.plugins_commit, "abc123");
    assert_eq!(status.protocol_versions, vec![47, 107, 110]);

    let list = server_list(&[server]);
    assert_eq!(list.total, 1);
    assert_eq!(list.servers[0].runtime_commit, "deadbeef");
}
