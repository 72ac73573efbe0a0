//! Per-server resolution tests

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use fleet_tracker::deployment::resolver::DeploymentResolver;
use fleet_tracker::deployment::state::HasDeployment;
use fleet_tracker::errors::TrackerError;
use fleet_tracker::models::report::DeploymentReport;
use fleet_tracker::models::revision::Revision;
use fleet_tracker::models::server::{Server, ServerRole};
use fleet_tracker::repository::history::HistoryRepository;
use fleet_tracker::repository::{RepositoryRegistry, PLUGINS_REPOSITORY};

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
}

fn create_test_report(runtime_commit: Option<&str>, packages: &[(&str, &str)]) -> DeploymentReport {
    let runtime = match runtime_commit {
        Some(commit) => json!({"version": {"commit": commit}}),
        None => json!({"branch": "master"}),
    };
    let packages: BTreeMap<String, serde_json::Value> = packages
        .iter()
        .map(|(name, commit)| (name.to_string(), json!({"commit": commit})))
        .collect();
    DeploymentReport::new(runtime, packages)
}

fn create_test_server(report: Option<DeploymentReport>) -> Server {
    let mut server = Server::new("lobby-1", "Lobby");
    server.deployment.deploy_info = report;
    server
}

fn create_test_resolver() -> DeploymentResolver {
    let mut registry = RepositoryRegistry::new(Arc::new(HistoryRepository::new(
        "nextgen",
        vec![Revision::new("deadbeef", at(1)), Revision::new("cafef00d", at(2))],
    )));
    registry
        .register(
            PLUGINS_REPOSITORY,
            Arc::new(HistoryRepository::new("plugins", vec![Revision::new("abc123", at(3))])),
        )
        .register(
            "SportBukkit",
            Arc::new(HistoryRepository::new("SportBukkit", vec![Revision::new("5b1e7a0", at(4))])),
        )
        .map_package("Plugins", PLUGINS_REPOSITORY);
    DeploymentResolver::new(Arc::new(registry))
}

#[test]
fn test_no_report_resolves_to_nothing() {
    let server = create_test_server(None);
    let resolver = create_test_resolver();

    for package in [None, Some("Plugins"), Some("SportBukkit"), Some("Unknown")] {
        assert_eq!(server.deployed_commit(package).unwrap(), None);
        assert!(resolver.deployed_revision(&server, package).unwrap().is_none());
    }
    assert!(server.deployed_application_commit().is_none());
    assert!(resolver.latest_plugin_revision(&server, None).unwrap().is_none());
}

#[test]
fn test_package_commit() {
    let server = create_test_server(Some(create_test_report(Some("deadbeef"), &[("Plugins", "abc123")])));
    assert_eq!(server.deployed_commit(Some("Plugins")).unwrap(), Some("abc123"));
    assert_eq!(server.deployed_commit(Some("BungeeCord")).unwrap(), None);
}

#[test]
fn test_runtime_commit() {
    let server = create_test_server(Some(create_test_report(Some("deadbeef"), &[])));
    assert_eq!(server.deployed_commit(None).unwrap(), Some("deadbeef"));
}

#[test]
fn test_malformed_runtime_report_fails() {
    let server = create_test_server(Some(create_test_report(None, &[("Plugins", "abc123")])));
    let resolver = create_test_resolver();

    assert!(matches!(
        server.deployed_commit(None),
        Err(TrackerError::MalformedReport(_))
    ));
    assert!(resolver.deployed_revision(&server, None).is_err());

    // Package lookups are unaffected
    assert_eq!(server.deployed_commit(Some("Missing")).unwrap(), None);
    assert_eq!(
        resolver.deployed_revision(&server, Some("Plugins")).unwrap().map(|r| r.commit),
        Some("abc123".to_string())
    );
}

#[test]
fn test_deployed_revision() {
    let server = create_test_server(Some(create_test_report(
        Some("cafef00d"),
        &[("SportBukkit", "5b1e7a0"), ("BungeeCord", "0000000")],
    )));
    let resolver = create_test_resolver();

    let runtime = resolver.deployed_revision(&server, None).unwrap().unwrap();
    assert_eq!(runtime.commit, "cafef00d");
    assert_eq!(runtime.created_at, at(2));

    let application = resolver.deployed_application_revision(&server).unwrap().unwrap();
    assert_eq!(application.commit, "5b1e7a0");

    // No repository registered for BungeeCord
    assert!(resolver.deployed_revision(&server, Some("BungeeCord")).unwrap().is_none());
}

#[test]
fn test_deployed_revision_unknown_commit() {
    let server = create_test_server(Some(create_test_report(Some("f00f00f0"), &[])));
    let resolver = create_test_resolver();
    assert!(resolver.deployed_revision(&server, None).unwrap().is_none());
}

#[test]
fn test_application_commit_follows_role() {
    let mut server = create_test_server(Some(create_test_report(
        Some("deadbeef"),
        &[("SportBukkit", "5b1e7a0"), ("BungeeCord", "b0b0b0b")],
    )));
    assert_eq!(server.deployed_application_commit(), Some("5b1e7a0"));

    server.role = ServerRole::Bungee;
    assert_eq!(server.application_package(), "BungeeCord");
    assert_eq!(server.deployed_application_commit(), Some("b0b0b0b"));
}

#[test]
fn test_latest_plugin_revision_from_candidates() {
    let server = create_test_server(Some(create_test_report(Some("deadbeef"), &[("Plugins", "abc123")])));
    let resolver = create_test_resolver();

    let mut wanted = Revision::new("abc123", at(5));
    wanted.summary = Some("Release plugins".to_string());
    let candidates = vec![Revision::new("999999", at(6)), wanted.clone()];

    assert_eq!(
        resolver.latest_plugin_revision(&server, Some(candidates.as_slice())).unwrap(),
        Some(wanted)
    );

    let unrelated = vec![Revision::new("999999", at(6))];
    assert!(resolver.latest_plugin_revision(&server, Some(unrelated.as_slice())).unwrap().is_none());
}

#[test]
fn test_latest_plugin_revision_from_repository() {
    let server = create_test_server(Some(create_test_report(Some("deadbeef"), &[("Plugins", "abc123")])));
    let resolver = create_test_resolver();

    let revision = resolver.latest_plugin_revision(&server, None).unwrap().unwrap();
    assert_eq!(revision.commit, "abc123");
    assert_eq!(revision.created_at, at(3));
}

#[test]
fn test_latest_plugin_revision_without_plugins_repository() {
    let server = create_test_server(Some(create_test_report(Some("deadbeef"), &[("Plugins", "abc123")])));
    let resolver = DeploymentResolver::new(Arc::new(RepositoryRegistry::new(Arc::new(
        HistoryRepository::new("nextgen", Vec::new()),
    ))));
    assert!(resolver.latest_plugin_revision(&server, None).unwrap().is_none());
}

#[test]
fn test_resolved_paths() {
    let mut server = create_test_server(None);
    for base in ["/repo", "/opt/checkouts"] {
        assert_eq!(
            server.update_server_path(Path::new(base)),
            format!("{}/nextgen/update-server", base)
        );
    }
    // The base is used verbatim, without path normalization
    assert_eq!(
        server.update_server_path(Path::new("/repo/")),
        "/repo//nextgen/update-server"
    );
    assert_eq!(server.update_server_path(Path::new("")), "/nextgen/update-server");
    assert_eq!(server.deploy_path(), "/minecraft/servers/lobby-1");

    server.deployment.update_server_path = Some("/beta/nextgen/update-server".to_string());
    server.deployment.deploy_path = Some("/srv/lobby".to_string());
    assert_eq!(server.update_server_path(Path::new("/repo")), "/beta/nextgen/update-server");
    assert_eq!(server.deploy_path(), "/srv/lobby");
}
