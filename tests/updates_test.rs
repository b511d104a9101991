//! Release check against a mock releases API.

use httpmock::prelude::*;
use serde_json::json;
use ut_setup::config::Settings;
use ut_setup::updates::{
    fetch_latest_release, ReleaseCheck, ReleaseSource, RepoRef, VersionCheck, VersionChecker,
};

fn source(server: &MockServer, repo: RepoRef) -> ReleaseSource {
    ReleaseSource {
        api_base_url: server.base_url(),
        repo,
    }
}

fn settings(server: &MockServer, version: &str) -> Settings {
    Settings {
        installer_version: version.to_string(),
        api_base_url: server.base_url(),
        release_repo_id: Some(7),
        probe_hosts: Vec::new(),
        ..Settings::default()
    }
}

#[test]
fn fetch_by_repository_id() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/repositories/7/releases/latest")
            .header("user-agent", "ut-setup");
        then.status(200).json_body(json!({
            "tag_name": "v1.3.0",
            "html_url": "https://github.com/owner/tl/releases/tag/v1.3.0"
        }));
    });

    let release = fetch_latest_release(&source(&server, RepoRef::Id(7))).unwrap();

    mock.assert();
    assert_eq!(release.tag, "v1.3.0");
    assert_eq!(
        release.url.as_deref(),
        Some("https://github.com/owner/tl/releases/tag/v1.3.0")
    );
}

#[test]
fn fetch_by_name_falls_back_to_releases_page() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/repos/owner/tl/releases/latest");
        then.status(200).json_body(json!({ "tag_name": "1.0.0" }));
    });

    let release =
        fetch_latest_release(&source(&server, RepoRef::Name("owner/tl".into()))).unwrap();

    assert_eq!(
        release.url.as_deref(),
        Some("https://github.com/owner/tl/releases")
    );
}

#[test]
fn missing_tag_is_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/repositories/7/releases/latest");
        then.status(200).json_body(json!({ "name": "untagged" }));
    });

    let err = fetch_latest_release(&source(&server, RepoRef::Id(7))).unwrap_err();
    assert!(format!("{:#}", err).contains("tag_name"));
}

#[test]
fn http_error_is_reported() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/repositories/7/releases/latest");
        then.status(404).body("Not Found");
    });

    let err = fetch_latest_release(&source(&server, RepoRef::Id(7))).unwrap_err();
    assert!(format!("{:#}", err).contains("404"), "{:#}", err);
}

#[test]
fn checker_reports_update() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/repositories/7/releases/latest");
        then.status(200).json_body(json!({
            "tag_name": "v2.0.0",
            "html_url": "https://example.test/r/2.0.0"
        }));
    });

    let checker = VersionChecker::from_settings(&settings(&server, "1.2.0"));

    assert_eq!(
        checker.check(),
        VersionCheck::UpdateAvailable {
            current: "1.2.0".into(),
            latest: "2.0.0".into(),
            url: Some("https://example.test/r/2.0.0".into()),
        }
    );
}

#[test]
fn checker_reports_up_to_date() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/repositories/7/releases/latest");
        then.status(200).json_body(json!({ "tag_name": "v1.2.0" }));
    });

    let checker = VersionChecker::from_settings(&settings(&server, "1.2.0"));
    assert!(checker.check().is_up_to_date());
}

#[test]
fn checker_turns_server_errors_into_failures() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/repositories/7/releases/latest");
        then.status(500);
    });

    let checker = VersionChecker::from_settings(&settings(&server, "1.2.0"));
    assert!(matches!(checker.check(), VersionCheck::Failed { .. }));
}
