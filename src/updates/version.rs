//! Version checking against the latest published release.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::connectivity::{is_online, PROBE_TIMEOUT};
use crate::config::{Settings, DEFAULT_REPO_ID};

/// Version of this build.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// How the release repository is addressed on the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoRef {
    /// Numeric id, stable across renames
    Id(u64),
    /// `owner/name`
    Name(String),
}

/// Where to look up the latest release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSource {
    pub api_base_url: String,
    pub repo: RepoRef,
}

impl ReleaseSource {
    /// The repository id wins over the name; with neither set the
    /// translation repository id is used.
    pub fn from_settings(settings: &Settings) -> Self {
        let repo = match (&settings.release_repo_id, &settings.release_repo) {
            (Some(id), _) => RepoRef::Id(*id),
            (None, Some(name)) => RepoRef::Name(name.clone()),
            (None, None) => RepoRef::Id(DEFAULT_REPO_ID),
        };
        Self {
            api_base_url: settings.api_base_url.clone(),
            repo,
        }
    }

    /// API URL of the latest release.
    pub fn latest_release_url(&self) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        match &self.repo {
            RepoRef::Id(id) => format!("{}/repositories/{}/releases/latest", base, id),
            RepoRef::Name(name) => format!("{}/repos/{}/releases/latest", base, name),
        }
    }

    /// Human-facing releases page, when it can be derived.
    pub fn releases_page(&self) -> Option<String> {
        match &self.repo {
            RepoRef::Name(name) => Some(format!("https://github.com/{}/releases", name)),
            RepoRef::Id(_) => None,
        }
    }
}

/// The latest release as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    /// Raw tag, e.g. `v1.3.0`
    pub tag: String,
    /// Release page
    pub url: Option<String>,
}

/// Outcome of a version check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VersionCheck {
    UpToDate {
        current: String,
        latest: String,
    },
    UpdateAvailable {
        current: String,
        latest: String,
        url: Option<String>,
    },
    Offline,
    Failed {
        reason: String,
    },
}

impl VersionCheck {
    /// Whether the installer may carry on without asking.
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, VersionCheck::UpToDate { .. })
    }
}

/// Parse a version string, tolerating a leading `v`.
pub fn parse_version(raw: &str) -> Option<semver::Version> {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    semver::Version::parse(trimmed).ok()
}

/// Compare the running version against a release.
pub fn compare_versions(current: &str, release: &ReleaseInfo) -> VersionCheck {
    let Some(current_version) = parse_version(current) else {
        return VersionCheck::Failed {
            reason: format!("Installer version '{}' is not a valid version", current),
        };
    };
    let Some(latest_version) = parse_version(&release.tag) else {
        return VersionCheck::Failed {
            reason: format!("Release tag '{}' is not a valid version", release.tag),
        };
    };

    if latest_version > current_version {
        VersionCheck::UpdateAvailable {
            current: current_version.to_string(),
            latest: latest_version.to_string(),
            url: release.url.clone(),
        }
    } else {
        VersionCheck::UpToDate {
            current: current_version.to_string(),
            latest: latest_version.to_string(),
        }
    }
}

/// Fetch the latest release from the API.
pub fn fetch_latest_release(source: &ReleaseSource) -> Result<ReleaseInfo> {
    let client = reqwest::blocking::Client::builder()
        .user_agent("ut-setup")
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let url = source.latest_release_url();
    tracing::debug!("GET {}", url);

    let response: serde_json::Value = client
        .get(&url)
        .header(reqwest::header::ACCEPT, "application/vnd.github+json")
        .send()
        .with_context(|| format!("Request to {} failed", url))?
        .error_for_status()
        .context("Releases API returned an error")?
        .json()
        .context("Failed to parse releases API response")?;

    let tag = response["tag_name"]
        .as_str()
        .context("No tag_name in response")?
        .to_string();

    let url = response["html_url"]
        .as_str()
        .map(String::from)
        .or_else(|| source.releases_page());

    Ok(ReleaseInfo { tag, url })
}

/// Something that can tell whether the installer is current.
pub trait ReleaseCheck {
    /// Version of the running installer.
    fn current(&self) -> &str;

    fn check(&self) -> VersionCheck;
}

/// Probes connectivity, then asks the releases API.
#[derive(Debug, Clone)]
pub struct VersionChecker {
    current: String,
    source: ReleaseSource,
    probe_hosts: Vec<String>,
    probe_timeout: Duration,
}

impl VersionChecker {
    pub fn new(current: impl Into<String>, source: ReleaseSource) -> Self {
        Self {
            current: current.into(),
            source,
            probe_hosts: Vec::new(),
            probe_timeout: PROBE_TIMEOUT,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.installer_version.clone(),
            ReleaseSource::from_settings(settings),
        )
        .with_probe_hosts(settings.probe_hosts.clone())
    }

    pub fn with_probe_hosts(mut self, hosts: Vec<String>) -> Self {
        self.probe_hosts = hosts;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn source(&self) -> &ReleaseSource {
        &self.source
    }
}

impl ReleaseCheck for VersionChecker {
    fn current(&self) -> &str {
        &self.current
    }

    fn check(&self) -> VersionCheck {
        if !is_online(&self.probe_hosts, self.probe_timeout) {
            tracing::info!("No probe host reachable");
            return VersionCheck::Offline;
        }

        match fetch_latest_release(&self.source) {
            Ok(release) => {
                tracing::info!("Latest release tag: {}", release.tag);
                compare_versions(&self.current, &release)
            }
            Err(e) => {
                tracing::warn!("Release lookup failed: {:#}", e);
                VersionCheck::Failed {
                    reason: format!("{:#}", e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(tag: &str) -> ReleaseInfo {
        ReleaseInfo {
            tag: tag.to_string(),
            url: Some("https://example.test/releases/1".to_string()),
        }
    }

    #[test]
    fn parse_version_accepts_prefix() {
        assert_eq!(parse_version("v1.2.3"), Some(semver::Version::new(1, 2, 3)));
        assert_eq!(parse_version(" 1.2.3 "), Some(semver::Version::new(1, 2, 3)));
        assert!(parse_version("latest").is_none());
        assert!(parse_version("1.2").is_none());
    }

    #[test]
    fn newer_tag_means_update() {
        let check = compare_versions("1.2.0", &release("v1.3.0"));
        assert_eq!(
            check,
            VersionCheck::UpdateAvailable {
                current: "1.2.0".into(),
                latest: "1.3.0".into(),
                url: Some("https://example.test/releases/1".into()),
            }
        );
    }

    #[test]
    fn equal_or_older_tag_is_up_to_date() {
        assert!(compare_versions("1.2.0", &release("v1.2.0")).is_up_to_date());
        assert!(compare_versions("1.2.0", &release("1.1.9")).is_up_to_date());
    }

    #[test]
    fn prerelease_is_older_than_release() {
        assert!(compare_versions("1.3.0", &release("v1.3.0-rc.1")).is_up_to_date());
    }

    #[test]
    fn invalid_tag_fails() {
        let check = compare_versions("1.2.0", &release("nightly"));
        assert!(matches!(check, VersionCheck::Failed { reason } if reason.contains("nightly")));
    }

    #[test]
    fn endpoint_by_id_and_name() {
        let by_id = ReleaseSource {
            api_base_url: "https://api.github.com/".into(),
            repo: RepoRef::Id(42),
        };
        assert_eq!(
            by_id.latest_release_url(),
            "https://api.github.com/repositories/42/releases/latest"
        );
        assert!(by_id.releases_page().is_none());

        let by_name = ReleaseSource {
            api_base_url: "http://localhost:9999".into(),
            repo: RepoRef::Name("owner/tl".into()),
        };
        assert_eq!(
            by_name.latest_release_url(),
            "http://localhost:9999/repos/owner/tl/releases/latest"
        );
        assert_eq!(
            by_name.releases_page().as_deref(),
            Some("https://github.com/owner/tl/releases")
        );
    }

    #[test]
    fn source_prefers_id() {
        let mut settings = Settings {
            release_repo: Some("owner/tl".into()),
            ..Settings::default()
        };
        assert_eq!(
            ReleaseSource::from_settings(&settings).repo,
            RepoRef::Id(DEFAULT_REPO_ID)
        );

        settings.release_repo_id = None;
        assert_eq!(
            ReleaseSource::from_settings(&settings).repo,
            RepoRef::Name("owner/tl".into())
        );

        settings.release_repo = None;
        assert_eq!(
            ReleaseSource::from_settings(&settings).repo,
            RepoRef::Id(DEFAULT_REPO_ID)
        );
    }

    #[test]
    fn json_shape_is_tagged() {
        let json = serde_json::to_value(VersionCheck::Offline).unwrap();
        assert_eq!(json["status"], "offline");

        let json = serde_json::to_value(compare_versions("1.0.0", &release("2.0.0"))).unwrap();
        assert_eq!(json["status"], "update_available");
        assert_eq!(json["latest"], "2.0.0");
    }

    #[test]
    fn unreachable_probe_reports_offline() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        drop(listener);

        let checker = VersionChecker::from_settings(&Settings::default())
            .with_probe_hosts(vec![addr])
            .with_probe_timeout(Duration::from_millis(300));
        assert_eq!(checker.check(), VersionCheck::Offline);
    }
}
