//! Installer version verification.
//!
//! This module provides:
//! - A connectivity probe against well-known hosts
//! - Latest-release lookup on the releases API
//! - The retry / stop prompts shown when the check does not pass

pub mod connectivity;
pub mod prompt;
pub mod version;

pub use connectivity::{is_online, DEFAULT_PROBE_HOSTS, PROBE_TIMEOUT};
pub use prompt::{verify_version, VersionGate};
pub use version::{
    compare_versions, fetch_latest_release, parse_version, ReleaseCheck, ReleaseInfo,
    ReleaseSource, RepoRef, VersionCheck, VersionChecker, VERSION,
};
