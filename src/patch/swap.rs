//! Moving the patched package into place.
//!
//! The original is renamed away first (to a backup, or to a scratch name
//! that is deleted afterwards), then the patched file is renamed onto the
//! original path. If the second rename fails the original is put back.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use super::PatchError;

/// Result of a successful swap.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapOutcome {
    /// Where the original package was kept, if a backup was requested.
    pub backup: Option<PathBuf>,
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Timestamp format used in backup names.
const BACKUP_STAMP: &str = "%Y%m%d-%H%M%S";

/// Backup location for `original`.
///
/// `<name>.bak` when free, otherwise `<name>.<timestamp>.bak`.
pub fn backup_path_for(original: &Path) -> PathBuf {
    let name = file_name(original);
    let plain = original.with_file_name(format!("{name}.bak"));
    if !plain.exists() {
        return plain;
    }

    let stamp = Local::now().format(BACKUP_STAMP).to_string();
    let mut candidate = original.with_file_name(format!("{name}.{stamp}.bak"));
    let mut n = 1;
    while candidate.exists() {
        candidate = original.with_file_name(format!("{name}.{stamp}-{n}.bak"));
        n += 1;
    }
    candidate
}

fn scratch_path_for(original: &Path) -> PathBuf {
    let name = file_name(original);
    let mut candidate = original.with_file_name(format!("{name}.old"));
    let mut n = 1;
    while candidate.exists() {
        candidate = original.with_file_name(format!("{name}.old-{n}"));
        n += 1;
    }
    candidate
}

fn move_file(from: &Path, to: &Path) -> Result<(), PatchError> {
    debug!("Moving {} to {}", from.display(), to.display());
    fs::rename(from, to).map_err(|source| PatchError::Move {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

/// Replace `original` with `patched`, optionally keeping a backup.
pub fn swap_into_place(
    original: &Path,
    patched: &Path,
    backup: bool,
) -> Result<SwapOutcome, PatchError> {
    let aside = if backup {
        backup_path_for(original)
    } else {
        scratch_path_for(original)
    };

    move_file(original, &aside)?;

    if let Err(e) = move_file(patched, original) {
        if let Err(restore_err) = fs::rename(&aside, original) {
            warn!(
                "Could not restore {} from {}: {}",
                original.display(),
                aside.display(),
                restore_err
            );
        }
        return Err(e);
    }

    if backup {
        info!("Original package kept at {}", aside.display());
        Ok(SwapOutcome { backup: Some(aside) })
    } else {
        if let Err(e) = fs::remove_file(&aside) {
            warn!("Could not remove {}: {}", aside.display(), e);
        }
        Ok(SwapOutcome { backup: None })
    }
}

/// Backups of `pck`, newest first.
///
/// The plain `<name>.bak` is always the oldest; timestamped backups sort
/// by their stamp.
pub fn find_backups(pck: &Path) -> Vec<PathBuf> {
    let name = file_name(pck);
    let Some(dir) = pck.parent() else {
        return Vec::new();
    };
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut backups: Vec<(BackupKey, PathBuf)> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| {
            let file = entry.file_name().to_string_lossy().into_owned();
            let key = backup_key(file.strip_prefix(name.as_str())?)?;
            Some((key, entry.path()))
        })
        .collect();

    backups.sort_by(|a, b| b.0.cmp(&a.0));
    backups.into_iter().map(|(_, path)| path).collect()
}

/// `None` for the plain backup, else the stamp and collision counter.
type BackupKey = Option<(NaiveDateTime, u32)>;

/// Parse the part of a backup name after the package name.
///
/// Accepts `.bak`, `.<stamp>.bak` and `.<stamp>-<n>.bak`; anything else is
/// not one of ours.
fn backup_key(rest: &str) -> Option<BackupKey> {
    if rest == ".bak" {
        return Some(None);
    }
    let stamp = rest.strip_prefix('.')?.strip_suffix(".bak")?;
    let (time, counter) = match stamp.split_at_checked(15) {
        Some((time, "")) => (time, 0),
        Some((time, suffix)) => {
            let digits = suffix.strip_prefix('-')?;
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            (time, digits.parse().ok()?)
        }
        None => return None,
    };
    let time = NaiveDateTime::parse_from_str(time, BACKUP_STAMP).ok()?;
    Some(Some((time, counter)))
}

/// Move the newest backup back onto `pck`. Returns the backup used.
pub fn restore_backup(pck: &Path) -> Result<PathBuf, PatchError> {
    let newest = find_backups(pck)
        .into_iter()
        .next()
        .ok_or_else(|| PatchError::NoBackup {
            path: pck.to_path_buf(),
        })?;

    move_file(&newest, pck)?;
    info!("Restored {} from {}", pck.display(), newest.display());
    Ok(newest)
}
