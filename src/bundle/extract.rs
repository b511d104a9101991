//! Blocking archive extraction.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use zip::ZipArchive;

use super::{ArchiveSource, BundleError, ExtractEvent};

/// Staging directory used while `dest` is being populated.
pub fn staging_dir_for(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "extract".into());
    name.push(".partial");
    dest.with_file_name(name)
}

/// Extract every entry of `source` into `dest`.
///
/// `on_event` receives [`ExtractEvent::Total`] once, then one
/// [`ExtractEvent::Extracted`] per entry. The terminal event is left to the
/// caller; this function returns the result instead.
///
/// `dest` must not exist yet or be an empty directory; anything else is
/// refused before the archive is read. On failure the staging directory is
/// removed and `dest` is untouched.
pub fn extract_archive<F>(
    source: ArchiveSource,
    dest: &Path,
    mut on_event: F,
) -> Result<PathBuf, BundleError>
where
    F: FnMut(ExtractEvent),
{
    debug!("Extracting {} into {}", source.describe(), dest.display());
    check_destination(dest)?;

    let staging = staging_dir_for(dest);
    if staging.exists() {
        fs::remove_dir_all(&staging).map_err(|source| write_err(&staging, source))?;
    }

    if let Err(e) = extract_into(source, &staging, &mut on_event) {
        if let Err(cleanup) = fs::remove_dir_all(&staging) {
            if cleanup.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    "Failed to clean up staging dir {}: {}",
                    staging.display(),
                    cleanup
                );
            }
        }
        return Err(e);
    }

    if dest.exists() {
        // Only ever an empty directory here.
        fs::remove_dir(dest).map_err(|source| write_err(dest, source))?;
    }
    fs::rename(&staging, dest).map_err(|source| write_err(dest, source))?;

    debug!("Extraction complete: {}", dest.display());
    Ok(dest.to_path_buf())
}

fn check_destination(dest: &Path) -> Result<(), BundleError> {
    if dest.file_name().is_none() {
        return Err(BundleError::InvalidDestination {
            path: dest.to_path_buf(),
        });
    }
    let in_use = || BundleError::DestinationInUse {
        path: dest.to_path_buf(),
    };
    match fs::symlink_metadata(dest) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(write_err(dest, source)),
        Ok(meta) if !meta.is_dir() => Err(in_use()),
        Ok(_) => {
            let mut entries = fs::read_dir(dest).map_err(|source| write_err(dest, source))?;
            if entries.next().is_some() {
                Err(in_use())
            } else {
                Ok(())
            }
        }
    }
}

fn extract_into<F>(source: ArchiveSource, staging: &Path, on_event: &mut F) -> Result<(), BundleError>
where
    F: FnMut(ExtractEvent),
{
    let reader = source.open()?;
    let mut archive = ZipArchive::new(reader)?;

    let total = archive.len();
    on_event(ExtractEvent::Total(total));

    fs::create_dir_all(staging).map_err(|source| write_err(staging, source))?;

    for i in 0..total {
        let mut entry = archive.by_index(i)?;
        let name = entry.name().to_string();

        let Some(relative) = entry.enclosed_name() else {
            return Err(BundleError::UnsafeEntry { name });
        };
        let out_path = staging.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|source| write_err(&out_path, source))?;
        } else {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent).map_err(|source| write_err(parent, source))?;
            }
            let mut out_file =
                File::create(&out_path).map_err(|source| write_err(&out_path, source))?;
            std::io::copy(&mut entry, &mut out_file)
                .map_err(|source| write_err(&out_path, source))?;
        }

        on_event(ExtractEvent::Extracted {
            count: i + 1,
            name,
        });
    }

    Ok(())
}

fn write_err(path: &Path, source: std::io::Error) -> BundleError {
    BundleError::Write {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::testing::zip_bytes;
    use tempfile::TempDir;

    fn collect(
        source: ArchiveSource,
        dest: &Path,
    ) -> (Vec<ExtractEvent>, Result<PathBuf, BundleError>) {
        let mut events = Vec::new();
        let result = extract_archive(source, dest, |e| events.push(e));
        (events, result)
    }

    #[test]
    fn staging_dir_is_sibling_with_suffix() {
        let staging = staging_dir_for(Path::new("/tmp/session/translation"));
        assert_eq!(staging, PathBuf::from("/tmp/session/translation.partial"));
    }

    #[test]
    fn extracts_all_entries_with_matching_names() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("translation");
        let bytes = zip_bytes(&[
            ("dialogue/act1.csv", "a"),
            ("dialogue/act2.csv", "b"),
            ("fonts/main.ttf", "c"),
        ]);

        let (events, result) = collect(ArchiveSource::Bytes(bytes), &dest);

        assert_eq!(result.unwrap(), dest);
        assert_eq!(
            fs::read_to_string(dest.join("dialogue/act1.csv")).unwrap(),
            "a"
        );
        assert!(dest.join("dialogue/act2.csv").is_file());
        assert!(dest.join("fonts/main.ttf").is_file());
        assert!(!staging_dir_for(&dest).exists());

        assert!(matches!(events[0], ExtractEvent::Total(3)));
        let names: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                ExtractEvent::Extracted { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            names,
            vec!["dialogue/act1.csv", "dialogue/act2.csv", "fonts/main.ttf"]
        );
    }

    #[test]
    fn progress_counts_are_sequential() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("out");
        let bytes = zip_bytes(&[("dir/", ""), ("dir/a.txt", "1"), ("b.txt", "2")]);

        let (events, result) = collect(ArchiveSource::Bytes(bytes), &dest);
        result.unwrap();

        let counts: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                ExtractEvent::Extracted { count, .. } => Some(*count),
                _ => None,
            })
            .collect();
        assert_eq!(counts, vec![1, 2, 3]);
        assert!(dest.join("dir").is_dir());
    }

    #[test]
    fn corrupt_archive_fails_without_leaving_dest() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("translation");

        let (events, result) = collect(
            ArchiveSource::Bytes(b"this is not a zip file".to_vec()),
            &dest,
        );

        assert!(matches!(result, Err(BundleError::Corrupt(_))));
        assert!(events.is_empty());
        assert!(!dest.exists());
        assert!(!staging_dir_for(&dest).exists());
    }

    #[test]
    fn truncated_archive_fails_without_leaving_dest() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("translation");
        let mut bytes = zip_bytes(&[("a.txt", "hello"), ("b.txt", "world")]);
        bytes.truncate(bytes.len() / 2);

        let (_, result) = collect(ArchiveSource::Bytes(bytes), &dest);

        assert!(result.is_err());
        assert!(!dest.exists());
        assert!(!staging_dir_for(&dest).exists());
    }

    #[test]
    fn unsafe_entry_aborts_extraction() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("translation");
        let bytes = zip_bytes(&[("ok.txt", "fine"), ("../escape.txt", "bad")]);

        let (_, result) = collect(ArchiveSource::Bytes(bytes), &dest);

        assert!(matches!(result, Err(BundleError::UnsafeEntry { .. })));
        assert!(!dest.exists());
        assert!(!temp.path().join("escape.txt").exists());
    }

    #[test]
    fn missing_archive_file_fails() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("translation");

        let (_, result) = collect(
            ArchiveSource::Path(temp.path().join("missing.zip")),
            &dest,
        );

        assert!(matches!(result, Err(BundleError::Open { .. })));
        assert!(!dest.exists());
    }

    #[test]
    fn extracts_from_path_source() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("bundle.zip");
        fs::write(&archive, zip_bytes(&[("readme.txt", "hi")])).unwrap();
        let dest = temp.path().join("out");

        let (_, result) = collect(ArchiveSource::Path(archive), &dest);

        result.unwrap();
        assert_eq!(fs::read_to_string(dest.join("readme.txt")).unwrap(), "hi");
    }

    #[test]
    fn fills_existing_empty_destination() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("out");
        fs::create_dir_all(&dest).unwrap();

        let (_, result) = collect(
            ArchiveSource::Bytes(zip_bytes(&[("fresh.txt", "new")])),
            &dest,
        );

        result.unwrap();
        assert!(dest.join("fresh.txt").exists());
    }

    #[test]
    fn refuses_non_empty_destination() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("Documents");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("thesis.docx"), "years of work").unwrap();

        let (events, result) = collect(
            ArchiveSource::Bytes(zip_bytes(&[("fresh.txt", "new")])),
            &dest,
        );

        assert!(matches!(result, Err(BundleError::DestinationInUse { .. })));
        assert!(events.is_empty());
        assert_eq!(
            fs::read_to_string(dest.join("thesis.docx")).unwrap(),
            "years of work"
        );
        assert!(!dest.join("fresh.txt").exists());
        assert!(!staging_dir_for(&dest).exists());
    }

    #[test]
    fn refuses_existing_file_destination() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("notes.txt");
        fs::write(&dest, "keep").unwrap();

        let (_, result) = collect(ArchiveSource::Bytes(zip_bytes(&[("a.txt", "a")])), &dest);

        assert!(matches!(result, Err(BundleError::DestinationInUse { .. })));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "keep");
    }

    #[test]
    fn refuses_destination_without_a_name() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("keep.txt"), "keep").unwrap();

        for dest in [Path::new("."), Path::new(".."), Path::new("/")] {
            let (_, result) = collect(ArchiveSource::Bytes(zip_bytes(&[("a.txt", "a")])), dest);
            assert!(
                matches!(result, Err(BundleError::InvalidDestination { .. })),
                "{}",
                dest.display()
            );
        }

        let (_, result) = collect(
            ArchiveSource::Bytes(zip_bytes(&[("a.txt", "a")])),
            &temp.path().join("sub").join(".."),
        );
        assert!(matches!(result, Err(BundleError::InvalidDestination { .. })));

        // A trailing `.` names the directory itself, which is not empty.
        let (_, result) = collect(
            ArchiveSource::Bytes(zip_bytes(&[("a.txt", "a")])),
            &temp.path().join("."),
        );
        assert!(matches!(result, Err(BundleError::DestinationInUse { .. })));
        assert!(temp.path().join("keep.txt").exists());
        assert!(!temp.path().join("a.txt").exists());
    }

    #[test]
    fn leftover_staging_dir_is_cleared() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("out");
        let staging = staging_dir_for(&dest);
        fs::create_dir_all(&staging).unwrap();
        fs::write(staging.join("junk.txt"), "junk").unwrap();

        let (_, result) = collect(
            ArchiveSource::Bytes(zip_bytes(&[("a.txt", "a")])),
            &dest,
        );

        result.unwrap();
        assert!(!dest.join("junk.txt").exists());
    }

    #[test]
    fn empty_archive_produces_empty_dir() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("out");

        let (events, result) = collect(ArchiveSource::Bytes(zip_bytes(&[])), &dest);

        result.unwrap();
        assert!(matches!(events.as_slice(), [ExtractEvent::Total(0)]));
        assert!(dest.is_dir());
        assert_eq!(fs::read_dir(&dest).unwrap().count(), 0);
    }
}
