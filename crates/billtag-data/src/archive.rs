//! Archive normalization for raw district shapefile downloads.
//!
//! Upstream data arrives as directories full of zip archives. Normalization
//! extracts each archive in place and removes the source zip, so downstream
//! loaders only ever see extracted files. The source archive is deleted only
//! after its extraction succeeds; a failed extraction leaves the zip on disk.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use billtag_core::ArchivePolicy;
use tracing::{debug, info, warn};
use zip::ZipArchive;

use crate::DataError;

/// Fixed subdirectories of the raw-data base that hold zipped downloads.
pub const SHAPE_DIRS: &[&str] = &[
    "congressional_districts_zips",
    "state_leg_lower_zips",
    "state_leg_upper_zips",
];

/// Local-file and empty-archive zip signatures.
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4b, 0x03, 0x04];
const ZIP_EMPTY_MAGIC: [u8; 4] = [0x50, 0x4b, 0x05, 0x06];

/// Outcome counts for one directory pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveStats {
    /// Archives extracted and removed.
    pub extracted: usize,
    /// `.zip`-named entries that were not real archives.
    pub skipped: usize,
    /// Archives that failed to extract (only under `ContinueOnError`).
    pub failed: usize,
}

/// Extract every zip archive in `dir` into `dir`, deleting each archive
/// after successful extraction.
///
/// Entries named `*.zip` that do not start with a zip signature are skipped
/// silently. Running again on a directory with no remaining archives is a
/// no-op.
pub fn extract_archives(dir: &Path, policy: ArchivePolicy) -> Result<ArchiveStats, DataError> {
    let mut stats = ArchiveStats::default();

    let entries = fs::read_dir(dir).map_err(|e| DataError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| DataError::io(dir, e))?;
        let path = entry.path();

        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("zip") {
            continue;
        }
        if !is_zip_archive(&path)? {
            debug!(path = %path.display(), "not a zip archive, skipping");
            stats.skipped += 1;
            continue;
        }

        match extract_one(&path, dir) {
            Ok(()) => {
                // Deletion is gated on extraction success.
                fs::remove_file(&path).map_err(|e| DataError::io(&path, e))?;
                info!(path = %path.display(), "extracted and removed archive");
                stats.extracted += 1;
            }
            Err(e) => match policy {
                ArchivePolicy::AbortOnError => return Err(e),
                ArchivePolicy::ContinueOnError => {
                    warn!(path = %path.display(), error = %e, "extraction failed, continuing");
                    stats.failed += 1;
                }
            },
        }
    }

    Ok(stats)
}

/// Run [`extract_archives`] over the fixed raw-data subdirectories under
/// `base`, skipping any that do not exist.
pub fn normalize_shape_dirs(
    base: &Path,
    policy: ArchivePolicy,
) -> Result<Vec<(String, ArchiveStats)>, DataError> {
    let mut results = Vec::new();
    for sub in SHAPE_DIRS {
        let dir = base.join(sub);
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "missing subdirectory, skipping");
            continue;
        }
        let stats = extract_archives(&dir, policy)?;
        results.push((sub.to_string(), stats));
    }
    Ok(results)
}

/// Check the file's leading bytes against the zip signatures.
fn is_zip_archive(path: &Path) -> Result<bool, DataError> {
    let mut file = File::open(path).map_err(|e| DataError::io(path, e))?;
    let mut magic = [0u8; 4];
    match file.read_exact(&mut magic) {
        Ok(()) => Ok(magic == ZIP_MAGIC || magic == ZIP_EMPTY_MAGIC),
        // Shorter than a signature: cannot be an archive.
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(DataError::io(path, e)),
    }
}

fn extract_one(path: &Path, dest: &Path) -> Result<(), DataError> {
    let file = File::open(path).map_err(|e| DataError::io(path, e))?;
    let mut archive = ZipArchive::new(file).map_err(|e| DataError::Zip {
        path: path.to_path_buf(),
        source: e,
    })?;
    archive.extract(dest).map_err(|e| DataError::Zip {
        path: path.to_path_buf(),
        source: e,
    })
}
