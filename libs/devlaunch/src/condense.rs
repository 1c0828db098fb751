//! Output-directory condensation.
//!
//! Several compiled-output directories are merged into one canonical
//! directory. Every other directory is dropped from the [`SearchPath`] and its
//! tree is copied over the canonical one; source trees stay on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::logging::LogHandle;
use crate::search_path::SearchPath;

/// Directory name preferred as merge target.
pub const CANONICAL_DIR_NAME: &str = "classes";

#[derive(Debug, thiserror::Error)]
pub enum CondenseError {
    #[error("failed to walk {dir}: {source}")]
    Walk {
        dir: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What a condensation run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CondenseReport {
    /// Merge target; `None` when fewer than two directories were given.
    pub canonical: Option<PathBuf>,
    /// Directories merged into the canonical one, in processing order.
    pub merged: Vec<PathBuf>,
    pub dirs_created: usize,
    pub files_copied: usize,
}

/// Pick the merge target: the first directory named `classes`, else the last one.
#[must_use]
pub fn canonical_dir(dirs: &[PathBuf]) -> Option<&Path> {
    dirs.iter()
        .find(|dir| {
            dir.file_name()
                .is_some_and(|name| name == CANONICAL_DIR_NAME)
        })
        .or_else(|| dirs.last())
        .map(PathBuf::as_path)
}

/// Merge `dirs` into their canonical directory, updating `search_path`.
///
/// Stops at the first filesystem error; work done before it is kept.
///
/// # Errors
/// Returns `CondenseError` when a directory cannot be walked, created or a
/// file cannot be copied.
pub fn condense(
    dirs: &[PathBuf],
    search_path: &mut SearchPath,
) -> Result<CondenseReport, CondenseError> {
    let mut report = CondenseReport::default();
    if dirs.len() < 2 {
        return Ok(report);
    }
    let Some(base) = canonical_dir(dirs) else {
        return Ok(report);
    };
    report.canonical = Some(base.to_path_buf());

    for dir in dirs.iter().filter(|dir| dir.as_path() != base) {
        search_path.remove(dir);
        merge_tree(dir, base, &mut report)?;
        report.merged.push(dir.clone());
    }
    Ok(report)
}

fn merge_tree(dir: &Path, base: &Path, report: &mut CondenseReport) -> Result<(), CondenseError> {
    let walker = WalkDir::new(dir).min_depth(1).sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(|source| CondenseError::Walk {
            dir: dir.to_path_buf(),
            source,
        })?;
        // `min_depth(1)` guarantees the prefix.
        let Ok(relative) = entry.path().strip_prefix(dir) else {
            continue;
        };
        let target = base.join(relative);

        if entry.file_type().is_dir() {
            create_dir(&target)?;
            report.dirs_created += 1;
        } else {
            if let Some(parent) = target.parent() {
                create_dir(parent)?;
            }
            fs::copy(entry.path(), &target).map_err(|source| CondenseError::Copy {
                from: entry.path().to_path_buf(),
                to: target.clone(),
                source,
            })?;
            report.files_copied += 1;
        }
    }
    Ok(())
}

fn create_dir(path: &Path) -> Result<(), CondenseError> {
    fs::create_dir_all(path).map_err(|source| CondenseError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Best-effort condensation used by the launcher.
///
/// Errors are logged at info level and swallowed: a failed merge must not
/// keep the entry point from starting.
pub fn condense_logged(dirs: &[PathBuf], search_path: &mut SearchPath, log: &LogHandle) {
    match condense(dirs, search_path) {
        Ok(report) => {
            if let Some(canonical) = &report.canonical {
                tracing::info!(
                    parent: log.span(),
                    canonical = %canonical.display(),
                    merged = report.merged.len(),
                    files = report.files_copied,
                    dirs = report.dirs_created,
                    "Condensed mod output directories"
                );
            }
        }
        Err(e) => {
            tracing::info!(
                parent: log.span(),
                error = %e,
                "Error when condensing mod output directories"
            );
        }
    }
}
