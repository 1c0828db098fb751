use std::{
    env,
    path::{Path, PathBuf},
};

/// Separator used by the `MOD_CLASSES` directory list, independent of platform.
pub const DIR_LIST_SEPARATOR: char = ';';

/// Errors for resolving user-relative paths
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HomeDirError {
    #[error("user home directory cannot be determined")]
    HomeMissing,
}

/// Home directory of the current user, if the platform reports one.
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    env::home_dir()
}

/// Expand a leading `~` to the user home directory.
///
/// Paths without a tilde prefix are returned unchanged. `~user` forms are not
/// supported and are kept literally.
///
/// # Errors
/// Returns `HomeDirError::HomeMissing` if the path needs the home directory
/// and it cannot be determined.
pub fn expand_tilde(raw: &str) -> Result<PathBuf, HomeDirError> {
    if raw == "~" {
        return home_dir().ok_or(HomeDirError::HomeMissing);
    }
    let rest = raw.strip_prefix("~/").or_else(|| {
        if cfg!(windows) {
            raw.strip_prefix("~\\")
        } else {
            None
        }
    });
    match rest {
        Some(rest) => {
            let home = home_dir().ok_or(HomeDirError::HomeMissing)?;
            Ok(Path::new(&home).join(rest))
        }
        None => Ok(PathBuf::from(raw)),
    }
}

/// Split a `;`-separated directory list, skipping empty segments.
///
/// Segments that need the home directory but cannot resolve it are kept
/// verbatim; the condenser will surface the resulting I/O error.
#[must_use]
pub fn split_dir_list(raw: &str) -> Vec<PathBuf> {
    raw.split(DIR_LIST_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| expand_tilde(segment).unwrap_or_else(|_| PathBuf::from(segment)))
        .collect()
}
