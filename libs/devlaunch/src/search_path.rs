use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Ordered set of directories consulted when loading code units.
///
/// Insertion order is kept and a directory appears at most once. The launcher
/// owns the value for the whole run and hands it to the
/// [`ModuleLoader`](crate::entry::ModuleLoader) once condensation is done.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    entries: Vec<PathBuf>,
}

impl SearchPath {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `dir` unless it is already present. Returns `true` if added.
    pub fn push(&mut self, dir: impl Into<PathBuf>) -> bool {
        let dir = dir.into();
        if self.contains(&dir) {
            return false;
        }
        self.entries.push(dir);
        true
    }

    /// Remove `dir`. Returns `true` if it was present.
    pub fn remove(&mut self, dir: &Path) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry != dir);
        self.entries.len() != before
    }

    #[must_use]
    pub fn contains(&self, dir: &Path) -> bool {
        self.entries.iter().any(|entry| entry == dir)
    }

    #[must_use]
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Platform path-list rendering (`:` on Unix, `;` on Windows).
    ///
    /// Entries that cannot be joined (they contain the separator) are skipped.
    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.entries.iter()
    }

    #[must_use]
    pub fn to_os_string(&self) -> OsString {
        let joinable = self
            .entries
            .iter()
            .filter(|entry| std::env::join_paths([entry.as_path()]).is_ok());
        std::env::join_paths(joinable).unwrap_or_default()
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for SearchPath {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut path = Self::new();
        for dir in iter {
            path.push(dir);
        }
        path
    }
}

impl<'a> IntoIterator for &'a SearchPath {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn push_deduplicates() {
        let mut path = SearchPath::new();
        assert!(path.push("a/out"));
        assert!(path.push("b/classes"));
        assert!(!path.push("a/out"));
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn remove_keeps_order() {
        let mut path: SearchPath = ["a", "b", "c"].into_iter().collect();
        assert!(path.remove(Path::new("b")));
        assert!(!path.remove(Path::new("b")));
        assert_eq!(path.entries(), &[PathBuf::from("a"), PathBuf::from("c")]);
    }

    #[test]
    fn trailing_separator_is_same_entry() {
        let path: SearchPath = ["out/classes/"].into_iter().collect();
        assert!(path.contains(Path::new("out/classes")));
    }

    #[test]
    fn iterates_in_insertion_order() {
        let path: SearchPath = ["c", "a", "b", "a"].into_iter().collect();
        let seen: Vec<_> = path.iter().map(|p| p.to_string_lossy().into_owned()).collect();
        assert_eq!(seen, vec!["c", "a", "b"]);
        assert_eq!((&path).into_iter().count(), path.len());
    }

    #[cfg(unix)]
    #[test]
    fn renders_platform_list() {
        let path: SearchPath = ["/a", "/b"].into_iter().collect();
        assert_eq!(path.to_os_string(), OsString::from("/a:/b"));
    }
}
