//! Launcher-provided properties visible to entry points.
//!
//! The launcher builds a [`SystemProperties`] map while configuring the
//! environment and installs it exactly once before dispatch. Entry points read
//! it through [`get`] / [`all`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Final search path of the run, in platform path-list syntax.
pub const SEARCH_PATH: &str = "devlaunch.search.path";
/// Symbol the launcher dispatched to.
pub const MAIN_SYMBOL: &str = "devlaunch.main.symbol";
/// Native library directory staged by the client profile.
pub const NATIVES_DIRECTORY: &str = "natives.directory";

static INSTALLED: OnceLock<SystemProperties> = OnceLock::new();

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemProperties {
    values: BTreeMap<String, String>,
}

impl SystemProperties {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn extend(&mut self, other: SystemProperties) {
        self.values.extend(other.values);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("system properties were already installed")]
pub struct AlreadyInstalled;

/// Publish `props` for the rest of the process.
///
/// # Errors
/// Returns `AlreadyInstalled` on a second call; the first map stays in place.
pub fn install(props: SystemProperties) -> Result<(), AlreadyInstalled> {
    INSTALLED.set(props).map_err(|_| AlreadyInstalled)
}

/// Look up an installed property.
#[must_use]
pub fn get(key: &str) -> Option<&'static str> {
    INSTALLED.get().and_then(|props| props.get(key))
}

/// All installed properties, if the launcher got that far.
#[must_use]
pub fn all() -> Option<&'static SystemProperties> {
    INSTALLED.get()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_and_reports_previous() {
        let mut props = SystemProperties::new();
        assert_eq!(props.set("k", "1"), None);
        assert_eq!(props.set("k", "2"), Some("1".to_owned()));
        assert_eq!(props.get("k"), Some("2"));
    }

    #[test]
    fn extend_overrides_existing_keys() {
        let mut base = SystemProperties::new();
        base.set("a", "1");
        base.set("b", "1");
        let mut over = SystemProperties::new();
        over.set("b", "2");
        base.extend(over);
        assert_eq!(base.iter().collect::<Vec<_>>(), vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn install_is_once() {
        let mut props = SystemProperties::new();
        props.set("unit.test.key", "v");
        // Another test in this binary may have installed first; either way the
        // second attempt must be rejected.
        install(props.clone()).ok();
        assert!(install(props).is_err());
        assert!(all().is_some());
    }
}
