//! Launcher configuration read from the process environment.
//!
//! Values are snapshotted from the recognized environment variables, layered
//! over the defaults with `figment`, and extracted into [`LauncherConfig`].
//! Empty variables count as unset.

use std::collections::BTreeMap;
use std::path::PathBuf;

use figment::Figment;
use figment::providers::Serialized;
use serde::{Deserialize, Serialize};

use crate::paths::split_dir_list;

pub const ENV_MAIN_CLASS: &str = "mainClass";
pub const ENV_NATIVES_DIRECTORY: &str = "nativesDirectory";
pub const ENV_MCP_MAPPINGS: &str = "MCP_MAPPINGS";
pub const ENV_MC_VERSION: &str = "MC_VERSION";
pub const ENV_MCP_TO_SRG: &str = "MCP_TO_SRG";
pub const ENV_TWEAK_CLASS: &str = "tweakClass";
pub const ENV_MOD_CLASSES: &str = "MOD_CLASSES";
pub const ENV_ASSET_INDEX: &str = "assetIndex";
pub const ENV_ASSET_DIRECTORY: &str = "assetDirectory";

/// Every environment variable the launcher reads.
pub const RECOGNIZED_VARS: &[&str] = &[
    ENV_MAIN_CLASS,
    ENV_NATIVES_DIRECTORY,
    ENV_MCP_MAPPINGS,
    ENV_MC_VERSION,
    ENV_MCP_TO_SRG,
    ENV_TWEAK_CLASS,
    ENV_MOD_CLASSES,
    ENV_ASSET_INDEX,
    ENV_ASSET_DIRECTORY,
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Must specify mainClass environment variable")]
    MissingMainClass,
    #[error("invalid launcher configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Entry-point symbol to dispatch to (required).
    #[serde(rename = "mainClass")]
    pub main_class: Option<String>,
    #[serde(rename = "nativesDirectory")]
    pub natives_directory: Option<String>,
    /// `<channel>_<id>-<mcver>` mapping identifier for the legacy redirect.
    #[serde(rename = "MCP_MAPPINGS")]
    pub mcp_mappings: Option<String>,
    #[serde(rename = "MC_VERSION")]
    pub mc_version: Option<String>,
    /// Explicit srg-to-mcp mapping file overriding the computed one.
    #[serde(rename = "MCP_TO_SRG")]
    pub mcp_to_srg: Option<String>,
    #[serde(rename = "tweakClass")]
    pub tweak_class: Option<String>,
    /// `;`-separated compiled-output directories.
    #[serde(rename = "MOD_CLASSES")]
    pub mod_classes: Option<String>,
    #[serde(rename = "assetIndex")]
    pub asset_index: Option<String>,
    #[serde(rename = "assetDirectory")]
    pub asset_directory: Option<String>,
}

impl LauncherConfig {
    /// Load from the current process environment.
    ///
    /// Variables that are not valid Unicode are treated as unset.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if the layered values cannot be extracted.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            RECOGNIZED_VARS
                .iter()
                .filter_map(|name| std::env::var(name).ok().map(|value| (*name, value))),
        )
    }

    /// Load from an explicit variable list; unknown names are ignored.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if the layered values cannot be extracted.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let snapshot: BTreeMap<String, String> = vars
            .into_iter()
            .filter(|(name, _)| RECOGNIZED_VARS.contains(&name.as_ref()))
            .map(|(name, value)| (name.as_ref().to_owned(), value.into()))
            .filter(|(_, value)| !value.is_empty())
            .collect();

        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Serialized::defaults(snapshot))
            .extract()
            .map_err(|e| ConfigError::Invalid(Box::new(e)))
    }

    /// The required entry-point symbol.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingMainClass` when unset or empty.
    pub fn main_class(&self) -> Result<&str, ConfigError> {
        non_empty(self.main_class.as_ref()).ok_or(ConfigError::MissingMainClass)
    }

    #[must_use]
    pub fn natives_directory(&self) -> Option<&str> {
        non_empty(self.natives_directory.as_ref())
    }

    #[must_use]
    pub fn mcp_mappings(&self) -> Option<&str> {
        non_empty(self.mcp_mappings.as_ref())
    }

    #[must_use]
    pub fn mc_version(&self) -> Option<&str> {
        non_empty(self.mc_version.as_ref())
    }

    #[must_use]
    pub fn mcp_to_srg(&self) -> Option<&str> {
        non_empty(self.mcp_to_srg.as_ref())
    }

    #[must_use]
    pub fn tweak_class(&self) -> Option<&str> {
        non_empty(self.tweak_class.as_ref())
    }

    #[must_use]
    pub fn asset_index(&self) -> Option<&str> {
        non_empty(self.asset_index.as_ref())
    }

    #[must_use]
    pub fn asset_directory(&self) -> Option<&str> {
        non_empty(self.asset_directory.as_ref())
    }

    /// Compiled-output directories in configured order.
    #[must_use]
    pub fn mod_class_dirs(&self) -> Vec<PathBuf> {
        non_empty(self.mod_classes.as_ref())
            .map(split_dir_list)
            .unwrap_or_default()
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}
