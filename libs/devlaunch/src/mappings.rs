//! Legacy mapping redirect.
//!
//! Older tooling reads its mapping files from properties pointing into the
//! user's Gradle cache. The location is derived from `MCP_MAPPINGS`
//! (`<channel>_<id>-<mcver>`) and `MC_VERSION`; `MCP_TO_SRG` can override the
//! srg-to-mcp file. Malformed or missing values only skip the redirect.

use std::path::{Path, PathBuf};

use crate::config::LauncherConfig;
use crate::logging::LogHandle;
use crate::paths::{HomeDirError, home_dir};
use crate::properties::SystemProperties;

pub const PROPERTY_PREFIX: &str = "net.minecraftforge.gradle.GradleStart.";
pub const SRG_DIR: &str = "net.minecraftforge.gradle.GradleStart.srgDir";
pub const SRG_NOTCH_SRG: &str = "net.minecraftforge.gradle.GradleStart.srg.notch-srg";
pub const SRG_NOTCH_MCP: &str = "net.minecraftforge.gradle.GradleStart.srg.notch-mcp";
pub const SRG_SRG_MCP: &str = "net.minecraftforge.gradle.GradleStart.srg.srg-mcp";
pub const SRG_MCP_SRG: &str = "net.minecraftforge.gradle.GradleStart.srg.mcp-srg";
pub const SRG_MCP_NOTCH: &str = "net.minecraftforge.gradle.GradleStart.srg.mcp-notch";
pub const CSV_DIR: &str = "net.minecraftforge.gradle.GradleStart.csvDir";

/// Cache layout below the home directory.
const MCP_CACHE: &[&str] = &[".gradle", "caches", "minecraft", "de", "oceanlabs", "mcp"];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("MCP_MAPPINGS is not set")]
    MissingMappings,
    #[error("MC_VERSION is not set")]
    MissingVersion,
    #[error("malformed MCP_MAPPINGS value '{0}', expected <channel>_<id>[-<version>]")]
    Malformed(String),
    #[error(transparent)]
    Home(#[from] HomeDirError),
}

/// Parsed `MCP_MAPPINGS` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingId {
    /// `mcp_<channel>`, e.g. `mcp_snapshot`.
    pub kind: String,
    /// Mapping build id, e.g. `20180609`.
    pub id: String,
}

impl MappingId {
    /// Parse `snapshot_20180609-1.12` into (`mcp_snapshot`, `20180609`).
    ///
    /// # Errors
    /// Returns `MappingError::Malformed` when the channel or id is missing.
    pub fn parse(raw: &str) -> Result<Self, MappingError> {
        let malformed = || MappingError::Malformed(raw.to_owned());
        let mut parts = raw.split('_');
        let channel = parts.next().filter(|c| !c.is_empty()).ok_or_else(malformed)?;
        let rest = parts.next().ok_or_else(malformed)?;
        let id = rest.split('-').next().filter(|i| !i.is_empty()).ok_or_else(malformed)?;
        Ok(Self {
            kind: format!("mcp_{channel}"),
            id: id.to_owned(),
        })
    }

    /// Mapping root below `home`.
    #[must_use]
    pub fn root(&self, home: &Path) -> PathBuf {
        let mut root = home.to_path_buf();
        root.extend(MCP_CACHE);
        root.push(&self.kind);
        root.push(&self.id);
        root
    }
}

/// Build the redirect properties for `mappings`/`mc_version` below `home`.
#[must_use]
pub fn mapping_properties(mapping: &MappingId, mc_version: &str, home: &Path) -> SystemProperties {
    let root = mapping.root(home);
    let srgs = root.join(mc_version).join("srgs");
    let render = |path: &Path| path.to_string_lossy().into_owned();

    let mut props = SystemProperties::new();
    props.set(SRG_DIR, render(&root.join("srgs")));
    props.set(SRG_NOTCH_SRG, render(&srgs.join("notch-srg.srg")));
    props.set(SRG_NOTCH_MCP, render(&srgs.join("notch-mcp.srg")));
    props.set(SRG_SRG_MCP, render(&srgs.join("srg-mcp.srg")));
    props.set(SRG_MCP_SRG, render(&srgs.join("mcp-srg.srg")));
    props.set(SRG_MCP_NOTCH, render(&srgs.join("mcp-notch.srg")));
    props.set(CSV_DIR, render(&root));
    props
}

/// Redirect properties derived from the launcher configuration.
///
/// # Errors
/// Returns `MappingError` when a required value is missing or malformed.
pub fn legacy_properties(cfg: &LauncherConfig, home: Option<&Path>) -> Result<SystemProperties, MappingError> {
    let mapping = MappingId::parse(cfg.mcp_mappings().ok_or(MappingError::MissingMappings)?)?;
    let mc_version = cfg.mc_version().ok_or(MappingError::MissingVersion)?;
    let home = home.ok_or(HomeDirError::HomeMissing)?;
    Ok(mapping_properties(&mapping, mc_version, home))
}

/// Configure mapping properties for the run; problems are logged, not raised.
#[must_use]
pub fn configure(cfg: &LauncherConfig, log: &LogHandle) -> SystemProperties {
    let home = home_dir();
    let mut props = match legacy_properties(cfg, home.as_deref()) {
        Ok(props) => props,
        Err(e) => {
            tracing::info!(parent: log.span(), error = %e, "Skipping legacy mapping redirect");
            SystemProperties::new()
        }
    };

    if let Some(srg2mcp) = cfg.mcp_to_srg() {
        tracing::info!(parent: log.span(), "Srg2Mcp: {srg2mcp}");
        props.set(SRG_SRG_MCP, srg2mcp);
    }
    props
}
