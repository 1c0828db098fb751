//! Launch orchestration.
//!
//! One strictly linear pass per process:
//! read required config → configure environment mappings → assemble
//! arguments → condense output directories → resolve the entry point →
//! invoke it. [`Launcher::prepare`] runs everything up to resolution;
//! [`Prepared::run`] publishes the properties and hands over control.

use anyhow::Context;

use crate::args;
use crate::condense::condense_logged;
use crate::config::{ConfigError, LauncherConfig};
use crate::entry::{EntryRegistry, ModuleLoader, ResolveError, ResolvedEntry};
use crate::logging::LogHandle;
use crate::mappings;
use crate::profile::LaunchProfile;
use crate::properties::{self, MAIN_SYMBOL, SEARCH_PATH, SystemProperties};
use crate::search_path::SearchPath;

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

#[derive(Debug, Clone)]
pub struct Launcher {
    profile: LaunchProfile,
    registry: EntryRegistry,
}

impl Launcher {
    /// Launcher over every entry point linked into the binary.
    #[must_use]
    pub fn new(profile: LaunchProfile) -> Self {
        Self {
            profile,
            registry: EntryRegistry::from_inventory(),
        }
    }

    #[must_use]
    pub fn with_registry(mut self, registry: EntryRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn profile(&self) -> LaunchProfile {
        self.profile
    }

    /// Run every stage up to and including entry-point resolution.
    ///
    /// # Errors
    /// `LaunchError::Config` when `mainClass` is missing (nothing else runs),
    /// `LaunchError::Resolve` when the symbol or its `main` cannot be found.
    pub fn prepare(
        self,
        cfg: &LauncherConfig,
        cli: &[String],
        log: &LogHandle,
    ) -> Result<Prepared, LaunchError> {
        let main_class = cfg.main_class()?;
        tracing::info!(parent: log.span(), profile = self.profile.name(), "Main Class: {main_class}");

        let mut props = mappings::configure(cfg, log);
        self.profile.stage_natives(cfg, &mut props, log);

        let defaults = self.profile.default_arguments(cfg);
        let args = args::assemble(&defaults, cli, cfg.tweak_class(), log);

        let dirs = cfg.mod_class_dirs();
        let mut search_path: SearchPath = dirs.iter().cloned().collect();
        condense_logged(&dirs, &mut search_path, log);

        props.set(
            SEARCH_PATH,
            search_path.to_os_string().to_string_lossy().into_owned(),
        );
        props.set(MAIN_SYMBOL, main_class);

        let loader = ModuleLoader::new(search_path, self.registry);
        let entry = loader.load_main(main_class)?;

        Ok(Prepared {
            args,
            properties: props,
            search_path: loader.search_path().clone(),
            entry,
            log: log.clone(),
        })
    }

    /// Prepare and run in one go.
    ///
    /// # Errors
    /// Any preparation failure, or the error returned by the entry point.
    pub fn launch(self, cfg: &LauncherConfig, cli: &[String], log: &LogHandle) -> anyhow::Result<u8> {
        self.prepare(cfg, cli, log)?.run()
    }
}

/// A resolved launch, ready to hand over control.
#[derive(Debug)]
pub struct Prepared {
    pub args: Vec<String>,
    pub properties: SystemProperties,
    pub search_path: SearchPath,
    entry: ResolvedEntry,
    log: LogHandle,
}

impl Prepared {
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        self.entry.symbol()
    }

    /// Publish the system properties and invoke the entry point.
    ///
    /// # Errors
    /// The entry point's own error, with the symbol as context.
    pub fn run(self) -> anyhow::Result<u8> {
        let Prepared {
            args,
            properties: props,
            entry,
            log,
            ..
        } = self;
        if let Err(e) = properties::install(props) {
            tracing::warn!(parent: log.span(), error = %e, "Keeping previously installed properties");
        }
        let symbol = entry.symbol();
        entry
            .invoke(args)
            .with_context(|| format!("entry point '{symbol}' failed"))
    }
}
