use crate::args::DefaultArguments;
use crate::config::LauncherConfig;
use crate::logging::LogHandle;
use crate::properties::{NATIVES_DIRECTORY, SystemProperties};

/// Access token handed to offline development clients.
pub const OFFLINE_ACCESS_TOKEN: &str = "FML";

/// Which side of the application the launcher starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchProfile {
    Client,
    Server,
}

impl LaunchProfile {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Server => "server",
        }
    }

    /// Recognized parameters with their defaults, in emission order.
    #[must_use]
    pub fn default_arguments(self, cfg: &LauncherConfig) -> DefaultArguments {
        match self {
            Self::Client => DefaultArguments::new()
                .with("version", cfg.mc_version())
                .with("assetIndex", cfg.asset_index())
                .with("assetsDir", cfg.asset_directory())
                .with("accessToken", Some(OFFLINE_ACCESS_TOKEN))
                .with("userProperties", Some("{}"))
                .with("username", None::<&str>)
                .with("password", None::<&str>),
            Self::Server => DefaultArguments::new(),
        }
    }

    /// Log the natives directory and, for clients, publish it as a property.
    pub fn stage_natives(self, cfg: &LauncherConfig, props: &mut SystemProperties, log: &LogHandle) {
        let Some(natives) = cfg.natives_directory() else {
            return;
        };
        tracing::info!(parent: log.span(), "Natives: {natives}");
        if self == Self::Client {
            props.set(NATIVES_DIRECTORY, natives);
        }
    }
}
