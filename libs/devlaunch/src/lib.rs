#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Development-time launcher core.
//!
//! The launcher prepares one run of an application entry point:
//!
//! - [`config`]: launcher settings snapshotted from the process environment
//! - [`args`]: default parameters, command-line overrides and positional extras
//! - [`condense`]: merging compiled-output directories into one canonical tree
//! - [`entry`]: link-time entry-point registry and dispatch
//! - [`launcher`]: the linear start-to-dispatch sequence
//!
//! Entry points register themselves with [`entry_point!`]:
//!
//! ```ignore
//! fn run(args: Vec<String>) -> anyhow::Result<u8> {
//!     println!("{args:?}");
//!     Ok(0)
//! }
//!
//! devlaunch::entry_point!("demo.echo.Main" => run);
//! ```

pub mod args;
pub mod condense;
pub mod config;
pub mod entry;
pub mod launcher;
pub mod logging;
pub mod mappings;
pub mod paths;
pub mod profile;
pub mod properties;
pub mod redact;
pub mod search_path;

// Used by `entry_point!` expansions in downstream crates.
#[doc(hidden)]
pub use inventory;

pub use args::DefaultArguments;
pub use config::{ConfigError, LauncherConfig};
pub use entry::{EntryFn, EntryPoint, EntryRegistry, ResolveError};
pub use launcher::{LaunchError, Launcher, Prepared};
pub use logging::{LogHandle, LoggingConfig};
pub use profile::LaunchProfile;
pub use search_path::SearchPath;
