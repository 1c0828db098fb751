//! Shared startup for the `devlaunch-client` and `devlaunch-server` binaries.

mod registered_entry_points;

use std::ffi::OsString;
use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use devlaunch::{LaunchProfile, Launcher, LauncherConfig, LoggingConfig, logging};

/// Every token is forwarded to the entry point; the launcher itself owns no flags.
#[derive(Parser, Debug)]
#[command(name = "devlaunch")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Arguments for the entry point (`--name value` pairs and positionals)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    pub args: Vec<String>,
}

impl Cli {
    /// Parse command-line tokens, program name excluded.
    ///
    /// clap consumes the first `--` as its own escape, so one is inserted up
    /// front; a `--` typed by the user then reaches the argument assembler.
    ///
    /// # Errors
    /// Fails when a token is not valid Unicode.
    pub fn try_from_tokens<I, T>(tokens: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let argv = [OsString::from("devlaunch"), OsString::from("--")]
            .into_iter()
            .chain(tokens.into_iter().map(Into::into));
        Self::try_parse_from(argv)
    }
}

/// Launch `profile` with the process environment and command line.
///
/// # Errors
/// Fails on invalid or missing configuration, an unresolvable entry point, or
/// an error returned by the entry point.
pub fn run(profile: LaunchProfile) -> anyhow::Result<ExitCode> {
    let cli = Cli::try_from_tokens(std::env::args_os().skip(1)).unwrap_or_else(|e| e.exit());
    run_with(profile, &cli.args)
}

/// Same as [`run`] with explicit command-line tokens.
///
/// # Errors
/// See [`run`].
pub fn run_with(profile: LaunchProfile, cli_args: &[String]) -> anyhow::Result<ExitCode> {
    let log = logging::init(&LoggingConfig {
        ansi: std::io::stderr().is_terminal(),
        ..LoggingConfig::default()
    });
    let cfg = LauncherConfig::from_env()?;

    let code = Launcher::new(profile).launch(&cfg, cli_args, &log)?;
    tracing::debug!(parent: log.span(), code, "Entry point returned");
    Ok(ExitCode::from(code))
}
