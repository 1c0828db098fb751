use std::process::ExitCode;

use devlaunch::LaunchProfile;

fn main() -> anyhow::Result<ExitCode> {
    devlaunch_app::run(LaunchProfile::Client)
}
