#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Demo entry points.
//!
//! - `demo.echo.Main` prints what it received and exits with the status given
//!   by `--exit-code <n>` (default 0).
//! - `demo.fail.Main` always fails.

// Demo entry points talk to the user through stdout.
#![allow(clippy::print_stdout)]

use anyhow::Context;
use devlaunch::properties;

const EXIT_CODE_FLAG: &str = "--exit-code";

/// Exit status requested with `--exit-code <n>`.
///
/// # Errors
/// Fails when the value is missing or not a number in `0..=255`.
pub fn requested_exit_code(args: &[String]) -> anyhow::Result<u8> {
    let Some(pos) = args.iter().position(|a| a == EXIT_CODE_FLAG) else {
        return Ok(0);
    };
    let raw = args
        .get(pos + 1)
        .with_context(|| format!("{EXIT_CODE_FLAG} needs a value"))?;
    raw.parse()
        .with_context(|| format!("invalid {EXIT_CODE_FLAG} value '{raw}'"))
}

fn echo(args: Vec<String>) -> anyhow::Result<u8> {
    println!("args: {}", args.len());
    for arg in &args {
        println!("arg: {arg}");
    }
    if let Some(props) = properties::all() {
        for (key, value) in props.iter() {
            println!("property: {key}={value}");
        }
    }
    requested_exit_code(&args)
}

fn fail(args: Vec<String>) -> anyhow::Result<u8> {
    anyhow::bail!("demo failure after {} arguments", args.len())
}

devlaunch::entry_point!("demo.echo.Main" => echo);
devlaunch::entry_point!("demo.fail.Main" => fail);
