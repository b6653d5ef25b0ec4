#![doc = include_str!("../README.md")]
use anyhow::{Context, Result};
use std::{ffi::OsString, io::Write, process::Command};
use tracing::{debug, warn};

mod config;

pub use config::{Config, DEFAULT_COMMAND, DEFAULT_LOG_FILTER};

/// The name Cargo passes as the first argument when running us as
/// `cargo autorun`.
pub const SUBCOMMAND: &str = "autorun";

/// Something that can run tests given an argument list, and report the
/// outcome as an exit code.
///
/// The meaning of the arguments is entirely up to the implementation.
pub trait Execute {
    /// Runs the tests selected by `args`, returning the exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if the tests could not be run at all.
    fn execute(&mut self, args: &[OsString]) -> Result<i32>;
}

impl<F> Execute for F
where
    F: FnMut(&[OsString]) -> Result<i32>,
{
    fn execute(&mut self, args: &[OsString]) -> Result<i32> {
        self(args)
    }
}

/// Echoes `args` to `out` as a single line, then hands the same `args` to
/// `facility` and returns its exit code unchanged.
///
/// # Errors
///
/// Returns an error if writing to `out` fails, or if the facility does.
pub fn run(args: &[OsString], out: &mut impl Write, facility: &mut impl Execute) -> Result<i32> {
    writeln!(out, "{}", echo_line(args)).context("writing arguments to output")?;
    // the runner may write to the same stream
    out.flush().context("flushing output")?;
    facility.execute(args)
}

#[must_use]
/// Joins `args` with single spaces.
///
/// Arguments that aren't valid Unicode are shown lossily; the facility
/// still receives the original bytes.
pub fn echo_line(args: &[OsString]) -> String {
    args.iter()
        .map(|arg| arg.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the arguments to forward, given the full process argument
/// vector.
///
/// The program name is dropped. When `cargo_subcommand` is set, so is a
/// leading `autorun`, which is how Cargo invokes subcommands.
pub fn forwarded_args(
    argv: impl IntoIterator<Item = OsString>,
    cargo_subcommand: bool,
) -> Vec<OsString> {
    let mut args = argv.into_iter().skip(1).peekable();
    if cargo_subcommand && args.peek().is_some_and(|arg| arg == SUBCOMMAND) {
        args.next();
    }
    args.collect()
}

#[derive(Debug)]
/// Runs tests by spawning an external runner process, `cargo test` by
/// default, with the forwarded arguments appended to its command line.
///
/// The runner shares our standard streams.
pub struct CommandFacility {
    program: String,
    leading_args: Vec<String>,
}

impl CommandFacility {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        CommandFacility {
            program: config.program().to_string(),
            leading_args: config.leading_args().to_vec(),
        }
    }
}

impl Execute for CommandFacility {
    fn execute(&mut self, args: &[OsString]) -> Result<i32> {
        let mut runner = Command::new(&self.program);
        runner.args(&self.leading_args).args(args);
        debug!(command = ?runner, "delegating to test runner");
        let status = runner
            .status()
            .with_context(|| format!("running {:?}", self.program))?;
        match status.code() {
            Some(code) => {
                debug!(code, "test runner finished");
                Ok(code)
            }
            None => {
                warn!(%status, "test runner terminated without an exit code");
                Ok(1)
            }
        }
    }
}
