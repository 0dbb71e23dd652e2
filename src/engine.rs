use std::ffi::OsStr;
use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use tracing::debug;

/// Names the accounting program to run in place of `ledger`.
const PARTNERSHIP_LEDGER_ENGINE: &str = "PARTNERSHIP_LEDGER_ENGINE";
const DEFAULT_ENGINE: &str = "ledger";

/// The downstream accounting engine, fed the adjoined journal on stdin.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Engine {
    program: String,
}

impl Engine {
    pub(crate) fn new<S: Into<String>>(program: S) -> Self {
        Engine {
            program: program.into(),
        }
    }

    pub(crate) fn from_env() -> Self {
        Engine::new(
            std::env::var(PARTNERSHIP_LEDGER_ENGINE).unwrap_or_else(|_| DEFAULT_ENGINE.to_string()),
        )
    }

    fn command<S>(&self, args: &[S]) -> Command
    where
        S: AsRef<str>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-f")
            .arg("-")
            .args(args.iter().map(|s| OsStr::new(s.as_ref())))
            .stdin(Stdio::piped());
        cmd
    }

    /// Runs the engine over `journal` and returns its exit code.
    pub(crate) fn run<S>(&self, journal: &[u8], args: &[S]) -> Result<u8>
    where
        S: AsRef<str>,
    {
        let mut cmd = self.command(args);
        debug!(?cmd, "running engine");

        let mut child = cmd
            .spawn()
            .with_context(|| format!("can't run {}", self.program))?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(journal)
                .with_context(|| format!("can't write journal to {}", self.program))?;
        }
        let status = child
            .wait()
            .with_context(|| format!("{} did not finish", self.program))?;
        debug!(%status, "engine finished");

        // killed by a signal
        let code = status.code().unwrap_or(1);
        Ok(u8::try_from(code).unwrap_or(1))
    }
}
