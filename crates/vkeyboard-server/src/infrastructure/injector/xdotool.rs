//! `xdotool` subprocess injector.
//!
//! Each [`CommandInvocation`] gets its own Tokio task.  Inside that task the
//! steps run one after another, each as a separate `xdotool` process with the
//! configured `DISPLAY`/`XAUTHORITY`.  Different invocations are not ordered
//! against each other: a slow `click --repeat 20` can finish after a key
//! press that arrived later.
//!
//! A step that fails to spawn or exits non-zero is logged and the remaining
//! steps still run, so a `keyup` after a failed `key` releases the modifier
//! it belongs to.  There is no timeout: a hung `xdotool` is left to the
//! process supervisor.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;

use thiserror::Error;
use tokio::process::Command;
use tracing::{trace, warn};
use vkeyboard_core::CommandInvocation;

use crate::application::InputInjector;
use crate::domain::DisplayTarget;

/// Failure of one injection step.
#[derive(Debug, Error)]
pub enum InjectionError {
    /// The program could not be started (not installed, not executable).
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and reported failure.
    #[error("{program} {args} exited with {status}: {stderr}")]
    Failed {
        program: String,
        args: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Runs injection commands through `xdotool`.
pub struct XdotoolInjector {
    inner: Arc<Runner>,
}

/// The parts every spawned task needs, shared behind one `Arc`.
struct Runner {
    program: PathBuf,
    env: Vec<(&'static str, String)>,
}

impl XdotoolInjector {
    pub fn new(program: impl Into<PathBuf>, display: &DisplayTarget) -> Self {
        Self {
            inner: Arc::new(Runner {
                program: program.into(),
                env: display.env_vars(),
            }),
        }
    }

    /// Runs every step of `invocation` in order and waits for completion.
    ///
    /// [`InputInjector::dispatch`] wraps this in a spawned task; it is public
    /// so callers that need the result can await it directly.
    ///
    /// # Errors
    ///
    /// Returns the first step failure.  Every failure, including later ones,
    /// is also logged.
    pub async fn run(&self, invocation: CommandInvocation) -> Result<(), InjectionError> {
        self.inner.run(invocation).await
    }
}

impl Runner {
    async fn run(&self, invocation: CommandInvocation) -> Result<(), InjectionError> {
        let mut first_error = None;
        for step in invocation.steps() {
            if let Err(e) = self.run_step(step).await {
                warn!("injection failed: {e}");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    async fn run_step(&self, args: &[String]) -> Result<(), InjectionError> {
        let program = self.program.display().to_string();

        let output = Command::new(&self.program)
            .args(args)
            .envs(self.env.iter().map(|(k, v)| (*k, v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| InjectionError::Spawn {
                program: program.clone(),
                source,
            })?;

        if output.status.success() {
            trace!("{program} {} ok", args.join(" "));
            return Ok(());
        }

        Err(InjectionError::Failed {
            program,
            args: args.join(" "),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

impl InputInjector for XdotoolInjector {
    /// Spawns the invocation and returns immediately.
    ///
    /// Must be called from within a Tokio runtime.
    fn dispatch(&self, invocation: CommandInvocation) {
        let runner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            // Failures are already logged per step.
            let _ = runner.run(invocation).await;
        });
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
