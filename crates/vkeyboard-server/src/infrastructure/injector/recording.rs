//! Recording injector for dry runs and tests.
//!
//! Instead of spawning `xdotool`, every dispatched [`CommandInvocation`] is
//! logged at `info` and pushed into a `Mutex<Vec<...>>`.  `--dry-run` uses it
//! to show what a session would type without touching the display; the
//! integration tests use it to assert exactly what was dispatched and in what
//! order.

use std::sync::Mutex;

use tracing::info;
use vkeyboard_core::CommandInvocation;

use crate::application::InputInjector;

/// An injector that remembers every invocation instead of running it.
#[derive(Default)]
pub struct RecordingInjector {
    dispatched: Mutex<Vec<CommandInvocation>>,
}

impl RecordingInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything dispatched so far, oldest first.
    pub fn dispatched(&self) -> Vec<CommandInvocation> {
        match self.dispatched.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl InputInjector for RecordingInjector {
    fn dispatch(&self, invocation: CommandInvocation) {
        for step in invocation.steps() {
            info!("dry run: xdotool {}", step.join(" "));
        }
        match self.dispatched.lock() {
            Ok(mut guard) => guard.push(invocation),
            Err(poisoned) => poisoned.into_inner().push(invocation),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
