//! InputRelay: turns one inbound WebSocket frame into at most one dispatched
//! injection command.
//!
//! The relay is synchronous and never blocks.  Running the command is the
//! [`InputInjector`]'s business; the relay only hands it over, in the order
//! frames arrive.

use std::sync::Arc;

use tracing::debug;
use vkeyboard_core::{
    parse_message, scroll_exceeds_cap, translate_event, CommandInvocation, InputEvent,
    ServerMessage, MAX_SCROLL_CLICKS,
};

/// Port to whatever executes injection commands.
///
/// Implementations must return immediately: the session loop calls
/// `dispatch` inline for every frame.  Failures are the implementation's to
/// log; nothing is reported back.
#[cfg_attr(test, mockall::automock)]
pub trait InputInjector: Send + Sync {
    fn dispatch(&self, invocation: CommandInvocation);
}

/// Why a frame produced neither a reply nor a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Not JSON, or a known type with missing/mistyped fields.
    Malformed,
    /// A `type` this server does not handle.
    UnknownType,
    /// A keydown that did not resolve, or a click on button 0.
    Unresolved,
}

/// What the session loop should do after a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Send this message back to the client.
    Reply(ServerMessage),
    /// A command was handed to the injector.
    Dispatched,
    /// Nothing to do.
    Dropped(DropReason),
}

/// The relay use case.  One instance is shared by every session.
pub struct InputRelay {
    injector: Arc<dyn InputInjector>,
}

impl InputRelay {
    pub fn new(injector: Arc<dyn InputInjector>) -> Self {
        Self { injector }
    }

    /// Handles one text frame.
    pub fn handle_frame(&self, text: &str) -> FrameOutcome {
        match parse_message(text) {
            Ok(event) => self.handle_event(&event),
            Err(e) => {
                debug!("dropping frame: {e}");
                FrameOutcome::Dropped(DropReason::Malformed)
            }
        }
    }

    /// Handles one already-decoded event.
    pub fn handle_event(&self, event: &InputEvent) -> FrameOutcome {
        match event {
            InputEvent::Ping => FrameOutcome::Reply(ServerMessage::Pong),
            InputEvent::Unknown => {
                debug!("dropping frame with unknown type");
                FrameOutcome::Dropped(DropReason::UnknownType)
            }
            InputEvent::Scroll { dy } if scroll_exceeds_cap(*dy) => {
                debug!("scroll of {dy} capped at {MAX_SCROLL_CLICKS} clicks");
                self.dispatch_translated(event)
            }
            _ => self.dispatch_translated(event),
        }
    }

    fn dispatch_translated(&self, event: &InputEvent) -> FrameOutcome {
        match translate_event(event) {
            Some(invocation) => {
                debug!(
                    "{} → {} xdotool step(s)",
                    event.type_name(),
                    invocation.len()
                );
                self.injector.dispatch(invocation);
                FrameOutcome::Dispatched
            }
            None => {
                debug!("dropping unresolved {}", event.type_name());
                FrameOutcome::Dropped(DropReason::Unresolved)
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
