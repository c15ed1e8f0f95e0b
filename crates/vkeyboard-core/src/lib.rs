//! # vkeyboard-core
//!
//! Event-translation engine for the vkeyboard remote-input relay.
//!
//! A remote client sends small JSON messages (`keydown`, `mousemove`,
//! `click`, `scroll`, `ping`) over a WebSocket.  This crate turns each of
//! those messages into the exact `xdotool` argument lists that reproduce the
//! input on the host X11 display.  It has no I/O of its own: running the
//! subprocesses is the job of `vkeyboard-server`.
//!
//! # Pipeline
//!
//! ```text
//! InputEvent ──► keymap::resolve ──► combo::normalize ──► combo::build_combo
//!                                                               │
//!                         command::plan_combo ◄─────────────────┘
//!                                │
//!                         CommandInvocation (Vec of xdotool argv)
//! ```
//!
//! - **`protocol`** – The inbound JSON message shapes.
//! - **`keymap`** – DOM `KeyboardEvent.code` / literal character → X11 keysym
//!   name.
//! - **`combo`** – Modifier normalisation (meta → control, shift suppression
//!   for shifted glyphs) and descriptor construction.
//! - **`command`** – Ordered `xdotool` invocations for keys, pointer motion,
//!   clicks and scrolling.

pub mod combo;
pub mod command;
pub mod keymap;
pub mod protocol;

pub use combo::{build_combo, combo_for, normalize, ComboDescriptor, Modifier, ModifierSet};
pub use command::{
    plan_click, plan_combo, plan_mouse_move, plan_scroll, scroll_exceeds_cap, translate_event,
    CommandInvocation, MAX_SCROLL_CLICKS,
};
pub use keymap::{resolve, KeysymName};
pub use protocol::messages::{
    parse_message, InputEvent, KeyDownEvent, MessageError, ServerMessage,
};
