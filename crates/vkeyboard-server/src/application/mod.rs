//! Application layer for vkeyboard-server.
//!
//! # Responsibilities
//!
//! - Decoding client frames and translating them through `vkeyboard-core`
//! - Handing the resulting commands to an [`InputInjector`]
//! - Answering liveness pings
//!
//! # What does NOT belong here?
//!
//! - Sockets, WebSocket framing or subprocesses (that is infrastructure)

pub mod relay;

pub use relay::{DropReason, FrameOutcome, InputInjector, InputRelay};
