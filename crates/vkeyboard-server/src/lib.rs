//! vkeyboard-server library crate.
//!
//! Accepts WebSocket connections from a remote keyboard/mouse client and
//! replays the received events on the local X11 display through `xdotool`.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Remote client (JSON over WebSocket)
//!         ↓
//! [vkeyboard-server]
//!   ├── domain/           Pure types: ServerConfig, DisplayTarget
//!   ├── application/      InputRelay use case + InputInjector port
//!   └── infrastructure/
//!         ├── ws_server/  WebSocket accept loop (tokio-tungstenite)
//!         ├── injector/   xdotool subprocess runner, recording injector
//!         └── config_file TOML config loading
//!         ↓
//! xdotool (one subprocess per step)
//! ```
//!
//! The translation itself (keysyms, modifiers, command ordering) lives in
//! `vkeyboard-core`.
//!
//! # Layer rules
//!
//! - `domain` has no external dependencies (no I/O, no async).
//! - `application` depends on `domain` and `vkeyboard-core` only.
//! - `infrastructure` depends on all other layers plus `tokio` and `tungstenite`.

/// Domain layer: configuration types (no I/O).
pub mod domain;

/// Application layer: per-frame handling and the injector port.
pub mod application;

/// Infrastructure layer: WebSocket server, xdotool runner, config file.
pub mod infrastructure;
