//! Domain layer for vkeyboard-server.
//!
//! Plain configuration types with no dependencies on I/O, networking, or
//! external frameworks.  Reading files and environment variables happens in
//! the infrastructure layer and in `main.rs`.

pub mod config;

pub use config::{DisplayTarget, ServerConfig};
