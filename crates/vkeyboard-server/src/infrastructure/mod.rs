//! Infrastructure layer: everything that touches the network, the file system
//! or child processes.
//!
//! - `ws_server`: WebSocket accept loop and sessions
//! - `injector`: `xdotool` and recording implementations of the injector port
//! - `config_file`: optional TOML configuration

pub mod config_file;
pub mod injector;
pub mod ws_server;

pub use config_file::{load_config, ConfigError, FileConfig};
pub use injector::{InjectionError, RecordingInjector, XdotoolInjector};
pub use ws_server::{run_server, serve};
