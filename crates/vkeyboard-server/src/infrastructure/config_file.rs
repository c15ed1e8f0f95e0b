//! Optional TOML configuration file.
//!
//! ```toml
//! [server]
//! bind_addr = "127.0.0.1:9876"
//!
//! [injector]
//! program = "/usr/bin/xdotool"
//!
//! [display]
//! display = ":1"
//! xauthority = "/run/user/1000/gdm/Xauthority"
//! ```
//!
//! Every table and field is optional; absent ones take the built-in
//! defaults.  The file only provides a base: environment variables and CLI
//! flags are applied on top of it in `main.rs`.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::config::{DEFAULT_DISPLAY, DEFAULT_PORT, DEFAULT_XDOTOOL};
use crate::domain::{DisplayTarget, ServerConfig};

/// Error type for configuration file loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// `server.bind_addr` is not a socket address.
    #[error("invalid bind address {0:?}: expected host:port, e.g. 0.0.0.0:{DEFAULT_PORT}")]
    InvalidBindAddr(String),
}

// ── Schema ────────────────────────────────────────────────────────────────────

/// Top-level layout of the configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub injector: InjectorSection,
    #[serde(default)]
    pub display: DisplaySection,
}

/// `[server]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSection {
    /// `host:port` the WebSocket listener binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

/// `[injector]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InjectorSection {
    /// Path or `PATH` name of the xdotool binary.
    #[serde(default = "default_program")]
    pub program: PathBuf,
}

/// `[display]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplaySection {
    #[serde(default = "default_display")]
    pub display: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xauthority: Option<PathBuf>,
}

fn default_bind_addr() -> String {
    format!("0.0.0.0:{DEFAULT_PORT}")
}
fn default_program() -> PathBuf {
    PathBuf::from(DEFAULT_XDOTOOL)
}
fn default_display() -> String {
    DEFAULT_DISPLAY.to_string()
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

impl Default for InjectorSection {
    fn default() -> Self {
        Self {
            program: default_program(),
        }
    }
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            display: default_display(),
            xauthority: None,
        }
    }
}

impl FileConfig {
    /// Parses TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is malformed or a field has
    /// the wrong type.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Converts the file contents into a [`ServerConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBindAddr`] if `server.bind_addr` does not
    /// parse.
    pub fn into_server_config(self) -> Result<ServerConfig, ConfigError> {
        let bind_addr: SocketAddr = self
            .server
            .bind_addr
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(self.server.bind_addr.clone()))?;

        Ok(ServerConfig {
            bind_addr,
            xdotool_program: self.injector.program,
            display: DisplayTarget {
                display: self.display.display,
                xauthority: self.display.xauthority,
            },
            dry_run: false,
        })
    }
}

/// Loads and parses the configuration file at `path`.
///
/// Unlike a settings file the application manages itself, this file is named
/// explicitly by the operator, so a missing file is an error.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read and
/// [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    FileConfig::from_toml(&content)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_server_defaults() {
        // Arrange / Act
        let cfg = FileConfig::from_toml("").unwrap().into_server_config().unwrap();

        // Assert
        assert_eq!(cfg, ServerConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let text = r#"
            [display]
            display = ":1"
        "#;

        let cfg = FileConfig::from_toml(text).unwrap().into_server_config().unwrap();

        assert_eq!(cfg.display.display, ":1");
        assert_eq!(cfg.display.xauthority, None);
        assert_eq!(cfg.bind_addr.port(), 9876);
        assert_eq!(cfg.xdotool_program, PathBuf::from("xdotool"));
    }

    #[test]
    fn test_full_file_is_applied() {
        let text = r#"
            [server]
            bind_addr = "127.0.0.1:7000"

            [injector]
            program = "/opt/bin/xdotool"

            [display]
            display = ":2"
            xauthority = "/home/kiosk/.Xauthority"
        "#;

        let cfg = FileConfig::from_toml(text).unwrap().into_server_config().unwrap();

        assert_eq!(cfg.bind_addr, "127.0.0.1:7000".parse().unwrap());
        assert_eq!(cfg.xdotool_program, PathBuf::from("/opt/bin/xdotool"));
        assert_eq!(cfg.display.display, ":2");
        assert_eq!(
            cfg.display.xauthority,
            Some(PathBuf::from("/home/kiosk/.Xauthority"))
        );
        assert!(!cfg.dry_run);
    }

    #[test]
    fn test_bad_bind_addr_is_rejected() {
        let text = "[server]\nbind_addr = \"localhost\"\n";

        let err = FileConfig::from_toml(text)
            .unwrap()
            .into_server_config()
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidBindAddr(ref s) if s == "localhost"));
    }

    #[test]
    fn test_wrong_field_type_is_parse_error() {
        let err = FileConfig::from_toml("[injector]\nprogram = 5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/vkeyboard.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_config_reads_file() {
        // Arrange
        let path = std::env::temp_dir().join(format!("vkeyboard-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[server]\nbind_addr = \"0.0.0.0:1234\"\n").unwrap();

        // Act
        let file = load_config(&path).unwrap();
        std::fs::remove_file(&path).ok();

        // Assert
        assert_eq!(file.server.bind_addr, "0.0.0.0:1234");
    }
}
