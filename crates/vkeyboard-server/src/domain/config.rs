//! Server configuration types.
//!
//! [`ServerConfig`] is the single source of truth for all runtime settings.
//! `main.rs` fills it from defaults, an optional TOML file, environment
//! variables and CLI flags (in increasing order of precedence).

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Default WebSocket port the remote client connects to.
pub const DEFAULT_PORT: u16 = 9876;

/// Default X display when neither `--display` nor `DISPLAY` is given.
pub const DEFAULT_DISPLAY: &str = ":0";

/// Default injection tool, looked up on `PATH`.
pub const DEFAULT_XDOTOOL: &str = "xdotool";

/// The X11 display every injection subprocess targets.
///
/// Both values end up in the child environment (`DISPLAY`, `XAUTHORITY`).
/// The server does not detect them itself; whoever launches it decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTarget {
    /// Display name such as `:0` or `:1`.
    pub display: String,
    /// Path to the X authority cookie file.  `None` leaves `XAUTHORITY`
    /// unset in the child, which works when the server runs in the same
    /// user session as the display.
    pub xauthority: Option<PathBuf>,
}

impl Default for DisplayTarget {
    fn default() -> Self {
        Self {
            display: DEFAULT_DISPLAY.to_string(),
            xauthority: None,
        }
    }
}

impl DisplayTarget {
    /// Environment variables to set on each injection subprocess.
    pub fn env_vars(&self) -> Vec<(&'static str, String)> {
        let mut vars = vec![("DISPLAY", self.display.clone())];
        if let Some(path) = &self.xauthority {
            vars.push(("XAUTHORITY", path.display().to_string()));
        }
        vars
    }
}

/// All runtime configuration for the relay.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address the WebSocket listener binds to.
    ///
    /// `0.0.0.0` accepts connections from any interface.  The transport is
    /// unauthenticated, so `127.0.0.1` plus an SSH tunnel is the safer choice
    /// outside a trusted LAN.
    pub bind_addr: SocketAddr,

    /// Program invoked for every injection step.
    pub xdotool_program: PathBuf,

    /// Display the injected input lands on.
    pub display: DisplayTarget,

    /// Log planned commands instead of running them.
    pub dry_run: bool,
}

impl Default for ServerConfig {
    /// | Field           | Default        |
    /// |-----------------|----------------|
    /// | bind_addr       | `0.0.0.0:9876` |
    /// | xdotool_program | `xdotool`      |
    /// | display         | `:0`, no auth  |
    /// | dry_run         | `false`        |
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            xdotool_program: PathBuf::from(DEFAULT_XDOTOOL),
            display: DisplayTarget::default(),
            dry_run: false,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port_is_9876() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.bind_addr.port(), 9876);
    }

    #[test]
    fn test_default_binds_all_interfaces() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.bind_addr.ip().to_string(), "0.0.0.0");
    }

    #[test]
    fn test_default_program_is_xdotool() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.xdotool_program, PathBuf::from("xdotool"));
        assert!(!cfg.dry_run);
    }

    #[test]
    fn test_env_vars_without_xauthority() {
        let target = DisplayTarget::default();
        assert_eq!(target.env_vars(), vec![("DISPLAY", ":0".to_string())]);
    }

    #[test]
    fn test_env_vars_with_xauthority() {
        let target = DisplayTarget {
            display: ":1".to_string(),
            xauthority: Some(PathBuf::from("/run/user/1000/gdm/Xauthority")),
        };
        assert_eq!(
            target.env_vars(),
            vec![
                ("DISPLAY", ":1".to_string()),
                ("XAUTHORITY", "/run/user/1000/gdm/Xauthority".to_string()),
            ]
        );
    }
}
