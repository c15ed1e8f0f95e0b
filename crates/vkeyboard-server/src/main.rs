//! vkeyboard server: entry point.
//!
//! Accepts keyboard and mouse events from a remote client over WebSocket and
//! replays them on the local X11 display through `xdotool`.
//!
//! # Usage
//!
//! ```text
//! vkeyboard-server [OPTIONS]
//!
//! Options:
//!   --port <PORT>         WebSocket listener port [default: 9876]
//!   --bind <IP>           Address to bind [default: 0.0.0.0]
//!   --display <DISPLAY>   X display to inject into [default: :0]
//!   --xauthority <PATH>   X authority cookie for that display
//!   --xdotool <PATH>      xdotool binary [default: xdotool]
//!   --config <PATH>       Optional TOML config file
//!   --dry-run             Log planned commands instead of running them
//! ```
//!
//! # Precedence
//!
//! Built-in defaults, then the `--config` file, then environment variables and
//! flags.  Environment variables are read by `clap` and behave exactly like
//! the matching flag.
//!
//! | Variable             | Flag           |
//! |----------------------|----------------|
//! | `VKEYBOARD_PORT`     | `--port`       |
//! | `VKEYBOARD_BIND`     | `--bind`       |
//! | `DISPLAY`            | `--display`    |
//! | `XAUTHORITY`         | `--xauthority` |
//! | `VKEYBOARD_XDOTOOL`  | `--xdotool`    |
//! | `VKEYBOARD_CONFIG`   | `--config`     |
//! | `VKEYBOARD_DRY_RUN`  | `--dry-run`    |
//!
//! The transport is unauthenticated and unencrypted.  Outside a trusted LAN,
//! bind to `127.0.0.1` and tunnel the port over SSH.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vkeyboard_server::application::{InputInjector, InputRelay};
use vkeyboard_server::domain::ServerConfig;
use vkeyboard_server::infrastructure::{
    load_config, run_server, RecordingInjector, XdotoolInjector,
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Remote keyboard and mouse relay for X11.
///
/// Every option is optional so the config file can fill in what the command
/// line leaves out.
#[derive(Debug, Default, Parser)]
#[command(
    name = "vkeyboard-server",
    about = "Replays remote keyboard and mouse events on the local X11 display",
    version
)]
struct Cli {
    /// TCP port for the WebSocket listener.
    #[arg(long, env = "VKEYBOARD_PORT")]
    port: Option<u16>,

    /// IP address to bind the listener to.
    ///
    /// `0.0.0.0` accepts connections on every interface; `127.0.0.1` only
    /// local ones (pair it with an SSH tunnel).
    #[arg(long, env = "VKEYBOARD_BIND")]
    bind: Option<String>,

    /// X display injected input lands on, e.g. `:0`.
    #[arg(long, env = "DISPLAY")]
    display: Option<String>,

    /// X authority file for that display.
    #[arg(long, env = "XAUTHORITY")]
    xauthority: Option<PathBuf>,

    /// Path or name of the xdotool binary.
    #[arg(long, env = "VKEYBOARD_XDOTOOL")]
    xdotool: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(long, env = "VKEYBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Log each planned xdotool command instead of running it.
    #[arg(long, env = "VKEYBOARD_DRY_RUN")]
    dry_run: bool,
}

impl Cli {
    /// Builds the final [`ServerConfig`]: the config file (or defaults) with
    /// every explicitly given flag applied on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or `--bind` is
    /// not an IP address.
    fn into_server_config(self) -> anyhow::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)
                .and_then(|file| file.into_server_config())
                .with_context(|| format!("failed to load config file {}", path.display()))?,
            None => ServerConfig::default(),
        };

        if let Some(bind) = &self.bind {
            let ip: IpAddr = bind
                .parse()
                .with_context(|| format!("invalid bind address: '{bind}'"))?;
            config.bind_addr = SocketAddr::new(ip, config.bind_addr.port());
        }
        if let Some(port) = self.port {
            config.bind_addr.set_port(port);
        }
        if let Some(display) = self.display {
            config.display.display = display;
        }
        if let Some(xauthority) = self.xauthority {
            config.display.xauthority = Some(xauthority);
        }
        if let Some(program) = self.xdotool {
            config.xdotool_program = program;
        }
        config.dry_run |= self.dry_run;

        Ok(config)
    }
}

/// Picks the injector the relay hands commands to.
fn build_injector(config: &ServerConfig) -> Arc<dyn InputInjector> {
    if config.dry_run {
        info!("dry run: commands are logged, not executed");
        Arc::new(RecordingInjector::new())
    } else {
        Arc::new(XdotoolInjector::new(
            config.xdotool_program.clone(),
            &config.display,
        ))
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// # What happens at startup
///
/// 1. `tracing_subscriber` is initialised.  `RUST_LOG` selects the level
///    (e.g. `RUST_LOG=vkeyboard_server=debug`); the default is `info`.
/// 2. CLI flags, environment variables and the optional config file are
///    merged into one [`ServerConfig`].
/// 3. The keysym tables are built.
/// 4. The injector is chosen: `xdotool`, or the recording one for
///    `--dry-run`.
/// 5. A Ctrl+C handler is spawned that clears the shared `running` flag.
/// 6. [`run_server`] binds the port and serves sessions until the flag is
///    cleared.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Step 1: Logging ───────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ── Step 2: Configuration ─────────────────────────────────────────────────
    //
    // `Cli::parse()` exits with a usage message on invalid flags; a bad config
    // file or bind address comes back as an error instead.
    let config = Cli::parse().into_server_config()?;

    info!(
        "vkeyboard server starting: bind={}, display={}, xdotool={}",
        config.bind_addr,
        config.display.display,
        config.xdotool_program.display()
    );

    // ── Step 3: Keysym tables ─────────────────────────────────────────────────
    //
    // Built here rather than on the first keystroke of the first session.
    vkeyboard_core::keymap::tables::init_tables();

    // ── Step 4: Injector and relay ────────────────────────────────────────────
    //
    // One relay is shared by every session; it holds no per-session state.
    let relay = Arc::new(InputRelay::new(build_injector(&config)));

    // ── Step 5: Graceful shutdown flag ────────────────────────────────────────
    //
    // The accept loop polls this flag every 200 ms.  `Relaxed` is enough: the
    // value only has to propagate eventually.
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C, shutting down");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    // ── Step 6: Serve ─────────────────────────────────────────────────────────
    run_server(config.bind_addr, relay, running).await?;

    info!("vkeyboard server stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
