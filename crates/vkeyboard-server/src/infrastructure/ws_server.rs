//! WebSocket server: accept loop and per-session frame handling.
//!
//! Every accepted connection gets its own Tokio task.  Inside a session,
//! frames are read one at a time and handed to the shared [`InputRelay`],
//! which dispatches at most one injection command per frame.  So dispatch
//! order within a session matches frame order, while the commands themselves
//! run in the background.
//!
//! Shutdown is triggered by a shared `AtomicBool` set from the Ctrl+C handler
//! in `main.rs`.  Sessions already running are not interrupted; they end when
//! their client disconnects or the process exits.

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::{
    accept_async,
    tungstenite::{Error as WsError, Message as WsMessage},
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::application::{FrameOutcome, InputRelay};

/// How long one `accept()` waits before the shutdown flag is checked again.
const ACCEPT_POLL: Duration = Duration::from_millis(200);

// ── Public API ────────────────────────────────────────────────────────────────

/// Binds `bind_addr` and serves sessions until `running` is cleared.
///
/// Each accepted connection is handed to its own Tokio task, so a slow or
/// stuck client never delays the others.
///
/// # Parameters
///
/// - `bind_addr` – Address of the WebSocket listener.
/// - `relay`     – Frame handler shared by every session.
/// - `running`   – Shared flag; the accept loop exits when it is `false`.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound (port in use, missing
/// permission).
pub async fn run_server(
    bind_addr: SocketAddr,
    relay: Arc<InputRelay>,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind WebSocket listener on {bind_addr}"))?;

    info!("vkeyboard listening on ws://{bind_addr}");

    serve(listener, relay, running).await
}

/// Runs the accept loop on an already bound listener.
///
/// Split from [`run_server`] so tests can bind port 0 and learn the real
/// address before serving.
///
/// # Errors
///
/// Currently never fails; accept errors are logged and the loop continues.
pub async fn serve(
    listener: TcpListener,
    relay: Arc<InputRelay>,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    loop {
        // Checked before every accept so Ctrl+C is noticed within one poll.
        if !running.load(Ordering::Relaxed) {
            info!("shutdown flag set; stopping accept loop");
            break;
        }

        match timeout(ACCEPT_POLL, listener.accept()).await {
            Ok(Ok((stream, peer_addr))) => {
                let relay = Arc::clone(&relay);
                tokio::spawn(async move {
                    handle_client_session(stream, peer_addr, relay).await;
                });
            }
            Ok(Err(e)) => {
                // Transient (e.g. out of file descriptors); keep serving.
                error!("accept error: {e}");
            }
            Err(_) => {
                // No connection within ACCEPT_POLL; re-check the flag.
            }
        }
    }

    Ok(())
}

// ── Per-session handler ───────────────────────────────────────────────────────

/// Entry point of each session task.  Logs how the session ended.
async fn handle_client_session(stream: TcpStream, peer_addr: SocketAddr, relay: Arc<InputRelay>) {
    let session = session_tag(Uuid::new_v4());
    info!("session {session}: connection from {peer_addr}");

    match run_session(stream, peer_addr, &session, &relay).await {
        Ok(()) => info!("session {session}: closed"),
        Err(e) => warn!("session {session}: closed with error: {e:#}"),
    }
}

/// Short session id for log lines: the first group of a random UUID.
fn session_tag(id: Uuid) -> String {
    let mut tag = id.simple().to_string();
    tag.truncate(8);
    tag
}

/// Runs one client session.
///
/// 1. Completes the WebSocket handshake.
/// 2. Reads frames one at a time.  Text frames go to the relay, in arrival
///    order; a reply (only ever the pong) is written back before the next
///    frame is read.
/// 3. Returns when the client closes or the connection drops.
///
/// # Errors
///
/// Returns an error if the handshake fails, if the transport fails mid
/// session, or if a reply cannot be written.
async fn run_session(
    stream: TcpStream,
    peer_addr: SocketAddr,
    session: &str,
    relay: &InputRelay,
) -> anyhow::Result<()> {
    // ── Step 1: WebSocket handshake ───────────────────────────────────────────
    let mut ws = accept_async(stream)
        .await
        .with_context(|| format!("WebSocket handshake failed with {peer_addr}"))?;

    debug!("session {session}: handshake complete");

    // ── Step 2: Frame loop ────────────────────────────────────────────────────
    //
    // `next()` yields `None` once the peer has closed the stream.
    while let Some(frame) = ws.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(WsError::ConnectionClosed | WsError::AlreadyClosed | WsError::Protocol(_)) => {
                debug!("session {session}: client went away");
                break;
            }
            Err(e) => return Err(e).context("WebSocket read failed"),
        };

        match frame {
            WsMessage::Text(text) => match relay.handle_frame(&text) {
                FrameOutcome::Reply(reply) => {
                    let json = serde_json::to_string(&reply).context("failed to encode reply")?;
                    ws.send(WsMessage::Text(json))
                        .await
                        .context("WebSocket send failed")?;
                }
                FrameOutcome::Dispatched => {}
                FrameOutcome::Dropped(reason) => {
                    debug!("session {session}: frame ignored ({reason:?})");
                }
            },
            WsMessage::Binary(data) => {
                debug!("session {session}: binary frame ignored ({} bytes)", data.len());
            }
            // tungstenite queues the Pong reply itself.
            WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Frame(_) => {}
            WsMessage::Close(_) => {
                debug!("session {session}: close frame received");
                break;
            }
        }
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
