//! JSON message types for the client-facing WebSocket protocol.
//!
//! Every frame is a single JSON object whose `"type"` field selects the
//! variant.  All other fields sit in the same object:
//!
//! ```json
//! {"type":"keydown","code":"KeyA","key":"a","shift":false,"ctrl":true,"alt":false,"meta":false}
//! {"type":"mousemove","dx":3.5,"dy":-2}
//! {"type":"click","button":1}
//! {"type":"scroll","dy":-3}
//! {"type":"ping"}
//! ```
//!
//! Serde's `#[serde(tag = "type")]` attribute handles the discriminant.
//! Unrecognised `type` values deserialize into [`InputEvent::Unknown`] so the
//! session loop can tell them apart from frames that are not JSON at all.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned by [`parse_message`] when a frame cannot be decoded.
#[derive(Debug, Error)]
pub enum MessageError {
    /// The frame is not valid JSON, or a known variant has missing or
    /// mistyped fields.
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}

// ── Client → server ───────────────────────────────────────────────────────────

/// All messages a remote client can send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputEvent {
    /// A single key press, with the modifier state at the time of the press.
    KeyDown(KeyDownEvent),

    /// Relative pointer motion.
    MouseMove {
        /// Horizontal delta in pixels.  Fractional values are rounded when the
        /// command is planned.
        dx: f64,
        /// Vertical delta in pixels.
        dy: f64,
    },

    /// A full press+release of a pointer button.
    Click {
        /// X11 button number (1 = left, 2 = middle, 3 = right, ...).
        button: u32,
    },

    /// Vertical wheel movement.
    Scroll {
        /// Positive scrolls up, zero or negative scrolls down.  The magnitude
        /// (rounded, at least 1) is the number of wheel clicks.
        dy: f64,
    },

    /// Liveness probe; answered with [`ServerMessage::Pong`].
    Ping,

    /// Any `type` value this server does not understand.
    #[serde(other)]
    Unknown,
}

/// Payload of a `keydown` message.
///
/// Both `code` and `key` are optional on the wire.  `code` is the DOM
/// `KeyboardEvent.code` of the physical key (`"KeyA"`, `"ArrowUp"`,
/// `"Slash"`); `key` is the produced character or a named value (`"a"`, `"?"`,
/// `"Enter"`).  Modifier flags default to `false` when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDownEvent {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

impl InputEvent {
    /// Short variant name for log lines.
    ///
    /// Key events are logged by name only so typed text does not end up in
    /// the logs.
    pub fn type_name(&self) -> &'static str {
        match self {
            InputEvent::KeyDown(_) => "keydown",
            InputEvent::MouseMove { .. } => "mousemove",
            InputEvent::Click { .. } => "click",
            InputEvent::Scroll { .. } => "scroll",
            InputEvent::Ping => "ping",
            InputEvent::Unknown => "unknown",
        }
    }
}

// ── Server → client ───────────────────────────────────────────────────────────

/// Messages the server sends back.  Only the ping reply exists; input events
/// are never acknowledged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    Pong,
}

/// Decodes one text frame into an [`InputEvent`].
///
/// # Errors
///
/// Returns [`MessageError::Malformed`] if the frame is not a JSON object of a
/// recognised shape.  Callers drop such frames.
pub fn parse_message(text: &str) -> Result<InputEvent, MessageError> {
    Ok(serde_json::from_str(text)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keydown_with_all_fields() {
        // Arrange
        let json = r#"{"type":"keydown","code":"KeyA","key":"a","shift":true,"ctrl":false,"alt":false,"meta":true}"#;

        // Act
        let event = parse_message(json).unwrap();

        // Assert
        assert_eq!(
            event,
            InputEvent::KeyDown(KeyDownEvent {
                code: Some("KeyA".to_string()),
                key: Some("a".to_string()),
                shift: true,
                ctrl: false,
                alt: false,
                meta: true,
            })
        );
    }

    #[test]
    fn test_parse_keydown_missing_flags_default_to_false() {
        let event = parse_message(r#"{"type":"keydown","key":"?","shift":true}"#).unwrap();

        let InputEvent::KeyDown(key) = event else {
            panic!("expected keydown, got {event:?}");
        };
        assert_eq!(key.code, None);
        assert_eq!(key.key.as_deref(), Some("?"));
        assert!(key.shift);
        assert!(!key.ctrl && !key.alt && !key.meta);
    }

    #[test]
    fn test_parse_keydown_null_code_is_none() {
        let event = parse_message(r#"{"type":"keydown","code":null,"key":"x"}"#).unwrap();
        let InputEvent::KeyDown(key) = event else {
            panic!("expected keydown");
        };
        assert_eq!(key.code, None);
    }

    #[test]
    fn test_parse_mousemove_accepts_fractional_and_integer_deltas() {
        let event = parse_message(r#"{"type":"mousemove","dx":2.6,"dy":-4}"#).unwrap();
        assert_eq!(event, InputEvent::MouseMove { dx: 2.6, dy: -4.0 });
    }

    #[test]
    fn test_parse_click() {
        let event = parse_message(r#"{"type":"click","button":3}"#).unwrap();
        assert_eq!(event, InputEvent::Click { button: 3 });
    }

    #[test]
    fn test_parse_scroll() {
        let event = parse_message(r#"{"type":"scroll","dy":-7}"#).unwrap();
        assert_eq!(event, InputEvent::Scroll { dy: -7.0 });
    }

    #[test]
    fn test_parse_ping() {
        assert_eq!(parse_message(r#"{"type":"ping"}"#).unwrap(), InputEvent::Ping);
    }

    #[test]
    fn test_parse_unknown_type_is_unknown_variant() {
        let event = parse_message(r#"{"type":"keyup","code":"KeyA"}"#).unwrap();
        assert_eq!(event, InputEvent::Unknown);
    }

    #[test]
    fn test_parse_non_json_is_malformed() {
        let err = parse_message("not json at all").unwrap_err();
        assert!(matches!(err, MessageError::Malformed(_)));
    }

    #[test]
    fn test_parse_missing_type_is_malformed() {
        assert!(parse_message(r#"{"dx":1,"dy":2}"#).is_err());
    }

    #[test]
    fn test_parse_click_with_negative_button_is_malformed() {
        assert!(parse_message(r#"{"type":"click","button":-1}"#).is_err());
    }

    #[test]
    fn test_parse_mousemove_missing_delta_is_malformed() {
        assert!(parse_message(r#"{"type":"mousemove","dx":1}"#).is_err());
    }

    #[test]
    fn test_pong_serializes_to_type_tag() {
        let json = serde_json::to_string(&ServerMessage::Pong).unwrap();
        assert_eq!(json, r#"{"type":"pong"}"#);
    }

    #[test]
    fn test_type_name_does_not_include_key_text() {
        let event = InputEvent::KeyDown(KeyDownEvent {
            key: Some("secret".to_string()),
            ..KeyDownEvent::default()
        });
        assert_eq!(event.type_name(), "keydown");
    }
}
