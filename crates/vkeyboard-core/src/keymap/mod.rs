//! Keysym resolution: DOM key codes and literal characters to X11 keysym names.
//!
//! The remote client reports each key press with up to two identifiers:
//!
//! - `code` – the DOM `KeyboardEvent.code` of the physical key, which is
//!   layout-independent (`"KeyA"`, `"Digit7"`, `"ArrowUp"`, `"Slash"`).
//! - `key`  – the character the client's own layout produced (`"a"`, `"?"`).
//!
//! [`resolve`] prefers `code` and only falls back to `key` for keys whose code
//! it does not know, so a client on an exotic layout still gets punctuation
//! through.  Anything it cannot place is dropped rather than reported: client
//! keyboards vary too much for an unmapped key to be worth failing a session.

pub mod tables;

use std::fmt;

use crate::protocol::messages::KeyDownEvent;

/// Name of a key in the X11 keysym vocabulary (`"Return"`, `"a"`,
/// `"bracketleft"`).
///
/// Only [`resolve`] creates these.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeysymName(String);

impl KeysymName {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this keysym already denotes a shifted glyph
    /// (`question`, `colon`, ...).
    pub fn is_inherently_shifted(&self) -> bool {
        tables::shifted_keysyms().contains(self.0.as_str())
    }
}

impl fmt::Display for KeysymName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for KeysymName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Resolves the key of a `keydown` event to a keysym name.
///
/// Returns `None` for bare modifier presses and for keys with neither a known
/// code nor a single-character `key`.
pub fn resolve(event: &KeyDownEvent) -> Option<KeysymName> {
    if let Some(code) = event.code.as_deref() {
        if tables::modifier_codes().contains(code) {
            return None;
        }
        if let Some(keysym) = resolve_code(code) {
            return Some(keysym);
        }
    }

    event.key.as_deref().and_then(resolve_literal)
}

fn resolve_code(code: &str) -> Option<KeysymName> {
    if let Some(name) = tables::named_codes().get(code) {
        return Some(KeysymName::new(*name));
    }
    if let Some(letter) = single_char_suffix(code, "Key").filter(char::is_ascii_alphabetic) {
        return Some(KeysymName::new(letter.to_ascii_lowercase()));
    }
    if let Some(digit) = single_char_suffix(code, "Digit").filter(char::is_ascii_digit) {
        return Some(KeysymName::new(digit));
    }
    None
}

fn resolve_literal(key: &str) -> Option<KeysymName> {
    let mut chars = key.chars();
    let ch = chars.next()?;
    if chars.next().is_some() {
        // Named values such as "Enter" or "Unidentified".
        return None;
    }
    match tables::literal_chars().get(&ch) {
        Some(name) => Some(KeysymName::new(*name)),
        None => Some(KeysymName::new(ch)),
    }
}

/// `"KeyQ"` with prefix `"Key"` → `Some('Q')`; anything longer than one
/// character after the prefix → `None`.
fn single_char_suffix(code: &str, prefix: &str) -> Option<char> {
    let mut rest = code.strip_prefix(prefix)?.chars();
    let ch = rest.next()?;
    rest.next().is_none().then_some(ch)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
