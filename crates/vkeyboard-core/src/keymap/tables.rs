//! Lookup tables backing the keysym resolver and the modifier normaliser.
//!
//! Each table is built on first use and never mutated afterwards.  Keysym
//! names follow X11/keysymdef.h with the `XK_` prefix dropped, which is the
//! spelling `xdotool` accepts.
//! Reference: https://gitlab.freedesktop.org/xorg/proto/xorgproto/-/blob/master/include/X11/keysymdef.h

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// DOM `KeyboardEvent.code` values of the bare modifier keys.  A press of one
/// of these on its own is never injected; the modifier state travels in the
/// boolean flags of the next real key instead.
const MODIFIER_CODES: &[&str] = &[
    "ShiftLeft",
    "ShiftRight",
    "ControlLeft",
    "ControlRight",
    "AltLeft",
    "AltRight",
    "MetaLeft",
    "MetaRight",
];

/// Named (non-letter, non-digit) physical keys.
const NAMED_CODES: &[(&str, &str)] = &[
    // Navigation
    ("ArrowUp", "Up"),
    ("ArrowDown", "Down"),
    ("ArrowLeft", "Left"),
    ("ArrowRight", "Right"),
    ("Home", "Home"),
    ("End", "End"),
    ("PageUp", "Page_Up"),
    ("PageDown", "Page_Down"),
    // Editing
    ("Backspace", "BackSpace"),
    ("Delete", "Delete"),
    ("Insert", "Insert"),
    // Whitespace and control
    ("Enter", "Return"),
    ("Tab", "Tab"),
    ("Escape", "Escape"),
    ("Space", "space"),
    // Function keys
    ("F1", "F1"),
    ("F2", "F2"),
    ("F3", "F3"),
    ("F4", "F4"),
    ("F5", "F5"),
    ("F6", "F6"),
    ("F7", "F7"),
    ("F8", "F8"),
    ("F9", "F9"),
    ("F10", "F10"),
    ("F11", "F11"),
    ("F12", "F12"),
    // Punctuation keys (unshifted glyph)
    ("BracketLeft", "bracketleft"),
    ("BracketRight", "bracketright"),
    ("Backslash", "backslash"),
    ("Semicolon", "semicolon"),
    ("Quote", "apostrophe"),
    ("Comma", "comma"),
    ("Period", "period"),
    ("Slash", "slash"),
    ("Backquote", "grave"),
    ("Minus", "minus"),
    ("Equal", "equal"),
];

/// Literal characters whose keysym name differs from the character itself.
const LITERAL_CHARS: &[(char, &str)] = &[
    // Shifted glyphs on a US layout
    ('?', "question"),
    (':', "colon"),
    ('"', "quotedbl"),
    ('<', "less"),
    ('>', "greater"),
    ('{', "braceleft"),
    ('}', "braceright"),
    ('|', "bar"),
    ('~', "asciitilde"),
    ('!', "exclam"),
    ('@', "at"),
    ('#', "numbersign"),
    ('$', "dollar"),
    ('%', "percent"),
    ('^', "asciicircum"),
    ('&', "ampersand"),
    ('*', "asterisk"),
    ('(', "parenleft"),
    (')', "parenright"),
    ('_', "underscore"),
    ('+', "plus"),
    // Unshifted punctuation
    ('-', "minus"),
    ('=', "equal"),
    ('[', "bracketleft"),
    (']', "bracketright"),
    ('\\', "backslash"),
    (';', "semicolon"),
    ('\'', "apostrophe"),
    (',', "comma"),
    ('.', "period"),
    ('/', "slash"),
    ('`', "grave"),
    (' ', "space"),
];

/// Keysyms that already name the shifted glyph.  Sending Shift together with
/// one of these makes some X servers produce a different character.
const SHIFTED_KEYSYMS: &[&str] = &[
    "question",
    "colon",
    "quotedbl",
    "less",
    "greater",
    "braceleft",
    "braceright",
    "bar",
    "asciitilde",
    "exclam",
    "at",
    "numbersign",
    "dollar",
    "percent",
    "asciicircum",
    "ampersand",
    "asterisk",
    "parenleft",
    "parenright",
    "underscore",
    "plus",
];

pub(crate) fn modifier_codes() -> &'static HashSet<&'static str> {
    static TABLE: OnceLock<HashSet<&'static str>> = OnceLock::new();
    TABLE.get_or_init(|| MODIFIER_CODES.iter().copied().collect())
}

pub(crate) fn named_codes() -> &'static HashMap<&'static str, &'static str> {
    static TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| NAMED_CODES.iter().copied().collect())
}

pub(crate) fn literal_chars() -> &'static HashMap<char, &'static str> {
    static TABLE: OnceLock<HashMap<char, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| LITERAL_CHARS.iter().copied().collect())
}

pub(crate) fn shifted_keysyms() -> &'static HashSet<&'static str> {
    static TABLE: OnceLock<HashSet<&'static str>> = OnceLock::new();
    TABLE.get_or_init(|| SHIFTED_KEYSYMS.iter().copied().collect())
}

/// Forces construction of every table.
///
/// Called once at server startup so the first keystroke does not pay for the
/// hash map allocations.
pub fn init_tables() {
    let _ = modifier_codes();
    let _ = named_codes();
    let _ = literal_chars();
    let _ = shifted_keysyms();
}

// ── Tests ─────────────────────────────────────────────────────────────────────
