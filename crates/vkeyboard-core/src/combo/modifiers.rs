//! Modifier normalisation.
//!
//! The client sends four booleans (`shift`, `ctrl`, `alt`, `meta`).  The host
//! only gets three roles, always pressed in the same order so that a given
//! shortcut produces the same command sequence every time:
//!
//! | Role    | Wire flags       | xdotool keysym |
//! |---------|------------------|----------------|
//! | Control | `ctrl` or `meta` | `ctrl`         |
//! | Alt     | `alt`            | `alt`          |
//! | Shift   | `shift`          | `shift`        |
//!
//! Meta folds into Control because the typical client is a Mac where Cmd is
//! the shortcut modifier, while the host is a Linux desktop where Ctrl is.

use crate::keymap::KeysymName;
use crate::protocol::messages::KeyDownEvent;

/// One host-side modifier role.
///
/// The declaration order is the canonical press order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    Control,
    Alt,
    Shift,
}

impl Modifier {
    /// Every role, in canonical order.
    pub const ALL: [Modifier; 3] = [Modifier::Control, Modifier::Alt, Modifier::Shift];

    /// The keysym `xdotool keydown`/`keyup` expects for this role.
    pub fn keysym(self) -> &'static str {
        match self {
            Modifier::Control => "ctrl",
            Modifier::Alt => "alt",
            Modifier::Shift => "shift",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Modifier::Control => 1 << 0,
            Modifier::Alt => 1 << 1,
            Modifier::Shift => 1 << 2,
        }
    }
}

/// A deduplicated set of [`Modifier`] roles.
///
/// Iteration always yields Control, Alt, Shift in that order regardless of
/// insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierSet(u8);

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from the raw wire flags, folding `meta` into Control.
    pub fn from_flags(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Self {
        let mut set = Self::new();
        if ctrl || meta {
            set.insert(Modifier::Control);
        }
        if alt {
            set.insert(Modifier::Alt);
        }
        if shift {
            set.insert(Modifier::Shift);
        }
        set
    }

    pub fn insert(&mut self, modifier: Modifier) {
        self.0 |= modifier.bit();
    }

    pub fn remove(&mut self, modifier: Modifier) {
        self.0 &= !modifier.bit();
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates in canonical order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Modifier> + '_ {
        Modifier::ALL.into_iter().filter(move |m| self.contains(*m))
    }

    pub fn to_vec(&self) -> Vec<Modifier> {
        self.iter().collect()
    }
}

/// Normalises the modifier flags of `event` for the already-resolved `keysym`.
///
/// Shift is dropped when `keysym` is an inherently shifted glyph such as
/// `question`: the keysym alone already selects the glyph, and pressing Shift
/// on top of it changes the result on some X servers.
pub fn normalize(event: &KeyDownEvent, keysym: &KeysymName) -> ModifierSet {
    let mut set = ModifierSet::from_flags(event.shift, event.ctrl, event.alt, event.meta);
    if keysym.is_inherently_shifted() {
        set.remove(Modifier::Shift);
    }
    set
}

// ── Tests ─────────────────────────────────────────────────────────────────────
