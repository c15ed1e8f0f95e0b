//! Combo construction: modifiers plus one terminal key.

pub mod modifiers;

pub use modifiers::{normalize, Modifier, ModifierSet};

use crate::keymap::{self, KeysymName};
use crate::protocol::messages::KeyDownEvent;

/// A keyboard shortcut ready for emission: zero or more modifiers, pressed in
/// the listed order, around exactly one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboDescriptor {
    pub modifiers: Vec<Modifier>,
    pub key: KeysymName,
}

impl ComboDescriptor {
    /// `true` when no modifier is involved.
    pub fn is_bare(&self) -> bool {
        self.modifiers.is_empty()
    }
}

/// Combines a normalised modifier set with the resolved key.
pub fn build_combo(modifiers: ModifierSet, key: KeysymName) -> ComboDescriptor {
    ComboDescriptor {
        modifiers: modifiers.to_vec(),
        key,
    }
}

/// Resolve → normalise → build for one `keydown` event.
///
/// Returns `None` when the key does not resolve.
pub fn combo_for(event: &KeyDownEvent) -> Option<ComboDescriptor> {
    let key = keymap::resolve(event)?;
    let modifiers = normalize(event, &key);
    Some(build_combo(modifiers, key))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_builds_bare_combo() {
        let combo = build_combo(ModifierSet::new(), KeysymName::new("Return"));
        assert!(combo.is_bare());
        assert_eq!(combo.key, "Return");
    }

    #[test]
    fn test_combo_for_shift_a() {
        let event = KeyDownEvent {
            code: Some("KeyA".to_string()),
            shift: true,
            ..KeyDownEvent::default()
        };

        let combo = combo_for(&event).unwrap();

        assert_eq!(combo.modifiers, vec![Modifier::Shift]);
        assert_eq!(combo.key, "a");
    }

    #[test]
    fn test_combo_for_cmd_shift_question_drops_shift_keeps_control() {
        let event = KeyDownEvent {
            key: Some("?".to_string()),
            shift: true,
            meta: true,
            ..KeyDownEvent::default()
        };

        let combo = combo_for(&event).unwrap();

        assert_eq!(combo.modifiers, vec![Modifier::Control]);
        assert_eq!(combo.key, "question");
    }

    #[test]
    fn test_combo_for_all_modifiers_is_canonical() {
        let event = KeyDownEvent {
            code: Some("KeyT".to_string()),
            shift: true,
            ctrl: true,
            alt: true,
            meta: true,
            ..KeyDownEvent::default()
        };

        let combo = combo_for(&event).unwrap();

        assert_eq!(
            combo.modifiers,
            vec![Modifier::Control, Modifier::Alt, Modifier::Shift]
        );
    }

    #[test]
    fn test_combo_for_modifier_only_is_none() {
        let event = KeyDownEvent {
            code: Some("ControlLeft".to_string()),
            ctrl: true,
            ..KeyDownEvent::default()
        };
        assert_eq!(combo_for(&event), None);
    }
}
