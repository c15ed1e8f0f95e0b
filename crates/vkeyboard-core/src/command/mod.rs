//! Planning of `xdotool` command lines.
//!
//! Everything here is pure: a [`CommandInvocation`] is just the ordered list
//! of argument vectors to run.  The server owns the process spawning.
//!
//! # Key emission
//!
//! A bare key is one `key --clearmodifiers <keysym>` call, which makes
//! xdotool temporarily release any modifier the host user is physically
//! holding so it does not leak into the injected keystroke.
//!
//! A combo is never sent as a single `key ctrl+alt+t`.  It is spelled out in
//! three phases so the release order is under our control:
//!
//! ```text
//! keydown ctrl      ─┐ press modifiers, canonical order
//! keydown alt       ─┘
//! key t             ── the terminal key
//! keyup alt         ─┐ release modifiers, reverse order
//! keyup ctrl        ─┘
//! ```
//!
//! Releasing in forward order can leave a modifier logically held when a
//! release races the key event.
//!
//! # Pointer emission
//!
//! X11 has no scroll API; wheel clicks are buttons 4 (up) and 5 (down).

use crate::combo::{self, ComboDescriptor};
use crate::protocol::messages::InputEvent;

/// X11 button number for one wheel click upwards.
pub const SCROLL_UP_BUTTON: u32 = 4;

/// X11 button number for one wheel click downwards.
pub const SCROLL_DOWN_BUTTON: u32 = 5;

/// Upper bound on wheel clicks planned for one `scroll` event.
pub const MAX_SCROLL_CLICKS: u64 = 100;

/// Ordered `xdotool` argument lists realising one input action.
///
/// Steps must run sequentially, each one only after the previous has exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    steps: Vec<Vec<String>>,
}

impl CommandInvocation {
    fn single(args: Vec<String>) -> Self {
        Self { steps: vec![args] }
    }

    pub fn steps(&self) -> &[Vec<String>] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<Vec<String>> {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

fn argv<const N: usize>(args: [&str; N]) -> Vec<String> {
    args.iter().map(|s| (*s).to_string()).collect()
}

/// Commands for one key combo.  See the module docs for the ordering.
pub fn plan_combo(combo: &ComboDescriptor) -> CommandInvocation {
    let key = combo.key.as_str();

    if combo.is_bare() {
        return CommandInvocation::single(argv(["key", "--clearmodifiers", key]));
    }

    let presses = combo
        .modifiers
        .iter()
        .map(|m| argv(["keydown", m.keysym()]));
    let releases = combo
        .modifiers
        .iter()
        .rev()
        .map(|m| argv(["keyup", m.keysym()]));

    let steps = presses
        .chain(std::iter::once(argv(["key", key])))
        .chain(releases)
        .collect();

    CommandInvocation { steps }
}

/// Relative pointer motion, deltas rounded to whole pixels.
pub fn plan_mouse_move(dx: f64, dy: f64) -> CommandInvocation {
    let dx = round_to_pixels(dx).to_string();
    let dy = round_to_pixels(dy).to_string();
    // `--` so negative deltas are not parsed as options.
    CommandInvocation::single(argv(["mousemove_relative", "--", dx.as_str(), dy.as_str()]))
}

/// One click of `button`.  Button 0 does not exist in X11 and yields `None`.
pub fn plan_click(button: u32) -> Option<CommandInvocation> {
    if button == 0 {
        return None;
    }
    let button = button.to_string();
    Some(CommandInvocation::single(argv(["click", button.as_str()])))
}

/// `max(1, round(|dy|))` wheel clicks, at most [`MAX_SCROLL_CLICKS`], up for
/// positive `dy`, down otherwise.
pub fn plan_scroll(dy: f64) -> CommandInvocation {
    let button = if dy > 0.0 {
        SCROLL_UP_BUTTON
    } else {
        SCROLL_DOWN_BUTTON
    };
    let count = scroll_count(dy).to_string();
    let button = button.to_string();
    CommandInvocation::single(argv(["click", "--repeat", count.as_str(), button.as_str()]))
}

fn round_to_pixels(delta: f64) -> i64 {
    delta.round() as i64
}

fn scroll_count(dy: f64) -> u64 {
    (dy.abs().round() as u64).clamp(1, MAX_SCROLL_CLICKS)
}

/// Returns `true` if `plan_scroll(dy)` would cut the click count down to
/// [`MAX_SCROLL_CLICKS`].
pub fn scroll_exceeds_cap(dy: f64) -> bool {
    dy.abs().round() > MAX_SCROLL_CLICKS as f64
}

/// Full translation of one inbound event.
///
/// Returns `None` for events that produce no command: pings, unknown types,
/// keys that do not resolve and invalid buttons.
pub fn translate_event(event: &InputEvent) -> Option<CommandInvocation> {
    match event {
        InputEvent::KeyDown(key) => combo::combo_for(key).map(|c| plan_combo(&c)),
        InputEvent::MouseMove { dx, dy } => Some(plan_mouse_move(*dx, *dy)),
        InputEvent::Click { button } => plan_click(*button),
        InputEvent::Scroll { dy } => Some(plan_scroll(*dy)),
        InputEvent::Ping | InputEvent::Unknown => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combo::{build_combo, Modifier, ModifierSet};
    use crate::keymap::KeysymName;
    use crate::protocol::messages::KeyDownEvent;

    fn steps(inv: &CommandInvocation) -> Vec<Vec<&str>> {
        inv.steps()
            .iter()
            .map(|s| s.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_bare_key_is_single_clearmodifiers_call() {
        let combo = build_combo(ModifierSet::new(), KeysymName::new("Return"));

        let inv = plan_combo(&combo);

        assert_eq!(steps(&inv), vec![vec!["key", "--clearmodifiers", "Return"]]);
    }

    #[test]
    fn test_control_alt_combo_releases_in_reverse_order() {
        let combo = ComboDescriptor {
            modifiers: vec![Modifier::Control, Modifier::Alt],
            key: KeysymName::new("t"),
        };

        let inv = plan_combo(&combo);

        assert_eq!(
            steps(&inv),
            vec![
                vec!["keydown", "ctrl"],
                vec!["keydown", "alt"],
                vec!["key", "t"],
                vec!["keyup", "alt"],
                vec!["keyup", "ctrl"],
            ]
        );
    }

    #[test]
    fn test_three_modifier_combo_has_seven_steps() {
        let combo = ComboDescriptor {
            modifiers: vec![Modifier::Control, Modifier::Alt, Modifier::Shift],
            key: KeysymName::new("Delete"),
        };

        let inv = plan_combo(&combo);

        assert_eq!(inv.len(), 7);
        assert_eq!(steps(&inv)[3], vec!["key", "Delete"]);
        assert_eq!(steps(&inv)[6], vec!["keyup", "ctrl"]);
    }

    #[test]
    fn test_combo_terminal_key_has_no_clearmodifiers() {
        let combo = ComboDescriptor {
            modifiers: vec![Modifier::Shift],
            key: KeysymName::new("a"),
        };
        let inv = plan_combo(&combo);
        assert!(inv
            .steps()
            .iter()
            .all(|s| !s.contains(&"--clearmodifiers".to_string())));
    }

    #[test]
    fn test_mouse_move_rounds_deltas() {
        let inv = plan_mouse_move(2.6, -3.4);
        assert_eq!(
            steps(&inv),
            vec![vec!["mousemove_relative", "--", "3", "-3"]]
        );
    }

    #[test]
    fn test_mouse_move_rounds_half_away_from_zero() {
        let inv = plan_mouse_move(0.5, -0.5);
        assert_eq!(steps(&inv)[0][2..], ["1", "-1"]);
    }

    #[test]
    fn test_click() {
        let inv = plan_click(3).unwrap();
        assert_eq!(steps(&inv), vec![vec!["click", "3"]]);
    }

    #[test]
    fn test_click_button_zero_is_dropped() {
        assert_eq!(plan_click(0), None);
    }

    #[test]
    fn test_scroll_down_seven() {
        let inv = plan_scroll(-7.0);
        assert_eq!(steps(&inv), vec![vec!["click", "--repeat", "7", "5"]]);
    }

    #[test]
    fn test_scroll_zero_is_one_click_down() {
        let inv = plan_scroll(0.0);
        assert_eq!(steps(&inv), vec![vec!["click", "--repeat", "1", "5"]]);
    }

    #[test]
    fn test_scroll_up_small_fraction_is_one_click() {
        let inv = plan_scroll(0.2);
        assert_eq!(steps(&inv), vec![vec!["click", "--repeat", "1", "4"]]);
    }

    #[test]
    fn test_scroll_up_rounds_magnitude() {
        let inv = plan_scroll(2.5);
        assert_eq!(steps(&inv), vec![vec!["click", "--repeat", "3", "4"]]);
    }

    #[test]
    fn test_scroll_at_cap_is_unchanged() {
        let inv = plan_scroll(100.0);
        assert_eq!(steps(&inv), vec![vec!["click", "--repeat", "100", "4"]]);
        assert!(!scroll_exceeds_cap(100.0));
    }

    #[test]
    fn test_huge_scroll_is_capped() {
        // Arrange: a delta far beyond any real wheel
        let dy = -1e300;

        // Act
        let inv = plan_scroll(dy);

        // Assert
        assert_eq!(steps(&inv), vec![vec!["click", "--repeat", "100", "5"]]);
        assert!(scroll_exceeds_cap(dy));
    }

    #[test]
    fn test_translate_ping_and_unknown_produce_nothing() {
        assert_eq!(translate_event(&InputEvent::Ping), None);
        assert_eq!(translate_event(&InputEvent::Unknown), None);
    }

    #[test]
    fn test_translate_unresolvable_key_produces_nothing() {
        let event = InputEvent::KeyDown(KeyDownEvent {
            code: Some("Unknown99".to_string()),
            key: Some(String::new()),
            ..KeyDownEvent::default()
        });
        assert_eq!(translate_event(&event), None);
    }
}
