//! Input-profile descriptors and raw-key resolution.
//!
//! The simulation only ever sees a resolved [`Command`]; which physical key
//! means which command is decided here by the profile the player picked.

use crate::input::Command;
use crate::snake::Direction::{self, *};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputKind {
    Keyboard,
    Joystick { side: Side },
}

#[derive(Debug, PartialEq, Eq)]
pub struct InputProfile {
    pub id: &'static str,
    pub kind: InputKind,
    /// Raw key name to logical direction. Empty for joysticks.
    pub key_map: &'static [(&'static str, Direction)],
}

/// Key that toggles pause under every keyboard profile.
pub const PAUSE_KEY: &str = "p";

pub static ARROW_KEYS: InputProfile = InputProfile {
    id: "arrowKeys",
    kind: InputKind::Keyboard,
    key_map: &[("left", Left), ("up", Up), ("right", Right), ("down", Down)],
};

pub static ASDF_KEYS: InputProfile = InputProfile {
    id: "asdfKeys",
    kind: InputKind::Keyboard,
    key_map: &[("a", Left), ("w", Up), ("d", Right), ("s", Down)],
};

pub static JOYSTICK_LEFT: InputProfile = InputProfile {
    id: "joystickLeft",
    kind: InputKind::Joystick { side: Side::Left },
    key_map: &[],
};

pub static JOYSTICK_RIGHT: InputProfile = InputProfile {
    id: "joystickRight",
    kind: InputKind::Joystick { side: Side::Right },
    key_map: &[],
};

pub static PROFILES: [&InputProfile; 4] = [&ARROW_KEYS, &ASDF_KEYS, &JOYSTICK_LEFT, &JOYSTICK_RIGHT];

impl InputProfile {
    pub fn by_id(id: &str) -> Option<&'static InputProfile> {
        PROFILES.iter().copied().find(|p| p.id == id)
    }

    pub fn is_keyboard(&self) -> bool {
        self.kind == InputKind::Keyboard
    }

    /// Resolves a key name such as `"left"`, `"w"` or `"shift+w"`.
    /// Modifier prefixes are ignored. Keys outside the profile resolve to
    /// nothing, and joysticks have no keys at all.
    pub fn resolve_key(&self, key: &str) -> Option<Command> {
        if !self.is_keyboard() {
            return None;
        }

        let plain = key.rsplit('+').next()?;
        if plain == PAUSE_KEY {
            return Some(Command::Pause);
        }

        self.key_map
            .iter()
            .find(|(k, _)| *k == plain)
            .map(|(_, dir)| Command::Turn(*dir))
    }

    /// Key names bound to each direction, for help text.
    pub fn key_for(&self, dir: Direction) -> Option<&'static str> {
        self.key_map.iter().find(|(_, d)| *d == dir).map(|(k, _)| *k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_profile_resolves_arrows_and_pause() {
        assert_eq!(ARROW_KEYS.resolve_key("left"), Some(Command::Turn(Left)));
        assert_eq!(ARROW_KEYS.resolve_key("down"), Some(Command::Turn(Down)));
        assert_eq!(ARROW_KEYS.resolve_key("p"), Some(Command::Pause));
        assert_eq!(ARROW_KEYS.resolve_key("a"), None);
    }

    #[test]
    fn modifiers_are_stripped() {
        assert_eq!(ASDF_KEYS.resolve_key("ctrl+w"), Some(Command::Turn(Up)));
        assert_eq!(ASDF_KEYS.resolve_key("shift+p"), Some(Command::Pause));
        assert_eq!(ASDF_KEYS.resolve_key("left"), None);
    }

    #[test]
    fn joysticks_ignore_keys() {
        assert_eq!(JOYSTICK_LEFT.resolve_key("p"), None);
        assert!(!JOYSTICK_RIGHT.is_keyboard());
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(InputProfile::by_id("asdfKeys"), Some(&ASDF_KEYS));
        assert_eq!(InputProfile::by_id("mouse"), None);
    }
}
