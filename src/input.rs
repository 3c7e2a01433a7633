//! Keyboard state shared between the host and the simulation
//!
//! The host writes single held/released flags from its key events; the
//! simulation only reads them through [`InputState::controls`].

use serde::{Deserialize, Serialize};

/// Logical keys the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Jump,
    Fire,
    Restart,
}

impl Key {
    pub const ALL: [Key; 5] = [Key::Left, Key::Right, Key::Jump, Key::Fire, Key::Restart];

    /// Map a host key name (e.g. `"ArrowLeft"`, `"A"`, `" "`) to a logical key
    pub fn from_host(raw: &str) -> Option<Key> {
        match normalize_key(raw).as_str() {
            "a" | "ArrowLeft" => Some(Key::Left),
            "d" | "ArrowRight" => Some(Key::Right),
            "w" | "ArrowUp" => Some(Key::Jump),
            " " => Some(Key::Fire),
            "Enter" | "r" => Some(Key::Restart),
            _ => None,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Single characters are lower-cased; named keys pass through unchanged
pub fn normalize_key(raw: &str) -> String {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_lowercase().collect(),
        _ => raw.to_string(),
    }
}

/// Movement keys polled once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Held/released flag per logical key; untouched keys read as released
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    held: [bool; Key::ALL.len()],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held[key.index()] = true;
    }

    pub fn release(&mut self, key: Key) {
        self.held[key.index()] = false;
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// Release everything (e.g. on focus loss)
    pub fn clear(&mut self) {
        self.held = [false; Key::ALL.len()];
    }

    pub fn controls(&self) -> Controls {
        Controls {
            left: self.is_held(Key::Left),
            right: self.is_held(Key::Right),
            jump: self.is_held(Key::Jump),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_key_mapping() {
        assert_eq!(Key::from_host("A"), Some(Key::Left));
        assert_eq!(Key::from_host("ArrowRight"), Some(Key::Right));
        assert_eq!(Key::from_host("w"), Some(Key::Jump));
        assert_eq!(Key::from_host(" "), Some(Key::Fire));
        assert_eq!(Key::from_host("R"), Some(Key::Restart));
        assert_eq!(Key::from_host("Enter"), Some(Key::Restart));
        assert_eq!(Key::from_host("Shift"), None);
        assert_eq!(Key::from_host(""), None);
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Q"), "q");
        assert_eq!(normalize_key("ArrowUp"), "ArrowUp");
        assert_eq!(normalize_key(" "), " ");
    }

    #[test]
    fn test_simultaneous_keys() {
        let mut input = InputState::new();
        assert_eq!(input.controls(), Controls::default());

        input.press(Key::Right);
        input.press(Key::Jump);
        assert_eq!(
            input.controls(),
            Controls {
                left: false,
                right: true,
                jump: true
            }
        );

        input.release(Key::Jump);
        assert!(input.is_held(Key::Right));
        assert!(!input.is_held(Key::Jump));

        input.clear();
        assert!(Key::ALL.iter().all(|&k| !input.is_held(k)));
    }
}
