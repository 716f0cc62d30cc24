//! Held movement keys
//!
//! Key events arrive between frames; the frame loop reads `direction()` once.

use std::collections::HashSet;

/// Movement keys the game listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    ArrowLeft,
    ArrowRight,
    A,
    D,
}

impl MoveKey {
    /// Map a DOM `KeyboardEvent.key` value (case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "arrowleft" => Some(MoveKey::ArrowLeft),
            "arrowright" => Some(MoveKey::ArrowRight),
            "a" => Some(MoveKey::A),
            "d" => Some(MoveKey::D),
            _ => None,
        }
    }

    pub fn is_left(&self) -> bool {
        matches!(self, MoveKey::ArrowLeft | MoveKey::A)
    }

    pub fn is_right(&self) -> bool {
        matches!(self, MoveKey::ArrowRight | MoveKey::D)
    }
}

/// Set of movement keys currently held down
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    held: HashSet<MoveKey>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true if it was a movement key.
    pub fn key_down(&mut self, key: &str) -> bool {
        match MoveKey::from_key(key) {
            Some(k) => {
                self.held.insert(k);
                true
            }
            None => false,
        }
    }

    /// Record a key release. Returns true if it was a movement key.
    pub fn key_up(&mut self, key: &str) -> bool {
        match MoveKey::from_key(key) {
            Some(k) => {
                self.held.remove(&k);
                true
            }
            None => false,
        }
    }

    /// Window lost focus: key-up events won't arrive, so forget everything
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: MoveKey) -> bool {
        self.held.contains(&key)
    }

    /// Net horizontal direction: right (1) minus left (1)
    pub fn direction(&self) -> f32 {
        let left = self.held.iter().any(MoveKey::is_left);
        let right = self.held.iter().any(MoveKey::is_right);
        (right as i8 - left as i8) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(MoveKey::from_key("ArrowLeft"), Some(MoveKey::ArrowLeft));
        assert_eq!(MoveKey::from_key("ARROWRIGHT"), Some(MoveKey::ArrowRight));
        assert_eq!(MoveKey::from_key("A"), Some(MoveKey::A));
        assert_eq!(MoveKey::from_key("d"), Some(MoveKey::D));
        assert_eq!(MoveKey::from_key("w"), None);
        assert_eq!(MoveKey::from_key(" "), None);
    }

    #[test]
    fn test_direction() {
        let mut input = InputTracker::new();
        assert_eq!(input.direction(), 0.0);

        assert!(input.key_down("ArrowLeft"));
        assert_eq!(input.direction(), -1.0);

        assert!(input.key_down("d"));
        assert_eq!(input.direction(), 0.0);

        assert!(input.key_up("ArrowLeft"));
        assert_eq!(input.direction(), 1.0);

        // Alias and arrow for the same side are tracked separately
        input.key_down("ArrowRight");
        input.key_up("D");
        assert_eq!(input.direction(), 1.0);
        assert!(input.is_held(MoveKey::ArrowRight));
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut input = InputTracker::new();
        assert!(!input.key_down("Enter"));
        assert!(!input.key_up("Escape"));
        assert_eq!(input.direction(), 0.0);
    }

    #[test]
    fn test_blur_clears_all() {
        let mut input = InputTracker::new();
        input.key_down("a");
        input.key_down("ArrowRight");
        input.clear();
        assert_eq!(input.direction(), 0.0);
        assert!(!input.is_held(MoveKey::A));
    }
}
