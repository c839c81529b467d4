//! Slide navigation: a clamped index over the deck plus the entry/present mode.

use std::fmt;
use std::str::FromStr;

use crate::error::CommandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Entry,
    Present,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Entry => "entry",
            Mode::Present => "present",
        }
    }
}

/// Directional keys. Only honoured in presentation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    pub fn delta(self) -> isize {
        match self {
            Key::Right | Key::Down => 1,
            Key::Left | Key::Up => -1,
        }
    }
}

impl FromStr for Key {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "arrowleft" => Ok(Key::Left),
            "right" | "arrowright" => Ok(Key::Right),
            "up" | "arrowup" => Ok(Key::Up),
            "down" | "arrowdown" => Ok(Key::Down),
            _ => Err(CommandError::Invalid {
                what: "key",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current: usize,
    total: usize,
    mode: Mode,
}

impl Navigator {
    /// A deck always has at least one slide; `total` is raised to 1.
    pub fn new(total: usize) -> Self {
        Self {
            current: 0,
            total: total.max(1),
            mode: Mode::Entry,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn last(&self) -> usize {
        self.total - 1
    }

    pub fn move_by(&mut self, delta: isize) -> usize {
        let target = if delta < 0 {
            self.current.saturating_sub(delta.unsigned_abs())
        } else {
            self.current.saturating_add(delta as usize)
        };
        self.current = target.min(self.last());
        self.current
    }

    /// Jump straight to a slide (thumbnail strip); out-of-range indexes clamp.
    pub fn go_to(&mut self, index: usize) -> usize {
        self.current = index.min(self.last());
        self.current
    }

    /// Returns `true` when the key moved (or could have moved) the deck.
    pub fn on_key(&mut self, key: Key) -> bool {
        if self.mode != Mode::Present {
            return false;
        }
        self.move_by(key.delta());
        true
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if mode == Mode::Entry {
            self.current = 0;
        }
        self.mode = mode;
    }

    pub fn can_prev(&self) -> bool {
        self.current > 0
    }

    pub fn can_next(&self) -> bool {
        self.current < self.last()
    }

    pub fn position_label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.current + 1, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_is_clamped_at_both_ends() {
        let mut nav = Navigator::new(17);
        assert_eq!(nav.move_by(-1), 0);
        assert_eq!(nav.move_by(5), 5);
        assert_eq!(nav.move_by(100), 16);
        assert_eq!(nav.move_by(1), 16);
        assert_eq!(nav.move_by(-3), 13);
        assert_eq!(nav.move_by(isize::MIN), 0);
    }

    #[test]
    fn random_walk_stays_in_range() {
        // Deterministic LCG so the walk is reproducible.
        let mut seed: u64 = 0x5eed_cafe;
        let mut nav = Navigator::new(17);
        for _ in 0..5_000 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let delta = ((seed >> 33) % 41) as isize - 20;
            let before = nav.current();
            let after = nav.move_by(delta);
            assert!(after < 17);
            let expected = (before as isize + delta).clamp(0, 16) as usize;
            assert_eq!(after, expected);
        }
    }

    #[test]
    fn keys_only_work_when_presenting() {
        let mut nav = Navigator::new(5);
        assert!(!nav.on_key(Key::Right));
        assert_eq!(nav.current(), 0);

        nav.set_mode(Mode::Present);
        assert!(nav.on_key(Key::Right));
        assert!(nav.on_key(Key::Down));
        assert_eq!(nav.current(), 2);
        nav.on_key(Key::Up);
        nav.on_key(Key::Left);
        nav.on_key(Key::Left);
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn entering_entry_mode_resets_index() {
        let mut nav = Navigator::new(5);
        nav.set_mode(Mode::Present);
        nav.go_to(3);
        nav.set_mode(Mode::Present);
        assert_eq!(nav.current(), 3);
        nav.set_mode(Mode::Entry);
        assert_eq!(nav.current(), 0);
        assert_eq!(nav.mode(), Mode::Entry);
    }

    #[test]
    fn button_state_and_label() {
        let mut nav = Navigator::new(3);
        assert!(!nav.can_prev());
        assert!(nav.can_next());
        assert_eq!(nav.position_label(), "1 / 3");
        nav.go_to(99);
        assert!(nav.can_prev());
        assert!(!nav.can_next());
        assert_eq!(nav.position_label(), "3 / 3");
    }

    #[test]
    fn key_names_parse() {
        assert_eq!("ArrowRight".parse::<Key>(), Ok(Key::Right));
        assert_eq!("up".parse::<Key>(), Ok(Key::Up));
        assert!("space".parse::<Key>().is_err());
    }
}
