//! Platform abstraction layer
//!
//! Turns host key events into simulation intents: a live set of held
//! directions plus one-shot pause/restart requests consumed once per frame.

use crate::sim::TickInput;

/// What a key means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Left,
    Right,
    PauseToggle,
    Restart,
}

impl KeyAction {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(KeyAction::Left),
            "ArrowRight" | "d" | "D" => Some(KeyAction::Right),
            "p" | "P" | "Escape" => Some(KeyAction::PauseToggle),
            "r" | "R" => Some(KeyAction::Restart),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    pause_toggle: bool,
    restart: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key is bound (the host should swallow it)
    pub fn key_down(&mut self, key: &str, repeat: bool) -> bool {
        let Some(action) = KeyAction::from_key(key) else {
            return false;
        };
        match action {
            KeyAction::Left => self.left = true,
            KeyAction::Right => self.right = true,
            // Auto-repeat must not toggle pause on and off
            KeyAction::PauseToggle if !repeat => self.pause_toggle = true,
            KeyAction::Restart if !repeat => self.restart = true,
            _ => {}
        }
        true
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        match KeyAction::from_key(key) {
            Some(KeyAction::Left) => self.left = false,
            Some(KeyAction::Right) => self.right = false,
            Some(_) => {}
            None => return false,
        }
        true
    }

    /// Drop held keys (window blur, teardown)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Input for the next step; one-shots are consumed
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            left: self.left,
            right: self.right,
            pause_toggle: self.pause_toggle,
            restart: self.restart,
        };
        self.pause_toggle = false;
        self.restart = false;
        input
    }
}
