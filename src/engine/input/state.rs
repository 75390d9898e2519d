// Held-key input state

use log::trace;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{Key, NamedKey};

/// Normalize a raw key name into its logical form.
///
/// A literal space becomes `"space"`; every other name is lowercased.
pub fn normalize_key(key: &str) -> String {
    match key {
        " " => "space".to_string(),
        other => other.to_lowercase(),
    }
}

/// Logical name for a winit key, if it has one
fn logical_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(text) => Some(normalize_key(text)),
        Key::Named(NamedKey::Space) => Some("space".to_string()),
        Key::Named(named) => Some(normalize_key(&format!("{named:?}"))),
        _ => None,
    }
}

/// Set of currently held logical keys
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed: HashSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a key as held
    pub fn press(&mut self, key: &str) {
        self.pressed.insert(normalize_key(key));
    }

    /// Mark a key as released
    pub fn release(&mut self, key: &str) {
        self.pressed.remove(&normalize_key(key));
    }

    /// Check if a logical key is held
    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.contains(key)
    }

    /// Release every key, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.pressed.clear();
    }

    /// Apply a winit keyboard event.
    ///
    /// Returns the logical key name on a fresh (non-repeat) press so the host
    /// can react to one-off keys such as pause.
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) -> Option<String> {
        let name = logical_name(&event.logical_key)?;
        match event.state {
            ElementState::Pressed => {
                let fresh = self.pressed.insert(name.clone());
                if fresh && !event.repeat {
                    trace!("Key down: {}", name);
                    return Some(name);
                }
            }
            ElementState::Released => {
                trace!("Key up: {}", name);
                self.pressed.remove(&name);
            }
        }
        None
    }
}
