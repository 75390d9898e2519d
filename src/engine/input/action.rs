// Game action definitions and key bindings

use super::state::{normalize_key, InputState};
use std::collections::HashMap;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    Jump,
    Dash,

    // Meta actions
    Pause,
    Quit,
}

/// Default keyboard bindings for the player
pub fn default_player_bindings() -> Vec<(&'static str, Action)> {
    vec![
        ("a", Action::MoveLeft),
        ("d", Action::MoveRight),
        ("space", Action::Jump),
        ("l", Action::Dash),
    ]
}

/// Global bindings (not tied to the player character)
pub fn global_bindings() -> Vec<(&'static str, Action)> {
    vec![("p", Action::Pause), ("escape", Action::Quit)]
}

/// Maps each action to the logical key name that triggers it
#[derive(Debug, Clone)]
pub struct KeyBindings {
    keys: HashMap<Action, String>,
}

impl KeyBindings {
    /// Build bindings from (key, action) pairs; later pairs win
    pub fn from_bindings<'a>(bindings: impl IntoIterator<Item = (&'a str, Action)>) -> Self {
        let mut keys = HashMap::new();
        for (key, action) in bindings {
            keys.insert(action, normalize_key(key));
        }
        Self { keys }
    }

    /// Get the key bound to an action
    pub fn key_for(&self, action: Action) -> Option<&str> {
        self.keys.get(&action).map(String::as_str)
    }

    /// Find which action a key triggers
    pub fn action_for(&self, key: &str) -> Option<Action> {
        let key = normalize_key(key);
        self.keys
            .iter()
            .find(|(_, bound)| **bound == key)
            .map(|(action, _)| *action)
    }

    /// Check if the key bound to `action` is currently held
    pub fn is_pressed(&self, input: &InputState, action: Action) -> bool {
        self.key_for(action)
            .is_some_and(|key| input.is_pressed(key))
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_bindings(
            default_player_bindings()
                .into_iter()
                .chain(global_bindings()),
        )
    }
}
