// Input handling system
//
// Keyboard input is tracked as a set of held logical key names. The set is
// owned by the host, written by window events, and handed read-only to the
// simulation every tick.
//
// ## Architecture
//
// - `action`: Game actions and their default key bindings
// - `state`: Held-key state, key-name normalization, winit event adapter
//
// ## Usage Example
//
// ```rust
// use engine::input::{Action, InputState, KeyBindings};
//
// let mut input = InputState::new();
// let bindings = KeyBindings::default();
//
// // In your event loop, feed keyboard events
// input.process_keyboard_event(&key_event);
//
// // Poll during an update
// if bindings.is_pressed(&input, Action::Jump) {
//     // Jump is held
// }
// ```

pub mod action;
pub mod state;

// Re-export commonly used types
pub use action::{Action, KeyBindings};
pub use state::{normalize_key, InputState};
