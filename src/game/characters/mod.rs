// Character system
//
// This module contains everything related to the playable character:
// - Frame-strip animations
// - Action state machine (controlled / dashing)
// - Movement tuning
// - The player controller tying input, physics and animation together

pub mod animation;
pub mod player;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::{AnimationOptions, SpriteAnimation, SpriteError};
pub use player::{PlayerController, PlayerSprites};
pub use state::{ActionStateMachine, DashDirection, PlayerAction, SpriteKind};
pub use stats::{PlayerTuning, BASE_TUNING};
