// Game layer: entities, the player character and the playable scene

pub mod characters;
pub mod config;
pub mod entity;
pub mod scene;

pub use config::{Arena, GameConfig};
pub use entity::{Anchor, Behavior, Body, Entity};
pub use scene::Scene;
