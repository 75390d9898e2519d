//! Starwalk: a side-view platformer character driven by a fixed-timestep loop.

pub mod core;
pub mod engine;
pub mod game;
