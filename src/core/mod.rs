// Core value types and math helpers

pub mod math;
pub mod vector;

pub use vector::Vector2;
