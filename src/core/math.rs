// Math utilities and helper functions

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Clamp a value into the symmetric range `[-limit, limit]`
pub fn clamp_symmetric(value: f32, limit: f32) -> f32 {
    // Same ordering as max(min(limit, v), -limit), so a negative limit yields -limit
    value.min(limit).max(-limit)
}
