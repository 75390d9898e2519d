// Player tuning - the hand-tuned movement constants
//
// Speeds and accelerations are in pixels per tick; durations in milliseconds.

/// Movement and animation tuning for the player character
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerTuning {
    // Locomotion
    /// Horizontal acceleration while standing on the floor
    pub floor_speed: f32,
    /// Horizontal acceleration while airborne
    pub air_speed: f32,
    /// Upward impulse applied when jumping from the floor
    pub jump_speed: f32,
    /// Gravity as a fraction of the jump impulse
    pub gravity_factor: f32,
    /// Fraction of horizontal velocity removed each tick
    pub drag: f32,
    /// Horizontal speeds below this snap to zero
    pub velocity_dead_zone: f32,

    // Dash
    /// Nominal dash length
    pub dash_duration_ms: f32,
    /// Horizontal speed forced while dashing
    pub dash_speed: f32,

    // Animation
    /// Horizontal speed above which the walk cycle plays
    pub walk_threshold: f32,
    /// Walk/idle playback rate per unit of horizontal speed
    pub animation_speed_factor: f32,
    /// Cap on the walk/idle playback rate
    pub max_animation_speed: f32,
}

/// The tuning the character was designed around
pub const BASE_TUNING: PlayerTuning = PlayerTuning {
    floor_speed: 0.8,
    air_speed: 1.0,
    jump_speed: 5.0,
    gravity_factor: 0.15,
    drag: 0.15,
    velocity_dead_zone: 0.05,

    dash_duration_ms: 100.0,
    dash_speed: 14.0,

    walk_threshold: 0.5,
    animation_speed_factor: 0.3,
    max_animation_speed: 2.0,
};

impl Default for PlayerTuning {
    fn default() -> Self {
        BASE_TUNING
    }
}

impl PlayerTuning {
    /// Downward acceleration applied every non-dashing tick
    pub fn gravity(&self) -> f32 {
        self.jump_speed * self.gravity_factor
    }

    /// Playback rate for speed-scaled animations at horizontal speed `vx`
    pub fn animation_speed(&self, vx: f32) -> f32 {
        (vx.abs() * self.animation_speed_factor).min(self.max_animation_speed)
    }
}
