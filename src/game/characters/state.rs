// Player action state machine

use log::debug;

/// Horizontal direction of a dash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashDirection {
    Left,
    Right,
}

impl DashDirection {
    /// Direction matching the way the player faces
    pub fn facing(facing_forward: bool) -> Self {
        if facing_forward {
            Self::Right
        } else {
            Self::Left
        }
    }

    /// +1 for right, -1 for left
    pub fn sign(&self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// What the player is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PlayerAction {
    /// Input drives acceleration; drag and gravity apply
    #[default]
    Controlled,
    /// Fixed-speed horizontal burst; drag and gravity are suspended.
    /// `remaining_ms` keeps counting down below zero while the dash key is held.
    Dashing {
        direction: DashDirection,
        remaining_ms: f32,
    },
}

impl PlayerAction {
    pub fn is_dashing(&self) -> bool {
        matches!(self, Self::Dashing { .. })
    }

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Controlled => "controlled",
            Self::Dashing { .. } => "dashing",
        }
    }
}

/// The four animations the player switches between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Idle,
    Walk,
    Jump,
    Dash,
}

impl SpriteKind {
    pub const ALL: [SpriteKind; 4] = [Self::Idle, Self::Walk, Self::Jump, Self::Dash];

    /// Fixed-speed animations always play at real time; the others scale
    /// with horizontal speed
    pub fn is_fixed_speed(&self) -> bool {
        matches!(self, Self::Jump | Self::Dash)
    }

    /// Get the animation name for this sprite
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk => "walk",
            Self::Jump => "jump",
            Self::Dash => "dash",
        }
    }
}

/// Result of ticking an active dash
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashTick {
    /// Still dashing in this direction
    Active(DashDirection),
    /// The dash ended this tick
    Ended,
}

/// Holds the current action and enforces the legal transitions
#[derive(Debug, Default)]
pub struct ActionStateMachine {
    current: PlayerAction,
}

impl ActionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current action
    pub fn action(&self) -> PlayerAction {
        self.current
    }

    /// Begin a dash. Ignored unless currently `Controlled`.
    pub fn start_dash(&mut self, direction: DashDirection, duration_ms: f32) -> bool {
        if self.current.is_dashing() {
            return false;
        }
        self.transition(PlayerAction::Dashing {
            direction,
            remaining_ms: duration_ms,
        });
        true
    }

    /// Count an active dash down by `dt`. The dash ends once its time has
    /// run out and the dash key is no longer held.
    ///
    /// Returns `None` when not dashing.
    pub fn tick_dash(&mut self, dt: f32, dash_held: bool) -> Option<DashTick> {
        let PlayerAction::Dashing {
            direction,
            remaining_ms,
        } = &mut self.current
        else {
            return None;
        };

        *remaining_ms -= dt;
        let (direction, expired) = (*direction, *remaining_ms <= 0.0);

        if expired && !dash_held {
            self.transition(PlayerAction::Controlled);
            Some(DashTick::Ended)
        } else {
            Some(DashTick::Active(direction))
        }
    }

    fn transition(&mut self, next: PlayerAction) {
        debug!("Player action {} -> {}", self.current.name(), next.name());
        self.current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let sm = ActionStateMachine::new();
        assert_eq!(sm.action(), PlayerAction::Controlled);
    }

    #[test]
    fn test_dash_direction_from_facing() {
        assert_eq!(DashDirection::facing(true), DashDirection::Right);
        assert_eq!(DashDirection::facing(false), DashDirection::Left);
        assert_eq!(DashDirection::Left.sign(), -1.0);
    }

    #[test]
    fn test_start_dash() {
        let mut sm = ActionStateMachine::new();
        assert!(sm.start_dash(DashDirection::Left, 100.0));
        assert_eq!(
            sm.action(),
            PlayerAction::Dashing {
                direction: DashDirection::Left,
                remaining_ms: 100.0
            }
        );
    }

    #[test]
    fn test_no_dash_while_dashing() {
        let mut sm = ActionStateMachine::new();
        sm.start_dash(DashDirection::Right, 100.0);
        sm.tick_dash(40.0, true);

        assert!(!sm.start_dash(DashDirection::Left, 100.0));
        assert_eq!(
            sm.action(),
            PlayerAction::Dashing {
                direction: DashDirection::Right,
                remaining_ms: 60.0
            }
        );
    }

    #[test]
    fn test_dash_ends_when_expired_and_released() {
        let mut sm = ActionStateMachine::new();
        sm.start_dash(DashDirection::Right, 100.0);

        assert_eq!(sm.tick_dash(60.0, false), Some(DashTick::Active(DashDirection::Right)));
        assert_eq!(sm.tick_dash(60.0, false), Some(DashTick::Ended));
        assert_eq!(sm.action(), PlayerAction::Controlled);
        assert_eq!(sm.tick_dash(16.0, false), None);
    }

    #[test]
    fn test_holding_key_sustains_dash() {
        let mut sm = ActionStateMachine::new();
        sm.start_dash(DashDirection::Left, 100.0);

        for _ in 0..20 {
            assert_eq!(sm.tick_dash(16.0, true), Some(DashTick::Active(DashDirection::Left)));
        }
        // Remaining time is well below zero but the dash is still live
        match sm.action() {
            PlayerAction::Dashing { remaining_ms, .. } => assert!(remaining_ms < -200.0),
            other => panic!("expected dash, got {other:?}"),
        }

        assert_eq!(sm.tick_dash(16.0, false), Some(DashTick::Ended));
    }

    #[test]
    fn test_sprite_kinds() {
        assert!(SpriteKind::Jump.is_fixed_speed());
        assert!(SpriteKind::Dash.is_fixed_speed());
        assert!(!SpriteKind::Walk.is_fixed_speed());
        assert!(!SpriteKind::Idle.is_fixed_speed());
        assert_eq!(SpriteKind::Walk.animation_name(), "walk");
        assert_eq!(PlayerAction::Controlled.name(), "controlled");
    }
}
