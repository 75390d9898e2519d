// Player character - input-driven locomotion, dash and animation selection

use super::animation::{AnimationOptions, SpriteAnimation, SpriteError};
use super::state::{ActionStateMachine, DashDirection, DashTick, PlayerAction, SpriteKind};
use super::stats::{PlayerTuning, BASE_TUNING};
use crate::core::Vector2;
use crate::engine::assets::AssetLoader;
use crate::engine::input::{Action, InputState, KeyBindings};
use crate::engine::renderer::Surface;
use crate::game::config::{Arena, GameConfig, PlayerSpriteFiles};
use crate::game::entity::{Anchor, Behavior, Body, Entity};
use log::{debug, info, trace};

/// Playback rate shared by every player strip
const SPRITE_FPS: f32 = 24.0;

/// Strip layout and playback for each player animation
pub fn sprite_options(kind: SpriteKind) -> AnimationOptions {
    match kind {
        SpriteKind::Idle => AnimationOptions::looping(1, SPRITE_FPS).with_offset(3.0, 1.0),
        SpriteKind::Walk => AnimationOptions::looping(8, SPRITE_FPS),
        SpriteKind::Jump => AnimationOptions::one_shot(4, SPRITE_FPS).with_offset(1.0, 1.0),
        SpriteKind::Dash => AnimationOptions::looping(3, SPRITE_FPS).with_offset(1.0, 1.0),
    }
}

/// The four animations the player owns
#[derive(Debug, Clone)]
pub struct PlayerSprites {
    pub idle: SpriteAnimation,
    pub walk: SpriteAnimation,
    pub jump: SpriteAnimation,
    pub dash: SpriteAnimation,
}

impl PlayerSprites {
    /// Load every strip through `loader`
    pub fn load(loader: &AssetLoader, files: &PlayerSpriteFiles) -> Result<Self, SpriteError> {
        let load = |name: &str, kind: SpriteKind| -> Result<SpriteAnimation, SpriteError> {
            let strip = loader.load_image(name)?;
            SpriteAnimation::new(strip, sprite_options(kind))
        };

        Ok(Self {
            idle: load(files.idle, SpriteKind::Idle)?,
            walk: load(files.walk, SpriteKind::Walk)?,
            jump: load(files.jump, SpriteKind::Jump)?,
            dash: load(files.dash, SpriteKind::Dash)?,
        })
    }

    pub fn get(&self, kind: SpriteKind) -> &SpriteAnimation {
        match kind {
            SpriteKind::Idle => &self.idle,
            SpriteKind::Walk => &self.walk,
            SpriteKind::Jump => &self.jump,
            SpriteKind::Dash => &self.dash,
        }
    }

    pub fn get_mut(&mut self, kind: SpriteKind) -> &mut SpriteAnimation {
        match kind {
            SpriteKind::Idle => &mut self.idle,
            SpriteKind::Walk => &mut self.walk,
            SpriteKind::Jump => &mut self.jump,
            SpriteKind::Dash => &mut self.dash,
        }
    }
}

/// Drives the player entity from held keys
#[derive(Debug)]
pub struct PlayerController {
    sprites: PlayerSprites,
    tuning: PlayerTuning,
    bindings: KeyBindings,
    arena: Arena,
    state: ActionStateMachine,
    active: SpriteKind,
    facing_forward: bool,
    airborne: bool,
}

impl PlayerController {
    /// Load the player's strips from the configured asset directory and
    /// place the player on the floor
    pub fn load(config: &GameConfig) -> Result<Entity<PlayerController>, SpriteError> {
        let loader = AssetLoader::new(&config.asset_dir);
        let sprites = PlayerSprites::load(&loader, &config.sprites)?;
        info!("Loaded player sprites from {}", loader.base_path().display());

        Ok(Self::spawn(
            sprites,
            BASE_TUNING,
            KeyBindings::default(),
            config.arena(),
            config.player_spawn_x(),
        ))
    }

    /// Build the player entity from already loaded sprites.
    ///
    /// The bounding box takes the walk cycle's frame size, anchored at its
    /// bottom center, standing on the floor at `initial_x`.
    pub fn spawn(
        sprites: PlayerSprites,
        tuning: PlayerTuning,
        bindings: KeyBindings,
        arena: Arena,
        initial_x: f32,
    ) -> Entity<PlayerController> {
        let width = sprites.walk.frame_width();
        let height = sprites.walk.frame_height();

        let controller = Self {
            sprites,
            tuning,
            bindings,
            arena,
            state: ActionStateMachine::new(),
            active: SpriteKind::Idle,
            facing_forward: true,
            airborne: false,
        };

        Entity::at(width, height, initial_x, arena.floor_y, controller)
            .with_anchor(Anchor::BOTTOM_CENTER)
    }

    pub fn action(&self) -> PlayerAction {
        self.state.action()
    }

    pub fn facing_forward(&self) -> bool {
        self.facing_forward
    }

    /// Animation selected on the last update
    pub fn active_sprite(&self) -> SpriteKind {
        self.active
    }

    pub fn sprite(&self, kind: SpriteKind) -> &SpriteAnimation {
        self.sprites.get(kind)
    }

    /// Read movement keys, returning the acceleration they request
    fn control(&mut self, on_floor: bool, input: &InputState) -> Vector2 {
        let speed = if on_floor {
            self.tuning.floor_speed
        } else {
            self.tuning.air_speed
        };

        let mut acceleration = Vector2::ZERO;
        if self.bindings.is_pressed(input, Action::MoveLeft) {
            acceleration.x = -speed;
        }
        // Checked after left so right wins when both are held
        if self.bindings.is_pressed(input, Action::MoveRight) {
            acceleration.x = speed;
        }
        if on_floor && self.bindings.is_pressed(input, Action::Jump) {
            acceleration.y = -self.tuning.jump_speed;
        }

        if acceleration.x > 0.0 {
            self.facing_forward = true;
        } else if acceleration.x < 0.0 {
            self.facing_forward = false;
        }

        acceleration
    }

    /// Toroidal wrap: a box fully past one edge reappears just past the other
    fn wrap_horizontally(&self, body: &mut Body) {
        let width = self.arena.width;
        if body.right() < 0.0 {
            body.set_x(width + body.anchor.x * body.width);
        } else if body.left() > width {
            body.set_x(-(1.0 - body.anchor.x) * body.width);
        }
    }

    fn clamp_vertically(&mut self, body: &mut Body) {
        let floor_y = self.arena.floor_y;
        if body.y() >= floor_y {
            body.set_y(floor_y);
            body.set_vy(0.0);
            if self.airborne {
                debug!("Player landed at x={:.1}", body.x());
            }
        } else if body.y() < 0.0 {
            body.set_y(0.0);
        }
        self.airborne = body.y() < floor_y;
    }

    fn select_sprite(&self, body: &Body) -> SpriteKind {
        if self.state.action().is_dashing() {
            SpriteKind::Dash
        } else if body.y() < self.arena.floor_y {
            SpriteKind::Jump
        } else if body.vx().abs() > self.tuning.walk_threshold {
            SpriteKind::Walk
        } else {
            SpriteKind::Idle
        }
    }

    /// Advance the active animation and rewind the rest
    fn animate(&mut self, dt: f32, vx: f32) {
        let scaled = dt * self.tuning.animation_speed(vx);
        for kind in SpriteKind::ALL {
            let sprite = self.sprites.get_mut(kind);
            if kind != self.active {
                sprite.reset_time();
            } else if kind.is_fixed_speed() {
                sprite.advance(dt);
            } else {
                sprite.advance(scaled);
            }
        }
    }
}

impl Behavior for PlayerController {
    fn update(&mut self, body: &mut Body, dt: f32, input: &InputState) {
        let on_floor = body.y() + body.height * 0.5 >= self.arena.floor_y;
        let dash_held = self.bindings.is_pressed(input, Action::Dash);

        let mut acceleration = Vector2::ZERO;
        if !self.state.action().is_dashing() {
            acceleration = self.control(on_floor, input);

            if dash_held {
                let direction = DashDirection::facing(self.facing_forward);
                self.state.start_dash(direction, self.tuning.dash_duration_ms);
            }
        }

        match self.state.tick_dash(dt, dash_held) {
            Some(DashTick::Active(direction)) => {
                body.velocity = Vector2::ZERO;
                acceleration.x = direction.sign() * self.tuning.dash_speed;
            }
            // Dash velocity carries over for this tick
            Some(DashTick::Ended) => {}
            None => {
                acceleration.x += body.vx() * -self.tuning.drag;
                acceleration.y += self.tuning.gravity();
            }
        }

        body.velocity.add(acceleration);
        if body.vx().abs() < self.tuning.velocity_dead_zone {
            body.set_vx(0.0);
        }
        let velocity = body.velocity;
        body.position.add(velocity);

        self.wrap_horizontally(body);
        self.clamp_vertically(body);

        let active = self.select_sprite(body);
        if active != self.active {
            trace!(
                "Player sprite {} -> {}",
                self.active.animation_name(),
                active.animation_name()
            );
            self.active = active;
        }
        self.animate(dt, body.vx());
    }

    fn render(&self, _body: &Body, surface: &mut dyn Surface) {
        self.sprites
            .get(self.active)
            .draw(surface, !self.facing_forward);
    }
}
