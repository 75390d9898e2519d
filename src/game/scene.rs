// The playable scene: floor band and player, stepped by the scheduler

use crate::engine::game_loop::FixedStep;
use crate::engine::input::InputState;
use crate::engine::renderer::{Canvas, Rect, Surface};
use crate::game::characters::{PlayerController, SpriteError};
use crate::game::config::GameConfig;
use crate::game::entity::Entity;

pub struct Scene {
    config: GameConfig,
    canvas: Canvas,
    player: Entity<PlayerController>,
    input: InputState,
}

impl Scene {
    pub fn new(config: GameConfig, player: Entity<PlayerController>) -> Self {
        let canvas = Canvas::new(config.width, config.height);
        Self {
            config,
            canvas,
            player,
            input: InputState::new(),
        }
    }

    /// Load the player's assets and build the scene
    pub fn load(config: GameConfig) -> Result<Self, SpriteError> {
        let player = PlayerController::load(&config)?;
        Ok(Self::new(config, player))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The last rendered frame
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn player(&self) -> &Entity<PlayerController> {
        &self.player
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    fn draw_floor(&mut self) {
        let top = self.config.floor_band_top();
        let width = self.config.width as f32;
        let height = self.config.height as f32;

        self.canvas
            .fill_rect(Rect::new(0.0, top, width, height - top), self.config.floor_color);
        self.canvas
            .fill_rect(Rect::new(0.0, top, width, 1.0), self.config.floor_line_color);
    }
}

impl FixedStep for Scene {
    fn update(&mut self, step_ms: f32) {
        self.player.update(step_ms, &self.input);
    }

    fn render(&mut self) {
        self.canvas.clear(self.config.background_color);
        self.draw_floor();
        self.player.render(&mut self.canvas);
    }
}
