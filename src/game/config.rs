// Game configuration - arena layout, asset locations and window settings

use crate::engine::renderer::Color;
use std::path::PathBuf;

/// World extents the player moves in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    /// Horizontal size; positions wrap around at the edges
    pub width: f32,
    /// Lowest reachable y
    pub floor_y: f32,
}

/// File names of the player's frame strips, relative to the sprite directory
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSpriteFiles {
    pub idle: &'static str,
    pub walk: &'static str,
    pub jump: &'static str,
    pub dash: &'static str,
}

/// Top-level game settings
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub title: &'static str,
    /// Canvas width in logical pixels
    pub width: u32,
    /// Canvas height in logical pixels
    pub height: u32,
    /// Floor height as a fraction of the canvas height
    pub floor_ratio: f32,
    /// How far above the floor the floor band starts
    pub floor_band_offset: f32,
    pub floor_color: Color,
    pub floor_line_color: Color,
    /// Player start position as a fraction of the canvas width
    pub spawn_ratio: f32,
    pub background_color: Color,
    /// Integer upscale applied to the initial window size
    pub window_scale: u32,
    /// Root directory holding `sprites/`
    pub asset_dir: PathBuf,
    pub sprites: PlayerSpriteFiles,
}

pub const PLAYER_SPRITES: PlayerSpriteFiles = PlayerSpriteFiles {
    idle: "player_idle.png",
    walk: "player_walk.png",
    jump: "player_jump.png",
    dash: "player_dash.png",
};

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Starwalk",
            width: 400,
            height: 200,
            floor_ratio: 0.9,
            floor_band_offset: 8.0,
            floor_color: [0xe7, 0xdc, 0xc7, 0xff],
            floor_line_color: [0xae, 0x98, 0x6e, 0xff],
            spawn_ratio: 0.2,
            background_color: [0xff, 0xff, 0xff, 0xff],
            window_scale: 3,
            asset_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets")),
            sprites: PLAYER_SPRITES,
        }
    }
}

impl GameConfig {
    /// y coordinate of the floor
    pub fn floor_y(&self) -> f32 {
        self.height as f32 * self.floor_ratio
    }

    /// y coordinate where the drawn floor band begins
    pub fn floor_band_top(&self) -> f32 {
        self.floor_y() - self.floor_band_offset
    }

    pub fn player_spawn_x(&self) -> f32 {
        self.width as f32 * self.spawn_ratio
    }

    pub fn arena(&self) -> Arena {
        Arena {
            width: self.width as f32,
            floor_y: self.floor_y(),
        }
    }

    /// Initial window size in physical pixels
    pub fn window_size(&self) -> (u32, u32) {
        let scale = self.window_scale.max(1);
        (self.width * scale, self.height * scale)
    }
}
