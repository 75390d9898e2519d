// Engine modules: scheduling, input, assets, rendering

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod renderer;
