// Engine modules: frame clock, input, assets, physics, tilemap, renderer

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
pub mod tilemap;
