use anyhow::{bail, Context, Result};
use glam::Vec2;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod app;
mod core;
mod engine;
mod game;

use app::{App, Flow};
use engine::assets::{AssetLoader, AssetManager};
use engine::renderer::Renderer;
use engine::tilemap::{LoadOutcome, SparseTileGrid};
use game::{GameSettings, GameState};

const SETTINGS_FILE: &str = "settings.json";

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Tilebrawl...");

    let settings = GameSettings::load_or_default(SETTINGS_FILE)
        .with_context(|| format!("Failed to load {SETTINGS_FILE}"))?;

    let mut args = std::env::args().skip(1);
    if let Some(command) = args.next() {
        return match (command.as_str(), args.next()) {
            ("autotile", Some(level)) => autotile_level(&settings, parse_arg(&level)?),
            ("erase", Some(level)) => {
                let x: f32 = parse_arg(&args.next().unwrap_or_default())?;
                let y: f32 = parse_arg(&args.next().unwrap_or_default())?;
                erase_in_level(&settings, parse_arg(&level)?, Vec2::new(x, y))
            }
            _ => bail!("Usage: tilebrawl [autotile <level> | erase <level> <x> <y>]"),
        };
    }

    let window_size = settings.display.window_size();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(settings.display.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(window_size.x, window_size.y))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let renderer = pollster::block_on(Renderer::new(window.clone(), settings.display.size()))?;

    let loader = AssetLoader::new(&settings.paths.images);
    let assets = AssetManager::load_standard(&loader)
        .with_context(|| format!("Failed to load sprites from {}", settings.paths.images.display()))?;
    info!("Loaded {} sprite sets", assets.len());

    let first_level = settings.paths.first_level;
    let mut state = GameState::new(settings, StdRng::from_entropy());
    if state.load_level(first_level)? == LoadOutcome::Missing {
        info!("Starting on an empty level");
    }

    let mut app = App::new(window, renderer, state, assets);

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match app.handle_window_event(&event) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => elwt.exit(),
                Err(e) => {
                    error!("Fatal error: {e:#}");
                    elwt.exit();
                }
            },
            Event::AboutToWait => {
                // Request redraw on next frame
                app.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}

fn parse_arg<T: FromStr>(arg: &str) -> Result<T> {
    arg.parse()
        .map_err(|_| anyhow::anyhow!("Invalid argument {arg:?}"))
}

fn open_level(settings: &GameSettings, index: u32) -> Result<(PathBuf, SparseTileGrid)> {
    let path = settings.paths.level_file(index);
    let mut grid = SparseTileGrid::new(settings.physics.tile_size);
    if grid.load(&path)? == LoadOutcome::Missing {
        bail!("No level file at {}", path.display());
    }
    Ok((path, grid))
}

/// Re-tag the auto-tiled kinds of one level file in place
fn autotile_level(settings: &GameSettings, index: u32) -> Result<()> {
    let (path, mut grid) = open_level(settings, index)?;
    let changed = grid.autotile();
    grid.save(&path)?;
    info!("Auto-tiled {}: {} tiles changed", path.display(), changed);
    Ok(())
}

/// Delete whatever covers one world pixel of a level file
fn erase_in_level(settings: &GameSettings, index: u32, point: Vec2) -> Result<()> {
    let (path, mut grid) = open_level(settings, index)?;
    let assets = AssetManager::load_standard(&AssetLoader::new(&settings.paths.images))?;
    let fallback = Vec2::splat(grid.tile_size() as f32);

    let removed = grid.erase_at(point, |decor| {
        assets
            .get(&decor.kind)
            .map_or(fallback, |seq| seq.frame_size().as_vec2())
    });
    grid.save(&path)?;
    info!("Erased {} items at {:?} in {}", removed, point, path.display());
    Ok(())
}
