// Paint the game state onto the display canvas
//
// Layer order: background, level (off-grid decor then tiles), enemies,
// player and its swing trail, projectiles, sparks, HUD, transition iris.

use super::characters::health::Health;
use super::characters::Entity;
use super::effects::Spark;
use super::state::GameState;
use crate::engine::assets::AssetManager;
use crate::engine::renderer::Canvas;
use crate::engine::tilemap::SparseTileGrid;
use glam::{IVec2, UVec2, Vec2};
use image::Rgba;

/// Sprites are drawn up and left of the physics box so the art overhangs it
const SPRITE_OFFSET: IVec2 = IVec2::new(-3, -3);

const SKY: Rgba<u8> = Rgba([14, 219, 248, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const FALLBACK: Rgba<u8> = Rgba([255, 0, 255, 255]);
const HEALTH_BACK: Rgba<u8> = Rgba([40, 20, 20, 255]);
const HEALTH_FILL: Rgba<u8> = Rgba([200, 40, 40, 255]);

const HEALTH_BAR_POS: IVec2 = IVec2::new(4, 4);
const HEALTH_BAR_SIZE: UVec2 = UVec2::new(52, 6);

/// World position to canvas position, truncating like the camera offset
fn to_canvas(world: Vec2, offset: IVec2) -> IVec2 {
    (world - offset.as_vec2()).as_ivec2()
}

/// Draw one complete frame
pub fn render(state: &GameState, assets: &AssetManager, canvas: &mut Canvas) {
    let offset = state.camera.render_offset();
    let view = state.camera.viewport_bounds();

    match assets.image("background") {
        Some(background) => canvas.blit(background, IVec2::ZERO, false),
        None => canvas.clear(SKY),
    }

    draw_level(&state.grid, assets, canvas, offset);

    for enemy in &state.enemies {
        if view.intersects_rect(enemy.body.position, enemy.body.size) {
            draw_entity(enemy, assets, canvas, offset);
        }
    }

    if !state.is_player_dead() {
        draw_entity(&state.player, assets, canvas, offset);
        draw_trail(&state.player, canvas, offset);
    }

    if let Some((sprite, half)) = assets
        .get("projectile")
        .and_then(|seq| Some((seq.frame(0)?, (seq.frame_size() / 2).as_ivec2())))
    {
        for shot in state.projectiles.iter().filter(|shot| view.contains(shot.pos)) {
            canvas.blit(sprite, to_canvas(shot.pos, offset) - half, shot.velocity < 0.0);
        }
    }

    for spark in &state.sparks {
        draw_spark(spark, canvas, offset);
    }

    draw_health_bar(&state.player.health, canvas);

    if state.transition.is_active() {
        let center = canvas.size().as_vec2() / 2.0;
        canvas.mask_outside_circle(center, state.transition.radius(), BLACK);
    }
}

/// Off-grid decorations first, then the grid tiles inside the view
fn draw_level(grid: &SparseTileGrid, assets: &AssetManager, canvas: &mut Canvas, offset: IVec2) {
    for decor in grid.decorations() {
        if let Some(sprite) = assets.get(&decor.kind).and_then(|seq| seq.frame(decor.variant as usize)) {
            canvas.blit(sprite, to_canvas(decor.pos, offset), false);
        }
    }

    let tile_size = grid.tile_size() as i32;
    for tile in grid.visible_tiles(offset, canvas.size()) {
        if let Some(sprite) = assets.get(&tile.kind).and_then(|seq| seq.frame(tile.variant as usize)) {
            canvas.blit(sprite, tile.pos * tile_size - offset, false);
        }
    }
}

fn draw_entity(entity: &Entity, assets: &AssetManager, canvas: &mut Canvas, offset: IVec2) {
    let pos = to_canvas(entity.body.position, offset);
    let animation = &entity.animation;

    let frame = assets.get(&animation.sprite_name()).and_then(|seq| {
        let index = animation.frame_index(seq.len());
        seq.frame(index)
    });

    match frame {
        Some(sprite) => canvas.blit(sprite, pos + SPRITE_OFFSET, animation.is_flipped_horizontal()),
        None => canvas.fill_rect(pos, entity.body.size.as_uvec2(), FALLBACK),
    }
}

/// Recent swing hitboxes, older ones fainter
fn draw_trail(player: &Entity, canvas: &mut Canvas, offset: IVec2) {
    let Some(controller) = player.as_player() else {
        return;
    };
    if !controller.attack.is_attacking() {
        return;
    }

    let len = controller.attack.trail_len().max(1);
    for (i, snapshot) in controller.attack.trail().enumerate() {
        let alpha = (60 + 160 * (i + 1) / len) as u8;
        let hitbox = snapshot.hitbox;
        canvas.fill_rect(
            to_canvas(hitbox.position(), offset),
            hitbox.size().as_uvec2(),
            Rgba([255, 255, 255, alpha]),
        );
    }
}

fn draw_spark(spark: &Spark, canvas: &mut Canvas, offset: IVec2) {
    let shift = offset.as_vec2();
    let points = spark.outline().map(|p| p - shift);
    for i in 0..points.len() {
        canvas.draw_line(points[i], points[(i + 1) % points.len()], WHITE);
    }
    canvas.draw_line(points[0], points[2], WHITE);
}

fn draw_health_bar(health: &Health, canvas: &mut Canvas) {
    canvas.fill_rect(HEALTH_BAR_POS, HEALTH_BAR_SIZE, HEALTH_BACK);
    canvas.stroke_rect(HEALTH_BAR_POS, HEALTH_BAR_SIZE, BLACK);
    let inner = HEALTH_BAR_SIZE - UVec2::new(2, 2);
    let filled = (inner.x as f32 * health.fraction().clamp(0.0, 1.0)).round() as u32;
    if filled > 0 {
        canvas.fill_rect(HEALTH_BAR_POS + IVec2::ONE, UVec2::new(filled, inner.y), HEALTH_FILL);
    }
}
