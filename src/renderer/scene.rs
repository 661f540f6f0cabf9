//! Draw list generation
//!
//! Turns a `GameState` into a flat list of 2D primitives. Kept free of any
//! browser types so it can be tested natively; `canvas` replays the list.

use crate::settings::Settings;
use crate::sim::GameState;

/// Default fill for paddle, ball and single-hit bricks
pub const BASE_COLOR: u32 = 0x0095dd;
/// Bricks with two hits left
pub const TOUGH_BRICK_COLOR: u32 = 0xff9800;
/// Bricks with three hits left
pub const TOUGHEST_BRICK_COLOR: u32 = 0xf44336;

/// Oldest trail point alpha is `1.0 - TRAIL_FADE`
const TRAIL_FADE: f32 = 0.7;

/// A single 2D primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCmd {
    Clear {
        width: f32,
        height: f32,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: u32,
    },
    Circle {
        x: f32,
        y: f32,
        radius: f32,
        color: u32,
        alpha: f32,
    },
}

/// `0xRRGGBB` to a CSS hex string
pub fn css_color(color: u32) -> String {
    format!("#{:06x}", color & 0xff_ffff)
}

pub fn brick_color(status: u8) -> u32 {
    match status {
        3 => TOUGHEST_BRICK_COLOR,
        2 => TOUGH_BRICK_COLOR,
        _ => BASE_COLOR,
    }
}

/// Build the frame: bricks, trail + ball, paddle, explosions (back to front)
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<DrawCmd> {
    let level = state.level();
    let mut cmds = Vec::with_capacity(state.bricks.len() + state.trail.len() + 8);

    cmds.push(DrawCmd::Clear {
        width: level.canvas_width,
        height: level.canvas_height,
    });

    for (column, row, brick) in state.bricks.iter() {
        if !brick.is_alive() {
            continue;
        }
        let (x, y) = level.brick_origin(column, row);
        cmds.push(DrawCmd::Rect {
            x,
            y,
            width: level.brick_width,
            height: level.brick_height,
            color: brick_color(brick.status),
        });
    }

    let ball = &state.ball;
    if settings.trails {
        // Oldest first, fading out toward the tail
        let len = state.trail.len() as f32;
        for (i, point) in state.trail.iter().enumerate() {
            let age = (len - 1.0 - i as f32) / len;
            cmds.push(DrawCmd::Circle {
                x: point.x,
                y: point.y,
                radius: ball.radius,
                color: BASE_COLOR,
                alpha: 1.0 - age * TRAIL_FADE,
            });
        }
    }
    cmds.push(DrawCmd::Circle {
        x: ball.pos.x,
        y: ball.pos.y,
        radius: ball.radius,
        color: BASE_COLOR,
        alpha: 1.0,
    });

    let paddle = &state.paddle;
    cmds.push(DrawCmd::Rect {
        x: paddle.x,
        y: paddle.y,
        width: paddle.width,
        height: paddle.height,
        color: BASE_COLOR,
    });

    if settings.explosions {
        for explosion in &state.explosions {
            cmds.push(DrawCmd::Circle {
                x: explosion.pos.x,
                y: explosion.pos.y,
                radius: explosion.radius,
                color: explosion.color,
                alpha: 1.0,
            });
        }
    }

    cmds
}
