//! Collision detection and response
//!
//! Axis-aligned geometry only: the ball is treated as a point against bricks
//! and the paddle, and as a circle against the canvas walls.

use glam::Vec2;

use super::grid::BrickGrid;
use super::level::Level;
use super::state::{Ball, Explosion, GameEvent, GameState};

/// Axis-aligned rectangle (top-left origin, canvas coordinates)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Strict containment: points on the border are outside
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.x && p.x < self.x + self.width && p.y > self.y && p.y < self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Which canvas edges the ball's next step would cross
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    /// Left or right wall
    pub side: bool,
    pub top: bool,
    /// Bottom edge, where the paddle lives
    pub bottom: bool,
}

/// Check the ball's next position against `[radius, size - radius]` on both axes.
/// Top and bottom are exclusive, top wins.
pub fn wall_contact(ball: &Ball, width: f32, height: f32) -> WallContact {
    let next = ball.next_pos();
    let r = ball.radius;
    let top = next.y < r;
    WallContact {
        side: next.x > width - r || next.x < r,
        top,
        bottom: !top && next.y > height - r,
    }
}

/// Resolve ball-vs-brick overlaps for one frame.
///
/// Every live brick whose rectangle contains the ball centre takes one hit,
/// flips the vertical velocity, spawns an explosion and scores a point.
/// There is no early exit: if the centre sits inside two bricks at once both
/// are hit and the velocity flips twice. Returns the number of hits.
pub fn resolve_brick_collisions(state: &mut GameState) -> u32 {
    let level = state.level();
    resolve_against(state, level)
}

fn resolve_against(state: &mut GameState, level: &Level) -> u32 {
    let center = state.ball.pos;

    let hits: Vec<(usize, usize)> = state
        .bricks
        .iter()
        .filter(|(c, r, brick)| {
            brick.is_alive() && BrickGrid::brick_rect(level, *c, *r).contains(center)
        })
        .map(|(c, r, _)| (c, r))
        .collect();

    for &(column, row) in &hits {
        state.ball.vel.y = -state.ball.vel.y;
        let destroyed = state.bricks.hit(column, row);
        let rect = BrickGrid::brick_rect(level, column, row);
        state.explosions.push(Explosion::new(rect.center()));
        state.score += 1;
        state.events.push(GameEvent::BrickHit {
            column,
            row,
            destroyed,
        });
    }

    hits.len() as u32
}
