//! Canvas Breakout - a single-screen brick breaker for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (levels, bricks, physics, collisions, phases)
//! - `game`: Input routing and frame/timer driving on top of `sim`
//! - `scheduler`: Frame and one-shot timer abstraction (browser or manual)
//! - `renderer`: Draw list generation and Canvas 2D painting
//! - `hud`: Lives/score display projection
//! - `settings`: Cosmetic configuration

pub mod game;
pub mod hud;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use game::{Command, Game};
pub use hud::{HudView, LivesColor};
pub use scheduler::{FrameToken, ManualScheduler, Scheduler, TimerToken};
pub use settings::{Background, Settings};

/// Game configuration constants
pub mod consts {
    /// Ball radius (pixels)
    pub const BALL_RADIUS: f32 = 10.0;
    /// Initial velocity is `ball_speed * BALL_SPEED_SCALE` on each axis
    pub const BALL_SPEED_SCALE: f32 = 2.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 75.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// How far a jump lifts the paddle
    pub const PADDLE_JUMP_HEIGHT: f32 = 30.0;
    /// Jump cooldown, after which the paddle drops back
    pub const PADDLE_JUMP_COOLDOWN_MS: u32 = 1000;

    /// Lives at the start of every level
    pub const STARTING_LIVES: u8 = 3;

    /// Ball trail capacity
    pub const TRAIL_LENGTH: usize = 20;

    /// Explosion marker growth per frame and removal threshold
    pub const EXPLOSION_SPEED: f32 = 2.0;
    pub const EXPLOSION_MAX_RADIUS: f32 = 20.0;
    /// 0xRRGGBB
    pub const EXPLOSION_COLOR: u32 = 0xffcc00;
}
