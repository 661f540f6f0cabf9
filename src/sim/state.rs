//! Game state and core simulation types
//!
//! Everything a session needs lives in `GameState`; the controller owns it and
//! nothing here touches the platform.

use std::collections::VecDeque;

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::BrickGrid;
use super::level::{Difficulty, Level};
use crate::consts::*;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    /// Last life lost
    LivesExhausted,
    /// Every brick destroyed
    Cleared,
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// No level selected yet (or after a restart)
    #[default]
    Idle,
    /// Level laid out, waiting for the confirmation click
    Ready,
    /// Frame loop active
    Running,
    /// Life lost, waiting for the confirmation click
    Paused,
    /// Terminal until restart
    Ended(EndCause),
}

impl GamePhase {
    /// A level has been selected and not yet restarted
    pub fn is_started(&self) -> bool {
        !matches!(self, GamePhase::Idle)
    }

    /// Paddle follows the pointer only while the ball is in play or about to be
    pub fn accepts_pointer(&self) -> bool {
        matches!(self, GamePhase::Ready | GamePhase::Running)
    }
}

/// Things that happened during a command or frame, drained by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    LevelStarted(Difficulty),
    Started,
    BrickHit {
        column: usize,
        row: usize,
        destroyed: bool,
    },
    PaddleBounce,
    LifeLost {
        remaining: u8,
    },
    Paused,
    Resumed,
    PaddleJump,
    PaddleLand,
    GameOver(EndCause),
    Restarted,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball resting on top of the paddle, heading up and to the right
    pub fn serve(level: &Level, x: f32, paddle_y: f32) -> Self {
        let speed = level.ball_speed * BALL_SPEED_SCALE;
        Self {
            pos: Vec2::new(x, paddle_y - BALL_RADIUS),
            vel: Vec2::new(speed, -speed),
            radius: BALL_RADIUS,
        }
    }

    /// Position after one more step at the current velocity
    #[inline]
    pub fn next_pos(&self) -> Vec2 {
        self.pos + self.vel
    }

    /// Keep the centre at least one radius inside the canvas
    pub fn clamp_to(&mut self, width: f32, height: f32) {
        let min = Vec2::splat(self.radius);
        let max = Vec2::new(width - self.radius, height - self.radius).max(min);
        self.pos = self.pos.clamp(min, max);
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge (raised while jumping)
    pub y: f32,
    /// Top edge when resting
    pub baseline_y: f32,
    pub width: f32,
    pub height: f32,
    /// A jump is in progress; further jumps are ignored until it lands
    pub jumping: bool,
}

impl Paddle {
    /// Paddle centred along the bottom edge of the level's canvas
    pub fn new(level: &Level) -> Self {
        let baseline_y = level.canvas_height - PADDLE_HEIGHT;
        Self {
            x: (level.canvas_width - PADDLE_WIDTH) / 2.0,
            y: baseline_y,
            baseline_y,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            jumping: false,
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Move so the centre sits at `center`, clamped to
    /// `[width/2, canvas_width - width/2]`. Non-finite input is dropped.
    pub fn set_center(&mut self, center: f32, canvas_width: f32) {
        if !center.is_finite() {
            return;
        }
        let half = self.width / 2.0;
        let center = center.clamp(half, (canvas_width - half).max(half));
        self.x = center - half;
    }

    /// Strict horizontal span test used for the bottom bounce
    #[inline]
    pub fn contains_x(&self, x: f32) -> bool {
        x > self.x && x < self.x + self.width
    }

    /// Lift the paddle. Returns false (and does nothing) while a jump is active.
    pub fn jump(&mut self) -> bool {
        if self.jumping {
            return false;
        }
        self.y = self.baseline_y - PADDLE_JUMP_HEIGHT;
        self.jumping = true;
        true
    }

    /// Drop back to the baseline. Returns false if not jumping.
    pub fn land(&mut self) -> bool {
        if !self.jumping {
            return false;
        }
        self.y = self.baseline_y;
        self.jumping = false;
        true
    }
}

/// Bounded history of ball positions, oldest first
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: VecDeque<Vec2>,
}

impl Trail {
    pub fn push(&mut self, pos: Vec2) {
        if self.points.len() == TRAIL_LENGTH {
            self.points.pop_front();
        }
        self.points.push_back(pos);
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Vec2> + '_ {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// Expanding ring left behind by a brick hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    /// 0xRRGGBB
    pub color: u32,
}

impl Explosion {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: 0.0,
            speed: EXPLOSION_SPEED,
            color: EXPLOSION_COLOR,
        }
    }

    /// Grow one frame. Returns false once the marker should be removed.
    pub fn advance(&mut self) -> bool {
        self.radius += self.speed;
        self.radius <= EXPLOSION_MAX_RADIUS
    }
}

/// RNG state wrapper: one PCG stream per level start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Fresh generator for the next level; consecutive calls never repeat a stream
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducible brick layouts
    pub seed: u64,
    pub rng_state: RngState,
    pub difficulty: Difficulty,
    pub phase: GamePhase,
    pub lives: u8,
    pub score: u64,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
    /// Bumped on every level start and restart. Frames and timers scheduled
    /// under an older epoch are ignored.
    pub epoch: u64,
    /// Frames simulated in the current level
    pub frame: u64,
    /// Visual only
    #[serde(skip)]
    pub trail: Trail,
    /// Visual only
    #[serde(skip)]
    pub explosions: Vec<Explosion>,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Idle session; nothing happens until a level is selected
    pub fn new(seed: u64) -> Self {
        let difficulty = Difficulty::default();
        let level = difficulty.level();
        let paddle = Paddle::new(level);
        Self {
            seed,
            rng_state: RngState::new(seed),
            difficulty,
            phase: GamePhase::Idle,
            lives: STARTING_LIVES,
            score: 0,
            ball: Ball::serve(level, paddle.center_x(), paddle.baseline_y),
            paddle,
            bricks: BrickGrid::uniform(0, 0, 0),
            epoch: 0,
            frame: 0,
            trail: Trail::default(),
            explosions: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn level(&self) -> &'static Level {
        self.difficulty.level()
    }

    /// Select a level. A session that is already started restarts first.
    pub fn start_level(&mut self, difficulty: Difficulty) {
        if self.phase.is_started() {
            self.restart();
        }

        let mut rng = self.rng_state.next_rng();
        self.difficulty = difficulty;
        self.bricks = BrickGrid::initialize(difficulty, &mut rng);
        self.reset_session();
        self.epoch += 1;
        self.phase = GamePhase::Ready;

        log::info!(
            "Level {} ({}) started: {}x{} bricks",
            difficulty.index(),
            difficulty.as_str(),
            self.bricks.columns(),
            self.bricks.rows()
        );
        self.events.push(GameEvent::LevelStarted(difficulty));
    }

    /// Confirmation click. Ready and Paused move to Running; returns false
    /// from any other phase.
    pub fn confirm(&mut self) -> bool {
        let event = match self.phase {
            GamePhase::Ready => GameEvent::Started,
            GamePhase::Paused => GameEvent::Resumed,
            _ => return false,
        };
        self.phase = GamePhase::Running;
        self.events.push(event);
        true
    }

    /// Back to Idle with lives/score reset and no active grid
    pub fn restart(&mut self) {
        self.bricks = BrickGrid::uniform(0, 0, 0);
        self.reset_session();
        self.epoch += 1;
        self.phase = GamePhase::Idle;
        log::info!("Session restarted");
        self.events.push(GameEvent::Restarted);
    }

    /// Restart control is only offered once the run is over
    pub fn restart_available(&self) -> bool {
        matches!(self.phase, GamePhase::Ended(_))
    }

    /// Pointer input, honoured only while Ready or Running
    pub fn move_paddle(&mut self, center_x: f32) -> bool {
        if !self.phase.accepts_pointer() {
            return false;
        }
        let canvas_width = self.level().canvas_width;
        self.paddle.set_center(center_x, canvas_width);
        true
    }

    /// Ball missed the paddle
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LifeLost {
            remaining: self.lives,
        });

        if self.lives == 0 {
            self.end(EndCause::LivesExhausted);
        } else {
            self.reset_ball();
            self.phase = GamePhase::Paused;
            log::info!("Life lost, {} remaining", self.lives);
            self.events.push(GameEvent::Paused);
        }
    }

    pub fn end(&mut self, cause: EndCause) {
        self.phase = GamePhase::Ended(cause);
        log::info!("Game over ({:?}), score {}", cause, self.score);
        self.events.push(GameEvent::GameOver(cause));
    }

    /// Fresh ball in the middle of the canvas, just above the resting paddle
    pub fn reset_ball(&mut self) {
        let level = self.level();
        self.ball = Ball::serve(level, level.canvas_width / 2.0, self.paddle.baseline_y);
        self.trail.clear();
    }

    fn reset_session(&mut self) {
        let level = self.level();
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.frame = 0;
        self.paddle = Paddle::new(level);
        self.ball = Ball::serve(level, self.paddle.center_x(), self.paddle.baseline_y);
        self.trail.clear();
        self.explosions.clear();
    }

    /// Take the events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Serialize the session. Trail, explosions and pending events are
    /// visual or transient and are left out.
    pub fn to_snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore a session written by `to_snapshot`. Trail, explosions and
    /// events come back empty.
    pub fn from_snapshot(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
