//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per animation frame, no wall clock
//! - Injected/seeded RNG only
//! - Stable iteration order (column-major over the brick grid)
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{Rect, resolve_brick_collisions};
pub use grid::{Brick, BrickGrid};
pub use level::{Difficulty, Level};
pub use state::{Ball, EndCause, Explosion, GameEvent, GamePhase, GameState, Paddle, Trail};
pub use tick::{FrameStep, tick};
