//! Per-frame simulation step
//!
//! One call advances the session by exactly one animation frame.

use super::collision::{resolve_brick_collisions, wall_contact};
use super::state::{EndCause, GameEvent, GamePhase, GameState};

/// What the frame loop should do after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    /// Still running, schedule another frame
    Continue,
    /// Paused, ended or never running; let the chain die
    Stop,
}

/// Advance the game state by one frame.
///
/// Order: trail/explosions, brick collisions (and level clear), wall and
/// paddle reflection, then movement. Does nothing unless Running.
pub fn tick(state: &mut GameState) -> FrameStep {
    if state.phase != GamePhase::Running {
        return FrameStep::Stop;
    }

    state.frame += 1;

    let pos = state.ball.pos;
    state.trail.push(pos);
    state.explosions.retain_mut(|e| e.advance());

    resolve_brick_collisions(state);
    if state.bricks.all_destroyed() {
        log::info!("All bricks cleared in {} frames", state.frame);
        state.end(EndCause::Cleared);
        return FrameStep::Stop;
    }

    let level = state.level();
    let contact = wall_contact(&state.ball, level.canvas_width, level.canvas_height);

    if contact.side {
        state.ball.vel.x = -state.ball.vel.x;
    }
    if contact.top {
        state.ball.vel.y = -state.ball.vel.y;
    } else if contact.bottom {
        if state.paddle.contains_x(state.ball.pos.x) {
            state.ball.vel.y = -state.ball.vel.y;
            state.events.push(GameEvent::PaddleBounce);
        } else {
            state.lose_life();
            return FrameStep::Stop;
        }
    }

    state.ball.pos += state.ball.vel;
    state
        .ball
        .clamp_to(level.canvas_width, level.canvas_height);

    FrameStep::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::BrickGrid;
    use crate::sim::level::Difficulty;
    use glam::Vec2;

    fn running(difficulty: Difficulty) -> GameState {
        let mut state = GameState::new(12345);
        state.start_level(difficulty);
        assert!(state.confirm());
        state.drain_events();
        state
    }

    /// Send the ball straight down past a paddle parked in the left corner
    fn miss(state: &mut GameState) {
        let width = state.level().canvas_width;
        state.paddle.set_center(0.0, width);
        state.ball.vel = Vec2::new(0.0, 2.0);
        for _ in 0..1000 {
            if tick(state) == FrameStep::Stop {
                return;
            }
        }
        panic!("ball never reached the bottom");
    }

    #[test]
    fn test_tick_does_nothing_unless_running() {
        let mut state = GameState::new(1);
        assert_eq!(tick(&mut state), FrameStep::Stop);

        state.start_level(Difficulty::Easy);
        let ball = state.ball;
        assert_eq!(tick(&mut state), FrameStep::Stop);
        assert_eq!(state.ball, ball);
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_straight_up_hits_middle_bottom_brick_first() {
        let mut state = running(Difficulty::Easy);
        assert!(state.bricks.iter().all(|(_, _, b)| b.status == 1));
        assert_eq!(state.ball.pos.x, state.paddle.center_x());
        state.ball.vel.x = 0.0;

        let mut frames = 0;
        while state.score == 0 {
            assert_eq!(tick(&mut state), FrameStep::Continue);
            frames += 1;
            assert!(frames < 1000, "ball never reached the bricks");
        }

        assert_eq!(state.bricks.get(2, 4).map(|b| b.status), Some(0));
        assert_eq!(state.score, 1);
        assert_eq!(state.bricks.remaining(), 24);
        assert!(state.ball.vel.y > 0.0);
    }

    #[test]
    fn test_three_misses_end_the_game() {
        let mut state = running(Difficulty::Easy);
        let mut lives = vec![state.lives];

        for _ in 0..3 {
            miss(&mut state);
            lives.push(state.lives);
            if state.phase == GamePhase::Paused {
                assert!(state.confirm());
            }
        }

        assert_eq!(lives, vec![3, 2, 1, 0]);
        assert_eq!(state.phase, GamePhase::Ended(EndCause::LivesExhausted));
        assert!(state.restart_available());

        let events = state.drain_events();
        let remaining: Vec<u8> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::LifeLost { remaining } => Some(*remaining),
                _ => None,
            })
            .collect();
        assert_eq!(remaining, vec![2, 1, 0]);
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameOver(EndCause::LivesExhausted))
        );
    }

    #[test]
    fn test_miss_with_last_life_ends_directly() {
        let mut state = running(Difficulty::Medium);
        state.lives = 1;
        miss(&mut state);
        assert_eq!(state.phase, GamePhase::Ended(EndCause::LivesExhausted));
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_miss_pauses_and_freezes_ball() {
        let mut state = running(Difficulty::Easy);
        miss(&mut state);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.lives, 2);

        let ball = state.ball;
        assert_eq!(ball.pos, Vec2::new(250.0, 380.0));
        assert_eq!(tick(&mut state), FrameStep::Stop);
        assert_eq!(state.ball, ball);
    }

    #[test]
    fn test_paddle_bounce() {
        let mut state = running(Difficulty::Easy);
        state.ball.pos = Vec2::new(250.0, 389.0);
        state.ball.vel = Vec2::new(0.0, 2.0);

        assert_eq!(tick(&mut state), FrameStep::Continue);
        assert_eq!(state.ball.vel.y, -2.0);
        assert_eq!(state.ball.pos, Vec2::new(250.0, 387.0));
        assert!(state.drain_events().contains(&GameEvent::PaddleBounce));
    }

    #[test]
    fn test_side_and_top_reflection() {
        let mut state = running(Difficulty::Easy);
        state.ball.pos = Vec2::new(489.0, 11.0);
        state.ball.vel = Vec2::new(2.0, -2.0);

        assert_eq!(tick(&mut state), FrameStep::Continue);
        assert_eq!(state.ball.vel, Vec2::new(-2.0, 2.0));
        assert_eq!(state.ball.pos, Vec2::new(487.0, 13.0));
    }

    #[test]
    fn test_last_brick_clears_level() {
        let mut state = running(Difficulty::Easy);
        state.bricks = BrickGrid::uniform(1, 1, 1);
        let rect = BrickGrid::brick_rect(state.level(), 0, 0);
        state.ball.pos = rect.center();

        assert_eq!(tick(&mut state), FrameStep::Stop);
        assert_eq!(state.score, 1);
        assert_eq!(state.phase, GamePhase::Ended(EndCause::Cleared));
        assert!(state.restart_available());
    }

    #[test]
    fn test_trail_and_explosions_update_each_frame() {
        let mut state = running(Difficulty::Easy);
        state.ball.pos = Vec2::new(250.0, 160.0);
        state.ball.vel = Vec2::new(0.0, -2.0);

        tick(&mut state);
        assert_eq!(state.trail.len(), 1);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].radius, 0.0);

        tick(&mut state);
        assert_eq!(state.trail.len(), 2);
        assert_eq!(state.explosions[0].radius, 2.0);

        for _ in 0..20 {
            tick(&mut state);
        }
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_ball_stays_in_bounds_with_tracking_paddle() {
        for difficulty in Difficulty::ALL {
            let mut state = running(difficulty);
            let level = state.level();
            let r = state.ball.radius;

            for _ in 0..5000 {
                let x = state.ball.pos.x;
                state.move_paddle(x);
                if tick(&mut state) == FrameStep::Stop {
                    break;
                }
                let pos = state.ball.pos;
                assert!(pos.x >= r && pos.x <= level.canvas_width - r, "{:?}", pos);
                assert!(pos.y >= r && pos.y <= level.canvas_height - r, "{:?}", pos);
            }
            assert_eq!(state.lives, 3, "{:?} tracking paddle should never miss", difficulty);
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = running(Difficulty::Hard);
        let mut b = running(Difficulty::Hard);

        for _ in 0..500 {
            let xa = a.ball.pos.x;
            let xb = b.ball.pos.x;
            a.move_paddle(xa);
            b.move_paddle(xb);
            tick(&mut a);
            tick(&mut b);
        }

        assert_eq!(a.ball, b.ball);
        assert_eq!(a.score, b.score);
        assert_eq!(a.frame, b.frame);
    }
}
