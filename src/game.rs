//! Game controller
//!
//! Owns the session and a scheduler. Input commands arrive between frames;
//! frames and timers come back as epoch-tagged tokens so anything scheduled
//! before a restart falls through as a no-op.

use crate::consts::PADDLE_JUMP_COOLDOWN_MS;
use crate::scheduler::{FrameToken, Scheduler, TimerKind, TimerToken};
use crate::sim::{Difficulty, FrameStep, GameEvent, GamePhase, GameState, tick};

/// Input from the UI layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// A level button was pressed
    SelectLevel(Difficulty),
    /// Pointer moved; `x` is relative to the canvas left edge
    PointerMove { x: f32 },
    /// Click on the canvas: start, resume or jump depending on phase
    Click,
    /// Restart button
    Restart,
}

pub struct Game<S: Scheduler> {
    state: GameState,
    scheduler: S,
    /// Epoch of the frame currently waiting to fire, if any
    pending_frame: Option<u64>,
}

impl<S: Scheduler> Game<S> {
    pub fn new(scheduler: S, seed: u64) -> Self {
        Self {
            state: GameState::new(seed),
            scheduler,
            pending_frame: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Apply one input command
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::SelectLevel(difficulty) => {
                self.state.start_level(difficulty);
            }
            Command::PointerMove { x } => {
                self.state.move_paddle(x);
            }
            Command::Click => self.click(),
            Command::Restart => {
                if self.state.restart_available() {
                    self.state.restart();
                } else {
                    log::debug!("Restart ignored in {:?}", self.state.phase);
                }
            }
        }
    }

    fn click(&mut self) {
        match self.state.phase {
            GamePhase::Ready | GamePhase::Paused => {
                if self.state.confirm() {
                    self.schedule_frame();
                }
            }
            GamePhase::Running => {
                if self.state.paddle.jump() {
                    self.state.events.push(GameEvent::PaddleJump);
                    self.scheduler.set_timeout(
                        PADDLE_JUMP_COOLDOWN_MS,
                        TimerToken {
                            epoch: self.state.epoch,
                            kind: TimerKind::PaddleLand,
                        },
                    );
                } else {
                    log::debug!("Jump ignored, cooldown active");
                }
            }
            GamePhase::Idle | GamePhase::Ended(_) => {}
        }
    }

    fn schedule_frame(&mut self) {
        let epoch = self.state.epoch;
        if self.pending_frame == Some(epoch) {
            return;
        }
        self.pending_frame = Some(epoch);
        self.scheduler.request_frame(FrameToken { epoch });
    }

    /// A scheduled frame fired. Steps the simulation and reschedules while
    /// Running.
    pub fn on_frame(&mut self, token: FrameToken) -> FrameStep {
        if token.epoch != self.state.epoch {
            log::debug!("Stale frame (epoch {} != {})", token.epoch, self.state.epoch);
            return FrameStep::Stop;
        }
        if self.pending_frame == Some(token.epoch) {
            self.pending_frame = None;
        }

        let step = tick(&mut self.state);
        if step == FrameStep::Continue {
            self.schedule_frame();
        }
        step
    }

    /// A scheduled timer fired. Returns true if it changed anything.
    pub fn on_timer(&mut self, token: TimerToken) -> bool {
        if token.epoch != self.state.epoch {
            log::debug!("Stale {:?} timer ignored", token.kind);
            return false;
        }
        match token.kind {
            TimerKind::PaddleLand => {
                let landed = self.state.paddle.land();
                if landed {
                    self.state.events.push(GameEvent::PaddleLand);
                }
                landed
            }
        }
    }
}
