//! HUD projection
//!
//! What the DOM shows for the current session. Pure, so the browser shell
//! only has to copy strings into elements.

use crate::sim::{EndCause, GamePhase, GameState};

/// Lives counter colour: green while more than one life is left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LivesColor {
    Green,
    Red,
}

impl LivesColor {
    pub fn for_lives(lives: u8) -> Self {
        if lives > 1 {
            LivesColor::Green
        } else {
            LivesColor::Red
        }
    }

    pub fn css(&self) -> &'static str {
        match self {
            LivesColor::Green => "green",
            LivesColor::Red => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    pub lives_text: String,
    pub lives_color: LivesColor,
    pub score_text: String,
    pub restart_visible: bool,
    /// Overlay prompt or notification for the current phase
    pub message: Option<&'static str>,
}

impl HudView {
    pub fn from_state(state: &GameState) -> Self {
        let message = match state.phase {
            GamePhase::Idle => None,
            GamePhase::Ready => Some("Click to start!"),
            GamePhase::Running => None,
            GamePhase::Paused => Some("Click to continue!"),
            GamePhase::Ended(EndCause::LivesExhausted) => Some("Game over!"),
            GamePhase::Ended(EndCause::Cleared) => Some("Congratulations! All bricks cleared!"),
        };

        Self {
            lives_text: format!("Lives: {}", state.lives),
            lives_color: LivesColor::for_lives(state.lives),
            score_text: format!("Score: {}", state.score),
            restart_visible: state.restart_available(),
            message,
        }
    }
}
