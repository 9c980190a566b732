//! Cooking-mode session state and the voice interaction phase machine.

use serde::{Deserialize, Serialize};

/// Ephemeral state for one cooking-mode activation. Owned by the engine and
/// mutated only through intent dispatch or manual navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookingSession {
    pub recipe_id: String,
    pub current_step_index: usize,
    pub servings: u32,
    pub timer_running: bool,
}

impl CookingSession {
    pub fn new(recipe_id: impl Into<String>, servings: u32) -> Self {
        Self {
            recipe_id: recipe_id.into(),
            current_step_index: 0,
            servings: servings.max(1),
            timer_running: false,
        }
    }
}

/// Voice interaction phases for a cooking session. Only one listen and one
/// speak operation may be in flight at a time; out-of-order events are
/// ignored rather than panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoicePhase {
    #[default]
    Idle,
    Listening,
    Processing,
    Speaking,
}

impl VoicePhase {
    /// Idle -> Listening. Returns whether the transition happened.
    pub fn on_activate(&mut self) -> bool {
        self.step(Self::Idle, Self::Listening)
    }

    /// Listening -> Processing.
    pub fn on_transcript(&mut self) -> bool {
        self.step(Self::Listening, Self::Processing)
    }

    /// Processing -> Speaking.
    pub fn on_reply_ready(&mut self) -> bool {
        self.step(Self::Processing, Self::Speaking)
    }

    /// Speaking -> Idle.
    pub fn on_speech_end(&mut self) -> bool {
        self.step(Self::Speaking, Self::Idle)
    }

    /// Listening -> Idle, used for recognition errors and timeouts.
    pub fn on_recognition_error(&mut self) -> bool {
        self.step(Self::Listening, Self::Idle)
    }

    /// Explicit cancel: any phase back to Idle.
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    fn step(&mut self, from: Self, to: Self) -> bool {
        if *self == from {
            *self = to;
            true
        } else {
            log::debug!("Ignoring voice phase transition {from:?} -> {to:?} while in {self:?}");
            false
        }
    }
}
