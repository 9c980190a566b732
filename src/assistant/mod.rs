//! Cooking-assistant responders.
//!
//! Two strategies implement [`AssistantResponder`]: the offline rule-based
//! [`LocalAssistantResponder`] and the [`CloudAssistant`] HTTP strategy.
//! [`FallbackResponder`] combines them so a cloud failure never reaches the
//! user as an error.

mod cloud;
mod local;

pub use cloud::{CloudAssistant, CloudAssistantError};
pub use local::LocalAssistantResponder;

use thiserror::Error;

use crate::recipe::Recipe;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Cloud assistant: {0}")]
    Cloud(#[from] CloudAssistantError),
}

/// Session context handed to a responder along with the user's query.
#[derive(Debug, Clone, Copy)]
pub struct AssistantContext<'a> {
    pub recipe: &'a Recipe,
    pub current_step_index: usize,
    pub servings: u32,
}

impl AssistantContext<'_> {
    pub fn current_step_description(&self) -> &str {
        self.recipe
            .step(self.current_step_index)
            .map(|s| s.description.as_str())
            .unwrap_or_default()
    }
}

pub trait AssistantResponder {
    fn respond(&self, ctx: &AssistantContext<'_>, query: &str) -> Result<String, AssistantError>;
}

/// Tries a primary responder and falls back to the local rules when it
/// fails, logging the failure. The local responder never errors, so this
/// combinator always produces an answer.
pub struct FallbackResponder {
    primary: Box<dyn AssistantResponder>,
    local: LocalAssistantResponder,
}

impl FallbackResponder {
    pub fn new(primary: Box<dyn AssistantResponder>) -> Self {
        Self {
            primary,
            local: LocalAssistantResponder::default(),
        }
    }
}

impl AssistantResponder for FallbackResponder {
    fn respond(&self, ctx: &AssistantContext<'_>, query: &str) -> Result<String, AssistantError> {
        match self.primary.respond(ctx, query) {
            Ok(text) => Ok(text),
            Err(e) => {
                log::warn!("Primary assistant failed, answering locally: {e}");
                self.local.respond(ctx, query)
            }
        }
    }
}

/// Single choice point for the responder strategy: cloud with local
/// fallback when an API key is configured, plain local rules otherwise.
pub fn responder_from_config(api_key: Option<&str>) -> Box<dyn AssistantResponder> {
    match api_key {
        Some(key) if !key.is_empty() => {
            Box::new(FallbackResponder::new(Box::new(CloudAssistant::new(key))))
        }
        _ => Box::new(LocalAssistantResponder),
    }
}
