//! High-level cooking-mode facade.
//!
//! Owns the active session and the voice phase machine, and wires the
//! interpreter, the responder and the speech output together. All mutation
//! of the session flows through this single dispatch path.

use crate::assistant::AssistantResponder;
use crate::error::AppError;
use crate::interpreter::{Intent, VoiceCommandInterpreter};
use crate::recipe::Catalog;
use crate::session::{CookingSession, VoicePhase};
use crate::settings::AppSettings;
use crate::speech::{SpeechError, SpeechInput, SpeechOutput};

pub struct CookingEngine {
    catalog: Catalog,
    interpreter: VoiceCommandInterpreter,
    responder: Box<dyn AssistantResponder>,
    speaker: Box<dyn SpeechOutput>,
    voice_enabled: bool,
    session: Option<CookingSession>,
    phase: VoicePhase,
}

impl CookingEngine {
    pub fn new(
        catalog: Catalog,
        responder: Box<dyn AssistantResponder>,
        speaker: Box<dyn SpeechOutput>,
        settings: &AppSettings,
    ) -> Self {
        Self {
            catalog,
            interpreter: VoiceCommandInterpreter::default(),
            responder,
            speaker,
            voice_enabled: settings.voice_enabled,
            session: None,
            phase: VoicePhase::Idle,
        }
    }

    pub fn session(&self) -> Option<&CookingSession> {
        self.session.as_ref()
    }

    pub fn phase(&self) -> VoicePhase {
        self.phase
    }

    /// Starts cooking mode on a recipe: resets the session to step one and
    /// announces it.
    pub fn start_cooking(&mut self, recipe_id: &str, servings: u32) -> Result<(), AppError> {
        let recipe = self.catalog.get(recipe_id)?;
        let first_step = recipe
            .step(0)
            .map(|s| s.description.clone())
            .unwrap_or_default();

        log::info!("Starting cooking mode for '{recipe_id}' at {servings} servings");
        self.session = Some(CookingSession::new(recipe_id, servings));
        self.phase = VoicePhase::Idle;
        self.say(&format!("Paso uno: {first_step}"));
        Ok(())
    }

    /// Idle -> Listening. Returns false when a capture is already running.
    pub fn activate_listening(&mut self) -> bool {
        self.phase.on_activate()
    }

    /// Feeds one recognized transcript through classification and dispatch.
    /// Returns the spoken reply, or `None` when the transcript arrived
    /// outside the Listening phase and was dropped.
    pub fn handle_transcript(&mut self, transcript: &str) -> Result<Option<String>, AppError> {
        if !self.phase.on_transcript() {
            log::debug!("Dropping transcript outside listening phase: {transcript:?}");
            return Ok(None);
        }

        let Some(session) = self.session.as_mut() else {
            self.phase.cancel();
            return Err(AppError::NoActiveSession);
        };
        let recipe = match self.catalog.get(&session.recipe_id) {
            Ok(recipe) => recipe,
            Err(e) => {
                self.phase.cancel();
                return Err(e.into());
            }
        };

        let intent = self.interpreter.classify(transcript);
        log::debug!("Transcript {transcript:?} classified as {intent:?}");
        let reply = self
            .interpreter
            .dispatch(intent, session, recipe, self.responder.as_ref());

        self.phase.on_reply_ready();
        if !self.say(&reply.text) {
            // Nothing was spoken, so no synthesis-complete callback will
            // ever arrive; close the speak phase here.
            self.phase.on_speech_end();
        }

        if reply.end_session {
            log::info!("Cooking session ended by voice command");
            self.session = None;
            self.phase.cancel();
        }
        Ok(Some(reply.text))
    }

    /// Recognition failure or timeout: back to Idle with a spoken apology.
    pub fn handle_recognition_error(&mut self, err: &SpeechError) {
        log::warn!("Speech recognition failed: {err}");
        if !self.phase.on_recognition_error() {
            self.phase.cancel();
        }
        self.say(err.user_message());
    }

    /// One full capture round against a speech input.
    pub fn listen_once(&mut self, input: &mut dyn SpeechInput) -> Result<Option<String>, AppError> {
        if !self.activate_listening() {
            return Ok(None);
        }
        match input.listen() {
            Ok(transcript) => self.handle_transcript(&transcript),
            Err(e) => {
                self.handle_recognition_error(&e);
                Ok(None)
            }
        }
    }

    /// Synthesis completion callback from the host.
    pub fn speech_finished(&mut self) {
        self.phase.on_speech_end();
    }

    /// Manual navigation from the UI, announced like the voice equivalent.
    pub fn next_step(&mut self) -> Result<Option<String>, AppError> {
        self.navigate(Intent::NextStep)
    }

    pub fn previous_step(&mut self) -> Result<Option<String>, AppError> {
        self.navigate(Intent::PreviousStep)
    }

    fn navigate(&mut self, intent: Intent) -> Result<Option<String>, AppError> {
        let session = self.session.as_mut().ok_or(AppError::NoActiveSession)?;
        let recipe = self.catalog.get(&session.recipe_id)?;
        let reply = self
            .interpreter
            .dispatch(intent, session, recipe, self.responder.as_ref());
        self.say(&reply.text);
        Ok(Some(reply.text))
    }

    /// Forces everything back to Idle and silences any pending utterance.
    pub fn cancel(&mut self) {
        self.phase.cancel();
        self.speaker.cancel();
    }

    pub fn exit_cooking(&mut self) {
        self.session = None;
        self.cancel();
    }

    /// Speaks when voice is enabled. Returns whether an utterance actually
    /// started, so callers know if a synthesis-complete event will follow.
    fn say(&mut self, text: &str) -> bool {
        if self.voice_enabled {
            self.speaker.speak(text);
        }
        self.voice_enabled
    }
}
