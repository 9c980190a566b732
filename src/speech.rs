//! Boundary contracts for the host platform's speech services.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SpeechError {
    #[error("No speech was detected")]
    NoSpeech,

    #[error("Speech recognition is not supported on this platform")]
    NotSupported,

    #[error("Listening was canceled")]
    Canceled,
}

impl SpeechError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NoSpeech => "No te he escuchado bien. ¿Puedes repetirlo?",
            Self::NotSupported => "Este dispositivo no permite el control por voz.",
            Self::Canceled => "Escucha cancelada.",
        }
    }
}

/// Speech synthesis sink. Implementations must cancel any in-flight
/// utterance before starting a new one (last-write-wins), so audio never
/// overlaps.
pub trait SpeechOutput {
    fn speak(&mut self, text: &str);
    fn cancel(&mut self);
}

/// Speech recognition source. One listen operation at a time; the host's
/// own timeout surfaces as [`SpeechError::NoSpeech`].
pub trait SpeechInput {
    fn listen(&mut self) -> Result<String, SpeechError>;
}

/// No-op implementation for hosts without speech support.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSpeech;

impl SpeechOutput for NullSpeech {
    fn speak(&mut self, _text: &str) {}
    fn cancel(&mut self) {}
}

impl SpeechInput for NullSpeech {
    fn listen(&mut self) -> Result<String, SpeechError> {
        Err(SpeechError::NotSupported)
    }
}

/// Recording speaker used in tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemorySpeaker {
    pub utterances: Vec<String>,
    pub superseded: usize,
    speaking: bool,
}

impl MemorySpeaker {
    /// Marks the current utterance as finished, as a synthesis engine would
    /// on its completion callback.
    pub fn finish(&mut self) {
        self.speaking = false;
    }

    pub fn last(&self) -> Option<&str> {
        self.utterances.last().map(String::as_str)
    }
}

impl SpeechOutput for MemorySpeaker {
    fn speak(&mut self, text: &str) {
        if self.speaking {
            self.superseded += 1;
        }
        self.speaking = true;
        self.utterances.push(text.to_string());
    }

    fn cancel(&mut self) {
        self.speaking = false;
    }
}
