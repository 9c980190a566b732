//! Voice command classification and dispatch for cooking mode.

use crate::assistant::{AssistantContext, AssistantResponder};
use crate::recipe::Recipe;
use crate::session::CookingSession;

/// Intents a transcript can resolve to, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ExitSession,
    NextStep,
    PreviousStep,
    RepeatStep,
    ToggleTimer,
    FreeFormQuery(String),
}

/// Result of dispatching one intent: the text to speak and whether the
/// session should end.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandReply {
    pub text: String,
    pub end_session: bool,
}

impl CommandReply {
    fn say(text: String) -> Self {
        Self {
            text,
            end_session: false,
        }
    }
}

/// Lowercases, strips diacritics and trims a raw transcript so keyword
/// matching does not depend on how the recognizer spells accents.
pub fn normalize_transcript(raw: &str) -> String {
    raw.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(strip_diacritic)
        .collect()
}

fn strip_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        _ => c,
    }
}

/// Deterministic transcript classifier. Synonym sets are configurable; the
/// defaults are the Spanish phrases the app ships with.
#[derive(Debug, Clone)]
pub struct VoiceCommandInterpreter {
    pub exit_words: Vec<String>,
    pub next_words: Vec<String>,
    pub previous_words: Vec<String>,
    pub repeat_words: Vec<String>,
    pub timer_words: Vec<String>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl Default for VoiceCommandInterpreter {
    fn default() -> Self {
        Self {
            exit_words: words(&["salir", "terminar", "cerrar", "adios"]),
            next_words: words(&["siguiente", "continua", "avanza", "proximo"]),
            previous_words: words(&["anterior", "atras", "retrocede"]),
            repeat_words: words(&["repite", "repetir", "otra vez", "de nuevo"]),
            timer_words: words(&["temporizador", "cronometro", "alarma"]),
        }
    }
}

impl VoiceCommandInterpreter {
    /// Maps a raw transcript to an intent. First match wins, in the order
    /// exit, next, previous, repeat, timer; anything else is a free-form
    /// query forwarded to the assistant.
    pub fn classify(&self, transcript: &str) -> Intent {
        let normalized = normalize_transcript(transcript);
        if contains_any(&normalized, &self.exit_words) {
            Intent::ExitSession
        } else if contains_any(&normalized, &self.next_words) {
            Intent::NextStep
        } else if contains_any(&normalized, &self.previous_words) {
            Intent::PreviousStep
        } else if contains_any(&normalized, &self.repeat_words) {
            Intent::RepeatStep
        } else if contains_any(&normalized, &self.timer_words) {
            Intent::ToggleTimer
        } else {
            Intent::FreeFormQuery(transcript.trim().to_string())
        }
    }

    /// Applies an intent to the session and produces the spoken reply.
    /// Navigation announcements are direction-specific on purpose.
    pub fn dispatch(
        &self,
        intent: Intent,
        session: &mut CookingSession,
        recipe: &Recipe,
        responder: &dyn AssistantResponder,
    ) -> CommandReply {
        match intent {
            Intent::ExitSession => CommandReply {
                text: "Saliendo del modo cocina. ¡Buen provecho!".to_string(),
                end_session: true,
            },
            Intent::NextStep => {
                if session.current_step_index < recipe.last_step_index() {
                    session.current_step_index += 1;
                    CommandReply::say(format!(
                        "Vamos al paso {}: {}",
                        session.current_step_index + 1,
                        step_text(recipe, session.current_step_index),
                    ))
                } else {
                    CommandReply::say("Ya estás en el último paso.".to_string())
                }
            }
            Intent::PreviousStep => {
                if session.current_step_index > 0 {
                    session.current_step_index -= 1;
                    CommandReply::say(format!(
                        "Volvemos al paso {}: {}",
                        session.current_step_index + 1,
                        step_text(recipe, session.current_step_index),
                    ))
                } else {
                    CommandReply::say("Estás en el primer paso.".to_string())
                }
            }
            Intent::RepeatStep => CommandReply::say(format!(
                "Repitiendo: {}",
                step_text(recipe, session.current_step_index),
            )),
            Intent::ToggleTimer => {
                match recipe
                    .step(session.current_step_index)
                    .and_then(|s| s.timer_minutes)
                {
                    None => CommandReply::say("Este paso no tiene un tiempo definido.".to_string()),
                    Some(minutes) => {
                        session.timer_running = !session.timer_running;
                        if session.timer_running {
                            CommandReply::say(format!(
                                "Temporizador de {minutes} minutos en marcha."
                            ))
                        } else {
                            CommandReply::say("Temporizador en pausa.".to_string())
                        }
                    }
                }
            }
            Intent::FreeFormQuery(query) => {
                let ctx = AssistantContext {
                    recipe,
                    current_step_index: session.current_step_index,
                    servings: session.servings,
                };
                let text = responder.respond(&ctx, &query).unwrap_or_else(|e| {
                    log::warn!("Assistant failed to answer: {e}");
                    "Lo siento, el asistente de cocina está teniendo problemas de conexión. \
                     Por favor, intenta de nuevo en unos momentos."
                        .to_string()
                });
                CommandReply::say(text)
            }
        }
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}

fn step_text(recipe: &Recipe, index: usize) -> &str {
    recipe
        .step(index)
        .map(|s| s.description.as_str())
        .unwrap_or_default()
}
