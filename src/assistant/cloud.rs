//! Cloud assistant strategy over a Gemini-style `generateContent` endpoint.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

use crate::assistant::{AssistantContext, AssistantError, AssistantResponder};

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

#[derive(Error, Debug)]
pub enum CloudAssistantError {
    #[error("No API key configured")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned status {0}")]
    Api(StatusCode),

    #[error("API response contained no answer text")]
    EmptyResponse,
}

impl CloudAssistantError {
    pub fn user_message(&self) -> &'static str {
        "Lo siento, el asistente de cocina está teniendo problemas de conexión. \
         Por favor, intenta de nuevo en unos momentos."
    }
}

/// Blocking HTTP client for the hosted assistant. One client is built per
/// strategy and reused across calls.
pub struct CloudAssistant {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl CloudAssistant {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn system_instruction(ctx: &AssistantContext<'_>) -> String {
        format!(
            "Eres un asistente de cocina experto. Estás guiando al usuario en la receta \
             \"{title}\". Paso actual ({step}/{total}): \"{description}\". \
             Configuración de comensales: {servings} (base de la receta: {base}). \
             Si piden sustitutos, ofrece opciones comunes. Si piden cantidades, calcula la \
             proporción {servings}/{base} sobre los ingredientes originales. Responde siempre \
             en español y de forma breve, máximo tres frases.",
            title = ctx.recipe.title,
            step = ctx.current_step_index + 1,
            total = ctx.recipe.steps.len(),
            description = ctx.current_step_description(),
            servings = ctx.servings,
            base = ctx.recipe.servings_base,
        )
    }

    fn query(&self, ctx: &AssistantContext<'_>, user_text: &str) -> Result<String, CloudAssistantError> {
        if self.api_key.is_empty() {
            return Err(CloudAssistantError::MissingApiKey);
        }

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": user_text }] }],
            "systemInstruction": { "parts": [{ "text": Self::system_instruction(ctx) }] },
        });

        let response = self.client.post(url).json(&body).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(CloudAssistantError::Api(status));
        }

        let value: Value = response.json()?;
        value
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(CloudAssistantError::EmptyResponse)
    }
}

impl AssistantResponder for CloudAssistant {
    fn respond(&self, ctx: &AssistantContext<'_>, query: &str) -> Result<String, AssistantError> {
        Ok(self.query(ctx, query)?)
    }
}
