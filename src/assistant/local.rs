//! Offline rule-based cooking assistant.
//!
//! Pattern-matches a free-form question against a fixed set of rules and
//! answers with short, speech-friendly Spanish text. Pure and deterministic;
//! every query gets an answer, the last rule being a contextual fallback.

use std::sync::OnceLock;

use regex::Regex;

use crate::assistant::{AssistantContext, AssistantError, AssistantResponder};
use crate::interpreter::normalize_transcript;
use crate::scaling;

/// Known substitutions, keyed by the diacritic-stripped ingredient term.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("mantequilla", "aceite de oliva"),
    ("huevo", "una mezcla de semillas de lino con agua"),
    ("leche", "una bebida vegetal"),
    ("vino", "caldo con un chorrito de vinagre"),
    ("harina", "harina de avena o de arroz"),
    ("nata", "yogur o crema de coco"),
    ("crema", "yogur o crema de coco"),
    ("azucar", "miel, sirope de arce o datiles"),
    ("cilantro", "perejil con un toque de lima"),
];

const SUBSTITUTION_CUES: &[&str] = &[
    "no tengo",
    "sustitu",
    "reempla",
    "cambiar por",
    "en lugar de",
    "en vez de",
];

const QUANTITY_CUES: &[&str] = &["cuanto", "cuanta", "cantidad", "necesito"];

const INGREDIENT_LIST_CUES: &[&str] = &[
    "que ingredientes",
    "ingredientes",
    "que necesito",
    "que hace falta",
    "que lleva",
];

const TIMING_CUES: &[&str] = &[
    "cuanto tiempo",
    "cuanto tarda",
    "cuantos minutos",
    "cuanto queda",
    "cuanto falta",
];

const STEP_CUES: &[&str] = &["que hago", "explica", "no entiendo", "como lo hago", "repite"];

const ADVICE_CUES: &[&str] = &["dificultad", "dificil", "facil", "consejo", "truco", "ayuda"];

/// How many ingredient names the list summary previews.
const INGREDIENT_PREVIEW: usize = 4;

/// Longest step excerpt quoted in the fallback answer, in characters.
const FALLBACK_EXCERPT_CHARS: usize = 60;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalAssistantResponder;

impl AssistantResponder for LocalAssistantResponder {
    fn respond(&self, ctx: &AssistantContext<'_>, query: &str) -> Result<String, AssistantError> {
        Ok(strip_markup(&self.answer(ctx, query)))
    }
}

impl LocalAssistantResponder {
    fn answer(&self, ctx: &AssistantContext<'_>, query: &str) -> String {
        let q = normalize_transcript(query);

        if let Some(text) = substitution_answer(&q) {
            return text;
        }
        if let Some(text) = quantity_answer(ctx, &q) {
            return text;
        }
        if contains_any(&q, INGREDIENT_LIST_CUES) {
            return ingredient_list_answer(ctx);
        }
        if contains_any(&q, TIMING_CUES) {
            return timing_answer(ctx);
        }
        if contains_any(&q, STEP_CUES) {
            return format!(
                "Paso {}: {}",
                ctx.current_step_index + 1,
                ctx.current_step_description()
            );
        }
        if contains_any(&q, ADVICE_CUES) {
            return format!(
                "Esta receta tiene una dificultad {}. Un consejo: pesa y prepara \
                 todos los ingredientes antes de empezar a cocinar.",
                ctx.recipe.difficulty
            );
        }

        fallback_answer(ctx)
    }
}

fn substitution_answer(query: &str) -> Option<String> {
    if !contains_any(query, SUBSTITUTION_CUES) {
        return None;
    }
    SUBSTITUTIONS
        .iter()
        .find(|(term, _)| query.contains(term))
        .map(|(term, replacement)| {
            format!("Si no tienes {term}, puedes usar {replacement}.")
        })
}

fn quantity_answer(ctx: &AssistantContext<'_>, query: &str) -> Option<String> {
    if !contains_any(query, QUANTITY_CUES) {
        return None;
    }
    let ingredient = ctx
        .recipe
        .ingredients
        .iter()
        .find(|i| query.contains(&normalize_transcript(&i.name)))?;

    // A recipe with a bad servings base is a data error; let later rules
    // answer rather than surfacing it here.
    let scaled = scaling::scale(ingredient, ctx.recipe.servings_base, ctx.servings).ok()?;
    Some(format!(
        "Para {} personas necesitas {} {} de {}.",
        ctx.servings,
        scaling::format_amount(scaled.amount),
        scaled.unit,
        ingredient.name,
    ))
}

fn ingredient_list_answer(ctx: &AssistantContext<'_>) -> String {
    let names: Vec<&str> = ctx
        .recipe
        .ingredients
        .iter()
        .take(INGREDIENT_PREVIEW)
        .map(|i| i.name.as_str())
        .collect();
    let preview = names.join(", ");
    if ctx.recipe.ingredients.len() > INGREDIENT_PREVIEW {
        format!(
            "Esta receta lleva {preview}, entre otros ingredientes. \
             Pregúntame por uno y te digo la cantidad exacta."
        )
    } else {
        format!("Esta receta lleva {preview}. Pregúntame por uno y te digo la cantidad exacta.")
    }
}

fn timing_answer(ctx: &AssistantContext<'_>) -> String {
    match ctx
        .recipe
        .step(ctx.current_step_index)
        .and_then(|s| s.timer_minutes)
    {
        Some(minutes) => format!("Este paso lleva unos {minutes} minutos."),
        None => format!(
            "El tiempo total de cocción es de {} minutos.",
            ctx.recipe.cook_time_minutes
        ),
    }
}

fn fallback_answer(ctx: &AssistantContext<'_>) -> String {
    format!(
        "Estás en el paso {} de {}: {}. Puedes preguntarme por los ingredientes \
         o decir siguiente para continuar.",
        ctx.current_step_index + 1,
        ctx.recipe.steps.len(),
        excerpt(ctx.current_step_description(), FALLBACK_EXCERPT_CHARS),
    )
}

fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Removes markup characters so replies are always safe to speak aloud.
fn strip_markup(text: &str) -> String {
    static MARKUP: OnceLock<Regex> = OnceLock::new();
    let re = MARKUP.get_or_init(|| Regex::new(r"[*#_`]+").expect("markup pattern is valid"));
    re.replace_all(text, "").into_owned()
}
