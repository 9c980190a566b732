use navidad_mesa_lib::assistant::{
    responder_from_config, AssistantContext, AssistantError, AssistantResponder, CloudAssistant,
    CloudAssistantError, FallbackResponder, LocalAssistantResponder,
};
use navidad_mesa_lib::recipe::{Category, Difficulty, Ingredient, Recipe, Step};

fn ingredient(name: &str, amount: f64, unit: &str) -> Ingredient {
    Ingredient {
        name: name.to_string(),
        amount,
        unit: unit.to_string(),
        category: None,
    }
}

fn recipe() -> Recipe {
    Recipe {
        id: "tarta".to_string(),
        title: "Tarta de Turrón".to_string(),
        description: String::new(),
        category: Category::Postre,
        image_url: String::new(),
        prep_time_minutes: 25,
        cook_time_minutes: 10,
        difficulty: Difficulty::Facil,
        servings_base: 4,
        ingredients: vec![
            ingredient("turrón blando", 300.0, "g"),
            ingredient("nata", 500.0, "ml"),
            ingredient("leche", 200.0, "ml"),
            ingredient("azúcar", 100.0, "g"),
            ingredient("galletas", 150.0, "g"),
        ],
        steps: vec![
            Step {
                order: 1,
                description: "Tritura las galletas y mézclalas con la mantequilla.".to_string(),
                timer_minutes: None,
            },
            Step {
                order: 2,
                description: "Deja enfriar la base en la nevera.".to_string(),
                timer_minutes: Some(15),
            },
        ],
        tags: vec![],
    }
}

fn ctx(recipe: &Recipe, step: usize, servings: u32) -> AssistantContext<'_> {
    AssistantContext {
        recipe,
        current_step_index: step,
        servings,
    }
}

fn ask(recipe: &Recipe, step: usize, servings: u32, query: &str) -> String {
    LocalAssistantResponder
        .respond(&ctx(recipe, step, servings), query)
        .unwrap()
}

#[test]
fn substitution_for_butter_suggests_olive_oil() {
    let r = recipe();
    let answer = ask(&r, 0, 4, "no tengo mantequilla, puedo sustituir");
    assert!(answer.contains("aceite de oliva"), "got: {answer}");
}

#[test]
fn substitution_requires_a_missing_ingredient_cue() {
    let r = recipe();
    // Mentions butter but asks what to do, so the step rule answers instead.
    let answer = ask(&r, 0, 4, "qué hago con la mantequilla");
    assert!(answer.starts_with("Paso 1:"), "got: {answer}");
}

#[test]
fn quantity_lookup_scales_to_current_servings() {
    let r = recipe();
    let answer = ask(&r, 0, 8, "cuánta azúcar necesito");
    assert!(answer.contains("200"), "got: {answer}");
    assert!(answer.contains('g'), "got: {answer}");
    assert!(answer.contains("azúcar"), "got: {answer}");
}

#[test]
fn quantity_lookup_without_known_ingredient_falls_through() {
    let r = recipe();
    let answer = ask(&r, 0, 4, "cuánta sal necesito");
    assert!(!answer.contains("necesitas"), "got: {answer}");
}

#[test]
fn ingredient_question_lists_a_preview() {
    let r = recipe();
    let answer = ask(&r, 0, 4, "qué ingredientes lleva esto");
    assert!(answer.contains("turrón blando"), "got: {answer}");
    assert!(answer.contains("nata"), "got: {answer}");
    assert!(answer.contains("azúcar"), "got: {answer}");
    // Preview stops before the full list.
    assert!(!answer.contains("galletas"), "got: {answer}");
}

#[test]
fn timing_question_prefers_the_step_timer() {
    let r = recipe();
    let answer = ask(&r, 1, 4, "cuánto tiempo falta");
    assert!(answer.contains("15"), "got: {answer}");
}

#[test]
fn timing_question_without_step_timer_uses_total_cook_time() {
    let r = recipe();
    let answer = ask(&r, 0, 4, "cuánto tiempo tarda");
    assert!(answer.contains("10"), "got: {answer}");
}

#[test]
fn step_question_reads_the_current_step() {
    let r = recipe();
    let answer = ask(&r, 1, 4, "explícame qué hago ahora");
    assert!(answer.contains("Paso 2"), "got: {answer}");
    assert!(answer.contains("nevera"), "got: {answer}");
}

#[test]
fn advice_question_mentions_difficulty() {
    let r = recipe();
    let answer = ask(&r, 0, 4, "dame un consejo");
    assert!(answer.contains("Fácil"), "got: {answer}");
}

#[test]
fn unmatched_query_gets_contextual_fallback() {
    let r = recipe();
    let answer = ask(&r, 1, 4, "me encanta la navidad");
    assert!(answer.contains("paso 2 de 2"), "got: {answer}");
    assert!(answer.contains("ingredientes"), "got: {answer}");
}

#[test]
fn responses_never_contain_markup_characters() {
    let mut r = recipe();
    r.steps[0].description = "Mezcla *bien* la base con `cuidado` y #mimo _navideño_.".to_string();
    let answer = ask(&r, 0, 4, "qué hago");
    for forbidden in ['*', '#', '_', '`'] {
        assert!(!answer.contains(forbidden), "got: {answer}");
    }
    assert!(answer.contains("Mezcla bien"), "got: {answer}");
}

#[test]
fn responder_is_deterministic() {
    let r = recipe();
    let first = ask(&r, 0, 6, "cuánta nata necesito");
    let second = ask(&r, 0, 6, "cuánta nata necesito");
    assert_eq!(first, second);
}

struct FailingResponder;

impl AssistantResponder for FailingResponder {
    fn respond(&self, _ctx: &AssistantContext<'_>, _query: &str) -> Result<String, AssistantError> {
        Err(AssistantError::Cloud(CloudAssistantError::MissingApiKey))
    }
}

#[test]
fn fallback_responder_answers_locally_when_primary_fails() {
    let r = recipe();
    let responder = FallbackResponder::new(Box::new(FailingResponder));
    let answer = responder
        .respond(&ctx(&r, 0, 8), "cuánta azúcar necesito")
        .unwrap();
    assert!(answer.contains("200"), "got: {answer}");
}

#[test]
fn cloud_assistant_without_key_errors_instead_of_calling_out() {
    let r = recipe();
    let cloud = CloudAssistant::new("");
    let result = cloud.respond(&ctx(&r, 0, 4), "cuánta azúcar necesito");
    assert!(matches!(
        result,
        Err(AssistantError::Cloud(CloudAssistantError::MissingApiKey))
    ));
}

#[test]
fn responder_config_without_key_answers_offline() {
    let r = recipe();
    let responder = responder_from_config(None);
    let answer = responder
        .respond(&ctx(&r, 0, 4), "qué ingredientes lleva")
        .unwrap();
    assert!(answer.contains("turrón blando"), "got: {answer}");
}

#[test]
fn cloud_error_user_message_is_friendly() {
    let msg = CloudAssistantError::MissingApiKey.user_message();
    assert!(msg.contains("asistente de cocina"));
}
