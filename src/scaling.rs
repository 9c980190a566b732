//! Serving-count quantity scaling and display formatting.

use serde::Serialize;
use thiserror::Error;

use crate::recipe::Ingredient;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScalingError {
    #[error("Invalid base servings: {0} (must be positive)")]
    InvalidBase(u32),

    #[error("Invalid target servings: {0} (must be at least 1)")]
    InvalidTarget(u32),
}

impl ScalingError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidBase(_) => "La receta no tiene un número de raciones válido.",
            Self::InvalidTarget(_) => "Elige al menos una ración.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledQuantity {
    pub amount: f64,
    pub unit: String,
}

/// Scales an ingredient amount linearly to the target serving count.
///
/// The unit passes through unchanged; unit conversion is a display concern
/// handled after aggregation.
pub fn scale(
    ingredient: &Ingredient,
    servings_base: u32,
    target_servings: u32,
) -> Result<ScaledQuantity, ScalingError> {
    if servings_base == 0 {
        return Err(ScalingError::InvalidBase(servings_base));
    }
    if target_servings < 1 {
        return Err(ScalingError::InvalidTarget(target_servings));
    }

    Ok(ScaledQuantity {
        amount: ingredient.amount * f64::from(target_servings) / f64::from(servings_base),
        unit: ingredient.unit.clone(),
    })
}

/// Formats an amount rounded to one decimal place, dropping a trailing `.0`.
///
/// `2.0` renders as `"2"`, `2.5` stays `"2.5"`. Display code depends on this
/// exact rule.
pub fn format_amount(amount: f64) -> String {
    let rounded = format!("{amount:.1}");
    match rounded.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => rounded,
    }
}
