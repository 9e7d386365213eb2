//! Body metric MCP tools
//!
//! BMI, daily energy needs and macro progress.

use serde::Serialize;

use crate::nutrition::{
    activity_multiplier, body_mass_index, compute_energy_estimate, progress_against,
    resting_energy, ConsumedMacros, EnergyEstimate, EnergyProfile, HeightUnit, MacroProgress,
    WeightUnit,
};

use super::validation::FormCheck;

/// Response for calculate_bmi
#[derive(Debug, Serialize)]
pub struct BmiResponse {
    pub bmi: f64,
    pub category: String,
    pub color_token: String,
    pub weight_kg: f64,
    pub height_m: f64,
    pub weight_unit: String,
    pub height_unit: String,
}

/// Response for calculate_daily_needs
#[derive(Debug, Serialize)]
pub struct DailyNeedsResponse {
    pub resting_energy_kcal: f64,
    pub activity_multiplier: f64,
    /// `None` when the requested level was not recognised
    pub activity_level_used: Option<String>,
    pub gender_used: String,
    pub estimate: EnergyEstimate,
}

/// Response for track_macro_progress
#[derive(Debug, Serialize)]
pub struct MacroProgressResponse {
    pub targets: EnergyEstimate,
    pub progress: Vec<MacroProgress>,
}

// ============================================================================
// Tool Functions
// ============================================================================

/// Calculate BMI from weight and height in the given units
pub fn calculate_bmi(
    weight: f64,
    height: f64,
    weight_unit: &str,
    height_unit: &str,
) -> Result<BmiResponse, String> {
    FormCheck::new()
        .number("weight", weight)
        .number("height", height)
        .finish()?;

    let weight_unit = WeightUnit::from_str(weight_unit);
    let height_unit = HeightUnit::from_str(height_unit);
    let result = body_mass_index(weight, height, weight_unit, height_unit);

    Ok(BmiResponse {
        bmi: result.value,
        category: result.category_name.to_string(),
        color_token: result.color_token.to_string(),
        weight_kg: weight_unit.to_kilograms(weight),
        height_m: height_unit.to_meters(height),
        weight_unit: weight_unit.as_str().to_string(),
        height_unit: height_unit.as_str().to_string(),
    })
}

fn checked_profile(
    age: u32,
    gender: &str,
    weight_kg: f64,
    height_cm: f64,
    activity_level: &str,
) -> Result<EnergyProfile, String> {
    FormCheck::new()
        .number("age", f64::from(age))
        .text("gender", gender)
        .number("weight_kg", weight_kg)
        .number("height_cm", height_cm)
        .finish()?;

    Ok(EnergyProfile::from_raw(age, gender, weight_kg, height_cm, activity_level))
}

/// Estimate daily calories, macros, fiber and water
pub fn calculate_daily_needs(
    age: u32,
    gender: &str,
    weight_kg: f64,
    height_cm: f64,
    activity_level: &str,
) -> Result<DailyNeedsResponse, String> {
    let profile = checked_profile(age, gender, weight_kg, height_cm, activity_level)?;

    if profile.activity_level.is_none() {
        tracing::debug!(activity_level, "unrecognised activity level, using sedentary multiplier");
    }

    Ok(DailyNeedsResponse {
        resting_energy_kcal: resting_energy(&profile),
        activity_multiplier: activity_multiplier(profile.activity_level),
        activity_level_used: profile.activity_level.map(|l| l.as_str().to_string()),
        gender_used: profile.gender.as_str().to_string(),
        estimate: compute_energy_estimate(&profile),
    })
}

/// Compare what has been eaten against the profile's daily targets
pub fn track_macro_progress(
    age: u32,
    gender: &str,
    weight_kg: f64,
    height_cm: f64,
    activity_level: &str,
    consumed: &ConsumedMacros,
) -> Result<MacroProgressResponse, String> {
    let profile = checked_profile(age, gender, weight_kg, height_cm, activity_level)?;
    let targets = compute_energy_estimate(&profile);

    Ok(MacroProgressResponse {
        targets,
        progress: progress_against(consumed, &targets),
    })
}
