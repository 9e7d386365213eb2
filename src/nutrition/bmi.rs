//! Body Mass Index
//!
//! BMI calculation from possibly-imperial inputs and the WHO-style category ladder.

use serde::{Deserialize, Serialize};

use super::units::{HeightUnit, WeightUnit};

/// Qualitative BMI band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    NormalWeight,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// Display token the presentation layer uses to colour the category
    pub fn color_token(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "var(--secondary-blue)",
            BmiCategory::NormalWeight => "var(--success-green)",
            BmiCategory::Overweight => "var(--warning-orange)",
            BmiCategory::Obese => "var(--error-red)",
        }
    }
}

/// A rounded BMI value with its category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiResult {
    pub value: f64,
    pub category: BmiCategory,
    pub category_name: &'static str,
    pub color_token: &'static str,
}

/// Compute BMI rounded to one decimal place.
///
/// Inputs are not checked: a zero height yields an infinite value and a
/// non-finite input propagates as NaN.
pub fn compute_bmi(weight: f64, height: f64, weight_unit: WeightUnit, height_unit: HeightUnit) -> f64 {
    let weight_kg = weight_unit.to_kilograms(weight);
    let height_m = height_unit.to_meters(height);

    let bmi = weight_kg / (height_m * height_m);
    (bmi * 10.0).round() / 10.0
}

/// Classify a BMI value. Each band is closed at its lower bound.
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::NormalWeight
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Compute and classify in one step
pub fn body_mass_index(
    weight: f64,
    height: f64,
    weight_unit: WeightUnit,
    height_unit: HeightUnit,
) -> BmiResult {
    let value = compute_bmi(weight, height, weight_unit, height_unit);
    let category = classify_bmi(value);
    BmiResult {
        value,
        category,
        category_name: category.display_name(),
        color_token: category.color_token(),
    }
}
