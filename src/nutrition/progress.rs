//! Macro progress bars
//!
//! Intake-versus-target figures for the nutrition dashboard.

use serde::{Deserialize, Serialize};

use super::energy::EnergyEstimate;

/// Tracked nutrient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacroKind {
    Calories,
    Protein,
    Carbs,
    Fat,
    Fiber,
}

/// Icon shown for labels that are not a known nutrient
pub const FALLBACK_ICON: &str = "📊";

impl MacroKind {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Calories" => Some(MacroKind::Calories),
            "Protein" => Some(MacroKind::Protein),
            "Carbs" => Some(MacroKind::Carbs),
            "Fat" => Some(MacroKind::Fat),
            "Fiber" => Some(MacroKind::Fiber),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MacroKind::Calories => "Calories",
            MacroKind::Protein => "Protein",
            MacroKind::Carbs => "Carbs",
            MacroKind::Fat => "Fat",
            MacroKind::Fiber => "Fiber",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            MacroKind::Calories => "🔥",
            MacroKind::Protein => "🥩",
            MacroKind::Carbs => "🍞",
            MacroKind::Fat => "🥑",
            MacroKind::Fiber => "🌾",
        }
    }

    /// Suffix appended to amounts, including any separating space
    pub fn unit(&self) -> &'static str {
        match self {
            MacroKind::Calories => " kcal",
            _ => "g",
        }
    }
}

/// A single rendered progress bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroProgress {
    pub label: String,
    pub icon: &'static str,
    pub value: f64,
    pub max_value: f64,
    /// Capped at 100, and 0 when there is no positive target
    pub percentage: f64,
    /// e.g. "120g / 150g"
    pub caption: String,
    /// e.g. "80.0%"
    pub percentage_label: String,
}

impl MacroProgress {
    pub fn new(label: &str, value: f64, max_value: f64) -> Self {
        let kind = MacroKind::from_label(label);
        let icon = kind.map(|k| k.icon()).unwrap_or(FALLBACK_ICON);
        let unit = kind.map(|k| k.unit()).unwrap_or("");

        let percentage = if max_value > 0.0 {
            (value / max_value * 100.0).min(100.0)
        } else {
            0.0
        };

        Self {
            label: label.to_string(),
            icon,
            value,
            max_value,
            percentage,
            caption: format!("{}{} / {}{}", value, unit, max_value, unit),
            percentage_label: format!("{:.1}%", percentage),
        }
    }
}

/// Amounts eaten so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumedMacros {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
}

/// Build the five dashboard bars against a daily estimate
pub fn progress_against(consumed: &ConsumedMacros, target: &EnergyEstimate) -> Vec<MacroProgress> {
    vec![
        MacroProgress::new(MacroKind::Calories.label(), consumed.calories, f64::from(target.calories)),
        MacroProgress::new(MacroKind::Protein.label(), consumed.protein, f64::from(target.protein_grams)),
        MacroProgress::new(MacroKind::Carbs.label(), consumed.carbs, f64::from(target.carb_grams)),
        MacroProgress::new(MacroKind::Fat.label(), consumed.fat, f64::from(target.fat_grams)),
        MacroProgress::new(MacroKind::Fiber.label(), consumed.fiber, f64::from(target.fiber_grams)),
    ]
}
