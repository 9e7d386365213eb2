//! Daily energy and macronutrient estimates
//!
//! Resting energy from the Mifflin-St Jeor style equation, scaled by an activity
//! multiplier, then split into fixed macronutrient shares.

use serde::{Deserialize, Serialize};

/// Protein share of total calories
pub const PROTEIN_SHARE: f64 = 0.15;
/// Carbohydrate share of total calories
pub const CARB_SHARE: f64 = 0.55;
/// Fat share of total calories
pub const FAT_SHARE: f64 = 0.30;

/// Energy density of protein (kcal/g)
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// Energy density of carbohydrate (kcal/g)
pub const KCAL_PER_G_CARB: f64 = 4.0;
/// Energy density of fat (kcal/g)
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Fiber grams recommended per 1000 kcal
pub const FIBER_G_PER_1000_KCAL: f64 = 14.0;
/// Water milliliters per kilogram of body weight
pub const WATER_ML_PER_KG: f64 = 35.0;

/// Multiplier used when no activity level is known
pub const DEFAULT_ACTIVITY_MULTIPLIER: f64 = 1.2;

/// Gender branch of the resting energy equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Only the exact string `"male"` selects the male equation; every other
    /// value, including unrecognised ones, uses the female equation.
    pub fn from_str(s: &str) -> Self {
        if s == "male" {
            Gender::Male
        } else {
            Gender::Female
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// Self-reported activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sedentary" => Some(ActivityLevel::Sedentary),
            "lightly-active" => Some(ActivityLevel::LightlyActive),
            "moderately-active" => Some(ActivityLevel::ModeratelyActive),
            "very-active" => Some(ActivityLevel::VeryActive),
            "extra-active" => Some(ActivityLevel::ExtraActive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly-active",
            ActivityLevel::ModeratelyActive => "moderately-active",
            ActivityLevel::VeryActive => "very-active",
            ActivityLevel::ExtraActive => "extra-active",
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }
}

/// Multiplier for an optional activity level
pub fn activity_multiplier(level: Option<ActivityLevel>) -> f64 {
    level
        .map(|l| l.multiplier())
        .unwrap_or(DEFAULT_ACTIVITY_MULTIPLIER)
}

/// Inputs to the energy estimate (metric units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyProfile {
    /// Age in years
    pub age: u32,
    pub gender: Gender,
    pub weight_kg: f64,
    pub height_cm: f64,
    /// `None` when the level was missing or unrecognised
    pub activity_level: Option<ActivityLevel>,
}

impl EnergyProfile {
    /// Build a profile from loosely-typed form values
    pub fn from_raw(age: u32, gender: &str, weight_kg: f64, height_cm: f64, activity_level: &str) -> Self {
        Self {
            age,
            gender: Gender::from_str(gender),
            weight_kg,
            height_cm,
            activity_level: ActivityLevel::from_str(activity_level),
        }
    }
}

/// Estimated daily needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyEstimate {
    pub calories: u32,
    pub protein_grams: u32,
    pub carb_grams: u32,
    pub fat_grams: u32,
    pub fiber_grams: u32,
    pub water_ml: u32,
}

impl EnergyEstimate {
    /// Calories implied by the macronutrient grams. Differs from `calories`
    /// by the rounding of each macro.
    pub fn macro_calories(&self) -> u32 {
        self.protein_grams * KCAL_PER_G_PROTEIN as u32
            + self.carb_grams * KCAL_PER_G_CARB as u32
            + self.fat_grams * KCAL_PER_G_FAT as u32
    }
}

/// Resting energy expenditure in kcal/day
pub fn resting_energy(profile: &EnergyProfile) -> f64 {
    let age = f64::from(profile.age);
    match profile.gender {
        Gender::Male => {
            88.362 + 13.397 * profile.weight_kg + 4.799 * profile.height_cm - 5.677 * age
        }
        Gender::Female => {
            447.593 + 9.247 * profile.weight_kg + 3.098 * profile.height_cm - 4.330 * age
        }
    }
}

/// Round to the nearest whole number. Negative and NaN values saturate to zero.
fn round_u32(value: f64) -> u32 {
    value.round() as u32
}

/// Compute the full daily estimate for a profile
pub fn compute_energy_estimate(profile: &EnergyProfile) -> EnergyEstimate {
    let bmr = resting_energy(profile);
    let calories = round_u32(bmr * activity_multiplier(profile.activity_level));
    let kcal = f64::from(calories);

    EnergyEstimate {
        calories,
        protein_grams: round_u32(kcal * PROTEIN_SHARE / KCAL_PER_G_PROTEIN),
        carb_grams: round_u32(kcal * CARB_SHARE / KCAL_PER_G_CARB),
        fat_grams: round_u32(kcal * FAT_SHARE / KCAL_PER_G_FAT),
        fiber_grams: round_u32(kcal / 1000.0 * FIBER_G_PER_1000_KCAL),
        water_ml: round_u32(profile.weight_kg * WATER_ML_PER_KG),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_profile() -> EnergyProfile {
        EnergyProfile {
            age: 30,
            gender: Gender::Male,
            weight_kg: 80.0,
            height_cm: 180.0,
            activity_level: Some(ActivityLevel::ModeratelyActive),
        }
    }

    #[test]
    fn test_male_moderately_active() {
        let profile = reference_profile();
        // 88.362 + 1071.76 + 863.82 - 170.31
        assert!((resting_energy(&profile) - 1853.632).abs() < 1e-9);

        let estimate = compute_energy_estimate(&profile);
        assert_eq!(estimate.calories, 2873);
        assert_eq!(estimate.protein_grams, 108);
        assert_eq!(estimate.carb_grams, 395);
        assert_eq!(estimate.fat_grams, 96);
        assert_eq!(estimate.fiber_grams, 40);
        assert_eq!(estimate.water_ml, 2800);
    }

    #[test]
    fn test_macro_calories_within_rounding() {
        for weight in [50.0, 63.5, 80.0, 101.2] {
            let mut profile = reference_profile();
            profile.weight_kg = weight;
            let estimate = compute_energy_estimate(&profile);
            let drift = i64::from(estimate.macro_calories()) - i64::from(estimate.calories);
            assert!(drift.abs() <= 9, "drift {} too large", drift);
        }
    }

    #[test]
    fn test_unrecognised_gender_uses_female_equation() {
        let other = EnergyProfile::from_raw(30, "other", 60.0, 165.0, "sedentary");
        let female = EnergyProfile::from_raw(30, "female", 60.0, 165.0, "sedentary");
        assert_eq!(other.gender, Gender::Female);
        assert_eq!(compute_energy_estimate(&other), compute_energy_estimate(&female));

        // 447.593 + 554.82 + 511.17 - 129.9 = 1383.683; x1.2 = 1660.4196
        assert_eq!(compute_energy_estimate(&female).calories, 1660);
    }

    #[test]
    fn test_gender_match_is_exact() {
        assert_eq!(Gender::from_str("male"), Gender::Male);
        assert_eq!(Gender::from_str("Male"), Gender::Female);
        assert_eq!(Gender::from_str(""), Gender::Female);
    }

    #[test]
    fn test_unknown_activity_defaults_to_sedentary_multiplier() {
        let unknown = EnergyProfile::from_raw(30, "male", 80.0, 180.0, "couch-athlete");
        assert_eq!(unknown.activity_level, None);
        let sedentary = EnergyProfile::from_raw(30, "male", 80.0, 180.0, "sedentary");
        assert_eq!(compute_energy_estimate(&unknown), compute_energy_estimate(&sedentary));
        // 1853.632 x 1.2 = 2224.3584
        assert_eq!(compute_energy_estimate(&unknown).calories, 2224);
    }

    #[test]
    fn test_activity_multipliers() {
        assert_eq!(activity_multiplier(None), 1.2);
        assert_eq!(activity_multiplier(Some(ActivityLevel::LightlyActive)), 1.375);
        assert_eq!(activity_multiplier(Some(ActivityLevel::VeryActive)), 1.725);
        assert_eq!(activity_multiplier(Some(ActivityLevel::ExtraActive)), 1.9);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let profile = reference_profile();
        assert_eq!(compute_energy_estimate(&profile), compute_energy_estimate(&profile));
    }

    #[test]
    fn test_activity_level_serde_names() {
        let json = serde_json::to_string(&ActivityLevel::ModeratelyActive).unwrap();
        assert_eq!(json, "\"moderately-active\"");
    }
}
