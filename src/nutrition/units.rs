//! Measurement units for body metrics
//!
//! Weight and height unit types and the factors used to bring them into metric.

use serde::{Deserialize, Serialize};

// ============================================================================
// Conversion Constants
// ============================================================================

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;
/// Meters per foot
pub const M_PER_FT: f64 = 0.3048;
/// Centimeters per meter
pub const CM_PER_M: f64 = 100.0;

/// Unit a body weight was entered in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }

    /// Parse a unit name. Only the exact value `"lbs"` is imperial.
    pub fn from_str(s: &str) -> Self {
        match s {
            "lbs" => WeightUnit::Lbs,
            _ => WeightUnit::Kg,
        }
    }

    /// Convert a weight in this unit to kilograms
    pub fn to_kilograms(&self, weight: f64) -> f64 {
        match self {
            WeightUnit::Kg => weight,
            WeightUnit::Lbs => weight * KG_PER_LB,
        }
    }
}

/// Unit a body height was entered in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    #[default]
    Cm,
    Ft,
}

impl HeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeightUnit::Cm => "cm",
            HeightUnit::Ft => "ft",
        }
    }

    /// Parse a unit name. Only the exact value `"ft"` is imperial.
    pub fn from_str(s: &str) -> Self {
        match s {
            "ft" => HeightUnit::Ft,
            _ => HeightUnit::Cm,
        }
    }

    /// Convert a height in this unit to meters.
    ///
    /// Feet values are scaled by [`M_PER_FT`] as-is: a caller passing inches or a
    /// combined feet/inches figure gets that number treated as whole feet.
    pub fn to_meters(&self, height: f64) -> f64 {
        match self {
            HeightUnit::Cm => height / CM_PER_M,
            HeightUnit::Ft => height * M_PER_FT,
        }
    }
}
