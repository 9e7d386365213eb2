//! Nutrition calculation module
//!
//! Body mass index, daily energy estimates and macro progress.

pub mod bmi;
pub mod energy;
pub mod progress;
pub mod units;

pub use bmi::{body_mass_index, classify_bmi, compute_bmi, BmiCategory, BmiResult};
pub use energy::{
    activity_multiplier, compute_energy_estimate, resting_energy, ActivityLevel, EnergyEstimate,
    EnergyProfile, Gender,
};
pub use progress::{progress_against, ConsumedMacros, MacroKind, MacroProgress};
pub use units::{HeightUnit, WeightUnit};
