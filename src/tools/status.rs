//! NutriSnap Status Tool
//!
//! Runtime status of the service and usage notes for assistants.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Usage notes returned by the calculator_instructions tool
pub const CALCULATOR_INSTRUCTIONS: &str = r#"
# NutriSnap Calculator Instructions

## BMI (`calculate_bmi`)
- `weight` with `weight_unit`: "kg" (default) or "lbs"
- `height` with `height_unit`: "cm" (default) or "ft"
- Unit names are matched exactly and in lowercase; anything else is metric
- A feet height is a single decimal number of feet (5'9" is 5.75). Do NOT pass inches.
- Result is rounded to one decimal. Categories:
  - below 18.5: Underweight
  - 18.5 up to 25: Normal weight
  - 25 up to 30: Overweight
  - 30 and above: Obese

## Daily needs (`calculate_daily_needs`)
- Inputs are metric: `weight_kg`, `height_cm`, `age` in years
- `gender`: "male" selects the male equation, any other value the female one
- `activity_level`: sedentary, lightly-active, moderately-active, very-active, extra-active.
  Unknown values fall back to sedentary (1.2).
- Macros are a fixed 15% protein / 55% carbs / 30% fat split. Fiber is 14 g per 1000 kcal,
  water 35 ml per kg.

## Progress (`track_macro_progress`)
- Same profile fields plus the amounts eaten so far. Percentages cap at 100.

## Meal photos (`validate_upload`, `get_upload_preview`)
- JPEG, PNG or WebP only, 5MB at most
- A rejected file does not replace the previous preview

## Preferences (`save_preferences`, `get_preferences`)
- Store the user's units and profile once, then reuse them instead of asking again
"#;

/// Runtime status of the NutriSnap service
#[derive(Debug, Clone, Serialize)]
pub struct NutrisnapStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    pub fn get_status(&self) -> NutrisnapStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        NutrisnapStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
