//! NutriSnap MCP Server Implementation
//!
//! Exposes the calculators, upload intake and preferences as MCP tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::cache::LocalCache;
use crate::db::Database;
use crate::nutrition::ConsumedMacros;
use crate::tools::metrics;
use crate::tools::preferences::{self, SavedProfile};
use crate::tools::status::StatusTracker;
use crate::tools::upload::{self, NotificationLog, PreviewSlot};
use crate::upload::{Base64DataUriReader, UploadIntake};

/// NutriSnap MCP Service
#[derive(Clone)]
pub struct NutrisnapService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    cache: LocalCache,
    intake: Arc<UploadIntake>,
    preview: Arc<PreviewSlot>,
    notifications: Arc<NotificationLog>,
    tool_router: ToolRouter<NutrisnapService>,
}

impl NutrisnapService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        let preview = Arc::new(PreviewSlot::default());
        let notifications = Arc::new(NotificationLog::default());
        let intake = UploadIntake::new(
            notifications.clone(),
            preview.clone(),
            Arc::new(Base64DataUriReader),
        );

        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            cache: LocalCache::new(database),
            intake: Arc::new(intake),
            preview,
            notifications,
            tool_router: Self::tool_router(),
        }
    }
}

/// Serialize a tool response as pretty JSON text content
fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Calculator Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateBmiParams {
    /// Body weight
    pub weight: f64,
    /// Body height
    pub height: f64,
    /// "kg" (default) or "lbs"
    #[serde(default = "default_weight_unit")]
    pub weight_unit: String,
    /// "cm" (default) or "ft" (decimal feet)
    #[serde(default = "default_height_unit")]
    pub height_unit: String,
}

fn default_weight_unit() -> String { "kg".to_string() }
fn default_height_unit() -> String { "cm".to_string() }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateDailyNeedsParams {
    /// Age in years
    pub age: u32,
    /// "male" or "female"
    pub gender: String,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// sedentary, lightly-active, moderately-active, very-active or extra-active
    #[serde(default = "default_activity_level")]
    pub activity_level: String,
}

fn default_activity_level() -> String { "sedentary".to_string() }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TrackMacroProgressParams {
    /// Age in years
    pub age: u32,
    /// "male" or "female"
    pub gender: String,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    #[serde(default = "default_activity_level")]
    pub activity_level: String,
    /// Calories eaten so far (kcal)
    #[serde(default)]
    pub calories: f64,
    /// Protein eaten so far (g)
    #[serde(default)]
    pub protein: f64,
    /// Carbohydrates eaten so far (g)
    #[serde(default)]
    pub carbs: f64,
    /// Fat eaten so far (g)
    #[serde(default)]
    pub fat: f64,
    /// Fiber eaten so far (g)
    #[serde(default)]
    pub fiber: f64,
}

// ============================================================================
// Upload / Preference Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ValidateUploadParams {
    /// Absolute path to the image file
    pub file_path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SavePreferencesParams {
    /// "kg" or "lbs"
    pub weight_unit: Option<String>,
    /// "cm" or "ft"
    pub height_unit: Option<String>,
    /// Profile to remember (all fields required when given)
    pub profile: Option<ProfileParams>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ProfileParams {
    pub age: u32,
    pub gender: String,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity_level: String,
}

impl From<ProfileParams> for SavedProfile {
    fn from(p: ProfileParams) -> Self {
        Self {
            age: p.age,
            gender: p.gender,
            weight_kg: p.weight_kg,
            height_cm: p.height_cm,
            activity_level: p.activity_level,
        }
    }
}

// ============================================================================
// Tools
// ============================================================================

#[tool_router]
impl NutrisnapService {
    // --- Status ---

    #[tool(description = "Get the current status of the NutriSnap service including build info, database status, and process information")]
    async fn nutrisnap_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        json_result(&tracker.get_status())
    }

    #[tool(description = "Get instructions for the BMI, daily needs, upload and preference tools. Call this when unsure which units or values to pass.")]
    fn calculator_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::CALCULATOR_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(CALCULATOR_INSTRUCTIONS)]))
    }

    // --- Calculators ---

    #[tool(description = "Calculate Body Mass Index and its category from weight (kg or lbs) and height (cm or decimal ft)")]
    fn calculate_bmi(&self, Parameters(p): Parameters<CalculateBmiParams>) -> Result<CallToolResult, McpError> {
        let result = metrics::calculate_bmi(p.weight, p.height, &p.weight_unit, &p.height_unit)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Estimate daily calories, protein, carbs, fat, fiber and water from age, gender, weight, height and activity level")]
    fn calculate_daily_needs(&self, Parameters(p): Parameters<CalculateDailyNeedsParams>) -> Result<CallToolResult, McpError> {
        let result = metrics::calculate_daily_needs(p.age, &p.gender, p.weight_kg, p.height_cm, &p.activity_level)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Compare calories and macros eaten so far against the daily targets for a profile. Percentages are capped at 100.")]
    fn track_macro_progress(&self, Parameters(p): Parameters<TrackMacroProgressParams>) -> Result<CallToolResult, McpError> {
        let consumed = ConsumedMacros {
            calories: p.calories,
            protein: p.protein,
            carbs: p.carbs,
            fat: p.fat,
            fiber: p.fiber,
        };
        let result = metrics::track_macro_progress(p.age, &p.gender, p.weight_kg, p.height_cm, &p.activity_level, &consumed)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    // --- Uploads ---

    #[tool(description = "Validate a meal photo on disk (JPEG, PNG or WebP, at most 5MB). Accepted files become the current preview.")]
    async fn validate_upload(&self, Parameters(p): Parameters<ValidateUploadParams>) -> Result<CallToolResult, McpError> {
        let result = upload::validate_upload(&self.intake, &p.file_path)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get the current upload preview (as a data URI) and recent upload notifications")]
    fn get_upload_preview(&self) -> Result<CallToolResult, McpError> {
        json_result(&upload::get_upload_preview(&self.preview, &self.notifications))
    }

    // --- Preferences ---

    #[tool(description = "Remember preferred units and/or the user's profile. Omitted fields keep their saved values.")]
    fn save_preferences(&self, Parameters(p): Parameters<SavePreferencesParams>) -> Result<CallToolResult, McpError> {
        let result = preferences::save_preferences(
            &self.cache,
            p.weight_unit.as_deref(),
            p.height_unit.as_deref(),
            p.profile.map(SavedProfile::from),
        );
        json_result(&result)
    }

    #[tool(description = "Forget the saved units and profile")]
    fn clear_preferences(&self) -> Result<CallToolResult, McpError> {
        json_result(&preferences::clear_preferences(&self.cache))
    }

    #[tool(description = "Get the saved units and profile (defaults: kg, cm, no profile)")]
    fn get_preferences(&self) -> Result<CallToolResult, McpError> {
        json_result(&preferences::get_preferences(&self.cache))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for NutrisnapService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nutrisnap".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("NutriSnap".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "NutriSnap - body metrics and daily nutrition targets. \
                 Call calculator_instructions first if unsure about units. \
                 Calculators: calculate_bmi, calculate_daily_needs, track_macro_progress. \
                 Meal photos: validate_upload, get_upload_preview. \
                 Preferences: save_preferences, get_preferences, clear_preferences. \
                 Status: nutrisnap_status."
                    .into(),
            ),
        }
    }
}
