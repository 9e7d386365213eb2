//! NutriSnap Tools module
//!
//! MCP tool implementations.

pub mod metrics;
pub mod preferences;
pub mod status;
pub mod upload;
pub mod validation;
