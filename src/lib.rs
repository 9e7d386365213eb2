//! NutriSnap Library
//!
//! Body metric calculators, daily nutrition estimates and meal photo intake.

pub mod build_info;
pub mod cache;
pub mod config;
pub mod db;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
pub mod upload;
