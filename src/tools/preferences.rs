//! Preference MCP tools
//!
//! Remembers the user's preferred units and last profile in the local cache.

use serde::{Deserialize, Serialize};

use crate::cache::LocalCache;
use crate::nutrition::{HeightUnit, WeightUnit};

/// Cache key for the preference document
pub const PREFERENCES_KEY: &str = "nutrisnap_preferences";

/// Profile fields last entered into the daily needs calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProfile {
    pub age: u32,
    pub gender: String,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity_level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub weight_unit: WeightUnit,
    #[serde(default)]
    pub height_unit: HeightUnit,
    #[serde(default)]
    pub profile: Option<SavedProfile>,
}

/// Response for save_preferences
#[derive(Debug, Serialize)]
pub struct SavePreferencesResponse {
    /// False when the cache could not store the document
    pub success: bool,
    pub preferences: Preferences,
}

/// Response for clear_preferences
#[derive(Debug, Serialize)]
pub struct ClearPreferencesResponse {
    /// Whether saved preferences existed and were removed
    pub cleared: bool,
}

/// Merge the given fields into the stored preferences
pub fn save_preferences(
    cache: &LocalCache,
    weight_unit: Option<&str>,
    height_unit: Option<&str>,
    profile: Option<SavedProfile>,
) -> SavePreferencesResponse {
    let mut prefs = get_preferences(cache);

    if let Some(unit) = weight_unit {
        prefs.weight_unit = WeightUnit::from_str(unit);
    }
    if let Some(unit) = height_unit {
        prefs.height_unit = HeightUnit::from_str(unit);
    }
    if profile.is_some() {
        prefs.profile = profile;
    }

    let success = cache.put(PREFERENCES_KEY, &prefs);

    SavePreferencesResponse {
        success,
        preferences: prefs,
    }
}

/// Forget saved units and profile
pub fn clear_preferences(cache: &LocalCache) -> ClearPreferencesResponse {
    ClearPreferencesResponse {
        cleared: cache.remove(PREFERENCES_KEY),
    }
}

/// Stored preferences, or defaults when none are saved or readable
pub fn get_preferences(cache: &LocalCache) -> Preferences {
    cache.get(PREFERENCES_KEY).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{migrations::run_migrations, Database};

    fn cache(dir: &tempfile::TempDir) -> LocalCache {
        let database = Database::new(dir.path().join("prefs.db")).unwrap();
        database.with_conn(run_migrations).unwrap();
        LocalCache::new(database)
    }

    #[test]
    fn test_defaults_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = get_preferences(&cache(&dir));
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.weight_unit, WeightUnit::Kg);
    }

    #[test]
    fn test_save_merges_fields() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache(&dir);

        save_preferences(&cache, Some("lbs"), None, None);
        let profile = SavedProfile {
            age: 41,
            gender: "female".into(),
            weight_kg: 62.0,
            height_cm: 168.0,
            activity_level: "very-active".into(),
        };
        save_preferences(&cache, None, Some("ft"), Some(profile.clone()));

        let prefs = get_preferences(&cache);
        assert_eq!(prefs.weight_unit, WeightUnit::Lbs);
        assert_eq!(prefs.height_unit, HeightUnit::Ft);
        assert_eq!(prefs.profile, Some(profile));
    }

    #[test]
    fn test_save_reports_failed_write() {
        let dir = tempfile::tempdir().unwrap();
        let database = Database::new(dir.path().join("unmigrated.db")).unwrap();
        let cache = LocalCache::new(database);

        let resp = save_preferences(&cache, Some("lbs"), None, None);
        assert!(!resp.success);
        assert_eq!(get_preferences(&cache).weight_unit, WeightUnit::Kg);
    }

    #[test]
    fn test_clear_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache(&dir);

        assert!(save_preferences(&cache, Some("lbs"), Some("ft"), None).success);
        assert!(clear_preferences(&cache).cleared);
        assert_eq!(get_preferences(&cache), Preferences::default());
        assert!(!clear_preferences(&cache).cleared);
    }
}
