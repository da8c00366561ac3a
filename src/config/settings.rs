//! User settings for FamLedger
//!
//! Manages user preferences such as family mode, the savings goal rate used by
//! the planner, and the default reporting window.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::aggregation::DEFAULT_SAVINGS_GOAL_RATE;
use crate::error::LedgerError;
use crate::models::RangePreset;

/// User settings for FamLedger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Whether the ledger is shared by a household. New monthly plans are
    /// family plans when this is set, and transactions must name a member.
    #[serde(default = "default_family_mode")]
    pub family_mode: bool,

    /// Share of expected income the planner treats as the savings goal
    #[serde(default = "default_savings_goal_rate")]
    pub savings_goal_rate: f64,

    /// Window used by reports when no range is given
    #[serde(default)]
    pub default_range: RangePreset,

    /// Progress percentage at which a category counts as "near" its budget
    #[serde(default = "default_near_budget_pct")]
    pub near_budget_pct: f64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_family_mode() -> bool {
    true
}

fn default_savings_goal_rate() -> f64 {
    DEFAULT_SAVINGS_GOAL_RATE
}

fn default_near_budget_pct() -> f64 {
    80.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            family_mode: default_family_mode(),
            savings_goal_rate: default_savings_goal_rate(),
            default_range: RangePreset::default(),
            near_budget_pct: default_near_budget_pct(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        tracing::debug!(path = %settings_path.display(), "loaded settings");
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        if !(0.0..=1.0).contains(&self.savings_goal_rate) {
            return Err(LedgerError::Config(format!(
                "savings_goal_rate must be between 0 and 1, got {}",
                self.savings_goal_rate
            )));
        }
        if !self.near_budget_pct.is_finite() || self.near_budget_pct <= 0.0 {
            return Err(LedgerError::Config(format!(
                "near_budget_pct must be positive, got {}",
                self.near_budget_pct
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.family_mode);
        assert_eq!(settings.savings_goal_rate, 0.2);
        assert_eq!(settings.default_range, RangePreset::Monthly);
        assert_eq!(settings.currency_symbol, "$");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.family_mode = false;
        settings.savings_goal_rate = 0.3;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(!loaded.family_mode);
        assert_eq!(loaded.savings_goal_rate, 0.3);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"family_mode": false}"#).unwrap();
        assert!(!settings.family_mode);
        assert_eq!(settings.savings_goal_rate, 0.2);
        assert_eq!(settings.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_rejects_out_of_range_goal_rate() {
        let settings = Settings {
            savings_goal_rate: 1.5,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
