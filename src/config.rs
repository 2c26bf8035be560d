use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StaffingError};

/// Environment variable naming a JSON file with unit settings.
pub const CONFIG_ENV_VAR: &str = "STAFFING_CONFIG";

/// Fixed properties of the unit and its shift pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitConfig {
    pub bed_count: u8,
    pub am_shift_hours: f64,
    pub pm_shift_hours: f64,
    pub night_shift_hours: f64,
    pub ward_clerk_hours: f64,
    pub am515_hours: f64,
    /// Ratio classes (the N of 1:N) offered as admission options.
    pub capacity_ratio_classes: Vec<u32>,
}

impl Default for UnitConfig {
    fn default() -> Self {
        UnitConfig {
            bed_count: 11,
            am_shift_hours: 8.0,
            pm_shift_hours: 8.0,
            night_shift_hours: 10.0,
            ward_clerk_hours: 7.5,
            am515_hours: 8.0,
            capacity_ratio_classes: vec![1, 2, 3, 4],
        }
    }
}

impl UnitConfig {
    /// Reads settings from a JSON file. Missing keys keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: UnitConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings no unit can have: zero beds or a 1:0 ratio class.
    pub fn validate(&self) -> Result<()> {
        if self.bed_count == 0 {
            return Err(StaffingError::InvalidInput("bed_count must be at least 1".to_string()));
        }
        if self.capacity_ratio_classes.contains(&0) {
            return Err(StaffingError::InvalidInput(
                "capacity_ratio_classes must not contain 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads from the file named by `STAFFING_CONFIG`, or falls back to defaults.
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => {
                tracing::info!(path = %path, "loading unit config");
                Self::load(path.trim())
            }
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_unit() {
        let config = UnitConfig::default();
        assert_eq!(config.bed_count, 11);
        assert_eq!(config.night_shift_hours, 10.0);
        assert_eq!(config.capacity_ratio_classes, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"night_shift_hours": 12.0, "capacity_ratio_classes": [1, 2, 3]}}"#).unwrap();

        let config = UnitConfig::load(file.path()).unwrap();
        assert_eq!(config.night_shift_hours, 12.0);
        assert_eq!(config.capacity_ratio_classes, vec![1, 2, 3]);
        assert_eq!(config.bed_count, 11);
        assert_eq!(config.ward_clerk_hours, 7.5);
    }

    #[test]
    fn test_bad_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(UnitConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        for body in [r#"{"bed_count": 0}"#, r#"{"capacity_ratio_classes": [0, 2]}"#] {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(file, "{}", body).unwrap();
            assert!(matches!(
                UnitConfig::load(file.path()),
                Err(StaffingError::InvalidInput(_))
            ));
        }
        assert!(UnitConfig::default().validate().is_ok());
    }
}
