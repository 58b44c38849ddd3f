//! # Market Configuration
//!
//! Tunable constants for a marketplace deployment, loaded from YAML:
//!
//! ```yaml
//! scoring:
//!   over_cap_score: 0.5
//!   price_tiers:
//!     - { max_ratio: 0.7, score: 1.5 }
//!     - { max_ratio: 0.85, score: 1.2 }
//!     - { max_ratio: 1.0, score: 1.0 }
//! locale:
//!   locale: en-AU
//!   currency_code: AUD
//! geofence:
//!   check_in_radius_meters: 200
//! ```
//!
//! Every section and field is optional; omitted values take the defaults,
//! which reproduce the production scoring constants and the en-AU locale.
//! A loaded configuration is validated before it is returned.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ValidationError};
use crate::score::ScoringPolicy;
use crate::text::LocaleSettings;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "VC_CONFIG";

/// Geofence defaults for booking check-ins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeofenceSettings {
    /// How close a provider must be to the booking address to check in.
    pub check_in_radius_meters: f64,
}

impl Default for GeofenceSettings {
    fn default() -> Self {
        Self {
            check_in_radius_meters: 200.0,
        }
    }
}

/// Top-level configuration for the marketplace core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketConfig {
    /// Fair Price Score thresholds and weights.
    pub scoring: ScoringPolicy,
    /// Currency and date formatting.
    pub locale: LocaleSettings,
    /// Geofence defaults.
    pub geofence: GeofenceSettings,
}

impl MarketConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml_str(&yaml)?;
        tracing::debug!(path = %path.display(), "loaded market configuration");
        Ok(config)
    }

    /// Load from an explicit path, else from `VC_CONFIG`, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => {
                tracing::debug!("no configuration file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check cross-field consistency.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.scoring.validate()?;
        self.locale.validate()?;
        let radius = self.geofence.check_in_radius_meters;
        if !radius.is_finite() || radius < 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "geofence.check_in_radius_meters",
                value: radius,
                expected: "a finite number of at least 0",
            });
        }
        Ok(())
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_yields_defaults() {
        let config = MarketConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, MarketConfig::default());
        assert_eq!(config.scoring, ScoringPolicy::default());
        assert_eq!(config.locale.currency_code, "AUD");
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let yaml = "scoring:\n  max_score: 4.5\nlocale:\n  currency_symbol: \"A$\"\n";
        let config = MarketConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.scoring.max_score, 4.5);
        assert_eq!(config.scoring.rating_weight, 1.5);
        assert_eq!(config.locale.currency_symbol, "A$");
        assert_eq!(config.locale.thousands_separator, ",");
    }

    #[test]
    fn unknown_top_level_key_is_rejected() {
        assert!(matches!(
            MarketConfig::from_yaml_str("scorng: {}"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn unknown_nested_key_is_rejected() {
        for yaml in [
            "scoring:\n  max_scor: 4.0\n",
            "scoring:\n  price_tiers:\n    - { max_ratio: 0.7, scor: 1.5 }\n",
            "scoring:\n  response_tiers:\n    - { max_hour: 2, score: 1.0 }\n",
            "locale:\n  currency_symbl: \"A$\"\n",
            "geofence:\n  check_in_radius: 350\n",
        ] {
            assert!(
                matches!(MarketConfig::from_yaml_str(yaml), Err(ConfigError::Parse(_))),
                "{yaml}"
            );
        }
    }

    #[test]
    fn inconsistent_policy_is_rejected() {
        let yaml = "scoring:\n  price_tiers:\n    - { max_ratio: 1.0, score: 1.0 }\n    - { max_ratio: 0.7, score: 1.5 }\n";
        assert!(matches!(
            MarketConfig::from_yaml_str(yaml),
            Err(ConfigError::Invalid(ValidationError::InvalidPolicy(_)))
        ));
    }

    #[test]
    fn negative_radius_is_rejected() {
        let yaml = "geofence:\n  check_in_radius_meters: -5\n";
        assert!(matches!(
            MarketConfig::from_yaml_str(yaml),
            Err(ConfigError::Invalid(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "geofence:\n  check_in_radius_meters: 350").unwrap();
        let config = MarketConfig::load(file.path()).unwrap();
        assert_eq!(config.geofence.check_in_radius_meters, 350.0);
    }

    #[test]
    fn load_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml");
        let err = MarketConfig::load(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("absent.yaml"));
    }

    #[test]
    fn resolve_prefers_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "scoring:\n  max_score: 4.0").unwrap();
        let config = MarketConfig::resolve(Some(file.path())).unwrap();
        assert_eq!(config.scoring.max_score, 4.0);
    }

    #[test]
    fn resolve_falls_back_to_env_var() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "geofence:\n  check_in_radius_meters: 425").unwrap();

        // The only test in this crate that reads or writes the variable.
        std::env::set_var(CONFIG_ENV_VAR, file.path());
        let from_env = MarketConfig::resolve(None);
        std::env::remove_var(CONFIG_ENV_VAR);

        assert_eq!(from_env.unwrap().geofence.check_in_radius_meters, 425.0);
    }

    #[test]
    fn yaml_roundtrip_preserves_config() {
        let config = MarketConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(MarketConfig::from_yaml_str(&yaml).unwrap(), config);
    }
}
