// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Run configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::PricingError;
use crate::pricing::{validate_materials, MaterialProfile, PricingConstants};

/// Default configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "meshprice.toml";

/// Pricing run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Directory scanned for mesh files
    pub source_dir: PathBuf,
    /// CSV table written by the run
    pub output: PathBuf,
    /// Case-sensitive file name suffix of mesh files
    pub extension: String,
    /// Worker threads, `None` for one per core
    pub parallelism: Option<usize>,
    /// Per-file limit on mesh loading and volume computation, in seconds
    pub file_timeout_secs: Option<f64>,
    /// Abort the whole run on the first unreadable mesh
    pub fail_fast: bool,
    pub show_progress: bool,
    pub constants: PricingConstants,
    /// Alloys priced, in column order
    pub materials: Vec<MaterialProfile>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("STL_Files"),
            output: PathBuf::from("volume.csv"),
            extension: ".stl".to_string(),
            parallelism: None,
            file_timeout_secs: Some(60.0),
            fail_fast: false,
            show_progress: true,
            constants: PricingConstants::default(),
            materials: MaterialProfile::standard_set(),
        }
    }
}

impl PricingConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: PricingConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Uses `explicit` if given, else `meshprice.toml` when present, else
    /// the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None if Path::new(CONFIG_FILE).exists() => Self::from_file(CONFIG_FILE)?,
            None => Self::default(),
        };

        if let Ok(source_dir) = std::env::var("MESHPRICE_SOURCE_DIR") {
            config.source_dir = PathBuf::from(source_dir);
        }

        if let Ok(output) = std::env::var("MESHPRICE_OUTPUT") {
            config.output = PathBuf::from(output);
        }

        if let Ok(parallelism) = std::env::var("MESHPRICE_PARALLELISM") {
            config.parallelism = parallelism.parse().ok();
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn file_timeout(&self) -> Option<Duration> {
        self.file_timeout_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    /// Check every invariant before any file is touched
    pub fn validate(&self) -> crate::error::Result<()> {
        validate_materials(&self.materials)?;
        self.constants.validate()?;

        if self.extension.is_empty() {
            return Err(PricingError::InvalidConfiguration(
                "mesh file extension must not be empty".to_string(),
            ));
        }
        if self.parallelism == Some(0) {
            return Err(PricingError::InvalidConfiguration(
                "parallelism must be at least 1".to_string(),
            ));
        }
        if let Some(secs) = self.file_timeout_secs {
            if !secs.is_finite() || secs <= 0.0 {
                return Err(PricingError::InvalidConfiguration(format!(
                    "file timeout must be a positive number of seconds, got {}",
                    secs
                )));
            }
            if Duration::try_from_secs_f64(secs).is_err() {
                return Err(PricingError::InvalidConfiguration(format!(
                    "file timeout of {} seconds is out of range",
                    secs
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = PricingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.source_dir, PathBuf::from("STL_Files"));
        assert_eq!(config.output, PathBuf::from("volume.csv"));
        assert_eq!(config.file_timeout(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_save_and_reload() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("meshprice.toml");

        let mut config = PricingConfig::default();
        config.parallelism = Some(2);
        config.materials.push(MaterialProfile::new("Platinum 950", 20.7, 52.0));
        config.save(&path)?;

        let reloaded = PricingConfig::from_file(&path)?;
        assert_eq!(reloaded, config);

        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "fail_fast = true\n\n[constants]\nprofit_multiplier = 2.0\nmanufacturing_cost = 10.0\nhourly_wage = 50.0\ntax_rate = 0.2\n")?;

        let config = PricingConfig::from_file(&path)?;
        assert!(config.fail_fast);
        assert_eq!(config.constants.profit_multiplier, 2.0);
        assert_eq!(config.materials, MaterialProfile::standard_set());
        assert_eq!(config.extension, ".stl");

        Ok(())
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut config = PricingConfig::default();
        config.parallelism = Some(0);
        assert!(config.validate().is_err());

        let mut config = PricingConfig::default();
        config.file_timeout_secs = Some(0.0);
        assert!(config.validate().is_err());

        let mut config = PricingConfig::default();
        config.constants.tax_rate = 1.5;
        assert!(matches!(
            config.validate(),
            Err(PricingError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_out_of_range_timeout_rejected() {
        let mut config = PricingConfig::default();
        config.file_timeout_secs = Some(1e20);
        assert!(matches!(
            config.validate(),
            Err(PricingError::InvalidConfiguration(_))
        ));
        assert_eq!(config.file_timeout(), None);

        config.file_timeout_secs = Some(86_400.0 * 365.0);
        assert!(config.validate().is_ok());
        assert_eq!(config.file_timeout(), Some(Duration::from_secs(86_400 * 365)));
    }
}
