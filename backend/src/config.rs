//! # Engine Configuration
//!
//! Settings supplied by the caller rather than computed: the cumulative
//! spend target curve and the locale used for month labels. Stored as YAML,
//! e.g.
//!
//! ```yaml
//! cumulative_targets: [11, 23, 36, 47, 53, 61, 68, 75, 82, 90, 100, 100]
//! locale: thai
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::domain::fiscal_calendar::{MonthLabelLocale, FISCAL_MONTHS};

/// Expected cumulative percentage of budget spent by the end of each fiscal
/// month, October first
pub const DEFAULT_CUMULATIVE_TARGETS: [f64; 12] = [
    11.0, 23.0, 36.0, 47.0, 53.0, 61.0, 68.0, 75.0, 82.0, 90.0, 100.0, 100.0,
];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Target curve must have 12 entries, got {0}")]
    WrongLength(usize),
    #[error("Target for month {index} is {value}, must be within 0-100")]
    OutOfRange { index: usize, value: f64 },
    #[error("Target curve decreases at month {index}")]
    Decreasing { index: usize },
    #[error("Target curve must end at 100, ends at {0}")]
    DoesNotReachFull(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub cumulative_targets: Vec<f64>,
    pub locale: MonthLabelLocale,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cumulative_targets: DEFAULT_CUMULATIVE_TARGETS.to_vec(),
            locale: MonthLabelLocale::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml).context("Failed to parse engine config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read engine config {}", path.display()))?;
        let config = Self::from_yaml_str(&yaml)?;
        info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Check that the target curve is a 12-step, non-decreasing percentage
    /// sequence ending at 100
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.target_curve().map(|_| ())
    }

    /// The validated target curve
    pub fn target_curve(&self) -> Result<[f64; 12], ConfigError> {
        let curve: [f64; FISCAL_MONTHS as usize] = self
            .cumulative_targets
            .as_slice()
            .try_into()
            .map_err(|_| ConfigError::WrongLength(self.cumulative_targets.len()))?;

        for (index, value) in curve.iter().copied().enumerate() {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::OutOfRange { index, value });
            }
            if index > 0 && value < curve[index - 1] {
                return Err(ConfigError::Decreasing { index });
            }
        }

        let last = curve[curve.len() - 1];
        if last != 100.0 {
            return Err(ConfigError::DoesNotReachFull(last));
        }
        Ok(curve)
    }
}
