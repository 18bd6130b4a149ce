//! Draw configuration: JSON file defaults overridden by command-line flags.

use std::path::Path;

use lsys_core::HueRange;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// Everything `lsys draw` needs besides the fractal slug.
///
/// Missing fields in a config file take their defaults; a missing `depth`
/// means the fractal's own default depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    pub depth: Option<u32>,
    /// Side of the output square, in output units (default: 800).
    pub width: f64,
    /// Drawing steps per tick (default: 256).
    pub batch: u64,
    pub hue: HueRange,
    pub saturation: f64,
    pub value: f64,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            depth: None,
            width: 800.0,
            batch: 256,
            hue: HueRange::default(),
            saturation: 1.0,
            value: 1.0,
        }
    }
}

impl DrawConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str::<Self>(&content)?)
    }

    /// Reject values the session cannot use.
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(CliError::invalid(format!(
                "width must be a positive number, got {}",
                self.width
            )));
        }
        if self.batch == 0 {
            return Err(CliError::invalid("batch must be at least 1"));
        }
        if !(self.hue.start.is_finite() && self.hue.end.is_finite()) {
            return Err(CliError::invalid("hue range must be finite"));
        }
        for (name, v) in [("saturation", self.saturation), ("value", self.value)] {
            if !(0.0..=1.0).contains(&v) {
                return Err(CliError::invalid(format!("{name} must be within [0, 1], got {v}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: DrawConfig = serde_json::from_str(r#"{"batch": 32, "hue": {"end": 120.0}}"#).unwrap();
        assert_eq!(config.batch, 32);
        assert_eq!(config.width, 800.0);
        assert_eq!(config.hue, HueRange::new(0.0, 120.0));
        assert_eq!(config.depth, None);
    }

    #[test]
    fn validation() {
        assert!(DrawConfig::default().validate().is_ok());
        let bad_width = DrawConfig {
            width: 0.0,
            ..DrawConfig::default()
        };
        assert!(bad_width.validate().is_err());
        let bad_batch = DrawConfig {
            batch: 0,
            ..DrawConfig::default()
        };
        assert_eq!(bad_batch.validate().unwrap_err().exit_code(), 2);
        let bad_value = DrawConfig {
            value: 1.5,
            ..DrawConfig::default()
        };
        assert!(bad_value.validate().is_err());
    }
}
