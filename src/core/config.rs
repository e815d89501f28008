use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::error::ReflowError;

/// Keeps `floor(x0 * multiplier)` leading spaces to a sane allocation.
pub const MAX_INDENT_MULTIPLIER: f32 = 1000.0;

/// Which characters survive script cleanup.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptMode {
    /// Target script plus Latin letters and digits.
    Mixed,
    /// Target script only; Latin is stripped and orphaned vowel signs dropped.
    #[default]
    ScriptOnly,
}

/// Tunables for the reconstruction pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReflowConfig {
    /// Max vertical-center delta (normalized height) to join the current line.
    pub line_y_threshold: f32,
    /// Scales a line's `x0` into a count of leading spaces.
    pub indent_multiplier: f32,
    /// A gap larger than `median_gap * paragraph_gap_ratio` starts a paragraph.
    pub paragraph_gap_ratio: f32,
    /// Cleaned lines shorter than this (in chars) are merged into the previous one.
    pub short_line_merge_length: usize,
    pub script_mode: ScriptMode,
    /// Median gap assumed when the page has too few lines to measure one.
    pub default_line_gap: f32,
}

impl Default for ReflowConfig {
    fn default() -> Self {
        Self {
            line_y_threshold: 0.03,
            indent_multiplier: 55.0,
            paragraph_gap_ratio: 1.8,
            short_line_merge_length: 20,
            script_mode: ScriptMode::ScriptOnly,
            default_line_gap: 0.03,
        }
    }
}

impl ReflowConfig {
    pub fn with_script_mode(mut self, mode: ScriptMode) -> Self {
        self.script_mode = mode;
        self
    }

    /// Loads a TOML file; missing keys keep their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: ReflowConfig = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReflowError> {
        positive("line_y_threshold", self.line_y_threshold)?;
        positive("paragraph_gap_ratio", self.paragraph_gap_ratio)?;
        positive("default_line_gap", self.default_line_gap)?;
        if !(0.0..=MAX_INDENT_MULTIPLIER).contains(&self.indent_multiplier) {
            return Err(ReflowError::InvalidConfig {
                field: "indent_multiplier",
                value: self.indent_multiplier.to_string(),
                reason: "must be between 0 and 1000",
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ReflowError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ReflowError::InvalidConfig {
            field,
            value: value.to_string(),
            reason: "must be finite and positive",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ReflowConfig =
            toml::from_str("script_mode = \"mixed\"\nindent_multiplier = 40.0\n").unwrap();
        assert_eq!(config.script_mode, ScriptMode::Mixed);
        assert_eq!(config.indent_multiplier, 40.0);
        assert_eq!(config.line_y_threshold, 0.03);
        assert_eq!(config.short_line_merge_length, 20);
    }

    #[test]
    fn rejects_non_positive_threshold() {
        let config = ReflowConfig {
            line_y_threshold: 0.0,
            ..ReflowConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ReflowError::InvalidConfig {
                field: "line_y_threshold",
                ..
            }
        ));
    }

    #[test]
    fn rejects_oversized_indent_multiplier() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("reflow.toml");
        fs::write(&path, "indent_multiplier = 1e12\n")?;
        let err = ReflowConfig::from_toml_file(&path).unwrap_err();
        assert!(err.to_string().contains("indent_multiplier"), "{err}");

        for indent_multiplier in [f32::NAN, -1.0, 1000.5] {
            let config = ReflowConfig {
                indent_multiplier,
                ..ReflowConfig::default()
            };
            assert!(config.validate().is_err(), "{indent_multiplier} accepted");
        }
        let widest = ReflowConfig {
            indent_multiplier: MAX_INDENT_MULTIPLIER,
            ..ReflowConfig::default()
        };
        assert_eq!(widest.validate(), Ok(()));
        Ok(())
    }

    #[test]
    fn reads_config_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("reflow.toml");
        fs::write(&path, "paragraph_gap_ratio = 2.5\n")?;
        let config = ReflowConfig::from_toml_file(&path)?;
        assert_eq!(config.paragraph_gap_ratio, 2.5);
        Ok(())
    }
}
