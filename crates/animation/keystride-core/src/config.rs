//! Per-call configuration values and the persisted settings object they come from.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocumentError, ExportError, RetimeError};

/// Parameters of one retime call.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RetimeConfig {
    /// Time of the first keyframe in every channel.
    pub start: f64,
    /// Distance between consecutive keyframes (> 0).
    pub spacing: f64,
    /// Playback rate written to the host (>= 1).
    pub frame_rate: u32,
}

impl Default for RetimeConfig {
    fn default() -> Self {
        Settings::default().retime_config()
    }
}

impl RetimeConfig {
    pub fn validate(&self) -> Result<(), RetimeError> {
        if !self.start.is_finite() {
            return Err(RetimeError::InvalidConfig {
                reason: format!("start must be finite, got {}", self.start),
            });
        }
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(RetimeError::InvalidConfig {
                reason: format!("spacing must be > 0, got {}", self.spacing),
            });
        }
        if self.frame_rate < 1 {
            return Err(RetimeError::InvalidConfig {
                reason: "frame rate must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Time given to the key at `index`.
    pub fn time_at(&self, index: usize) -> f64 {
        self.start + index as f64 * self.spacing
    }

    /// `validate`, plus every time for a channel of `max_keys` keyframes must be finite.
    pub fn validate_for(&self, max_keys: usize) -> Result<(), RetimeError> {
        self.validate()?;
        // Times grow monotonically with the index, so the last one bounds them all.
        let last = self.time_at(max_keys.saturating_sub(1));
        if !last.is_finite() {
            return Err(RetimeError::InvalidConfig {
                reason: format!(
                    "start {} + spacing {} overflows for {max_keys} keyframes",
                    self.start, self.spacing
                ),
            });
        }
        Ok(())
    }
}

/// Parameters of one export call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_path: PathBuf,
    /// Bake sampling step in frames (> 0).
    pub sample_step: f64,
}

impl ExportConfig {
    pub fn new(output_path: impl Into<PathBuf>, sample_step: f64) -> Self {
        Self {
            output_path: output_path.into(),
            sample_step,
        }
    }

    pub fn validate(&self) -> Result<(), ExportError> {
        if self.output_path.as_os_str().is_empty() {
            return Err(ExportError::new("output path is empty"));
        }
        if !self.sample_step.is_finite() || self.sample_step <= 0.0 {
            return Err(ExportError::new(format!(
                "sample step must be > 0, got {}",
                self.sample_step
            )));
        }
        Ok(())
    }
}

/// Named defaults matching the two shipped tool revisions.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Half-frame spacing at 15 fps.
    Kh2,
    /// Two-frame spacing at 60 fps.
    Smooth,
}

/// User-editable settings persisted between runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub start: f64,
    pub spacing: f64,
    pub frame_rate: u32,
    pub output_path: PathBuf,
    pub sample_step: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self::preset(Preset::Kh2)
    }
}

impl Settings {
    pub fn preset(preset: Preset) -> Self {
        let (spacing, frame_rate) = match preset {
            Preset::Kh2 => (0.5, 15),
            Preset::Smooth => (2.0, 60),
        };
        Self {
            start: 1.0,
            spacing,
            frame_rate,
            output_path: PathBuf::from("animation.baked.json"),
            sample_step: 1.0,
        }
    }

    pub fn retime_config(&self) -> RetimeConfig {
        RetimeConfig {
            start: self.start,
            spacing: self.spacing,
            frame_rate: self.frame_rate,
        }
    }

    pub fn export_config(&self) -> ExportConfig {
        ExportConfig::new(self.output_path.clone(), self.sample_step)
    }

    /// Read settings from a JSON file; missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| DocumentError::io(path, e))?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(|e| DocumentError::io(path, e))
    }
}
