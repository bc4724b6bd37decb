//! Rack configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the reverb impulse response.
pub const DEFAULT_IMPULSE_PATH: &str = "assets/impulse.wav";

/// Analysis tap settings, in analyser-node terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyserConfig {
    /// FFT window length; a power of two in `32..=32768`.
    pub fft_size: usize,
    /// Averaging constant between frames, `0.0..=1.0`.
    pub smoothing: f32,
    pub min_decibels: f32,
    pub max_decibels: f32,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            smoothing: 0.8,
            min_decibels: -100.0,
            max_decibels: -30.0,
        }
    }
}

impl AnalyserConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.fft_size.is_power_of_two() || !(32..=32768).contains(&self.fft_size) {
            return Err(Error::InvalidConfig(format!(
                "fft_size must be a power of two in 32..=32768, got {}",
                self.fft_size
            )));
        }
        if !(0.0..=1.0).contains(&self.smoothing) {
            return Err(Error::InvalidConfig(format!(
                "smoothing must be within 0..=1, got {}",
                self.smoothing
            )));
        }
        if self.min_decibels >= self.max_decibels {
            return Err(Error::InvalidConfig(format!(
                "min_decibels ({}) must be below max_decibels ({})",
                self.min_decibels, self.max_decibels
            )));
        }
        Ok(())
    }
}

/// Viewport the visualizer surface is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Top-level settings of a rack session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RackConfig {
    pub impulse_path: PathBuf,
    pub analyser: AnalyserConfig,
    pub viewport: ViewportConfig,
}

impl Default for RackConfig {
    fn default() -> Self {
        Self {
            impulse_path: PathBuf::from(DEFAULT_IMPULSE_PATH),
            analyser: AnalyserConfig::default(),
            viewport: ViewportConfig::default(),
        }
    }
}

impl RackConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.impulse_path.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("impulse_path is empty".into()));
        }
        self.analyser.validate()
    }
}
