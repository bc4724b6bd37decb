//! Static descriptors for the effect kinds a user can add to the chain.

use crate::parameter::ParameterRange;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest cutoff the filter sliders can reach, in Hz.
pub const MAX_FILTER_FREQUENCY: f32 = 20000.0;

/// Lowest cutoff the filter sliders can reach, in Hz.
pub const MIN_FILTER_FREQUENCY: f32 = 0.0;

/// The closed set of effect kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    /// Convolution reverb with a dry/wet crossfade.
    Reverb,
    /// Scalar gain.
    Gain,
    /// Low-pass filter.
    #[serde(rename = "lpf")]
    LowPass,
    /// High-pass filter.
    #[serde(rename = "hpf")]
    HighPass,
    /// Stereo position.
    Pan,
}

/// Label and slider range of an effect kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectDescriptor {
    pub kind: EffectKind,
    pub label: &'static str,
    pub range: ParameterRange,
}

impl EffectKind {
    pub const ALL: [EffectKind; 5] = [
        EffectKind::Reverb,
        EffectKind::Gain,
        EffectKind::LowPass,
        EffectKind::HighPass,
        EffectKind::Pan,
    ];

    /// Tag used by the UI when requesting a new stage.
    pub fn tag(self) -> &'static str {
        match self {
            EffectKind::Reverb => "reverb",
            EffectKind::Gain => "gain",
            EffectKind::LowPass => "lpf",
            EffectKind::HighPass => "hpf",
            EffectKind::Pan => "pan",
        }
    }

    /// Parse a UI tag. Returns `None` for anything outside the closed set.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Look up the descriptor of this kind.
    ///
    /// Filters default fully open: low-pass at the top of the range,
    /// high-pass at the bottom, so the slider closes them inward.
    pub fn descriptor(self) -> EffectDescriptor {
        let (label, range) = match self {
            EffectKind::Reverb => ("Reverb", ParameterRange::new(0.0, 1.0, 0.01, 0.5)),
            EffectKind::Gain => ("Gain", ParameterRange::new(0.0, 2.0, 0.01, 1.0)),
            EffectKind::LowPass => (
                "Low Pass Filter",
                ParameterRange::new(
                    MIN_FILTER_FREQUENCY,
                    MAX_FILTER_FREQUENCY,
                    1.0,
                    MAX_FILTER_FREQUENCY,
                ),
            ),
            EffectKind::HighPass => (
                "High Pass Filter",
                ParameterRange::new(
                    MIN_FILTER_FREQUENCY,
                    MAX_FILTER_FREQUENCY,
                    1.0,
                    MIN_FILTER_FREQUENCY,
                ),
            ),
            EffectKind::Pan => ("Pan", ParameterRange::new(-1.0, 1.0, 0.01, 0.0)),
        };
        EffectDescriptor {
            kind: self,
            label,
            range,
        }
    }

    pub fn label(self) -> &'static str {
        self.descriptor().label
    }

    pub fn range(self) -> ParameterRange {
        self.descriptor().range
    }

    pub fn default_value(self) -> f32 {
        self.descriptor().range.default
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
