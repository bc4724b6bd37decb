//! Slider-to-parameter bindings.
//!
//! A binding is the handler a stage registers for its slider: it receives the
//! new scalar value and writes the matching engine parameters. Bindings hold
//! node handles only, so parameter propagation works without any widget.

use crate::engine::{AudioEngine, AudioParam, NodeId};
use crate::parameter::ParameterRange;

#[derive(Debug, Clone, PartialEq)]
pub enum ParamBinding {
    /// Value written verbatim to one parameter of one node.
    Scalar {
        node: NodeId,
        param: AudioParam,
        range: ParameterRange,
    },
    /// Complementary dry/wet mix: dry gain `1 - v`, wet gain `v`.
    Crossfade {
        dry: NodeId,
        wet: NodeId,
        range: ParameterRange,
    },
}

impl ParamBinding {
    pub fn range(&self) -> &ParameterRange {
        match self {
            ParamBinding::Scalar { range, .. } | ParamBinding::Crossfade { range, .. } => range,
        }
    }

    /// Push `value` into the engine. Returns the value actually applied,
    /// clamped to the slider range, or `None` for NaN and infinities, which
    /// leave the engine untouched.
    pub fn apply(&self, engine: &mut dyn AudioEngine, value: f32) -> Option<f32> {
        if !value.is_finite() {
            return None;
        }
        let value = self.range().clamp(value);
        match *self {
            ParamBinding::Scalar { node, param, .. } => {
                engine.set_param(node, param, value);
            }
            ParamBinding::Crossfade { dry, wet, .. } => {
                engine.set_param(dry, AudioParam::Gain, 1.0 - value);
                engine.set_param(wet, AudioParam::Gain, value);
            }
        }
        Some(value)
    }
}
