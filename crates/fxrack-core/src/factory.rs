//! Builds the sub-graph and control binding of a single stage.

use crate::binding::ParamBinding;
use crate::catalog::EffectKind;
use crate::controls::{ControlGroup, ControlSender, ControlSurface};
use crate::engine::{AudioEngine, AudioParam, FilterMode, NodeId, NodeKind};
use crate::impulse::ImpulseResponse;
use crate::parameter::ParameterRange;
use crate::stage::{StageId, Topology};
use std::sync::Arc;

/// Everything produced for one stage.
#[derive(Debug, Clone)]
pub struct RealizedStage {
    pub topology: Topology,
    pub binding: ParamBinding,
    /// Slider value the nodes were initialised with.
    pub value: f32,
}

/// Allocates stage sub-graphs against an engine.
///
/// Each created stage is connected from the current chain tail, gets its
/// default parameter values and has its control group appended to the
/// surface, so groups appear in chain order.
pub struct StageFactory<'a> {
    engine: &'a mut dyn AudioEngine,
    surface: &'a mut dyn ControlSurface,
    impulse: &'a Arc<ImpulseResponse>,
    events: &'a ControlSender,
}

impl<'a> StageFactory<'a> {
    pub fn new(
        engine: &'a mut dyn AudioEngine,
        surface: &'a mut dyn ControlSurface,
        impulse: &'a Arc<ImpulseResponse>,
        events: &'a ControlSender,
    ) -> Self {
        Self {
            engine,
            surface,
            impulse,
            events,
        }
    }

    /// Build stage `id` of `kind` and feed it from `tail`.
    pub fn create_stage(&mut self, id: StageId, kind: EffectKind, tail: NodeId) -> RealizedStage {
        let descriptor = kind.descriptor();
        let value = descriptor.range.default;

        let (topology, binding) = match kind {
            EffectKind::Reverb => self.reverb(descriptor.range),
            EffectKind::Gain => self.single(NodeKind::Gain, AudioParam::Gain, descriptor.range),
            EffectKind::LowPass => self.single(
                NodeKind::BiquadFilter(FilterMode::LowPass),
                AudioParam::Frequency,
                descriptor.range,
            ),
            EffectKind::HighPass => self.single(
                NodeKind::BiquadFilter(FilterMode::HighPass),
                AudioParam::Frequency,
                descriptor.range,
            ),
            EffectKind::Pan => self.single(NodeKind::StereoPanner, AudioParam::Pan, descriptor.range),
        };

        binding.apply(&mut *self.engine, value);
        for &entry in topology.entries() {
            self.engine.connect(tail, entry);
        }

        self.surface.append_group(ControlGroup::new(
            id,
            descriptor.label,
            descriptor.range,
            value,
            self.events.clone(),
        ));

        tracing::debug!(
            "Created {} stage {} ({} nodes, exit {})",
            kind,
            id,
            topology.nodes().len(),
            topology.exit()
        );

        RealizedStage {
            topology,
            binding,
            value,
        }
    }

    fn single(
        &mut self,
        node_kind: NodeKind,
        param: AudioParam,
        range: ParameterRange,
    ) -> (Topology, ParamBinding) {
        let node = self.engine.create_node(node_kind);
        (
            Topology::single(node),
            ParamBinding::Scalar { node, param, range },
        )
    }

    /// Dry and wet paths in parallel, remerged at a unity gain exit:
    /// `in -> dry -> exit` and `in -> convolver -> wet -> exit`.
    fn reverb(&mut self, range: ParameterRange) -> (Topology, ParamBinding) {
        let convolver = self.engine.create_node(NodeKind::Convolver);
        self.engine.set_impulse(convolver, self.impulse.clone());
        let dry = self.engine.create_node(NodeKind::Gain);
        let wet = self.engine.create_node(NodeKind::Gain);
        let exit = self.engine.create_node(NodeKind::Gain);
        self.engine.set_param(exit, AudioParam::Gain, 1.0);

        self.engine.connect(dry, exit);
        self.engine.connect(convolver, wet);
        self.engine.connect(wet, exit);

        (
            Topology::multi(vec![dry, convolver], exit, &[wet]),
            ParamBinding::Crossfade { dry, wet, range },
        )
    }
}
