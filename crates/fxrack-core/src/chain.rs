//! Ordered chain of effect stages.
//!
//! [`ChainManager`] owns the stage list. List order is signal order; stages
//! are only appended or removed, never reordered. Every mutation is followed
//! synchronously by a full [`rewire`](crate::rewire::rewire).

use crate::catalog::EffectKind;
use crate::controls::{ControlSender, ControlSurface};
use crate::engine::{AudioEngine, NodeId};
use crate::impulse::ImpulseResponse;
use crate::rewire::{rewire, Endpoints, RewireContext, RewireReport};
use crate::stage::{Stage, StageId, StageKind};
use crate::{Error, Result};
use std::sync::Arc;

pub struct ChainManager {
    stages: Vec<Stage>,
    endpoints: Endpoints,
    impulse: Arc<ImpulseResponse>,
    events: ControlSender,
    next_id: u64,
    last_report: RewireReport,
}

impl ChainManager {
    pub fn new(endpoints: Endpoints, impulse: Arc<ImpulseResponse>, events: ControlSender) -> Self {
        Self {
            stages: Vec::new(),
            endpoints,
            impulse,
            events,
            next_id: 0,
            last_report: RewireReport::default(),
        }
    }

    /// Append a stage requested by UI tag and rewire.
    ///
    /// Tags outside the catalog still get a stage; the rewire reports and
    /// skips it.
    pub fn append(
        &mut self,
        engine: &mut dyn AudioEngine,
        surface: &mut dyn ControlSurface,
        tag: &str,
    ) -> StageId {
        self.push(engine, surface, StageKind::from_tag(tag))
    }

    /// Append a stage of a known kind and rewire.
    pub fn append_kind(
        &mut self,
        engine: &mut dyn AudioEngine,
        surface: &mut dyn ControlSurface,
        kind: EffectKind,
    ) -> StageId {
        self.push(engine, surface, kind.into())
    }

    fn push(
        &mut self,
        engine: &mut dyn AudioEngine,
        surface: &mut dyn ControlSurface,
        kind: StageKind,
    ) -> StageId {
        let id = StageId::new(self.next_id);
        self.next_id += 1;

        tracing::debug!("Appending {} as {}", kind, id);
        self.stages.push(Stage::new(id, kind));
        self.rewire(engine, surface);
        id
    }

    /// Remove a stage and rewire.
    ///
    /// An unknown id means the caller is out of sync with the chain: it is
    /// logged and reported, and nothing is mutated.
    pub fn remove(
        &mut self,
        engine: &mut dyn AudioEngine,
        surface: &mut dyn ControlSurface,
        id: StageId,
    ) -> Result<()> {
        let Some(index) = self.position(id) else {
            tracing::error!("Couldn't remove stage: no stage with id {}", id);
            return Err(Error::UnknownStage(id));
        };

        let mut stage = self.stages.remove(index);
        if let Some(topology) = stage.take_topology() {
            engine.disconnect(topology.exit());
            for &entry in topology.entries() {
                engine.disconnect(entry);
            }
            for &node in topology.nodes() {
                engine.remove_node(node);
            }
        }
        surface.remove_group(id);

        tracing::debug!("Removed {} ({})", id, stage.kind());
        self.rewire(engine, surface);
        Ok(())
    }

    /// Route a slider value to a stage's binding and mirror it on its
    /// control group.
    ///
    /// Returns the value applied after clamping to the slider range.
    pub fn set_param(
        &mut self,
        engine: &mut dyn AudioEngine,
        surface: &mut dyn ControlSurface,
        id: StageId,
        value: f32,
    ) -> Result<f32> {
        let Some(index) = self.position(id) else {
            tracing::warn!("Parameter change for unknown stage {}", id);
            return Err(Error::UnknownStage(id));
        };
        let stage = &mut self.stages[index];
        let Some(binding) = stage.binding() else {
            return Err(Error::UnrealizedStage(id));
        };

        let Some(applied) = binding.apply(engine, value) else {
            tracing::warn!("Rejected non-finite value {} for {}", value, id);
            return Err(Error::NonFiniteValue { stage: id, value });
        };
        stage.set_value(applied);
        surface.set_group_value(id, applied);
        Ok(applied)
    }

    /// Rebuild the full signal path. Safe to call at any time.
    pub fn rewire(
        &mut self,
        engine: &mut dyn AudioEngine,
        surface: &mut dyn ControlSurface,
    ) -> &RewireReport {
        self.last_report = rewire(
            &mut self.stages,
            RewireContext {
                engine,
                surface,
                impulse: &self.impulse,
                events: &self.events,
                endpoints: self.endpoints,
            },
        );
        &self.last_report
    }

    fn position(&self, id: StageId) -> Option<usize> {
        self.stages.iter().position(|s| s.id() == id)
    }

    pub fn get(&self, id: StageId) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id() == id)
    }

    pub fn contains(&self, id: StageId) -> bool {
        self.position(id).is_some()
    }

    /// Stages in signal order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn ids(&self) -> Vec<StageId> {
        self.stages.iter().map(Stage::id).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn endpoints(&self) -> Endpoints {
        self.endpoints
    }

    /// Exit of the last realized stage, or the source for an empty path.
    pub fn tail(&self) -> NodeId {
        self.stages
            .iter()
            .rev()
            .find_map(|s| s.topology().map(|t| t.exit()))
            .unwrap_or(self.endpoints.source)
    }

    pub fn impulse(&self) -> &Arc<ImpulseResponse> {
        &self.impulse
    }

    pub fn last_report(&self) -> &RewireReport {
        &self.last_report
    }
}
