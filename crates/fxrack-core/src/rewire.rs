//! Full-chain rewiring.
//!
//! Every mutation of the chain is followed by a rebuild of the whole signal
//! path, source to analysis tap. The pass is O(chain length); chains are
//! assembled by hand and stay short, so there is no incremental diffing.

use crate::controls::{ControlSender, ControlSurface};
use crate::engine::{AudioEngine, NodeId, NodeKind};
use crate::factory::StageFactory;
use crate::impulse::ImpulseResponse;
use crate::stage::{Stage, StageId, StageKind};
use std::sync::Arc;

/// Fixed nodes the chain is spliced between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    /// Media source feeding the first stage.
    pub source: NodeId,
    /// Analysis tap after the last stage.
    pub tap: NodeId,
    /// Output the tap feeds.
    pub output: NodeId,
}

impl Endpoints {
    /// Use the engine's source and destination and allocate a fresh tap.
    pub fn for_engine(engine: &mut dyn AudioEngine) -> Self {
        Self {
            source: engine.media_source(),
            tap: engine.create_node(NodeKind::Analyser),
            output: engine.destination(),
        }
    }
}

/// Outcome of one rewire pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewireReport {
    /// Stages on the signal path, in order.
    pub path: Vec<StageId>,
    /// Stages left out because their kind is unsupported.
    pub skipped: Vec<StageId>,
}

impl RewireReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Inputs a rewire pass needs besides the stage list.
pub struct RewireContext<'a> {
    pub engine: &'a mut dyn AudioEngine,
    pub surface: &'a mut dyn ControlSurface,
    pub impulse: &'a Arc<ImpulseResponse>,
    pub events: &'a ControlSender,
    pub endpoints: Endpoints,
}

/// Rebuild the path `source -> stages... -> tap -> output`.
///
/// Each exit is cleared before it is connected from, so no entry is ever fed
/// by two predecessors. Stages seen for the first time are built by the
/// factory, which also feeds them from the current tail.
pub fn rewire(stages: &mut [Stage], ctx: RewireContext<'_>) -> RewireReport {
    let RewireContext {
        engine,
        surface,
        impulse,
        events,
        endpoints,
    } = ctx;
    let mut report = RewireReport::default();

    engine.disconnect(endpoints.source);
    let mut cursor = endpoints.source;

    for stage in stages.iter_mut() {
        if let Some(topology) = stage.topology() {
            engine.disconnect(topology.exit());
            for &entry in topology.entries() {
                engine.connect(cursor, entry);
            }
            cursor = topology.exit();
            report.path.push(stage.id());
            continue;
        }

        match stage.kind().clone() {
            StageKind::Effect(kind) => {
                let realized = StageFactory::new(&mut *engine, &mut *surface, impulse, events)
                    .create_stage(stage.id(), kind, cursor);
                cursor = realized.topology.exit();
                stage.realize(realized.topology, realized.binding, realized.value);
                report.path.push(stage.id());
            }
            StageKind::Unsupported(tag) => {
                tracing::error!("Unknown effect kind '{}' for {}, skipping", tag, stage.id());
                report.skipped.push(stage.id());
            }
        }
    }

    // Every upstream exit was cleared above, so the tap's only input is the cursor.
    engine.disconnect(endpoints.tap);
    engine.connect(cursor, endpoints.tap);
    engine.connect(endpoints.tap, endpoints.output);

    tracing::debug!(
        "Rewired {} stage(s), {} skipped",
        report.path.len(),
        report.skipped.len()
    );
    report
}
