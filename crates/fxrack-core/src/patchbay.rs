//! In-memory [`AudioEngine`] that records the graph instead of rendering it.
//!
//! `PatchBay` is the dummy backend used by the headless rack and the test
//! suite. It keeps every node with its parameters, every connection (with
//! multiplicity, so doubled connections stay visible), the loaded media and a
//! short sample history per analyser node.

use crate::engine::{AudioEngine, AudioParam, MediaInput, NodeId, NodeKind};
use crate::impulse::ImpulseResponse;
use crate::{Error, Result};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Arc;

/// Samples kept per analyser node.
const DEFAULT_TAP_CAPACITY: usize = 32768;

#[derive(Debug)]
struct NodeState {
    kind: NodeKind,
    params: HashMap<AudioParam, f32>,
    impulse: Option<Arc<ImpulseResponse>>,
}

impl NodeState {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            params: HashMap::new(),
            impulse: None,
        }
    }
}

pub struct PatchBay {
    nodes: BTreeMap<NodeId, NodeState>,
    /// Directed connections, duplicates preserved.
    edges: Vec<(NodeId, NodeId)>,
    next_id: u64,
    source: NodeId,
    destination: NodeId,
    running: bool,
    playing: bool,
    media: Option<MediaInput>,
    taps: HashMap<NodeId, VecDeque<f32>>,
    tap_capacity: usize,
}

impl PatchBay {
    pub fn new() -> Self {
        Self::with_tap_capacity(DEFAULT_TAP_CAPACITY)
    }

    pub fn with_tap_capacity(tap_capacity: usize) -> Self {
        let mut bay = Self {
            nodes: BTreeMap::new(),
            edges: Vec::new(),
            next_id: 0,
            source: NodeId::from_raw(0),
            destination: NodeId::from_raw(0),
            running: false,
            playing: false,
            media: None,
            taps: HashMap::new(),
            tap_capacity: tap_capacity.max(1),
        };
        bay.source = bay.create_node(NodeKind::MediaSource);
        bay.destination = bay.create_node(NodeKind::Destination);
        bay
    }

    /// Number of live nodes, including the source and destination.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.nodes.get(&node).map(|n| n.kind)
    }

    /// Last value written to a parameter, if any.
    pub fn param(&self, node: NodeId, param: AudioParam) -> Option<f32> {
        self.nodes.get(&node)?.params.get(&param).copied()
    }

    pub fn impulse(&self, node: NodeId) -> Option<&Arc<ImpulseResponse>> {
        self.nodes.get(&node)?.impulse.as_ref()
    }

    /// All nodes of a kind, in allocation order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, state)| state.kind == kind)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    /// Targets fed by `node`, one entry per connection.
    pub fn outgoing(&self, node: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|(from, _)| *from == node)
            .map(|(_, to)| *to)
            .collect()
    }

    /// Nodes feeding `node`, one entry per connection.
    pub fn incoming(&self, node: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|(_, to)| *to == node)
            .map(|(from, _)| *from)
            .collect()
    }

    /// How many times `from` is connected to `to`.
    pub fn edge_count(&self, from: NodeId, to: NodeId) -> usize {
        self.edges
            .iter()
            .filter(|(f, t)| *f == from && *t == to)
            .count()
    }

    /// Every simple path from `from` to `to`.
    ///
    /// A plain chain yields exactly one path; each reverb stage doubles the
    /// count because its dry and wet branches remerge before the next stage.
    pub fn paths(&self, from: NodeId, to: NodeId) -> Vec<Vec<NodeId>> {
        let mut found = Vec::new();
        let mut stack = vec![from];
        self.collect_paths(to, &mut stack, &mut found);
        found
    }

    fn collect_paths(&self, to: NodeId, stack: &mut Vec<NodeId>, found: &mut Vec<Vec<NodeId>>) {
        let Some(&current) = stack.last() else {
            return;
        };
        if current == to {
            found.push(stack.clone());
            return;
        }
        for next in self.outgoing(current) {
            if stack.contains(&next) {
                continue;
            }
            stack.push(next);
            self.collect_paths(to, stack, found);
            stack.pop();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn media(&self) -> Option<&MediaInput> {
        self.media.as_ref()
    }

    /// Push samples into an analyser node as if the engine had rendered them.
    pub fn feed_analyser(&mut self, analyser: NodeId, samples: &[f32]) -> Result<()> {
        match self.kind(analyser) {
            Some(NodeKind::Analyser) => {}
            _ => return Err(Error::UnknownNode(analyser)),
        }
        let capacity = self.tap_capacity;
        let history = self.taps.entry(analyser).or_default();
        history.extend(samples.iter().copied());
        let excess = history.len().saturating_sub(capacity);
        history.drain(..excess);
        Ok(())
    }
}

impl Default for PatchBay {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioEngine for PatchBay {
    fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::from_raw(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, NodeState::new(kind));
        id
    }

    fn connect(&mut self, from: NodeId, to: NodeId) {
        if !self.contains(from) || !self.contains(to) {
            tracing::warn!("Ignoring connection {} -> {}: unknown node", from, to);
            return;
        }
        self.edges.push((from, to));
    }

    fn disconnect(&mut self, node: NodeId) {
        self.edges.retain(|(from, _)| *from != node);
    }

    fn remove_node(&mut self, node: NodeId) {
        if node == self.source || node == self.destination {
            tracing::warn!("Refusing to remove fixed node {}", node);
            return;
        }
        self.edges.retain(|(from, to)| *from != node && *to != node);
        self.taps.remove(&node);
        self.nodes.remove(&node);
    }

    fn set_param(&mut self, node: NodeId, param: AudioParam, value: f32) {
        match self.nodes.get_mut(&node) {
            Some(state) => {
                state.params.insert(param, value);
            }
            None => tracing::warn!("Ignoring {:?} = {} on unknown {}", param, value, node),
        }
    }

    fn set_impulse(&mut self, node: NodeId, impulse: Arc<ImpulseResponse>) {
        match self.nodes.get_mut(&node) {
            Some(state) => state.impulse = Some(impulse),
            None => tracing::warn!("Ignoring impulse on unknown {}", node),
        }
    }

    fn media_source(&self) -> NodeId {
        self.source
    }

    fn destination(&self) -> NodeId {
        self.destination
    }

    fn resume(&mut self) {
        self.running = true;
    }

    fn load_media(&mut self, input: MediaInput) -> Result<()> {
        self.playing = false;
        self.media = Some(input);
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if self.media.is_none() {
            return Err(Error::InvalidSource("no media loaded".into()));
        }
        self.playing = true;
        Ok(())
    }

    fn read_time_domain(&mut self, analyser: NodeId, out: &mut [f32]) {
        out.fill(0.0);
        let Some(history) = self.taps.get(&analyser) else {
            return;
        };
        // Right-align so the newest sample lands in the last slot.
        let take = history.len().min(out.len());
        let skip = history.len() - take;
        let offset = out.len() - take;
        for (slot, sample) in out[offset..].iter_mut().zip(history.iter().skip(skip)) {
            *slot = *sample;
        }
    }
}
