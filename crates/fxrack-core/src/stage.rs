//! Stages: user-visible effect instances and their realized sub-graphs.

use crate::binding::ParamBinding;
use crate::catalog::EffectKind;
use crate::engine::NodeId;
use std::fmt;

/// Identifier of a stage, stable for the stage's lifetime.
///
/// Generated by the chain manager, never supplied by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StageId(u64);

impl StageId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stage-{}", self.0)
    }
}

/// Kind requested for a stage.
///
/// Requests arrive as UI tags; a tag outside the catalog is kept as
/// `Unsupported` so the rewire pass can report and skip it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StageKind {
    Effect(EffectKind),
    Unsupported(String),
}

impl StageKind {
    pub fn from_tag(tag: &str) -> Self {
        match EffectKind::from_tag(tag) {
            Some(kind) => StageKind::Effect(kind),
            None => StageKind::Unsupported(tag.to_string()),
        }
    }
}

impl From<EffectKind> for StageKind {
    fn from(kind: EffectKind) -> Self {
        StageKind::Effect(kind)
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Effect(kind) => write!(f, "{kind}"),
            StageKind::Unsupported(tag) => write!(f, "{tag}"),
        }
    }
}

/// Realized wiring of a stage.
///
/// Upstream signal is delivered to every entry; downstream stages connect
/// from the single exit. Single-node stages have one entry equal to the exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    entries: Vec<NodeId>,
    exit: NodeId,
    /// Every node owned by the stage, entries and exit included.
    nodes: Vec<NodeId>,
}

impl Topology {
    /// One node that is both entry and exit.
    pub fn single(node: NodeId) -> Self {
        Self {
            entries: vec![node],
            exit: node,
            nodes: vec![node],
        }
    }

    /// Several entries merging into one exit, plus any internal nodes.
    pub fn multi(entries: Vec<NodeId>, exit: NodeId, internal: &[NodeId]) -> Self {
        let mut nodes = entries.clone();
        nodes.extend_from_slice(internal);
        if !nodes.contains(&exit) {
            nodes.push(exit);
        }
        Self {
            entries,
            exit,
            nodes,
        }
    }

    pub fn entries(&self) -> &[NodeId] {
        &self.entries
    }

    pub fn exit(&self) -> NodeId {
        self.exit
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }
}

/// One effect instance in the chain.
#[derive(Debug, Clone)]
pub struct Stage {
    id: StageId,
    kind: StageKind,
    topology: Option<Topology>,
    binding: Option<ParamBinding>,
    value: Option<f32>,
}

impl Stage {
    pub(crate) fn new(id: StageId, kind: StageKind) -> Self {
        Self {
            id,
            kind,
            topology: None,
            binding: None,
            value: None,
        }
    }

    pub fn id(&self) -> StageId {
        self.id
    }

    pub fn kind(&self) -> &StageKind {
        &self.kind
    }

    /// Realized sub-graph, `None` until the first rewire built it.
    pub fn topology(&self) -> Option<&Topology> {
        self.topology.as_ref()
    }

    pub fn binding(&self) -> Option<&ParamBinding> {
        self.binding.as_ref()
    }

    /// Current slider value, once realized.
    pub fn value(&self) -> Option<f32> {
        self.value
    }

    pub fn is_realized(&self) -> bool {
        self.topology.is_some()
    }

    pub(crate) fn realize(&mut self, topology: Topology, binding: ParamBinding, value: f32) {
        self.topology = Some(topology);
        self.binding = Some(binding);
        self.value = Some(value);
    }

    pub(crate) fn set_value(&mut self, value: f32) {
        self.value = Some(value);
    }

    pub(crate) fn take_topology(&mut self) -> Option<Topology> {
        self.binding = None;
        self.topology.take()
    }
}
