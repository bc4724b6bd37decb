//! Interface to the audio engine that performs the actual sample processing.
//!
//! The rack never touches samples itself. It allocates processing nodes,
//! wires them together and writes scalar parameters; the engine applies those
//! changes to the live signal on its own real-time context.

use crate::impulse::ImpulseResponse;
use crate::Result;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Opaque handle to a processing node owned by an [`AudioEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Build a handle from a raw engine index.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Response shape of a frequency-selective node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    LowPass,
    HighPass,
}

/// Primitive node types the engine can allocate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Media element feeding the graph (stream or decoded file).
    MediaSource,
    /// Scalar multiplier.
    Gain,
    /// Biquad filter in the given mode.
    BiquadFilter(FilterMode),
    /// Convolution with an impulse response.
    Convolver,
    /// Equal-power stereo positioner.
    StereoPanner,
    /// Spectrum analysis tap (passes audio through unchanged).
    Analyser,
    /// Hardware output.
    Destination,
}

/// Mutable scalar parameters exposed by engine nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioParam {
    /// Multiplier of a gain node.
    Gain,
    /// Cutoff frequency of a biquad filter, in Hz.
    Frequency,
    /// Position of a stereo panner, -1 (left) to 1 (right).
    Pan,
}

/// Media handed to the engine's source node.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaInput {
    /// Network stream, played straight from its URL.
    Stream(String),
    /// Local file read into memory.
    Blob { path: PathBuf, bytes: Arc<[u8]> },
}

/// Audio engine the rack drives.
///
/// `disconnect` has disconnect-all-outputs semantics: every outgoing
/// connection of the node is dropped, incoming ones are untouched.
/// Connection and parameter calls are fire-and-forget; the engine applies them
/// asynchronously to the running signal.
pub trait AudioEngine {
    /// Allocate a node of the given kind.
    fn create_node(&mut self, kind: NodeKind) -> NodeId;

    /// Connect the output of `from` to the input of `to`.
    fn connect(&mut self, from: NodeId, to: NodeId);

    /// Drop every outgoing connection of `node`.
    fn disconnect(&mut self, node: NodeId);

    /// Release a node along with all of its connections.
    fn remove_node(&mut self, node: NodeId);

    /// Write a scalar parameter; takes effect on the live signal.
    fn set_param(&mut self, node: NodeId, param: AudioParam, value: f32);

    /// Bind a convolution kernel to a convolver node.
    fn set_impulse(&mut self, node: NodeId, impulse: Arc<ImpulseResponse>);

    /// The fixed media source node feeding the graph.
    fn media_source(&self) -> NodeId;

    /// The hardware output node.
    fn destination(&self) -> NodeId;

    /// Resume a suspended processing context.
    fn resume(&mut self);

    /// Replace the media played by the source node.
    fn load_media(&mut self, input: MediaInput) -> Result<()>;

    /// Start playback of the loaded media.
    fn play(&mut self) -> Result<()>;

    /// Copy the most recent samples seen by an analyser node into `out`.
    ///
    /// Slots without data are zero-filled.
    fn read_time_domain(&mut self, analyser: NodeId, out: &mut [f32]);
}
