//! # fxrack - live effect-chain rack
//!
//! Ordered chain of audio effects rewired over an audio graph, with a
//! spectrum visualizer on the final signal.
//!
//! ## Architecture
//!
//! fxrack is an umbrella crate that coordinates:
//! - **fxrack-core** - Engine interface, effect catalog, stage factory, chain
//!   manager, graph rewiring, source selection, impulse response cache
//! - **fxrack-analysis** - Spectrum analysis and frequency-bar layout
//!
//! The signal path is always `source -> stage... -> analysis tap -> output`.
//! Every append or removal is followed by a full rewire of that path.
//!
//! ## Quick Start
//!
//! ```
//! use fxrack::prelude::*;
//!
//! let mut rack = FxRackBuilder::new()
//!     .impulse(ImpulseResponse::from_channels(44100, vec![vec![1.0, 0.6, 0.2]])?)
//!     .build(PatchBay::new(), HeadlessSurface::new())?;
//!
//! let reverb = rack.append("reverb");
//! let lpf = rack.append_kind(EffectKind::LowPass);
//! rack.set_param(reverb, 0.3)?;
//! rack.set_param(lpf, 4000.0)?;
//!
//! let bars = rack.frame();
//! assert_eq!(bars.size(), rack.surface_size());
//! # Ok::<(), fxrack::Error>(())
//! ```

/// Re-export of fxrack-core for direct access
pub use fxrack_core as core;

/// Re-export of fxrack-analysis for direct access
pub use fxrack_analysis as analysis;

pub use fxrack_core::{
    // Engine interface
    AudioEngine,
    AudioParam,
    // Chain
    ChainManager,
    // Controls
    ControlEvent,
    ControlGroup,
    ControlSender,
    ControlSurface,
    EffectDescriptor,
    // Catalog
    EffectKind,
    Endpoints,
    FilterMode,
    HeadlessSurface,
    ImpulseCache,
    // Impulse response
    ImpulseResponse,
    MediaInput,
    NodeId,
    NodeKind,
    ParamBinding,
    ParameterRange,
    PatchBay,
    // Config
    RackConfig,
    RewireReport,
    // Source
    SourceSelector,
    Stage,
    StageId,
    StageKind,
    Topology,
};

pub use fxrack_analysis::{Bar, FrequencyBars, Rgb, SpectrumAnalyzer, SurfaceSize, Visualizer};

mod error;
pub use error::{Error, Result};

mod builder;
mod rack;

pub use builder::FxRackBuilder;
pub use rack::{FxRack, PumpSummary};

/// Convenience prelude for common imports
pub mod prelude {
    // Session
    pub use crate::{FxRack, FxRackBuilder, PumpSummary};

    // Chain and controls
    pub use crate::{ControlSurface, EffectKind, HeadlessSurface, StageId};

    // Engine
    pub use crate::{AudioEngine, PatchBay};

    // Assets and settings
    pub use crate::{ImpulseResponse, RackConfig};

    // Visualizer
    pub use crate::{FrequencyBars, SurfaceSize};
}
