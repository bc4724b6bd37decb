//! Effect-chain graph manager.
//!
//! Keeps an ordered list of effect stages and realizes it as a signal path
//! over an [`AudioEngine`]: `source -> stage... -> analysis tap -> output`.
//!
//! # Primary API
//!
//! - [`ChainManager`]: append/remove stages, route slider values, rewire
//! - [`StageFactory`]: builds one stage's sub-graph and control group
//! - [`EffectKind`]: the catalog of supported effects
//! - [`AudioEngine`] / [`PatchBay`]: engine interface and in-memory backend
//! - [`SourceSelector`], [`ImpulseCache`], [`RackConfig`]
//!
//! # Example
//!
//! ```
//! use fxrack_core::prelude::*;
//! use std::sync::Arc;
//!
//! let mut bay = PatchBay::new();
//! let mut surface = HeadlessSurface::new();
//! let endpoints = Endpoints::for_engine(&mut bay);
//! let impulse = Arc::new(ImpulseResponse::from_channels(44100, vec![vec![1.0]])?);
//! let (events, _rx) = control_channel();
//!
//! let mut chain = ChainManager::new(endpoints, impulse, events);
//! let reverb = chain.append(&mut bay, &mut surface, "reverb");
//! chain.append(&mut bay, &mut surface, "gain");
//! chain.set_param(&mut bay, &mut surface, reverb, 0.25)?;
//! assert_eq!(chain.last_report().path.len(), 2);
//! # Ok::<(), fxrack_core::Error>(())
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod engine;
pub use engine::{AudioEngine, AudioParam, FilterMode, MediaInput, NodeId, NodeKind};

pub mod patchbay;
pub use patchbay::PatchBay;

pub mod parameter;
pub use parameter::ParameterRange;

pub mod catalog;
pub use catalog::{EffectDescriptor, EffectKind, MAX_FILTER_FREQUENCY, MIN_FILTER_FREQUENCY};

pub mod stage;
pub use stage::{Stage, StageId, StageKind, Topology};

pub mod binding;
pub use binding::ParamBinding;

pub mod controls;
pub use controls::{
    control_channel, ControlEvent, ControlGroup, ControlReceiver, ControlSender, ControlSurface,
    HeadlessSurface,
};

pub mod impulse;
pub use impulse::{ImpulseCache, ImpulseResponse};

pub mod factory;
pub use factory::{RealizedStage, StageFactory};

pub mod rewire;
pub use rewire::{rewire, Endpoints, RewireContext, RewireReport};

pub mod chain;
pub use chain::ChainManager;

pub mod source;
pub use source::SourceSelector;

pub mod config;
pub use config::{AnalyserConfig, RackConfig, ViewportConfig, DEFAULT_IMPULSE_PATH};

pub mod prelude {
    pub use crate::{
        control_channel, AudioEngine, ChainManager, ControlEvent, ControlSurface, EffectKind,
        Endpoints, HeadlessSurface, ImpulseCache, ImpulseResponse, PatchBay, RackConfig,
        SourceSelector, StageId,
    };
}
