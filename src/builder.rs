//! Builder for configuring and constructing an `FxRack`.

use crate::analysis::SpectrumAnalyzer;
use crate::core::{
    control_channel, AudioEngine, ChainManager, ControlSurface, Endpoints, ImpulseCache,
    ImpulseResponse, RackConfig,
};
use crate::{FxRack, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Settings start from [`RackConfig::default`]; setters override single
/// fields. The impulse response is resolved during [`build`](Self::build),
/// before any stage exists, and a failure to load it fails the build.
///
/// # Example
///
/// ```no_run
/// use fxrack::prelude::*;
///
/// let rack = FxRackBuilder::new()
///     .impulse_path("assets/impulse.wav")
///     .fft_size(4096)
///     .viewport(1920, 1080)
///     .build(PatchBay::new(), HeadlessSurface::new())?;
/// # Ok::<(), fxrack::Error>(())
/// ```
#[derive(Default)]
pub struct FxRackBuilder {
    config: RackConfig,
    impulse: Option<ImpulseResponse>,
    impulse_cache: Option<Arc<ImpulseCache>>,
}

impl FxRackBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every setting at once.
    pub fn config(mut self, config: RackConfig) -> Self {
        self.config = config;
        self
    }

    /// Default: `assets/impulse.wav`
    pub fn impulse_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.impulse_path = path.into();
        self
    }

    /// Use an already decoded impulse response instead of loading one.
    pub fn impulse(mut self, impulse: ImpulseResponse) -> Self {
        self.impulse = Some(impulse);
        self
    }

    /// Share an impulse cache between racks. A cache that already holds an
    /// impulse response is used as is.
    pub fn impulse_cache(mut self, cache: Arc<ImpulseCache>) -> Self {
        self.impulse_cache = Some(cache);
        self
    }

    /// Default: 2048
    pub fn fft_size(mut self, fft_size: usize) -> Self {
        self.config.analyser.fft_size = fft_size;
        self
    }

    /// Default: 0.8
    pub fn smoothing(mut self, smoothing: f32) -> Self {
        self.config.analyser.smoothing = smoothing;
        self
    }

    /// Default: -100 to -30 dB
    pub fn decibel_range(mut self, min: f32, max: f32) -> Self {
        self.config.analyser.min_decibels = min;
        self.config.analyser.max_decibels = max;
        self
    }

    /// Default: 1280x720
    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.viewport.width = width;
        self.config.viewport.height = height;
        self
    }

    pub fn build<E: AudioEngine, S: ControlSurface>(
        self,
        mut engine: E,
        mut surface: S,
    ) -> Result<FxRack<E, S>> {
        let config = self.config;
        config.validate()?;

        let cache = self.impulse_cache.unwrap_or_default();
        let impulse = match self.impulse {
            Some(preloaded) if !cache.is_loaded() => {
                cache.insert(config.impulse_path.clone(), preloaded)
            }
            _ => cache.get_or_load(&config.impulse_path)?,
        };

        let analyser = &config.analyser;
        let analyzer = SpectrumAnalyzer::with_params(
            analyser.fft_size,
            analyser.smoothing,
            analyser.min_decibels,
            analyser.max_decibels,
        )?;

        let endpoints = Endpoints::for_engine(&mut engine);
        let (events_tx, events_rx) = control_channel();
        let mut chain = ChainManager::new(endpoints, impulse, events_tx.clone());
        chain.rewire(&mut engine, &mut surface);

        tracing::debug!(
            "Rack ready: tap {}, fft {}, viewport {}x{}",
            endpoints.tap,
            analyser.fft_size,
            config.viewport.width,
            config.viewport.height
        );

        Ok(FxRack::from_parts(
            engine,
            surface,
            chain,
            cache,
            (events_tx, events_rx),
            analyzer,
            config,
        ))
    }
}
