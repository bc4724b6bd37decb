//! FxRack session that ties the chain, source and visualizer to one engine.

use crate::analysis::{FrequencyBars, SpectrumAnalyzer, SurfaceSize, Visualizer};
use crate::core::{
    AudioEngine, ChainManager, ControlEvent, ControlReceiver, ControlSender, ControlSurface,
    EffectKind, ImpulseCache, ImpulseResponse, RackConfig, RewireReport, SourceSelector, StageId,
};
use crate::{Error, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Tally of one [`FxRack::pump_events`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpSummary {
    /// Slider values routed to a stage.
    pub applied: usize,
    /// Stages removed on request.
    pub removed: usize,
    /// Events naming a stage that is gone or cannot take a value.
    pub ignored: usize,
}

impl PumpSummary {
    pub fn total(&self) -> usize {
        self.applied + self.removed + self.ignored
    }
}

/// One live effect-rack session.
///
/// Owns the engine, the display surface, the chain of stages, the source
/// selection and the analysis pipeline. All mutations go through `&mut self`,
/// so they are serialized like the UI events that trigger them.
///
/// # Example
///
/// ```
/// use fxrack::prelude::*;
///
/// let mut rack = FxRackBuilder::new()
///     .impulse(ImpulseResponse::from_channels(44100, vec![vec![1.0, 0.5]])?)
///     .build(PatchBay::new(), HeadlessSurface::new())?;
///
/// let reverb = rack.append("reverb");
/// rack.append("pan");
/// rack.set_param(reverb, 0.8)?;
/// rack.remove(reverb)?;
/// assert_eq!(rack.chain().len(), 1);
/// # Ok::<(), fxrack::Error>(())
/// ```
pub struct FxRack<E: AudioEngine, S: ControlSurface> {
    engine: E,
    surface: S,
    chain: ChainManager,
    source: SourceSelector,
    impulse_cache: Arc<ImpulseCache>,
    events_tx: ControlSender,
    events_rx: ControlReceiver,
    analyzer: SpectrumAnalyzer,
    visualizer: Visualizer,
    tap_buffer: Vec<f32>,
    config: RackConfig,
}

impl<E: AudioEngine, S: ControlSurface> FxRack<E, S> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        engine: E,
        surface: S,
        chain: ChainManager,
        impulse_cache: Arc<ImpulseCache>,
        events: (ControlSender, ControlReceiver),
        analyzer: SpectrumAnalyzer,
        config: RackConfig,
    ) -> Self {
        let visualizer = Visualizer::for_viewport(config.viewport.width, config.viewport.height);
        let tap_buffer = vec![0.0; analyzer.fft_size()];
        let (events_tx, events_rx) = events;
        Self {
            engine,
            surface,
            chain,
            source: SourceSelector::new(),
            impulse_cache,
            events_tx,
            events_rx,
            analyzer,
            visualizer,
            tap_buffer,
            config,
        }
    }

    // =========================================================================
    // Source
    // =========================================================================

    /// Play a network stream. Any selected file is cleared.
    ///
    /// The engine is resumed only once the selection is accepted.
    pub fn use_stream(&mut self, url: &str) -> Result<()> {
        let url = self.source.use_stream(url)?;
        self.engine.resume();
        tracing::info!("Switching source to stream {}", url);
        self.start_playback()
    }

    /// Play a local file, read into memory first. Any stream URL is cleared.
    pub fn use_file(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = self.source.use_file(path)?;
        self.engine.resume();
        tracing::info!("Switching source to file {}", path.display());
        self.start_playback()
    }

    fn start_playback(&mut self) -> Result<()> {
        let Some(input) = self.source.media_input()? else {
            return Err(Error::Core(fxrack_core::Error::InvalidSource(
                "nothing selected".into(),
            )));
        };
        self.engine.load_media(input)?;
        self.engine.play()?;
        Ok(())
    }

    pub fn source(&self) -> &SourceSelector {
        &self.source
    }

    // =========================================================================
    // Chain
    // =========================================================================

    /// Append a stage by UI tag (`reverb`, `gain`, `lpf`, `hpf`, `pan`).
    pub fn append(&mut self, tag: &str) -> StageId {
        self.chain.append(&mut self.engine, &mut self.surface, tag)
    }

    pub fn append_kind(&mut self, kind: EffectKind) -> StageId {
        self.chain
            .append_kind(&mut self.engine, &mut self.surface, kind)
    }

    pub fn remove(&mut self, id: StageId) -> Result<()> {
        self.chain.remove(&mut self.engine, &mut self.surface, id)?;
        Ok(())
    }

    /// Set a stage's slider value. Returns the value after clamping.
    pub fn set_param(&mut self, id: StageId, value: f32) -> Result<f32> {
        Ok(self
            .chain
            .set_param(&mut self.engine, &mut self.surface, id, value)?)
    }

    pub fn rewire(&mut self) -> &RewireReport {
        self.chain.rewire(&mut self.engine, &mut self.surface)
    }

    pub fn chain(&self) -> &ChainManager {
        &self.chain
    }

    // =========================================================================
    // Control events
    // =========================================================================

    /// Sender for widgets living outside the surface.
    pub fn control_sender(&self) -> ControlSender {
        self.events_tx.clone()
    }

    /// Apply every pending control event in arrival order.
    ///
    /// Events for stages that no longer exist are logged and counted as
    /// ignored; they never abort the pump.
    pub fn pump_events(&mut self) -> PumpSummary {
        let mut summary = PumpSummary::default();
        for event in self.events_rx.drain() {
            match event {
                ControlEvent::ParamChanged { stage, value } => {
                    match self
                        .chain
                        .set_param(&mut self.engine, &mut self.surface, stage, value)
                    {
                        Ok(_) => summary.applied += 1,
                        Err(e) => {
                            tracing::warn!("Ignoring slider event: {}", e);
                            summary.ignored += 1;
                        }
                    }
                }
                ControlEvent::RemoveRequested { stage } => {
                    match self
                        .chain
                        .remove(&mut self.engine, &mut self.surface, stage)
                    {
                        Ok(()) => summary.removed += 1,
                        Err(_) => summary.ignored += 1,
                    }
                }
            }
        }
        summary
    }

    // =========================================================================
    // Visualizer
    // =========================================================================

    /// Analyze the tap and lay out this frame's frequency bars.
    pub fn frame(&mut self) -> FrequencyBars {
        let tap = self.chain.endpoints().tap;
        self.engine.read_time_domain(tap, &mut self.tap_buffer);
        self.analyzer.analyze(&self.tap_buffer);

        let mut bytes = vec![0; self.analyzer.frequency_bin_count()];
        self.analyzer.byte_frequency_data(&mut bytes);
        self.visualizer.layout(&bytes)
    }

    /// Recompute the visualizer surface after a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) -> SurfaceSize {
        let size = self.visualizer.resize(width, height);
        tracing::debug!("Visualizer surface now {}x{}", size.width, size.height);
        size
    }

    pub fn surface_size(&self) -> SurfaceSize {
        self.visualizer.size()
    }

    pub fn analyzer(&self) -> &SpectrumAnalyzer {
        &self.analyzer
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn impulse(&self) -> &Arc<ImpulseResponse> {
        self.chain.impulse()
    }

    pub fn impulse_cache(&self) -> &Arc<ImpulseCache> {
        &self.impulse_cache
    }

    pub fn config(&self) -> &RackConfig {
        &self.config
    }

    /// Hand back the engine and surface, dropping the session.
    pub fn into_parts(self) -> (E, S) {
        (self.engine, self.surface)
    }
}
