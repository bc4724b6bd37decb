//! Reverb impulse response: decoded once, shared read-only by every reverb stage.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader};
use parking_lot::Mutex;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Convolution kernel in engine-native form (deinterleaved f32).
#[derive(Debug, Clone, PartialEq)]
pub struct ImpulseResponse {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl ImpulseResponse {
    pub fn from_channels(sample_rate: u32, channels: Vec<Vec<f32>>) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::ImpulseResponse("sample rate is zero".into()));
        }
        let Some(first) = channels.first() else {
            return Err(Error::ImpulseResponse("no channels".into()));
        };
        if first.is_empty() {
            return Err(Error::ImpulseResponse("no samples".into()));
        }
        if channels.iter().any(|c| c.len() != first.len()) {
            return Err(Error::ImpulseResponse("channel lengths differ".into()));
        }
        Ok(Self {
            sample_rate,
            channels,
        })
    }

    /// Decode a WAV file.
    pub fn from_wav_file(path: impl AsRef<Path>) -> Result<Self> {
        let reader = WavReader::open(path.as_ref())?;
        Self::decode(reader)
    }

    /// Decode WAV data from any reader.
    pub fn from_wav_reader<R: Read>(reader: R) -> Result<Self> {
        Self::decode(WavReader::new(reader)?)
    }

    fn decode<R: Read>(reader: WavReader<R>) -> Result<Self> {
        let spec = reader.spec();
        let channel_count = spec.channels as usize;
        if channel_count == 0 {
            return Err(Error::ImpulseResponse("WAV declares zero channels".into()));
        }

        let interleaved: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<std::result::Result<_, _>>()?,
            SampleFormat::Int => {
                let scale = 1.0 / (1u64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f32 * scale))
                    .collect::<std::result::Result<_, _>>()?
            }
        };

        let frames = interleaved.len() / channel_count;
        let mut channels = vec![Vec::with_capacity(frames); channel_count];
        for frame in interleaved.chunks_exact(channel_count) {
            for (channel, sample) in channels.iter_mut().zip(frame) {
                channel.push(*sample);
            }
        }
        Self::from_channels(spec.sample_rate, channels)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Length in frames.
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }
}

/// Load-once cache for the impulse response.
///
/// Checked before any load is issued, so the asset is decoded at most once
/// per cache for the lifetime of the process.
#[derive(Debug, Default)]
pub struct ImpulseCache {
    slot: Mutex<Option<(PathBuf, Arc<ImpulseResponse>)>>,
}

impl ImpulseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache an already decoded impulse response.
    pub fn insert(
        &self,
        origin: impl Into<PathBuf>,
        impulse: ImpulseResponse,
    ) -> Arc<ImpulseResponse> {
        let impulse = Arc::new(impulse);
        *self.slot.lock() = Some((origin.into(), impulse.clone()));
        impulse
    }

    /// Return the cached impulse, decoding `path` on first use.
    ///
    /// Once something is cached, later calls return it whatever `path` says.
    pub fn get_or_load(&self, path: impl AsRef<Path>) -> Result<Arc<ImpulseResponse>> {
        let path = path.as_ref();
        let mut slot = self.slot.lock();
        if let Some((_, cached)) = slot.as_ref() {
            return Ok(cached.clone());
        }

        let impulse = ImpulseResponse::from_wav_file(path).map_err(|e| {
            Error::ImpulseResponse(format!("failed to load {}: {}", path.display(), e))
        })?;
        tracing::info!(
            "Loaded impulse response {} ({} ch, {:.2}s)",
            path.display(),
            impulse.channel_count(),
            impulse.duration_secs()
        );

        let impulse = Arc::new(impulse);
        *slot = Some((path.to_path_buf(), impulse.clone()));
        Ok(impulse)
    }

    pub fn get(&self) -> Option<Arc<ImpulseResponse>> {
        self.slot.lock().as_ref().map(|(_, ir)| ir.clone())
    }

    /// Where the cached impulse came from.
    pub fn origin(&self) -> Option<PathBuf> {
        self.slot.lock().as_ref().map(|(path, _)| path.clone())
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.lock().is_some()
    }
}
