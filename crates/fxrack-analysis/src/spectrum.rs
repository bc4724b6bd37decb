//! Spectrum analysis for the analysis tap.
//!
//! Follows analyser-node semantics: the most recent `fft_size` samples are
//! Blackman-windowed and transformed, magnitudes are smoothed over time with
//! a single-pole average, converted to decibels and optionally quantized onto
//! `0..=255` between `min_decibels` and `max_decibels`.

use crate::{Error, Result};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

pub const MIN_FFT_SIZE: usize = 32;
pub const MAX_FFT_SIZE: usize = 32768;

pub const DEFAULT_FFT_SIZE: usize = 2048;
pub const DEFAULT_SMOOTHING: f32 = 0.8;
pub const DEFAULT_MIN_DECIBELS: f32 = -100.0;
pub const DEFAULT_MAX_DECIBELS: f32 = -30.0;

pub struct SpectrumAnalyzer {
    fft_size: usize,
    smoothing: f32,
    min_decibels: f32,
    max_decibels: f32,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    /// Smoothed linear magnitudes, one per bin.
    magnitudes: Vec<f32>,
    buffer: Vec<Complex<f32>>,
}

impl SpectrumAnalyzer {
    /// Analyzer with the default smoothing and decibel range.
    pub fn new(fft_size: usize) -> Result<Self> {
        Self::with_params(
            fft_size,
            DEFAULT_SMOOTHING,
            DEFAULT_MIN_DECIBELS,
            DEFAULT_MAX_DECIBELS,
        )
    }

    pub fn with_params(
        fft_size: usize,
        smoothing: f32,
        min_decibels: f32,
        max_decibels: f32,
    ) -> Result<Self> {
        if !fft_size.is_power_of_two() || !(MIN_FFT_SIZE..=MAX_FFT_SIZE).contains(&fft_size) {
            return Err(Error::InvalidFftSize(fft_size));
        }
        check_smoothing(smoothing)?;
        check_decibels(min_decibels, max_decibels)?;

        let fft = FftPlanner::new().plan_fft_forward(fft_size);
        Ok(Self {
            fft_size,
            smoothing,
            min_decibels,
            max_decibels,
            fft,
            window: blackman_window(fft_size),
            magnitudes: vec![0.0; fft_size / 2],
            buffer: vec![Complex::new(0.0, 0.0); fft_size],
        })
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of frequency bins, half the FFT size.
    pub fn frequency_bin_count(&self) -> usize {
        self.fft_size / 2
    }

    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }

    pub fn min_decibels(&self) -> f32 {
        self.min_decibels
    }

    pub fn max_decibels(&self) -> f32 {
        self.max_decibels
    }

    pub fn set_smoothing(&mut self, smoothing: f32) -> Result<()> {
        check_smoothing(smoothing)?;
        self.smoothing = smoothing;
        Ok(())
    }

    pub fn set_decibel_range(&mut self, min_decibels: f32, max_decibels: f32) -> Result<()> {
        check_decibels(min_decibels, max_decibels)?;
        self.min_decibels = min_decibels;
        self.max_decibels = max_decibels;
        Ok(())
    }

    /// Centre frequency of `bin` in Hz.
    pub fn bin_frequency(&self, bin: usize, sample_rate: f32) -> f32 {
        bin as f32 * sample_rate / self.fft_size as f32
    }

    /// Forget the smoothing history.
    pub fn reset(&mut self) {
        self.magnitudes.fill(0.0);
    }

    /// Advance one frame over the latest time-domain samples.
    ///
    /// Only the last `fft_size` samples are used; a shorter input is treated
    /// as preceded by silence.
    pub fn analyze(&mut self, time_domain: &[f32]) {
        let take = time_domain.len().min(self.fft_size);
        let pad = self.fft_size - take;
        let recent = &time_domain[time_domain.len() - take..];

        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = if i < pad { 0.0 } else { recent[i - pad] };
            *slot = Complex::new(sample * self.window[i], 0.0);
        }
        self.fft.process(&mut self.buffer);

        let scale = 1.0 / self.fft_size as f32;
        let tau = self.smoothing;
        for (smoothed, bin) in self.magnitudes.iter_mut().zip(&self.buffer) {
            *smoothed = tau * *smoothed + (1.0 - tau) * bin.norm() * scale;
        }
    }

    /// Current spectrum in decibels. Silent bins read `-inf`.
    pub fn float_frequency_data(&self, out: &mut [f32]) {
        for (slot, magnitude) in out.iter_mut().zip(&self.magnitudes) {
            *slot = linear_to_decibels(*magnitude);
        }
    }

    /// Current spectrum quantized onto `0..=255`.
    pub fn byte_frequency_data(&self, out: &mut [u8]) {
        for (slot, magnitude) in out.iter_mut().zip(&self.magnitudes) {
            *slot = decibels_to_byte(
                linear_to_decibels(*magnitude),
                self.min_decibels,
                self.max_decibels,
            );
        }
    }

    /// Analyze a frame and return its byte spectrum.
    pub fn frame_bytes(&mut self, time_domain: &[f32]) -> Vec<u8> {
        self.analyze(time_domain);
        let mut out = vec![0; self.frequency_bin_count()];
        self.byte_frequency_data(&mut out);
        out
    }
}

fn check_smoothing(smoothing: f32) -> Result<()> {
    if (0.0..=1.0).contains(&smoothing) {
        Ok(())
    } else {
        Err(Error::InvalidSmoothing(smoothing))
    }
}

fn check_decibels(min: f32, max: f32) -> Result<()> {
    if min < max {
        Ok(())
    } else {
        Err(Error::InvalidDecibelRange { min, max })
    }
}

fn blackman_window(size: usize) -> Vec<f32> {
    const A0: f32 = 0.42;
    const A1: f32 = 0.5;
    const A2: f32 = 0.08;
    (0..size)
        .map(|i| {
            let phase = 2.0 * std::f32::consts::PI * i as f32 / size as f32;
            A0 - A1 * phase.cos() + A2 * (2.0 * phase).cos()
        })
        .collect()
}

pub fn linear_to_decibels(magnitude: f32) -> f32 {
    20.0 * magnitude.log10()
}

/// Map a decibel value onto `0..=255`, saturating outside `[min, max]`.
pub fn decibels_to_byte(db: f32, min: f32, max: f32) -> u8 {
    let scaled = 255.0 / (max - min) * (db - min);
    scaled.clamp(0.0, 255.0) as u8
}
