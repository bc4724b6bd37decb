//! Error types for fxrack-analysis.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("FFT size must be a power of two in 32..=32768, got {0}")]
    InvalidFftSize(usize),

    #[error("Decibel range is empty: min {min} must be below max {max}")]
    InvalidDecibelRange { min: f32, max: f32 },

    #[error("Smoothing must be within 0..=1, got {0}")]
    InvalidSmoothing(f32),
}

pub type Result<T> = std::result::Result<T, Error>;
