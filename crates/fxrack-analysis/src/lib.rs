//! # fxrack analysis
//!
//! Spectrum analysis for the rack's analysis tap and the frequency-bar
//! visualizer layout.
//!
//! - **Spectrum**: analyser-node style FFT with smoothing and byte quantization
//! - **Visualizer**: surface sizing and per-frame bar rectangles
//!
//! All functions operate on raw `&[f32]` / `&[u8]` buffers.
//!
//! ## Example
//!
//! ```rust
//! use fxrack_analysis::{SpectrumAnalyzer, Visualizer};
//!
//! let mut analyzer = SpectrumAnalyzer::new(2048).unwrap();
//! let visualizer = Visualizer::for_viewport(1280, 720);
//!
//! let samples = vec![0.0f32; 2048];
//! let bytes = analyzer.frame_bytes(&samples);
//! let bars = visualizer.layout(&bytes);
//! assert!(bars.iter().all(|bar| bar.height == 0));
//! ```

pub mod error;
pub mod spectrum;
pub mod visualizer;

pub use error::{Error, Result};
pub use spectrum::{decibels_to_byte, linear_to_decibels, SpectrumAnalyzer};
pub use visualizer::{Bar, FrequencyBars, Rgb, SurfaceSize, Visualizer};
