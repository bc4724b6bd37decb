//! Slider ranges for stage parameters.
//!
//! # Example
//!
//! ```
//! use fxrack_core::ParameterRange;
//!
//! let cutoff = ParameterRange::new(0.0, 20000.0, 1.0, 20000.0);
//! assert_eq!(cutoff.clamp(440.4), 440.4);
//! assert_eq!(cutoff.clamp(25000.0), 20000.0);
//! ```

/// Range, step and default of a single-value slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    /// Minimum real value
    pub min: f32,
    /// Maximum real value
    pub max: f32,
    /// Slider increment
    pub step: f32,
    /// Default real value
    pub default: f32,
}

impl ParameterRange {
    /// Create a new parameter range.
    ///
    /// `default` is clamped into `min..=max`.
    pub fn new(min: f32, max: f32, step: f32, default: f32) -> Self {
        debug_assert!(max > min, "max must be greater than min");

        Self {
            min,
            max,
            step,
            default: default.clamp(min, max),
        }
    }

    /// Clamp a real value to this parameter's range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

impl Default for ParameterRange {
    fn default() -> Self {
        Self::new(0.0, 1.0, 0.01, 0.5)
    }
}
