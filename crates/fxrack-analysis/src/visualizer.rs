//! Frequency-bar visualizer data contract.
//!
//! Turns a byte spectrum into the rectangles a renderer fills each frame.
//! Drawing itself is left to the host.

/// Drawing surface, derived from the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Full viewport width, a quarter of its height (rounded down).
    pub fn for_viewport(width: u32, height: u32) -> Self {
        Self {
            width,
            height: height / 4,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Bar colour: red brightens with height, green and blue fixed at 50.
    pub fn for_bar_height(bar_height: u32) -> Self {
        Self {
            r: bar_height.saturating_add(100).min(255) as u8,
            g: 50,
            b: 50,
        }
    }

    /// CSS `rgb()` notation.
    pub fn css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// One filled rectangle, origin at the top-left of the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Bar {
    pub x: f32,
    pub y: u32,
    pub width: f32,
    pub height: u32,
    pub color: Rgb,
}

/// Background fill behind the bars.
pub const BACKGROUND: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Horizontal gap between bars, in pixels.
pub const BAR_GAP: f32 = 1.0;

/// Bars are this many times wider than an even split of the surface, so only
/// the lower part of the spectrum is on screen.
pub const BAR_WIDTH_FACTOR: f32 = 2.5;

/// Bar layout for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrequencyBars {
    size: SurfaceSize,
    bars: Vec<Bar>,
}

impl FrequencyBars {
    /// Lay out one bar per bin, left to right, bottom-aligned.
    ///
    /// Bars starting past the right edge are dropped.
    pub fn layout(data: &[u8], size: SurfaceSize) -> Self {
        if data.is_empty() || size.is_empty() {
            return Self {
                size,
                bars: Vec::new(),
            };
        }

        let bar_width = size.width as f32 / data.len() as f32 * BAR_WIDTH_FACTOR;
        let mut bars = Vec::new();
        let mut x = 0.0;
        for &value in data {
            if x >= size.width as f32 {
                break;
            }
            let height = (u64::from(size.height) * u64::from(value) / 255) as u32;
            bars.push(Bar {
                x,
                y: size.height - height,
                width: bar_width,
                height,
                color: Rgb::for_bar_height(height),
            });
            x += bar_width + BAR_GAP;
        }

        Self { size, bars }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bar> {
        self.bars.iter()
    }
}

impl<'a> IntoIterator for &'a FrequencyBars {
    type Item = &'a Bar;
    type IntoIter = std::slice::Iter<'a, Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}

/// Tracks the surface size across viewport resizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visualizer {
    size: SurfaceSize,
}

impl Visualizer {
    pub fn for_viewport(width: u32, height: u32) -> Self {
        Self {
            size: SurfaceSize::for_viewport(width, height),
        }
    }

    /// Recompute the surface after a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) -> SurfaceSize {
        self.size = SurfaceSize::for_viewport(width, height);
        self.size
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn layout(&self, data: &[u8]) -> FrequencyBars {
        FrequencyBars::layout(data, self.size)
    }
}
