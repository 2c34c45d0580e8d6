//! # fvg-overlay - Fair Value Gap detection and chart overlay
//!
//! Detects three-bar Fair Value Gap (FVG) patterns in an append-only OHLC bar
//! sequence and maintains the renderable overlay state (bar color overrides and
//! gap rectangles) that goes with them.
//!
//! A Fair Value Gap occurs when the extremes of bars N-1 and N+1 leave a price
//! interval untouched by bar N: bullish when `prev_low - next_high` is at least
//! the configured minimum, bearish when `next_low - prev_high` is.
//!
//! ## Quick Start
//!
//! ```rust
//! use fvg_overlay::prelude::*;
//!
//! let mut series = Series::new(0.0001);
//! for (t, high, low) in [
//!     (0, 1.1060, 1.1040),
//!     (60, 1.1058, 1.1042),
//!     (120, 1.1060, 1.1050),
//!     (180, 1.1045, 1.1020),
//!     (240, 1.1010, 1.1000),
//!     (300, 1.1012, 1.1002),
//! ] {
//!     series.push(SeriesBar { open_time: t, high, low });
//! }
//!
//! let mut indicator = FvgIndicator::new(FvgConfig::default());
//! let mut chart = ChartBuffer::new();
//!
//! // Backfill pass over the available history
//! for index in 0..series.len() {
//!     indicator.calculate(&series, &mut chart, index);
//! }
//!
//! // Bar 3 sits inside a bullish gap between bar 2's low and bar 4's high
//! assert!(indicator.overlay().contains(3));
//! ```

pub mod chart;
pub mod detector;
pub mod indicator;
pub mod overlay;

pub mod prelude {
    pub use crate::{
        // Rendering seam
        chart::{ChartBuffer, ChartSurface, Rectangle},
        // Detection
        detector::{detect, min_gap_price, scan, scan_parallel, validate_feed},
        // Lifecycle
        indicator::FvgIndicator,
        // Overlay state
        overlay::{object_id, Annotation, FvgOverlay, OBJECT_PREFIX},
        // Types
        BarFeed,
        Color,
        Direction,
        FvgConfig,
        FvgConfigBuilder,
        // Errors
        FvgError,
        GapEvent,
        Result,
        Series,
        SeriesBar,
    };
}

// ============================================================
// ERRORS
// ============================================================

pub type Result<T> = std::result::Result<T, FvgError>;

/// Errors that can occur during gap detection or feed validation
#[derive(Debug, Clone, thiserror::Error)]
pub enum FvgError {
    #[error("Invalid value: {0}")]
    InvalidValue(&'static str),

    #[error("{field} = {value} out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid bar at index {index}: {reason}")]
    InvalidBar { index: usize, reason: &'static str },
}

// ============================================================
// COLOR
// ============================================================

/// ARGB color used for bar overrides and rectangle fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    /// Fully opaque color from RGB components
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    #[inline]
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Same RGB components with a replaced alpha channel
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self {
            a,
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::YELLOW
    }
}

// ============================================================
// DIRECTION
// ============================================================

/// Direction of a detected gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    Bullish,
    Bearish,
}

impl Direction {
    #[inline]
    pub fn is_bullish(self) -> bool {
        matches!(self, Direction::Bullish)
    }

    #[inline]
    pub fn is_bearish(self) -> bool {
        matches!(self, Direction::Bearish)
    }
}

// ============================================================
// BAR FEED
// ============================================================

/// Read-only access to the host's bar sequence.
///
/// Bars are indexed from 0 in arrival order; an index is stable once assigned.
/// Per-index reads return `None` for out-of-range indices so that incomplete
/// windows stay ordinary boundary cases rather than errors.
pub trait BarFeed {
    /// Number of bars currently available
    fn len(&self) -> usize;

    /// High price of the bar at `index`
    fn high(&self, index: usize) -> Option<f64>;

    /// Low price of the bar at `index`
    fn low(&self, index: usize) -> Option<f64>;

    /// Open timestamp (epoch milliseconds) of the bar at `index`
    fn open_time(&self, index: usize) -> Option<i64>;

    /// Minimum price increment of the instrument
    fn pip_size(&self) -> f64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Blanket impl so feeds can be passed by reference
impl<F: BarFeed + ?Sized> BarFeed for &F {
    fn len(&self) -> usize {
        (*self).len()
    }

    fn high(&self, index: usize) -> Option<f64> {
        (*self).high(index)
    }

    fn low(&self, index: usize) -> Option<f64> {
        (*self).low(index)
    }

    fn open_time(&self, index: usize) -> Option<i64> {
        (*self).open_time(index)
    }

    fn pip_size(&self) -> f64 {
        (*self).pip_size()
    }
}

/// One bar of a [`Series`] - only the fields detection needs
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SeriesBar {
    pub open_time: i64,
    pub high: f64,
    pub low: f64,
}

/// Vec-backed [`BarFeed`] for tests, backfills and batch scans
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Series {
    pip_size: f64,
    bars: Vec<SeriesBar>,
}

impl Series {
    pub fn new(pip_size: f64) -> Self {
        Self {
            pip_size,
            bars: Vec::new(),
        }
    }

    pub fn from_bars(pip_size: f64, bars: Vec<SeriesBar>) -> Self {
        Self { pip_size, bars }
    }

    /// Append a newly closed bar
    pub fn push(&mut self, bar: SeriesBar) {
        self.bars.push(bar);
    }

    pub fn bars(&self) -> &[SeriesBar] {
        &self.bars
    }
}

impl BarFeed for Series {
    fn len(&self) -> usize {
        self.bars.len()
    }

    fn high(&self, index: usize) -> Option<f64> {
        self.bars.get(index).map(|b| b.high)
    }

    fn low(&self, index: usize) -> Option<f64> {
        self.bars.get(index).map(|b| b.low)
    }

    fn open_time(&self, index: usize) -> Option<i64> {
        self.bars.get(index).map(|b| b.open_time)
    }

    fn pip_size(&self) -> f64 {
        self.pip_size
    }
}

// ============================================================
// GAP EVENT
// ============================================================

/// Result of gap detection at one central index - Copy, never retained
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GapEvent {
    /// Middle bar of the three-bar window; the bar that gets annotated
    pub central_index: usize,
    pub direction: Direction,
    /// Upper boundary of the untouched price interval
    pub gap_high: f64,
    /// Lower boundary of the untouched price interval
    pub gap_low: f64,
    /// Open time of the bar before the central bar
    pub start_time: i64,
    /// Open time of the bar after the central bar
    pub end_time: i64,
}

impl GapEvent {
    /// Width of the gap interval in price units
    #[inline]
    pub fn width(&self) -> f64 {
        self.gap_high - self.gap_low
    }
}

// ============================================================
// CONFIGURATION
// ============================================================

/// Indicator configuration - defaults match the classic chart-indicator setup
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FvgConfig {
    /// Color for annotated bars and rectangle outlines
    pub color: Color,
    /// Minimum gap width in pips for a window to qualify
    pub minimum_gap_pips: u32,
    /// Whether to draw a rectangle over the gap interval
    pub show_rectangles: bool,
    /// Alpha applied to `color` for the rectangle fill
    pub rectangle_opacity: u8,
    /// External enabled flag; reconciled by the lifecycle on each tick
    pub enabled: bool,
}

impl Default for FvgConfig {
    fn default() -> Self {
        Self {
            color: Color::YELLOW,
            minimum_gap_pips: 3,
            show_rectangles: true,
            rectangle_opacity: 50,
            enabled: true,
        }
    }
}

impl FvgConfig {
    pub fn builder() -> FvgConfigBuilder {
        FvgConfigBuilder::new()
    }
}

/// Builder for [`FvgConfig`]
#[derive(Debug, Clone, Default)]
pub struct FvgConfigBuilder {
    config: FvgConfig,
}

impl FvgConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: FvgConfig::default(),
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.config.color = color;
        self
    }

    pub fn minimum_gap_pips(mut self, pips: u32) -> Self {
        self.config.minimum_gap_pips = pips;
        self
    }

    pub fn show_rectangles(mut self, show: bool) -> Self {
        self.config.show_rectangles = show;
        self
    }

    pub fn rectangle_opacity(mut self, opacity: u8) -> Self {
        self.config.rectangle_opacity = opacity;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    pub fn build(self) -> FvgConfig {
        self.config
    }
}

// ============================================================
// TESTS
// ============================================================
