//! Rendering collaborator seam
//!
//! The host chart is abstracted behind [`ChartSurface`] so the overlay logic
//! never touches platform drawing primitives directly. [`ChartBuffer`] is the
//! in-memory implementation used by tests and headless consumers.

use std::collections::{BTreeMap, HashMap};

use crate::Color;

/// A filled rectangle spanning a gap interval between two bar open times
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rectangle {
    pub start_time: i64,
    pub end_time: i64,
    pub high: f64,
    pub low: f64,
    /// Outline color
    pub color: Color,
    pub filled: bool,
    /// Fill color; outline color with the configured opacity applied
    pub fill_color: Color,
}

/// Drawing surface the overlay renders onto.
///
/// `reset_bar_color` must accept any index, overridden before or not; resetting
/// an untouched bar is a no-op. Object identifiers are plain strings so the
/// overlay can namespace its rectangles and later enumerate-and-remove them by
/// prefix.
pub trait ChartSurface {
    /// Override the fill and outline color of the bar at `index`
    fn set_bar_color(&mut self, index: usize, color: Color);

    /// Remove any color override at `index`, restoring the default rendering
    fn reset_bar_color(&mut self, index: usize);

    /// Draw (or replace) the rectangle stored under `id`
    fn draw_rectangle(&mut self, id: &str, rectangle: Rectangle);

    /// Remove the object stored under `id`; absent ids are a no-op
    fn remove_object(&mut self, id: &str);

    /// Identifiers of every currently drawn object
    fn object_ids(&self) -> Vec<String>;
}

/// In-memory [`ChartSurface`] - sparse color overrides plus drawn objects
#[derive(Debug, Clone, Default)]
pub struct ChartBuffer {
    bar_colors: HashMap<usize, Color>,
    objects: BTreeMap<String, Rectangle>,
}

impl ChartBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current color override at `index`, if any
    pub fn bar_color(&self, index: usize) -> Option<Color> {
        self.bar_colors.get(&index).copied()
    }

    /// Number of bars with an active color override
    pub fn override_count(&self) -> usize {
        self.bar_colors.len()
    }

    pub fn rectangle(&self, id: &str) -> Option<&Rectangle> {
        self.objects.get(id)
    }

    pub fn rectangle_count(&self) -> usize {
        self.objects.len()
    }
}

impl ChartSurface for ChartBuffer {
    fn set_bar_color(&mut self, index: usize, color: Color) {
        self.bar_colors.insert(index, color);
    }

    fn reset_bar_color(&mut self, index: usize) {
        self.bar_colors.remove(&index);
    }

    fn draw_rectangle(&mut self, id: &str, rectangle: Rectangle) {
        self.objects.insert(id.to_string(), rectangle);
    }

    fn remove_object(&mut self, id: &str) {
        self.objects.remove(id);
    }

    fn object_ids(&self) -> Vec<String> {
        self.objects.keys().cloned().collect()
    }
}
