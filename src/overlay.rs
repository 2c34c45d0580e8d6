//! Overlay state - tracked annotations over the bar sequence
//!
//! [`FvgOverlay`] owns the set of annotated central indices. Applying the same
//! gap twice is a no-op, and clearing is total: every namespaced rectangle and
//! every bar color override across the whole history goes away at once. There
//! is no per-annotation removal path.

use std::collections::HashMap;

use crate::{
    chart::{ChartSurface, Rectangle},
    Color, FvgConfig, GapEvent,
};

/// Namespace prefix for rectangle identifiers drawn by this overlay
pub const OBJECT_PREFIX: &str = "FVG_";

/// Rectangle identifier for a central index, e.g. `FVG_5`
pub fn object_id(central_index: usize) -> String {
    format!("{OBJECT_PREFIX}{central_index}")
}

/// Visual state recorded for one annotated central bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annotation {
    pub central_index: usize,
    pub color: Color,
    /// Present unless rectangles were disabled when the gap was applied
    pub rectangle: Option<Rectangle>,
}

/// Tracks which central indices carry an active FVG annotation
#[derive(Debug, Clone, Default)]
pub struct FvgOverlay {
    annotations: HashMap<usize, Annotation>,
}

impl FvgOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a confirmed gap to the chart.
    ///
    /// No-op if `event.central_index` is already annotated, so re-detection
    /// from either trigger path never duplicates visuals. Otherwise overrides
    /// the central bar's color and, when enabled, draws the gap rectangle with
    /// the fill alpha taken from `config.rectangle_opacity`.
    pub fn apply<C: ChartSurface>(&mut self, event: &GapEvent, config: &FvgConfig, chart: &mut C) {
        if self.annotations.contains_key(&event.central_index) {
            return;
        }

        chart.set_bar_color(event.central_index, config.color);

        let mut rectangle = None;
        if config.show_rectangles {
            let rect = Rectangle {
                start_time: event.start_time,
                end_time: event.end_time,
                high: event.gap_high,
                low: event.gap_low,
                color: config.color,
                filled: true,
                fill_color: config.color.with_alpha(config.rectangle_opacity),
            };
            chart.draw_rectangle(&object_id(event.central_index), rect);
            rectangle = Some(rect);
        }

        self.annotations.insert(
            event.central_index,
            Annotation {
                central_index: event.central_index,
                color: config.color,
                rectangle,
            },
        );
    }

    /// Removes every annotation this overlay ever created.
    ///
    /// Deletes all prefix-matching rectangles, resets the color override of
    /// every bar from 0 to `bar_count` (not just annotated ones) and empties
    /// the tracked set. Safe to call with nothing to clear.
    pub fn clear_all<C: ChartSurface>(&mut self, bar_count: usize, chart: &mut C) {
        for id in chart.object_ids() {
            if id.starts_with(OBJECT_PREFIX) {
                chart.remove_object(&id);
            }
        }

        for index in 0..bar_count {
            chart.reset_bar_color(index);
        }

        self.annotations.clear();
    }

    /// Whether `central_index` currently carries an annotation
    pub fn contains(&self, central_index: usize) -> bool {
        self.annotations.contains_key(&central_index)
    }

    pub fn annotation(&self, central_index: usize) -> Option<&Annotation> {
        self.annotations.get(&central_index)
    }

    /// Number of active annotations
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}
