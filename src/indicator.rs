//! Lifecycle orchestration - enable/disable state machine and trigger paths
//!
//! Two independent triggers feed the same detection logic: the per-tick
//! backfill pass ([`FvgIndicator::calculate`], one call per bar position during
//! initial load and per recalculation afterwards) and the new-bar pass
//! ([`FvgIndicator::on_bar_opened`]). Both funnel into a single
//! `evaluate_and_apply`, and the overlay's idempotent apply makes it harmless
//! when both paths visit the same central index.

use crate::{chart::ChartSurface, detector, overlay::FvgOverlay, BarFeed, FvgConfig};

/// Stateful FVG indicator driven by host callbacks.
///
/// Single-threaded by design: the host delivers ticks and bar-open events one
/// at a time, and all mutable state lives here.
#[derive(Debug, Clone)]
pub struct FvgIndicator {
    config: FvgConfig,
    overlay: FvgOverlay,
    /// Enabled flag as observed on the previous tick; drives the
    /// enable/disable transitions in `calculate`
    was_enabled: bool,
}

impl Default for FvgIndicator {
    fn default() -> Self {
        Self::new(FvgConfig::default())
    }
}

impl FvgIndicator {
    pub fn new(config: FvgConfig) -> Self {
        let was_enabled = config.enabled;
        Self {
            config,
            overlay: FvgOverlay::new(),
            was_enabled,
        }
    }

    /// Per-tick evaluation pass.
    ///
    /// Reconciles the enabled flag first: turning the flag off clears every
    /// annotation and stops detection; turning it back on resumes detection
    /// without forcing a redraw (the backfill naturally repopulates as it
    /// revisits indices). While disabled this is a no-op.
    ///
    /// With fewer than three completed positions there is no full window yet;
    /// otherwise the bar two positions back is evaluated as the central bar.
    pub fn calculate<F: BarFeed, C: ChartSurface>(&mut self, feed: &F, chart: &mut C, index: usize) {
        if self.was_enabled && !self.config.enabled {
            self.overlay.clear_all(feed.len(), chart);
            self.was_enabled = false;
            return;
        }
        if !self.was_enabled && self.config.enabled {
            self.was_enabled = true;
        }

        if !self.config.enabled {
            return;
        }

        if index < 3 {
            return;
        }

        self.evaluate_and_apply(feed, chart, index - 2);
    }

    /// New-bar trigger path.
    ///
    /// When a bar opens, the window ending at the previous close is complete,
    /// so the bar three positions back from the new count is evaluated. Same
    /// shared logic as `calculate`; results agree whichever path fires first.
    pub fn on_bar_opened<F: BarFeed, C: ChartSurface>(&mut self, feed: &F, chart: &mut C) {
        if !self.config.enabled {
            return;
        }

        let count = feed.len();
        if count < 4 {
            return;
        }

        self.evaluate_and_apply(feed, chart, count - 3);
    }

    /// Shared detection + overlay path for both triggers.
    ///
    /// A malformed pip size skips the tick; the missed central index is an
    /// accepted degradation since each index is visited once per trigger.
    fn evaluate_and_apply<F: BarFeed, C: ChartSurface>(
        &mut self,
        feed: &F,
        chart: &mut C,
        central_index: usize,
    ) {
        let Ok(threshold) = detector::min_gap_price(self.config.minimum_gap_pips, feed.pip_size())
        else {
            return;
        };

        if let Some(event) = detector::detect(feed, central_index, threshold) {
            self.overlay.apply(&event, &self.config, chart);
        }
    }

    /// Flip the external enabled flag.
    ///
    /// The transition itself (clearing on disable, resuming on enable) is
    /// reconciled by the next `calculate` tick.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Host teardown hook - removes everything this indicator drew
    pub fn teardown<F: BarFeed, C: ChartSurface>(&mut self, feed: &F, chart: &mut C) {
        self.overlay.clear_all(feed.len(), chart);
    }

    pub fn config(&self) -> &FvgConfig {
        &self.config
    }

    pub fn overlay(&self) -> &FvgOverlay {
        &self.overlay
    }
}
