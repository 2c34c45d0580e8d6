//! Fair Value Gap detection over a three-bar window
//!
//! Pure functions: no state, no mutation of the feed, deterministic output.
//! The central bar of the window is the one that gets annotated; its neighbors
//! provide the gap boundaries.

use rayon::prelude::*;

use crate::{BarFeed, Direction, FvgError, GapEvent, Result};

/// Converts a pip threshold into price units using the instrument's pip size.
///
/// A non-finite or non-positive pip size means the feed handed over malformed
/// instrument data; the caller is expected to skip the current tick.
pub fn min_gap_price(minimum_gap_pips: u32, pip_size: f64) -> Result<f64> {
  if pip_size.is_nan() || pip_size.is_infinite() {
    return Err(FvgError::InvalidValue("pip size must be finite"));
  }
  if pip_size <= 0.0 {
    return Err(FvgError::OutOfRange {
      field: "pip_size",
      value: pip_size,
      min:   f64::MIN_POSITIVE,
      max:   f64::MAX,
    });
  }
  Ok(f64::from(minimum_gap_pips) * pip_size)
}

/// Detects a Fair Value Gap centered on `central_index`.
///
/// Bullish: `prev_low - next_high >= minimum_gap_price`, interval
/// `[next_high, prev_low]`. Bearish: `next_low - prev_high >=
/// minimum_gap_price`, interval `[prev_high, next_low]`. The comparison is
/// inclusive, so a gap exactly equal to the threshold qualifies. Bullish is
/// evaluated first and at most one direction is ever reported.
///
/// Returns `None` when either neighbor bar is missing (an out-of-range window
/// is a normal boundary case) or when the feed yields NaN prices.
pub fn detect<F: BarFeed>(
  feed: &F,
  central_index: usize,
  minimum_gap_price: f64,
) -> Option<GapEvent> {
  if central_index < 1 || central_index + 1 >= feed.len() {
    return None;
  }

  let prev_high = feed.high(central_index - 1)?;
  let prev_low = feed.low(central_index - 1)?;
  let next_high = feed.high(central_index + 1)?;
  let next_low = feed.low(central_index + 1)?;

  if prev_high.is_nan() || prev_low.is_nan() || next_high.is_nan() || next_low.is_nan() {
    return None;
  }

  let (direction, gap_high, gap_low) = if prev_low - next_high >= minimum_gap_price {
    (Direction::Bullish, prev_low, next_high)
  } else if next_low - prev_high >= minimum_gap_price {
    (Direction::Bearish, next_low, prev_high)
  } else {
    return None;
  };

  let start_time = feed.open_time(central_index - 1)?;
  let end_time = feed.open_time(central_index + 1)?;

  Some(GapEvent {
    central_index,
    direction,
    gap_high,
    gap_low,
    start_time,
    end_time,
  })
}

/// Scans every detectable central index of the feed in one pass.
///
/// Batch/backtest counterpart of [`detect`]; the incremental lifecycle in
/// [`crate::indicator`] covers the live path.
pub fn scan<F: BarFeed>(feed: &F, minimum_gap_price: f64) -> Vec<GapEvent> {
  let len = feed.len();
  if len < 3 {
    return Vec::new();
  }

  (1..len - 1)
    .filter_map(|central_index| detect(feed, central_index, minimum_gap_price))
    .collect()
}

/// Parallel scanning of multiple instruments
pub fn scan_parallel<'a, F, I>(instruments: I, minimum_gap_pips: u32) -> Vec<(String, Vec<GapEvent>)>
where
  F: BarFeed + Sync + 'a,
  I: IntoParallelIterator<Item = (&'a str, &'a F)>,
{
  instruments
    .into_par_iter()
    .map(|(symbol, feed)| {
      let gaps = match min_gap_price(minimum_gap_pips, feed.pip_size()) {
        Ok(threshold) => scan(feed, threshold),
        Err(_) => Vec::new(),
      };
      (symbol.to_string(), gaps)
    })
    .collect()
}

/// Validates feed data consistency over every available bar.
///
/// Rejects `high < low`, NaN and infinite prices. Optional precondition check
/// for batch scans; the incremental path degrades by skipping ticks instead.
pub fn validate_feed<F: BarFeed>(feed: &F) -> Result<()> {
  for index in 0..feed.len() {
    let high = feed.high(index).ok_or(FvgError::InvalidBar {
      index,
      reason: "missing high price",
    })?;
    let low = feed.low(index).ok_or(FvgError::InvalidBar {
      index,
      reason: "missing low price",
    })?;

    if high.is_nan() || low.is_nan() {
      return Err(FvgError::InvalidBar { index, reason: "NaN price" });
    }
    if high.is_infinite() || low.is_infinite() {
      return Err(FvgError::InvalidBar { index, reason: "infinite price" });
    }
    if high < low {
      return Err(FvgError::InvalidBar { index, reason: "high < low" });
    }
  }
  Ok(())
}
