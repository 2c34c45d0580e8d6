//! Integration tests for overlay state: idempotent apply and total clear.

use fvg_overlay::prelude::*;

fn bullish_event(central_index: usize) -> GapEvent {
    GapEvent {
        central_index,
        direction: Direction::Bullish,
        gap_high: 1.1050,
        gap_low: 1.1010,
        start_time: (central_index as i64 - 1) * 60_000,
        end_time: (central_index as i64 + 1) * 60_000,
    }
}

#[test]
fn test_apply_creates_annotation_and_visuals() {
    let config = FvgConfig::default();
    let mut overlay = FvgOverlay::new();
    let mut chart = ChartBuffer::new();

    overlay.apply(&bullish_event(5), &config, &mut chart);

    assert_eq!(overlay.len(), 1);
    assert!(overlay.contains(5));
    assert_eq!(chart.bar_color(5), Some(config.color));

    let rect = chart.rectangle("FVG_5").expect("rectangle drawn");
    assert_eq!(rect.start_time, 4 * 60_000);
    assert_eq!(rect.end_time, 6 * 60_000);
    assert!((rect.high - 1.1050).abs() < 1e-12);
    assert!((rect.low - 1.1010).abs() < 1e-12);
    assert!(rect.filled);
    assert_eq!(rect.color, Color::YELLOW);
    assert_eq!(rect.fill_color, Color::YELLOW.with_alpha(50));
}

#[test]
fn test_apply_is_idempotent() {
    let config = FvgConfig::default();
    let mut overlay = FvgOverlay::new();
    let mut chart = ChartBuffer::new();

    overlay.apply(&bullish_event(5), &config, &mut chart);
    overlay.apply(&bullish_event(5), &config, &mut chart);

    assert_eq!(overlay.len(), 1);
    assert_eq!(chart.rectangle_count(), 1);
    assert_eq!(chart.override_count(), 1);
}

#[test]
fn test_apply_without_rectangles() {
    let config = FvgConfig::builder().show_rectangles(false).build();
    let mut overlay = FvgOverlay::new();
    let mut chart = ChartBuffer::new();

    overlay.apply(&bullish_event(5), &config, &mut chart);

    assert!(overlay.contains(5));
    assert_eq!(chart.rectangle_count(), 0);
    assert_eq!(chart.bar_color(5), Some(config.color));
    assert!(overlay.annotation(5).unwrap().rectangle.is_none());
}

#[test]
fn test_fill_alpha_follows_configured_opacity() {
    let config = FvgConfig::builder()
        .color(Color::rgb(200, 30, 30))
        .rectangle_opacity(90)
        .build();
    let mut overlay = FvgOverlay::new();
    let mut chart = ChartBuffer::new();

    overlay.apply(&bullish_event(2), &config, &mut chart);

    let rect = chart.rectangle("FVG_2").unwrap();
    assert_eq!(rect.fill_color, Color::argb(90, 200, 30, 30));
    assert_eq!(rect.color, Color::rgb(200, 30, 30));
}

#[test]
fn test_clear_all_is_total() {
    let config = FvgConfig::default();
    let mut overlay = FvgOverlay::new();
    let mut chart = ChartBuffer::new();

    for central_index in [2, 5, 8] {
        overlay.apply(&bullish_event(central_index), &config, &mut chart);
    }
    assert_eq!(overlay.len(), 3);
    assert_eq!(chart.rectangle_count(), 3);

    overlay.clear_all(10, &mut chart);

    assert!(overlay.is_empty());
    assert_eq!(chart.rectangle_count(), 0);
    for index in 0..10 {
        assert_eq!(chart.bar_color(index), None);
    }
}

#[test]
fn test_clear_all_on_empty_overlay_is_noop() {
    let mut overlay = FvgOverlay::new();
    let mut chart = ChartBuffer::new();

    overlay.clear_all(100, &mut chart);

    assert!(overlay.is_empty());
    assert_eq!(chart.rectangle_count(), 0);
}

#[test]
fn test_clear_all_leaves_foreign_objects() {
    let config = FvgConfig::default();
    let mut overlay = FvgOverlay::new();
    let mut chart = ChartBuffer::new();

    overlay.apply(&bullish_event(5), &config, &mut chart);

    // Object drawn by someone else, outside the FVG namespace
    let foreign = Rectangle {
        start_time: 0,
        end_time: 60_000,
        high: 2.0,
        low: 1.0,
        color: Color::rgb(0, 0, 255),
        filled: false,
        fill_color: Color::rgb(0, 0, 255),
    };
    chart.draw_rectangle("NOTE_1", foreign);

    overlay.clear_all(10, &mut chart);

    assert_eq!(chart.rectangle_count(), 1);
    assert!(chart.rectangle("NOTE_1").is_some());
    assert!(chart.rectangle("FVG_5").is_none());
}

#[test]
fn test_object_id_namespace() {
    assert_eq!(object_id(7), "FVG_7");
    assert!(object_id(123).starts_with(OBJECT_PREFIX));
}

#[test]
fn test_annotation_records_event_geometry() {
    let config = FvgConfig::default();
    let mut overlay = FvgOverlay::new();
    let mut chart = ChartBuffer::new();

    overlay.apply(&bullish_event(5), &config, &mut chart);

    let annotation = overlay.annotation(5).unwrap();
    assert_eq!(annotation.central_index, 5);
    assert_eq!(annotation.color, config.color);
    let rect = annotation.rectangle.unwrap();
    assert_eq!(Some(&rect), chart.rectangle("FVG_5"));
}
