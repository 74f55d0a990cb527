use approx::assert_relative_eq;
use chart_panel::api::{DisplayPanel, HeadlessChart, PanelConfig};
use chart_panel::core::Viewport;
use chart_panel::interaction::{WheelEvent, WheelZoomHandler};
use image::RgbaImage;

// 400x300 panel, drawn 1:1; data area is (40, 10, 350, 260), so (215, 140)
// is its centre.
fn painted_panel(config: PanelConfig) -> DisplayPanel {
    let mut panel = DisplayPanel::new(config)
        .expect("panel")
        .with_chart(Box::new(HeadlessChart::with_default_axes().expect("chart")))
        .with_size(Viewport::new(400, 300));
    panel.paint(&mut RgbaImage::new(400, 300)).expect("paint");
    panel
}

fn chart(panel: &DisplayPanel) -> &HeadlessChart {
    panel.chart_as::<HeadlessChart>().expect("headless chart")
}

#[test]
fn rotating_away_zooms_in_around_pointer() {
    let mut panel = painted_panel(PanelConfig::default());
    let before = panel.chart_change_count();

    panel.mouse_wheel_moved(&WheelEvent::new(215, 140, -1));

    let (lower, upper) = chart(&panel).domain_axis().range();
    assert_relative_eq!(lower, 50.0 - 50.0 / 1.1, epsilon = 1e-9);
    assert_relative_eq!(upper, 50.0 + 50.0 / 1.1, epsilon = 1e-9);
    let (range_lower, range_upper) = chart(&panel).range_axis().range();
    assert_relative_eq!((range_lower + range_upper) / 2.0, 25.0, epsilon = 1e-9);
    assert_relative_eq!(range_upper - range_lower, 50.0 / 1.1, epsilon = 1e-9);
    assert_eq!(panel.chart_change_count() - before, 1);
}

#[test]
fn rotating_toward_zooms_out_keeping_pointer_value() {
    let mut panel = painted_panel(PanelConfig::default());

    // x = 75 is 10% across the data area.
    panel.mouse_wheel_moved(&WheelEvent::new(75, 140, 3));

    let (lower, upper) = chart(&panel).domain_axis().range();
    assert_relative_eq!(lower, 10.0 - 10.0 * 1.1, epsilon = 1e-9);
    assert_relative_eq!(upper, 10.0 + 90.0 * 1.1, epsilon = 1e-9);
}

#[test]
fn configured_wheel_factor_is_used() {
    let mut panel = painted_panel(PanelConfig::default().with_wheel_zoom_factor(0.25));

    panel.mouse_wheel_moved(&WheelEvent::new(215, 140, 1));

    let (lower, upper) = chart(&panel).domain_axis().range();
    assert_relative_eq!(upper - lower, 125.0, epsilon = 1e-9);
}

#[test]
fn wheel_outside_data_area_is_ignored() {
    let mut panel = painted_panel(PanelConfig::default());
    let before = panel.chart_change_count();

    panel.mouse_wheel_moved(&WheelEvent::new(10, 290, -1));

    assert_eq!(chart(&panel).domain_axis().range(), (0.0, 100.0));
    assert_eq!(panel.chart_change_count(), before);
}

#[test]
fn zero_rotation_is_ignored() {
    let mut panel = painted_panel(PanelConfig::default());
    let before = panel.chart_change_count();

    panel.mouse_wheel_moved(&WheelEvent::new(215, 140, 0));

    assert_eq!(chart(&panel).domain_axis().range(), (0.0, 100.0));
    assert_eq!(panel.chart_change_count(), before);
}

#[test]
fn disabled_wheel_is_ignored() {
    let mut panel = painted_panel(PanelConfig::default().with_mouse_wheel_enabled(false));

    panel.mouse_wheel_moved(&WheelEvent::new(215, 140, -1));

    assert_eq!(chart(&panel).domain_axis().range(), (0.0, 100.0));
}

#[test]
fn wheel_respects_domain_only_zoom() {
    let mut panel = painted_panel(PanelConfig::default().with_zoomable(true, false));

    panel.mouse_wheel_moved(&WheelEvent::new(215, 140, -1));

    let (lower, upper) = chart(&panel).domain_axis().range();
    assert!(upper - lower < 100.0);
    assert_eq!(chart(&panel).range_axis().range(), (0.0, 50.0));
}

#[test]
fn wheel_factor_from_set_config_applies_to_next_step() {
    let mut panel = painted_panel(PanelConfig::default());
    panel
        .set_config(PanelConfig::default().with_wheel_zoom_factor(0.25))
        .expect("config");

    panel.mouse_wheel_moved(&WheelEvent::new(215, 140, 1));

    let (lower, upper) = chart(&panel).domain_axis().range();
    assert_relative_eq!(upper - lower, 125.0, epsilon = 1e-9);
}

#[test]
fn explicit_handler_factor_overrides_panel_setting() {
    let mut panel = painted_panel(PanelConfig::default().with_wheel_zoom_factor(0.25));
    panel.remove_handler(WheelZoomHandler::DEFAULT_ID);
    panel
        .add_handler(Box::new(WheelZoomHandler::new().with_zoom_factor(0.5)))
        .expect("handler");

    panel.mouse_wheel_moved(&WheelEvent::new(215, 140, 1));

    let (lower, upper) = chart(&panel).domain_axis().range();
    assert_relative_eq!(upper - lower, 150.0, epsilon = 1e-9);
}
