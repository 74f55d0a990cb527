use std::rc::Rc;

use approx::assert_relative_eq;
use chart_panel::api::{
    AxisSelector, Chart, ChartChangeListener, HeadlessChart, PanelInvalidation, Plot,
    PlotOrientation, PlotRenderingInfo, ZoomController,
};
use chart_panel::core::{Point, Rect};

fn chart_with_listener() -> (HeadlessChart, Rc<PanelInvalidation>) {
    let mut chart = HeadlessChart::with_default_axes().expect("chart");
    let listener = Rc::new(PanelInvalidation::new());
    chart.add_change_listener(listener.clone() as Rc<dyn ChartChangeListener>);
    (chart, listener)
}

fn plot_info() -> PlotRenderingInfo {
    PlotRenderingInfo::new(
        Rect::new(0.0, 0.0, 200.0, 200.0),
        Rect::new(0.0, 0.0, 200.0, 200.0),
    )
}

#[test]
fn zoom_by_factor_on_both_axes_fires_exactly_one_notification() {
    let (mut chart, listener) = chart_with_listener();
    let mut controller = ZoomController::new();

    let applied = controller
        .zoom_by_factor(
            &mut chart,
            &plot_info(),
            AxisSelector::Both,
            0.5,
            Point::new(100.0, 100.0),
            true,
        )
        .expect("zoom");

    assert!(applied);
    assert_eq!(listener.chart_events(), 1);
    assert_eq!(chart.domain_axis().range(), (25.0, 75.0));
    assert_eq!(chart.range_axis().range(), (12.5, 37.5));
    assert!(chart.is_notify());
}

#[test]
fn zoom_by_factor_without_anchor_keeps_center() {
    let (mut chart, listener) = chart_with_listener();
    let mut controller = ZoomController::new();

    controller
        .zoom_by_factor(
            &mut chart,
            &plot_info(),
            AxisSelector::Domain,
            2.0,
            Point::new(10.0, 10.0),
            false,
        )
        .expect("zoom");

    assert_eq!(chart.domain_axis().range(), (-50.0, 150.0));
    assert_eq!(chart.range_axis().range(), (0.0, 50.0));
    assert_eq!(listener.chart_events(), 1);
    assert_eq!(controller.last_anchor(), Some(Point::new(10.0, 10.0)));
}

#[test]
fn zoom_by_factor_rejects_invalid_factor() {
    let (mut chart, listener) = chart_with_listener();
    let mut controller = ZoomController::new();

    for factor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = controller
            .zoom_by_factor(
                &mut chart,
                &plot_info(),
                AxisSelector::Both,
                factor,
                Point::new(0.0, 0.0),
                true,
            )
            .expect_err("invalid factor must fail");
        assert!(format!("{err}").contains("zoom factor"));
    }
    assert_eq!(listener.chart_events(), 0);
}

#[test]
fn zoom_by_factor_skips_axes_that_are_not_zoomable() {
    let (chart, listener) = chart_with_listener();
    let mut chart = chart.with_zoomable(false, false);
    let mut controller = ZoomController::new();

    let applied = controller
        .zoom_by_factor(
            &mut chart,
            &plot_info(),
            AxisSelector::Both,
            0.5,
            Point::new(0.0, 0.0),
            true,
        )
        .expect("no-op");
    assert!(!applied);
    assert_eq!(listener.chart_events(), 0);
}

#[test]
fn zoom_to_rectangle_uses_data_area_fractions() {
    let (mut chart, listener) = chart_with_listener();
    let mut controller = ZoomController::new();

    let applied = controller.zoom_to_rectangle(
        &mut chart,
        &plot_info(),
        AxisSelector::Both,
        Rect::new(50.0, 50.0, 100.0, 100.0),
        Rect::new(0.0, 0.0, 200.0, 200.0),
        Point::new(50.0, 50.0),
    );

    assert!(applied);
    assert_eq!(chart.domain_axis().range(), (25.0, 75.0));
    assert_eq!(chart.range_axis().range(), (12.5, 37.5));
    assert_eq!(listener.chart_events(), 1);
}

#[test]
fn zoom_to_rectangle_swaps_axes_for_horizontal_plots() {
    let (chart, _listener) = chart_with_listener();
    let mut chart = chart.with_orientation(PlotOrientation::Horizontal);
    let mut controller = ZoomController::new();

    // Left half of the screen, bottom quarter.
    controller.zoom_to_rectangle(
        &mut chart,
        &plot_info(),
        AxisSelector::Both,
        Rect::new(0.0, 150.0, 100.0, 50.0),
        Rect::new(0.0, 0.0, 200.0, 200.0),
        Point::new(0.0, 150.0),
    );

    // Domain follows screen Y, range follows screen X.
    assert_eq!(chart.domain_axis().range(), (0.0, 25.0));
    assert_eq!(chart.range_axis().range(), (0.0, 25.0));
}

#[test]
fn degenerate_rectangle_is_a_noop() {
    let (mut chart, listener) = chart_with_listener();
    let mut controller = ZoomController::new();

    let applied = controller.zoom_to_rectangle(
        &mut chart,
        &plot_info(),
        AxisSelector::Both,
        Rect::new(50.0, 50.0, 0.0, 100.0),
        Rect::new(0.0, 0.0, 200.0, 200.0),
        Point::new(50.0, 50.0),
    );

    assert!(!applied);
    assert_eq!(listener.chart_events(), 0);
    assert_eq!(chart.domain_axis().range(), (0.0, 100.0));
}

#[test]
fn restore_auto_bounds_resets_both_axes_with_one_notification() {
    let (mut chart, listener) = chart_with_listener();
    chart.set_domain_range(10.0, 20.0);
    chart.set_range_range(1.0, 2.0);
    let before = listener.chart_events();

    let mut controller = ZoomController::new();
    assert!(controller.restore_auto_bounds(&mut chart, &plot_info(), AxisSelector::Both));

    assert!(chart.domain_axis().is_auto_range());
    assert!(chart.range_axis().is_auto_range());
    assert_eq!(listener.chart_events() - before, 1);
}

#[test]
fn restore_auto_bounds_respects_selector() {
    let (mut chart, _listener) = chart_with_listener();
    chart.set_domain_range(10.0, 20.0);
    chart.set_range_range(1.0, 2.0);

    let mut controller = ZoomController::new();
    controller.restore_auto_bounds(&mut chart, &plot_info(), AxisSelector::Range);

    assert_eq!(chart.domain_axis().range(), (10.0, 20.0));
    assert!(chart.range_axis().is_auto_range());
}

#[test]
fn restore_auto_bounds_ignores_zoomable_flags() {
    let mut chart = HeadlessChart::with_default_axes()
        .expect("chart")
        .with_zoomable(false, false);
    chart.set_domain_range(-10.0, 90.0);

    let mut controller = ZoomController::new();
    assert!(controller.restore_auto_bounds(&mut chart, &plot_info(), AxisSelector::Both));

    assert_eq!(chart.domain_axis().range(), (0.0, 100.0));
}

#[test]
fn caller_suppression_is_preserved() {
    let (mut chart, listener) = chart_with_listener();
    chart.set_notify(false);
    let mut controller = ZoomController::new();

    controller
        .zoom_by_factor(
            &mut chart,
            &plot_info(),
            AxisSelector::Both,
            0.5,
            Point::new(100.0, 100.0),
            true,
        )
        .expect("zoom");

    assert_eq!(listener.chart_events(), 0);
    assert!(!chart.is_notify());
    assert_relative_eq!(chart.domain_axis().length(), 50.0);
}
