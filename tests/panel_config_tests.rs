use chart_panel::api::{DisplayPanel, PanelConfig};
use chart_panel::core::DrawBounds;
use chart_panel::interaction::{Modifiers, TooltipDelays};
use chart_panel::render::Color;
use chart_panel::ChartError;

#[test]
fn defaults_match_panel_behavior() {
    let config = PanelConfig::default();
    assert_eq!(config.draw_bounds, DrawBounds::new(300, 200, 1024, 768));
    assert!(config.buffer_used);
    assert_eq!(config.zoom_in_factor, 0.5);
    assert_eq!(config.zoom_out_factor, 2.0);
    assert!(!config.zoom_around_anchor);
    assert_eq!(config.wheel_zoom_factor, 0.10);
    assert!(config.mouse_wheel_enabled);
    assert_eq!(config.zoom_trigger_distance, 10.0);
    assert!(config.domain_zoomable && config.range_zoomable);
    assert!(config.fill_zoom_rectangle);
    assert_eq!(config.zoom_fill_color.to_rgba8().0, [0, 0, 255, 63]);
    assert_eq!(config.zoom_outline_color, Color::BLUE);
    assert!(config.display_tooltips);
    assert_eq!(config.tooltip_delays, TooltipDelays::default());
    assert_eq!(config.pan_modifier_mask, Modifiers::platform_pan_mask());
    assert!(config.validate().is_ok());
}

#[test]
fn partial_json_keeps_defaults_for_missing_fields() {
    let config = PanelConfig::from_json_str(
        r#"{ "zoom_in_factor": 0.25, "buffer_used": false, "tooltip_delays": { "initial_ms": 100 } }"#,
    )
    .expect("parse");

    assert_eq!(config.zoom_in_factor, 0.25);
    assert!(!config.buffer_used);
    assert_eq!(config.zoom_out_factor, 2.0);
    assert_eq!(config.tooltip_delays.initial_ms, 100);
    assert_eq!(config.tooltip_delays.dismiss_ms, 4000);
}

#[test]
fn json_document_restores_the_same_config() {
    let config = PanelConfig::default()
        .with_zoom_factors(0.8, 1.25)
        .with_zoomable(true, false)
        .with_pan_modifier_mask(Modifiers::SHIFT | Modifiers::ALT);

    let json = config.to_json_pretty().expect("serialize");
    assert_eq!(PanelConfig::from_json_str(&json).expect("parse"), config);
}

#[test]
fn invalid_values_are_rejected() {
    let err = PanelConfig::from_json_str(r#"{ "zoom_out_factor": 0.0 }"#).expect_err("zero factor");
    assert!(matches!(err, ChartError::InvalidConfig(message) if message.contains("zoom_out_factor")));

    let err = PanelConfig::from_json_str(r#"{ "wheel_zoom_factor": -0.1 }"#).expect_err("negative");
    assert!(matches!(err, ChartError::InvalidConfig(_)));

    assert!(
        PanelConfig::default()
            .with_zoom_trigger_distance(f64::NAN)
            .validate()
            .is_err()
    );
    assert!(
        PanelConfig::default()
            .with_zoom_rectangle_colors(Color::rgba(0.0, 0.0, 2.0, 0.5), Color::BLUE)
            .validate()
            .is_err()
    );
}

#[test]
fn zero_wheel_factor_and_trigger_distance_are_allowed() {
    let config = PanelConfig::default()
        .with_wheel_zoom_factor(0.0)
        .with_zoom_trigger_distance(0.0);
    assert!(config.validate().is_ok());
}

#[test]
fn malformed_json_is_invalid_data() {
    let err = PanelConfig::from_json_str("{ not json").expect_err("malformed");
    assert!(matches!(err, ChartError::InvalidData(message) if message.contains("panel config")));
}

#[test]
fn panel_construction_validates_config() {
    let invalid = PanelConfig::default().with_zoom_factors(-1.0, 2.0);
    assert!(DisplayPanel::new(invalid).is_err());
    assert!(DisplayPanel::without_handlers(invalid).is_err());
}

#[test]
fn set_config_keeps_previous_config_on_error() {
    let mut panel = DisplayPanel::new(PanelConfig::default()).expect("panel");
    let invalid = PanelConfig::default().with_zoom_factors(0.5, f64::INFINITY);

    assert!(panel.set_config(invalid).is_err());
    assert_eq!(*panel.config(), PanelConfig::default());

    let updated = PanelConfig::default().with_buffer_used(false);
    panel.set_config(updated).expect("valid config");
    assert!(!panel.config().buffer_used);
}

#[test]
fn unordered_draw_bounds_are_accepted() {
    let config = PanelConfig::default().with_draw_bounds(DrawBounds::new(800, 200, 300, 768));
    assert!(!config.draw_bounds.is_ordered());
    assert!(DisplayPanel::new(config).is_ok());
}
