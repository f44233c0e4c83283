use crate::*;
use serde_json::json;

#[test]
fn empty_config_yields_defaults() {
    let cfg = FlowConfig::default();
    assert_eq!(cfg.layout().unwrap(), LayoutConfig::default());
    assert_eq!(cfg.viewport().unwrap(), ViewportConfig::default());
}

#[test]
fn profile_presets_layer_under_overrides() {
    let cfg = FlowConfig::for_profile(
        ScreenProfile::Fullscreen,
        Some(&json!({ "layout": { "nodeWidth": 22.0 }, "viewport": { "maxScale": 5.0 } })),
    );
    let layout = cfg.layout().unwrap();
    assert_eq!(layout.canvas_width, 720.0);
    assert_eq!(layout.node_width, 22.0);
    assert_eq!(layout.min_node_height, LayoutConfig::default().min_node_height);

    let viewport = cfg.viewport().unwrap();
    assert_eq!(viewport.min_scale, 0.4);
    assert_eq!(viewport.max_scale, 5.0);
    assert!(viewport.zoom_enabled);
}

#[test]
fn planner_profile_disables_zoom() {
    let cfg = FlowConfig::for_profile(ScreenProfile::Planner, None);
    assert!(!cfg.viewport().unwrap().zoom_enabled);
    assert_eq!(cfg.layout().unwrap().canvas_height, 360.0);
}

#[test]
fn overrides_replace_leaves_and_keep_sibling_keys() {
    let mut cfg = FlowConfig::from_value(json!("not an object"));
    cfg.deep_merge(&json!({ "layout": { "currencySymbol": "€", "nodeWidth": 20.0 } }));
    cfg.deep_merge(&json!({ "layout": { "nodeWidth": 16.0 } }));
    let layout = cfg.layout().unwrap();
    assert_eq!(layout.currency_symbol, "€");
    assert_eq!(layout.node_width, 16.0);
}

#[test]
fn malformed_section_is_a_config_error() {
    let cfg = FlowConfig::from_value(json!({ "layout": { "nodeWidth": "wide" } }));
    let err = cfg.layout().unwrap_err();
    assert!(matches!(err, Error::Config { ref section, .. } if section == "layout"));
}

#[test]
fn out_of_range_values_are_clamped() {
    let cfg = FlowConfig::from_value(json!({
        "layout": { "minNodeHeight": -3.0, "overBudgetColorThreshold": 7.0, "labelMaxChars": 0 },
        "viewport": { "minScale": 2.0, "maxScale": 1.0, "initialScale": 9.0, "zoomSteps": [] }
    }));
    let layout = cfg.layout().unwrap();
    assert_eq!(layout.min_node_height, 0.5);
    assert_eq!(layout.over_budget_color_threshold, 1.0);
    assert_eq!(layout.label_max_chars, 2);

    let viewport = cfg.viewport().unwrap();
    assert_eq!(viewport.min_scale, 2.0);
    assert_eq!(viewport.max_scale, 3.0);
    assert_eq!(viewport.initial_scale, 3.0);
    assert_eq!(viewport.zoom_steps, ViewportConfig::default().zoom_steps);
}

#[test]
fn zoom_factor_follows_band_table() {
    let v = ViewportConfig::default();
    assert_eq!(v.zoom_factor_at(0.5), 1.1);
    assert_eq!(v.zoom_factor_at(0.8), 1.25);
    assert_eq!(v.zoom_factor_at(1.9), 1.25);
    assert_eq!(v.zoom_factor_at(2.0), 1.1);
    assert_eq!(v.zoom_factor_at(100.0), 1.1);
}

#[test]
fn zoom_ladder_spans_the_scale_range() {
    let v = ViewportConfig::default();
    let ladder = v.zoom_ladder();
    assert_eq!(ladder.first(), Some(&0.5));
    assert_eq!(ladder.last(), Some(&3.0));
    assert!(ladder.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(ladder[1], 1.0 / 1.25 / 1.25 / 1.1 / 1.1);
    assert_eq!(ladder[2], 1.0 / 1.25 / 1.25 / 1.1);
    assert!(ladder.contains(&1.0));
    assert!(ladder.contains(&1.953125));
    assert!(ladder.contains(&2.44140625));
}

#[test]
fn screen_profile_parses_from_str() {
    assert_eq!(
        "fullscreen".parse::<ScreenProfile>().unwrap(),
        ScreenProfile::Fullscreen
    );
    assert_eq!(
        ScreenProfile::SavedBudget.as_str().parse::<ScreenProfile>().unwrap(),
        ScreenProfile::SavedBudget
    );
    assert!("kiosk".parse::<ScreenProfile>().is_err());
}
