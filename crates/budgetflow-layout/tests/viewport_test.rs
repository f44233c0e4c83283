use budgetflow_core::geom::{point, size};
use budgetflow_core::{FlowConfig, ScreenProfile, ViewportConfig};
use budgetflow_layout::model::Bounds;
use budgetflow_layout::viewport::{GesturePhase, pan_sensitivity};
use budgetflow_layout::{GestureEvent, ViewportController, ViewportState, ViewportTransition};

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn controller() -> ViewportController {
    ViewportController::new(ViewportConfig::default())
}

fn pan(ctl: &mut ViewportController, dx: f64, dy: f64) {
    ctl.handle(GestureEvent::Begin);
    ctl.handle(GestureEvent::moved(dx, dy));
    ctl.handle(GestureEvent::End);
}

#[test]
fn zoom_in_stops_at_max_scale() {
    let mut ctl = controller();
    let mut scales = vec![ctl.state().scale];
    while let Some(t) = ctl.zoom_in() {
        assert_eq!(t.to, ctl.state());
        scales.push(ctl.state().scale);
        assert!(scales.len() < 32, "zoom in never terminated");
    }
    assert!(approx_eq(scales[1], 1.25));
    assert!(approx_eq(scales[2], 1.5625));
    assert!(scales.windows(2).all(|w| w[0] < w[1]));
    assert!(approx_eq(*scales.last().unwrap(), 3.0));
    assert!(!ctl.can_zoom_in());
    assert!(ctl.can_zoom_out());
}

#[test]
fn zoom_steps_shrink_above_two() {
    let mut ctl = controller();
    while ctl.state().scale < 2.0 {
        ctl.zoom_in().unwrap();
    }
    let before = ctl.state().scale;
    ctl.zoom_in().unwrap();
    assert!(approx_eq(ctl.state().scale, before * 1.1));
}

#[test]
fn zoom_out_stops_at_min_scale() {
    let mut ctl = controller();
    let mut steps = 0;
    while ctl.zoom_out().is_some() {
        steps += 1;
        assert!(ctl.state().scale >= 0.5);
        assert!(steps < 32, "zoom out never terminated");
    }
    assert!(approx_eq(ctl.state().scale, 0.5));
    assert!(ctl.zoom_out().is_none());
}

#[test]
fn zoom_in_then_out_returns_to_the_same_scale() {
    let mut ctl = controller();
    for _ in 0..3 {
        ctl.zoom_in().unwrap();
    }
    let before = ctl.state().scale;
    assert!(approx_eq(before, 1.953125));
    ctl.zoom_in().unwrap();
    assert!(approx_eq(ctl.state().scale, 2.44140625));
    ctl.zoom_out().unwrap();
    assert_eq!(ctl.state().scale, before);
}

#[test]
fn repeated_zoom_round_trips_to_initial_scale() {
    for n in 1..=6 {
        let mut ctl = controller();
        for _ in 0..n {
            ctl.zoom_in().unwrap();
        }
        for _ in 0..n {
            ctl.zoom_out().unwrap();
        }
        assert_eq!(ctl.state().scale, 1.0, "after {n} steps each way");
    }

    let mut ctl = controller();
    for _ in 0..3 {
        ctl.zoom_out().unwrap();
    }
    for _ in 0..3 {
        ctl.zoom_in().unwrap();
    }
    assert_eq!(ctl.state().scale, 1.0);
}

#[test]
fn zoom_keeps_translation() {
    let mut ctl = controller();
    pan(&mut ctl, 40.0, -10.0);
    ctl.zoom_in().unwrap();
    assert!(approx_eq(ctl.state().translate_x, 40.0));
    assert!(approx_eq(ctl.state().translate_y, -10.0));
}

#[test]
fn pan_divides_by_scale() {
    let mut ctl = controller();
    pan(&mut ctl, 40.0, 20.0);
    assert!(approx_eq(ctl.state().translate_x, 40.0));
    assert!(approx_eq(ctl.state().translate_y, 20.0));

    let mut zoomed = ViewportController::new(ViewportConfig {
        initial_scale: 2.0,
        ..ViewportConfig::default()
    });
    pan(&mut zoomed, 40.0, 20.0);
    assert!(approx_eq(zoomed.state().translate_x, 20.0));
    assert!(approx_eq(zoomed.state().translate_y, 10.0));
}

#[test]
fn pan_accumulates_across_gestures() {
    let mut ctl = controller();
    pan(&mut ctl, 30.0, 0.0);
    ctl.handle(GestureEvent::Begin);
    ctl.handle(GestureEvent::moved(5.0, 0.0));
    let state = ctl.handle(GestureEvent::moved(10.0, 0.0));
    // Updates are cumulative within a gesture, relative to the committed offset.
    assert!(approx_eq(state.translate_x, 40.0));
    ctl.handle(GestureEvent::End);
    assert_eq!(ctl.phase(), GesturePhase::Idle);
    assert!(approx_eq(ctl.viewport().baseline_x, 40.0));
}

#[test]
fn cancel_commits_and_idles() {
    let mut ctl = controller();
    ctl.handle(GestureEvent::Begin);
    assert_eq!(ctl.phase(), GesturePhase::Panning);
    ctl.handle(GestureEvent::moved(12.0, 8.0));
    ctl.handle(GestureEvent::Cancel);
    assert_eq!(ctl.phase(), GesturePhase::Idle);
    assert!(approx_eq(ctl.state().translate_x, 12.0));

    let state = ctl.handle(GestureEvent::moved(100.0, 100.0));
    assert!(approx_eq(state.translate_x, 12.0));
    assert!(approx_eq(state.translate_y, 8.0));
}

#[test]
fn fast_pans_are_boosted() {
    let cfg = ViewportConfig::default();
    assert!(approx_eq(pan_sensitivity(0.0, 0.0, &cfg), 1.0));
    assert!(approx_eq(pan_sensitivity(750.0, 0.0, &cfg), 1.25));
    assert!(approx_eq(pan_sensitivity(9000.0, 0.0, &cfg), 1.5));

    let mut ctl = controller();
    ctl.handle(GestureEvent::Begin);
    let state = ctl.handle(GestureEvent::Update {
        dx: 10.0,
        dy: 0.0,
        vx: 1500.0,
        vy: 0.0,
    });
    assert!(approx_eq(state.translate_x, 15.0));
}

#[test]
fn slowing_pan_never_moves_backwards() {
    let mut ctl = controller();
    ctl.handle(GestureEvent::Begin);
    let fast = ctl.handle(GestureEvent::Update {
        dx: 100.0,
        dy: 0.0,
        vx: 1500.0,
        vy: 0.0,
    });
    assert!(approx_eq(fast.translate_x, 150.0));

    let slow = ctl.handle(GestureEvent::Update {
        dx: 101.0,
        dy: 0.0,
        vx: 0.0,
        vy: 0.0,
    });
    assert!(slow.translate_x >= fast.translate_x);
    assert!(approx_eq(slow.translate_x, 151.0));

    ctl.handle(GestureEvent::End);
    assert!(approx_eq(ctl.viewport().baseline_x, 151.0));

    // The next gesture starts from zero movement again.
    ctl.handle(GestureEvent::Begin);
    let next = ctl.handle(GestureEvent::moved(4.0, 0.0));
    assert!(approx_eq(next.translate_x, 155.0));
}

#[test]
fn reset_zoom_restores_initial_state() {
    let mut ctl = controller();
    pan(&mut ctl, 25.0, 25.0);
    ctl.zoom_in().unwrap();
    let t = ctl.reset_zoom();
    assert_eq!(t.to, ViewportState::at_scale(1.0));
    assert_eq!(ctl.state(), ViewportState::at_scale(1.0));
    assert_eq!(ctl.viewport().baseline_x, 0.0);
    assert_eq!(ctl.viewport().baseline_y, 0.0);

    pan(&mut ctl, 5.0, 0.0);
    assert!(approx_eq(ctl.state().translate_x, 5.0));
}

#[test]
fn planner_profile_disables_zoom() {
    let cfg = FlowConfig::for_profile(ScreenProfile::Planner, None)
        .viewport()
        .unwrap();
    let mut ctl = ViewportController::new(cfg);
    assert!(ctl.zoom_in().is_none());
    assert!(ctl.zoom_out().is_none());
    assert!(!ctl.can_zoom_in());
    assert_eq!(ctl.state().scale, 1.0);
}

#[test]
fn transitions_ease_between_endpoints() {
    let t = ViewportTransition {
        from: ViewportState::at_scale(1.0),
        to: ViewportState {
            scale: 2.0,
            translate_x: 10.0,
            translate_y: 0.0,
        },
        duration_ms: 200.0,
    };
    assert_eq!(t.sample(0.0), t.from);
    assert_eq!(t.sample(200.0), t.to);
    assert_eq!(t.sample(500.0), t.to);
    assert!(t.is_finished(200.0));
    assert!(!t.is_finished(100.0));

    // Ease-out: more than half way after half the time.
    let mid = t.sample(100.0);
    assert!(mid.scale > 1.5 && mid.scale < 2.0);

    let r = t.retarget(100.0, ViewportState::at_scale(1.0));
    assert_eq!(r.from, mid);
}

#[test]
fn fit_to_centers_content() {
    let mut ctl = controller();
    let content = Bounds {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 720.0,
        max_y: 640.0,
    };
    let t = ctl.fit_to(content, size(360.0, 320.0));
    assert!(approx_eq(t.to.scale, 0.5));
    assert!(approx_eq(t.to.translate_x, 0.0));
    assert!(approx_eq(t.to.translate_y, 0.0));
}

#[test]
fn screen_and_diagram_coordinates_round_trip() {
    let state = ViewportState {
        scale: 2.0,
        translate_x: 10.0,
        translate_y: -5.0,
    };
    let p = point(3.0, 4.0);
    let s = state.to_screen(p);
    assert_eq!(s, point(26.0, -2.0));
    assert_eq!(state.to_diagram(s), p);
}
