//! Pan/zoom state for an interactive diagram view.
//!
//! [`Viewport`] is a plain value; every gesture or zoom step is a pure function from one
//! `Viewport` to the next. [`ViewportController`] owns one together with its configuration and
//! hands out [`ViewportTransition`]s for renderers that animate between states.
//!
//! The diagram is drawn with `screen = (diagram + translate) * scale`, so a screen-space pan
//! delta `d` moves the diagram by `d / scale`.

use crate::model::Bounds;
use budgetflow_core::ViewportConfig;
use budgetflow_core::geom::{Point, Size, point};
use serde::{Deserialize, Serialize};

const SCALE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl ViewportState {
    pub fn at_scale(scale: f64) -> Self {
        Self {
            scale,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }

    pub fn to_screen(&self, p: Point) -> Point {
        point(
            (p.x + self.translate_x) * self.scale,
            (p.y + self.translate_y) * self.scale,
        )
    }

    pub fn to_diagram(&self, p: Point) -> Point {
        point(
            p.x / self.scale - self.translate_x,
            p.y / self.scale - self.translate_y,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GestureEvent {
    Begin,
    /// Cumulative screen-space translation since `Begin`, plus the pointer velocity in px/s.
    /// The boost for `(vx, vy)` applies to the movement since the previous `Update` only.
    Update { dx: f64, dy: f64, vx: f64, vy: f64 },
    End,
    /// The gesture was taken over (e.g. by a system gesture) before release.
    Cancel,
}

impl GestureEvent {
    pub fn moved(dx: f64, dy: f64) -> Self {
        GestureEvent::Update {
            dx,
            dy,
            vx: 0.0,
            vy: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GesturePhase {
    Idle,
    Panning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ZoomDirection {
    In,
    Out,
}

/// Pan multiplier for a pointer moving at `(vx, vy)` px/s. 1.0 at rest, saturating at
/// `max_velocity_boost` once the speed reaches `velocity_reference`.
pub fn pan_sensitivity(vx: f64, vy: f64, cfg: &ViewportConfig) -> f64 {
    let speed = vx.hypot(vy);
    if !speed.is_finite() || cfg.velocity_reference <= 0.0 {
        return 1.0;
    }
    let t = (speed / cfg.velocity_reference).min(1.0);
    1.0 + (cfg.max_velocity_boost - 1.0).max(0.0) * t
}

/// Scale that fits `content` inside `viewport`, clamped to the configured range.
pub fn fit_scale(content: Size, viewport: Size, cfg: &ViewportConfig) -> f64 {
    if !(content.width > 0.0 && content.height > 0.0) {
        return cfg.initial_scale;
    }
    let s = (viewport.width / content.width).min(viewport.height / content.height);
    cfg.clamp_scale(s)
}

/// Viewport value plus the gesture bookkeeping needed to continue a pan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub state: ViewportState,
    pub phase: GesturePhase,
    /// Offset committed by the last finished gesture.
    pub baseline_x: f64,
    pub baseline_y: f64,
    /// Cumulative gesture translation seen by the previous `Update` of the live gesture.
    pub last_dx: f64,
    pub last_dy: f64,
}

impl Viewport {
    pub fn new(initial_scale: f64) -> Self {
        Self {
            state: ViewportState::at_scale(initial_scale),
            phase: GesturePhase::Idle,
            baseline_x: 0.0,
            baseline_y: 0.0,
            last_dx: 0.0,
            last_dy: 0.0,
        }
    }

    fn committed(mut self) -> Self {
        self.baseline_x = self.state.translate_x;
        self.baseline_y = self.state.translate_y;
        self.last_dx = 0.0;
        self.last_dy = 0.0;
        self.phase = GesturePhase::Idle;
        self
    }

    pub fn on_gesture(self, event: GestureEvent, cfg: &ViewportConfig) -> Self {
        match (self.phase, event) {
            (GesturePhase::Idle, GestureEvent::Begin) => Self {
                phase: GesturePhase::Panning,
                ..self.committed()
            },
            // A second Begin without a release restarts from what is on screen.
            (GesturePhase::Panning, GestureEvent::Begin) => Self {
                phase: GesturePhase::Panning,
                ..self.committed()
            },
            (GesturePhase::Panning, GestureEvent::Update { dx, dy, vx, vy }) => {
                if !(dx.is_finite() && dy.is_finite()) {
                    return self;
                }
                // Each update applies only the movement since the previous one, at the current boost.
                let k = pan_sensitivity(vx, vy, cfg) / self.state.scale;
                let mut next = self;
                next.state.translate_x += (dx - self.last_dx) * k;
                next.state.translate_y += (dy - self.last_dy) * k;
                next.last_dx = dx;
                next.last_dy = dy;
                next
            }
            (GesturePhase::Panning, GestureEvent::End | GestureEvent::Cancel) => self.committed(),
            (GesturePhase::Idle, _) => self,
        }
    }

    /// Next rung of [`ViewportConfig::zoom_ladder`] in `direction`, or `None` when already at
    /// the bound. Scales between rungs (e.g. after a fit) snap to the neighboring rung.
    pub fn zoomed(self, direction: ZoomDirection, cfg: &ViewportConfig) -> Option<Self> {
        let scale = self.state.scale;
        let ladder = cfg.zoom_ladder();
        let target = match direction {
            ZoomDirection::In => ladder.iter().copied().find(|&s| s > scale + SCALE_EPSILON),
            ZoomDirection::Out => ladder.iter().rev().copied().find(|&s| s < scale - SCALE_EPSILON),
        }?;
        let mut next = self;
        next.state.scale = cfg.clamp_scale(target);
        Some(next)
    }

    /// Initial scale, zero offset, no gesture in flight.
    pub fn reset(cfg: &ViewportConfig) -> Self {
        Self::new(cfg.initial_scale)
    }
}

/// Animated move between two viewport states with ease-out cubic timing.
///
/// Both endpoints are clamped states, so every sampled frame is one too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransition {
    pub from: ViewportState,
    pub to: ViewportState,
    pub duration_ms: f64,
}

impl ViewportTransition {
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if !(self.duration_ms > 0.0) {
            return 1.0;
        }
        let p = (elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        1.0 - (1.0 - p).powi(3)
    }

    pub fn sample(&self, elapsed_ms: f64) -> ViewportState {
        let t = self.progress(elapsed_ms);
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        let lo = self.from.scale.min(self.to.scale);
        let hi = self.from.scale.max(self.to.scale);
        ViewportState {
            scale: lerp(self.from.scale, self.to.scale).clamp(lo, hi),
            translate_x: lerp(self.from.translate_x, self.to.translate_x),
            translate_y: lerp(self.from.translate_y, self.to.translate_y),
        }
    }

    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        self.progress(elapsed_ms) >= 1.0
    }

    /// Starts a new transition towards `to` from wherever this one is at `elapsed_ms`.
    pub fn retarget(&self, elapsed_ms: f64, to: ViewportState) -> Self {
        Self {
            from: self.sample(elapsed_ms),
            to,
            duration_ms: self.duration_ms,
        }
    }
}

/// Owns the viewport of one diagram view. Re-layouts of the diagram never touch it.
#[derive(Debug, Clone)]
pub struct ViewportController {
    config: ViewportConfig,
    viewport: Viewport,
}

impl ViewportController {
    pub fn new(config: ViewportConfig) -> Self {
        let config = config.sanitized();
        let viewport = Viewport::new(config.initial_scale);
        Self { config, viewport }
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn state(&self) -> ViewportState {
        self.viewport.state
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn phase(&self) -> GesturePhase {
        self.viewport.phase
    }

    pub fn handle(&mut self, event: GestureEvent) -> ViewportState {
        let next = self.viewport.on_gesture(event, &self.config);
        if next.phase != self.viewport.phase {
            tracing::trace!(from = ?self.viewport.phase, to = ?next.phase, "viewport gesture phase");
        }
        self.viewport = next;
        self.viewport.state
    }

    pub fn can_zoom_in(&self) -> bool {
        self.config.zoom_enabled && self.viewport.state.scale < self.config.max_scale
    }

    pub fn can_zoom_out(&self) -> bool {
        self.config.zoom_enabled && self.viewport.state.scale > self.config.min_scale
    }

    pub fn zoom_in(&mut self) -> Option<ViewportTransition> {
        self.zoom(ZoomDirection::In)
    }

    pub fn zoom_out(&mut self) -> Option<ViewportTransition> {
        self.zoom(ZoomDirection::Out)
    }

    fn zoom(&mut self, direction: ZoomDirection) -> Option<ViewportTransition> {
        if !self.config.zoom_enabled {
            return None;
        }
        let next = self.viewport.zoomed(direction, &self.config)?;
        tracing::trace!(?direction, from = self.viewport.state.scale, to = next.state.scale, "zoom");
        Some(self.move_to(next))
    }

    pub fn reset_zoom(&mut self) -> ViewportTransition {
        self.move_to(Viewport::reset(&self.config))
    }

    /// Scales and centers `content` inside a `viewport_size` screen area.
    pub fn fit_to(&mut self, content: Bounds, viewport_size: Size) -> ViewportTransition {
        let scale = fit_scale(
            budgetflow_core::geom::size(content.width(), content.height()),
            viewport_size,
            &self.config,
        );
        let state = ViewportState {
            scale,
            translate_x: viewport_size.width / (2.0 * scale)
                - (content.min_x + content.width() / 2.0),
            translate_y: viewport_size.height / (2.0 * scale)
                - (content.min_y + content.height() / 2.0),
        };
        self.move_to(Viewport {
            state,
            phase: GesturePhase::Idle,
            baseline_x: state.translate_x,
            baseline_y: state.translate_y,
            last_dx: 0.0,
            last_dy: 0.0,
        })
    }

    fn move_to(&mut self, next: Viewport) -> ViewportTransition {
        let transition = ViewportTransition {
            from: self.viewport.state,
            to: next.state,
            duration_ms: self.config.transition_ms,
        };
        self.viewport = next;
        transition
    }
}
