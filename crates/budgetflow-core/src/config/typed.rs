use serde::{Deserialize, Serialize};

/// Geometry and label metrics for one diagram layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Fixed horizontal thickness of every node.
    pub node_width: f64,
    /// Visibility floor for node heights.
    pub min_node_height: f64,
    /// Floor on the vertical advance between stacked nodes, so two-line labels never collide.
    pub min_node_spacing: f64,
    pub node_gap: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub min_side_margin: f64,
    pub avg_char_pixel_width: f64,
    pub amount_label_padding: f64,
    pub label_max_chars: usize,
    pub label_gap: f64,
    pub label_line_height: f64,
    pub min_ribbon_thickness: f64,
    /// Fraction of an outflow ribbon that must sit inside the over-budget extension before the
    /// ribbon is attributed to it.
    pub over_budget_color_threshold: f64,
    pub currency_symbol: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 360.0,
            canvas_height: 460.0,
            node_width: 14.0,
            min_node_height: 4.0,
            min_node_spacing: 34.0,
            node_gap: 8.0,
            margin_top: 28.0,
            margin_bottom: 24.0,
            min_side_margin: 72.0,
            avg_char_pixel_width: 6.5,
            amount_label_padding: 14.0,
            label_max_chars: 14,
            label_gap: 6.0,
            label_line_height: 13.0,
            min_ribbon_thickness: 1.0,
            over_budget_color_threshold: 0.4,
            currency_symbol: "$".to_string(),
        }
    }
}

impl LayoutConfig {
    /// Clamps out-of-range values to the smallest workable setting instead of rejecting them.
    pub fn sanitized(mut self) -> Self {
        fn at_least(v: f64, min: f64) -> f64 {
            if v.is_finite() { v.max(min) } else { min }
        }

        self.canvas_width = at_least(self.canvas_width, 1.0);
        self.canvas_height = at_least(self.canvas_height, 1.0);
        self.node_width = at_least(self.node_width, 1.0);
        self.min_node_height = at_least(self.min_node_height, 0.5);
        self.min_node_spacing = at_least(self.min_node_spacing, 0.0);
        self.node_gap = at_least(self.node_gap, 0.0);
        self.margin_top = at_least(self.margin_top, 0.0);
        self.margin_bottom = at_least(self.margin_bottom, 0.0);
        self.min_side_margin = at_least(self.min_side_margin, 0.0);
        self.avg_char_pixel_width = at_least(self.avg_char_pixel_width, 1.0);
        self.amount_label_padding = at_least(self.amount_label_padding, 0.0);
        self.label_max_chars = self.label_max_chars.max(2);
        self.label_gap = at_least(self.label_gap, 0.0);
        self.label_line_height = at_least(self.label_line_height, 1.0);
        self.min_ribbon_thickness = at_least(self.min_ribbon_thickness, 0.0);
        self.over_budget_color_threshold = if self.over_budget_color_threshold.is_finite() {
            self.over_budget_color_threshold.clamp(0.0, 1.0)
        } else {
            0.4
        };
        self
    }

    /// Vertical space available to the proportional part of the diagram.
    pub fn drawing_height(&self) -> f64 {
        (self.canvas_height - (self.margin_top + self.margin_bottom)).max(self.min_node_height)
    }
}

const MAX_ZOOM_RUNGS: usize = 256;

/// One row of the progressive zoom table: applies while the current scale is below `until`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomStep {
    pub until: f64,
    pub factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewportConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub initial_scale: f64,
    pub zoom_enabled: bool,
    pub zoom_steps: Vec<ZoomStep>,
    pub transition_ms: f64,
    pub max_velocity_boost: f64,
    /// Pointer speed (px/s) at which the pan boost saturates.
    pub velocity_reference: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 3.0,
            initial_scale: 1.0,
            zoom_enabled: true,
            zoom_steps: vec![
                ZoomStep {
                    until: 0.8,
                    factor: 1.1,
                },
                ZoomStep {
                    until: 2.0,
                    factor: 1.25,
                },
                ZoomStep {
                    until: f64::MAX,
                    factor: 1.1,
                },
            ],
            transition_ms: 250.0,
            max_velocity_boost: 1.5,
            velocity_reference: 1500.0,
        }
    }
}

impl ViewportConfig {
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            self.min_scale = defaults.min_scale;
        }
        if !(self.max_scale.is_finite() && self.max_scale >= self.min_scale) {
            self.max_scale = self.min_scale.max(defaults.max_scale);
        }
        self.initial_scale = if self.initial_scale.is_finite() {
            self.initial_scale.clamp(self.min_scale, self.max_scale)
        } else {
            1.0_f64.clamp(self.min_scale, self.max_scale)
        };
        self.zoom_steps
            .retain(|s| s.factor.is_finite() && s.factor > 1.0 && !s.until.is_nan());
        if self.zoom_steps.is_empty() {
            self.zoom_steps = defaults.zoom_steps;
        }
        self.zoom_steps
            .sort_by(|a, b| a.until.partial_cmp(&b.until).unwrap_or(std::cmp::Ordering::Equal));
        if !(self.transition_ms.is_finite() && self.transition_ms >= 0.0) {
            self.transition_ms = defaults.transition_ms;
        }
        if !(self.max_velocity_boost.is_finite() && self.max_velocity_boost >= 1.0) {
            self.max_velocity_boost = 1.0;
        }
        if !(self.velocity_reference.is_finite() && self.velocity_reference > 0.0) {
            self.velocity_reference = defaults.velocity_reference;
        }
        self
    }

    /// Zoom multiplier for the band containing `scale`.
    pub fn zoom_factor_at(&self, scale: f64) -> f64 {
        self.zoom_steps
            .iter()
            .find(|step| scale < step.until)
            .or_else(|| self.zoom_steps.last())
            .map(|step| step.factor)
            .unwrap_or(1.25)
    }

    /// Every scale the zoom buttons can reach, ascending, from `min_scale` to `max_scale`
    /// through `initial_scale`.
    ///
    /// Steps above the initial scale multiply by the band factor of the scale they leave, steps
    /// below divide by it. Zooming moves between neighboring rungs, so in then out is exact.
    pub fn zoom_ladder(&self) -> Vec<f64> {
        let mut up = Vec::new();
        let mut s = self.initial_scale;
        while s < self.max_scale && up.len() < MAX_ZOOM_RUNGS {
            s = (s * self.zoom_factor_at(s)).min(self.max_scale);
            up.push(s);
        }

        let mut ladder = Vec::new();
        let mut s = self.initial_scale;
        while s > self.min_scale && ladder.len() < MAX_ZOOM_RUNGS {
            s = (s / self.zoom_factor_at(s)).max(self.min_scale);
            ladder.push(s);
        }
        ladder.reverse();
        ladder.push(self.initial_scale);
        ladder.extend(up);
        ladder
    }

    pub fn clamp_scale(&self, scale: f64) -> f64 {
        if scale.is_finite() {
            scale.clamp(self.min_scale, self.max_scale)
        } else {
            self.initial_scale
        }
    }
}
