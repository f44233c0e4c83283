//! Ribbon routing between the three node columns.
//!
//! Both sides walk a cursor down the middle column, so ribbon attachments tile the total node
//! (and its over-budget extension) without gaps or overlaps.

use crate::model::{Node, Ribbon, RibbonGradient, RibbonSide};
use crate::path::BezierPathDescriptor;
use budgetflow_core::ColorToken;
use budgetflow_core::geom::point;

// Keeps a ribbon sitting exactly on the threshold from flipping on float noise.
const THRESHOLD_EPSILON: f64 = 1e-9;

pub fn ribbon_thickness(value: f64, value_scale: f64, min_thickness: f64) -> f64 {
    (value * value_scale).max(min_thickness)
}

/// Share of `[ribbon_start, ribbon_end]` that lies inside `[ext_start, ext_end]`.
pub fn overlap_percentage(ribbon_start: f64, ribbon_end: f64, ext_start: f64, ext_end: f64) -> f64 {
    let thickness = ribbon_end - ribbon_start;
    if !(thickness > 0.0) {
        return 0.0;
    }
    let overlap = (ribbon_end.min(ext_end) - ribbon_start.max(ext_start)).max(0.0);
    overlap / thickness
}

pub fn is_over_budget_sourced(overlap_percentage: f64, threshold: f64) -> bool {
    overlap_percentage + THRESHOLD_EPSILON >= threshold
}

pub(crate) struct RibbonParams<'a> {
    pub sources: &'a [Node],
    pub total: &'a Node,
    pub extension: Option<&'a Node>,
    pub destinations: &'a [Node],
    pub value_scale: f64,
    pub min_thickness: f64,
    pub over_budget_threshold: f64,
}

pub(crate) fn generate_ribbons(p: &RibbonParams<'_>) -> Vec<Ribbon> {
    let mut ribbons = Vec::with_capacity(p.sources.len() + p.destinations.len());

    let mut current_middle_y = p.total.y;
    for src in p.sources {
        let thickness = ribbon_thickness(src.value, p.value_scale, p.min_thickness);
        let start = point(src.right(), src.center_y() - thickness / 2.0);
        let end = point(p.total.x, current_middle_y);
        current_middle_y += thickness;

        ribbons.push(Ribbon {
            side: RibbonSide::Inflow,
            from: src.label.clone(),
            to: p.total.label.clone(),
            value: src.value,
            thickness,
            path: BezierPathDescriptor::ribbon(start, end, thickness),
            color: src.color.clone(),
            gradient: RibbonGradient {
                start: src.color.clone(),
                end: p.total.color.clone(),
            },
            over_budget_overlap: 0.0,
            source_is_over_budget: false,
        });
    }

    let over_color: Option<&ColorToken> = p.extension.map(|ext| &ext.color);
    let mut current_middle_y = p.total.y;
    for dest in p.destinations {
        let thickness = ribbon_thickness(dest.value, p.value_scale, p.min_thickness);
        let ribbon_start = current_middle_y;
        let ribbon_end = ribbon_start + thickness;
        current_middle_y = ribbon_end;

        let overlap = p.extension.map_or(0.0, |ext| {
            overlap_percentage(ribbon_start, ribbon_end, ext.y, ext.bottom())
        });
        let over = p.extension.is_some() && is_over_budget_sourced(overlap, p.over_budget_threshold);

        // Over-budget ribbons start blended toward the extension color by their overlap.
        let start_color = match (over, over_color) {
            (true, Some(c)) => p.total.color.mix(c, overlap),
            _ => p.total.color.clone(),
        };
        let start = point(p.total.right(), ribbon_start);
        let end = point(dest.x, dest.center_y() - thickness / 2.0);

        tracing::trace!(
            to = %dest.label,
            thickness,
            overlap,
            source_is_over_budget = over,
            "outflow ribbon"
        );

        ribbons.push(Ribbon {
            side: RibbonSide::Outflow,
            from: if over {
                p.extension.map_or_else(|| p.total.label.clone(), |ext| ext.label.clone())
            } else {
                p.total.label.clone()
            },
            to: dest.label.clone(),
            value: dest.value,
            thickness,
            path: BezierPathDescriptor::ribbon(start, end, thickness),
            color: dest.color.clone(),
            gradient: RibbonGradient {
                start: start_color,
                end: dest.color.clone(),
            },
            over_budget_overlap: overlap,
            source_is_over_budget: over,
        });
    }

    ribbons
}
