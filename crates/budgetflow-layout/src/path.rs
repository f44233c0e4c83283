//! Closed cubic-bezier outlines for ribbons.

use budgetflow_core::geom::{Point, point};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Control points sit this fraction of the horizontal span away from each endpoint.
pub const RIBBON_CURVATURE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum PathCommand {
    MoveTo { to: Point },
    LineTo { to: Point },
    CubicTo { c1: Point, c2: Point, to: Point },
    Close,
}

/// Ribbon outline between `start` (top-left attachment) and `end` (top-right attachment).
///
/// The top edge is a symmetric S-curve; the bottom edge is the same curve shifted down by
/// `thickness`, traversed backwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierPathDescriptor {
    pub start: Point,
    pub end: Point,
    pub thickness: f64,
    pub curvature: f64,
}

impl BezierPathDescriptor {
    pub fn ribbon(start: Point, end: Point, thickness: f64) -> Self {
        Self {
            start,
            end,
            thickness: thickness.max(0.0),
            curvature: RIBBON_CURVATURE,
        }
    }

    /// Control points of the top edge.
    pub fn control_points(&self) -> (Point, Point) {
        let span = self.end.x - self.start.x;
        (
            point(self.start.x + span * self.curvature, self.start.y),
            point(self.end.x - span * self.curvature, self.end.y),
        )
    }

    pub fn commands(&self) -> [PathCommand; 5] {
        let (c1, c2) = self.control_points();
        let t = self.thickness;
        let shift = |p: Point| point(p.x, p.y + t);
        [
            PathCommand::MoveTo { to: self.start },
            PathCommand::CubicTo {
                c1,
                c2,
                to: self.end,
            },
            PathCommand::LineTo {
                to: shift(self.end),
            },
            PathCommand::CubicTo {
                c1: shift(c2),
                c2: shift(c1),
                to: shift(self.start),
            },
            PathCommand::Close,
        ]
    }

    /// Point on the top edge at curve parameter `t ∈ [0, 1]`.
    pub fn top_edge_at(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let (c1, c2) = self.control_points();
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        point(
            a * self.start.x + b * c1.x + c * c2.x + d * self.end.x,
            a * self.start.y + b * c1.y + c * c2.y + d * self.end.y,
        )
    }

    /// SVG path data (`d` attribute).
    pub fn to_svg_d(&self) -> String {
        let mut out = String::new();
        for cmd in self.commands() {
            match cmd {
                PathCommand::MoveTo { to } => {
                    out.push('M');
                    push_points(&mut out, &[to]);
                }
                PathCommand::LineTo { to } => {
                    out.push('L');
                    push_points(&mut out, &[to]);
                }
                PathCommand::CubicTo { c1, c2, to } => {
                    out.push('C');
                    push_points(&mut out, &[c1, c2, to]);
                }
                PathCommand::Close => out.push('Z'),
            }
        }
        out
    }
}

fn push_points(out: &mut String, points: &[Point]) {
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{},{}", fmt_path(p.x), fmt_path(p.y));
    }
}

/// Formats a path coordinate the way d3-path does: rounded half-up to 3 decimals
/// (`Math.round(v * 1000) / 1000`), trailing zeros dropped, `-0` and non-finite values as `0`.
pub fn fmt_path(v: f64) -> String {
    let rounded = (v * 1000.0 + 0.5).floor() / 1000.0;
    if !rounded.is_finite() || rounded == 0.0 {
        return "0".to_string();
    }
    let fixed = format!("{rounded:.3}");
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
