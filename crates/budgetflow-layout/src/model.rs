use crate::path::BezierPathDescriptor;
use budgetflow_core::{ColorToken, ItemKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Source,
    Total,
    OverBudgetExtension,
    Destination(ItemKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelAnchor {
    Start,
    Middle,
    End,
}

/// Caption placement for one node. `(x, y)` is the anchor point at the vertical center of the
/// text block (name lines followed by the amount line).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelLayout {
    pub lines: Vec<String>,
    pub amount: String,
    /// Share of total income, in percent. Only set for right-column nodes.
    pub percent_of_income: Option<f64>,
    pub anchor: LabelAnchor,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LabelLayout {
    pub fn line_count(&self) -> usize {
        self.lines.len() + 1
    }

    fn left(&self) -> f64 {
        match self.anchor {
            LabelAnchor::Start => self.x,
            LabelAnchor::Middle => self.x - self.width / 2.0,
            LabelAnchor::End => self.x - self.width,
        }
    }

    pub fn corners(&self) -> [(f64, f64); 2] {
        let left = self.left();
        let top = self.y - self.height / 2.0;
        [(left, top), (left + self.width, top + self.height)]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: ColorToken,
    pub value: f64,
    pub label: String,
    pub kind: NodeKind,
    pub caption: LabelLayout,
}

impl Node {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RibbonSide {
    /// Income source → total node.
    Inflow,
    /// Total node (or its over-budget extension) → destination.
    Outflow,
}

/// Start/end colors for a ribbon's horizontal gradient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RibbonGradient {
    pub start: ColorToken,
    pub end: ColorToken,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ribbon {
    pub side: RibbonSide,
    pub from: String,
    pub to: String,
    pub value: f64,
    pub thickness: f64,
    pub path: BezierPathDescriptor,
    pub color: ColorToken,
    pub gradient: RibbonGradient,
    /// Fraction of the ribbon's source span inside the over-budget extension (0 for inflows).
    pub over_budget_overlap: f64,
    pub source_is_over_budget: bool,
}

impl Ribbon {
    /// Vertical span `(top, bottom)` where the ribbon attaches on its left end.
    pub fn source_span(&self) -> (f64, f64) {
        let y = self.path.start.y;
        (y, y + self.thickness)
    }

    /// Vertical span `(top, bottom)` where the ribbon attaches on its right end.
    pub fn target_span(&self) -> (f64, f64) {
        let y = self.path.end.y;
        (y, y + self.thickness)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetDiagramLayout {
    pub width: f64,
    pub height: f64,
    /// Pixels per currency unit, shared by every node and ribbon of this pass.
    pub value_scale: f64,
    pub left_margin: f64,
    pub right_margin: f64,
    pub source_nodes: Vec<Node>,
    pub total_node: Node,
    pub extension_node: Option<Node>,
    pub destination_nodes: Vec<Node>,
    pub ribbons: Vec<Ribbon>,
    pub bounds: Bounds,
}

impl BudgetDiagramLayout {
    /// All nodes, left column first, then the middle column, then the right column.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.source_nodes
            .iter()
            .chain(std::iter::once(&self.total_node))
            .chain(self.extension_node.iter())
            .chain(self.destination_nodes.iter())
    }

    pub fn inflows(&self) -> impl Iterator<Item = &Ribbon> {
        self.ribbons.iter().filter(|r| r.side == RibbonSide::Inflow)
    }

    pub fn outflows(&self) -> impl Iterator<Item = &Ribbon> {
        self.ribbons.iter().filter(|r| r.side == RibbonSide::Outflow)
    }

    /// Height of the middle column: total node plus the over-budget extension, if any.
    pub fn middle_column_height(&self) -> f64 {
        self.total_node.height + self.extension_node.as_ref().map_or(0.0, |n| n.height)
    }
}
