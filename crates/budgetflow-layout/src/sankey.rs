//! Three-column budget flow layout.
//!
//! Left: income sources. Middle: the total node, with the over-budget extension stacked directly
//! beneath it. Right: expenses, savings and the remaining amount. One value scale (px per currency
//! unit) is shared by every node and ribbon of a pass.

use crate::label::{Captions, percent_of};
use crate::model::{BudgetDiagramLayout, Bounds, LabelAnchor, Node, NodeKind};
use crate::ribbon::{RibbonParams, generate_ribbons, ribbon_thickness};
use crate::text::TextMeasurer;
use crate::{Error, Result};
use budgetflow_core::palette;
use budgetflow_core::{DerivedItem, LayoutConfig, NormalizedBudget};

pub const TOTAL_LABEL: &str = "Total Income";

// Narrowest horizontal run a ribbon gets between two columns.
const MIN_COLUMN_GAP: f64 = 24.0;

pub fn node_height(value: f64, value_scale: f64, min_node_height: f64) -> f64 {
    let h = value * value_scale;
    if h.is_finite() {
        h.max(min_node_height)
    } else {
        min_node_height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Slot {
    y: f64,
    height: f64,
}

/// Stacks nodes top-down; the advance is floored by `min_node_spacing` so captions stay legible.
fn stack_column(
    values: impl IntoIterator<Item = f64>,
    start_y: f64,
    value_scale: f64,
    cfg: &LayoutConfig,
) -> Vec<Slot> {
    let mut y = start_y;
    let mut out = Vec::new();
    for value in values {
        let height = node_height(value, value_scale, cfg.min_node_height);
        out.push(Slot { y, height });
        y += (height + cfg.node_gap).max(cfg.min_node_spacing);
    }
    out
}

fn column_extent(nodes: &[Node]) -> f64 {
    nodes.iter().map(Node::bottom).fold(0.0, f64::max)
}

pub fn layout_budget_diagram(
    budget: &NormalizedBudget,
    cfg: &LayoutConfig,
    measurer: &dyn TextMeasurer,
) -> Result<BudgetDiagramLayout> {
    let total_income = budget.total_income;
    if !(total_income > 0.0) {
        return Err(Error::EmptyIncome { total_income });
    }

    let captions = Captions::new(cfg, measurer);
    let nw = cfg.node_width;

    let source_lines: Vec<Vec<String>> = budget
        .income_sources
        .iter()
        .map(|src| captions.wrap(&src.name))
        .collect();
    let right_items: Vec<&DerivedItem> = budget.right_column().collect();
    let dest_lines: Vec<Vec<String>> = right_items
        .iter()
        .map(|item| captions.wrap(&item.name))
        .collect();

    let left_margin = captions.side_margin(&source_lines);
    let right_margin = captions.side_margin(&dest_lines);
    let width = cfg
        .canvas_width
        .max(left_margin + right_margin + 3.0 * nw + 2.0 * MIN_COLUMN_GAP);

    let value_scale = cfg.drawing_height() / total_income;
    let start_y = cfg.margin_top;
    let left_x = left_margin;
    let mid_x = width / 2.0 - nw / 2.0;
    let right_x = width - right_margin - nw;

    let source_slots = stack_column(
        budget.income_sources.iter().map(|s| s.value),
        start_y,
        value_scale,
        cfg,
    );
    let source_nodes: Vec<Node> = budget
        .income_sources
        .iter()
        .zip(source_slots)
        .zip(source_lines)
        .map(|((src, slot), lines)| Node {
            x: left_x,
            y: slot.y,
            width: nw,
            height: slot.height,
            color: palette::income_color(),
            value: src.value,
            label: src.name.clone(),
            kind: NodeKind::Source,
            caption: captions.caption(
                lines,
                src.value,
                None,
                LabelAnchor::End,
                left_x - cfg.label_gap,
                slot.y + slot.height / 2.0,
            ),
        })
        .collect();

    // Inflow ribbons must tile the total node, including any visibility-floored ones.
    let inflow_extent: f64 = budget
        .income_sources
        .iter()
        .map(|src| ribbon_thickness(src.value, value_scale, cfg.min_ribbon_thickness))
        .sum();
    let total_height = node_height(total_income, value_scale, cfg.min_node_height).max(inflow_extent);
    let total_lines = captions.wrap(TOTAL_LABEL);
    let total_caption_y = start_y - cfg.label_gap - captions.block_height(&total_lines) / 2.0;
    let total_node = Node {
        x: mid_x,
        y: start_y,
        width: nw,
        height: total_height,
        color: palette::income_color(),
        value: total_income,
        label: TOTAL_LABEL.to_string(),
        kind: NodeKind::Total,
        caption: captions.caption(
            total_lines,
            total_income,
            None,
            LabelAnchor::Middle,
            mid_x + nw / 2.0,
            total_caption_y,
        ),
    };

    // Outflow ribbons (floors included) tile the total node and then the extension.
    let outflow_extent: f64 = right_items
        .iter()
        .map(|item| ribbon_thickness(item.value, value_scale, cfg.min_ribbon_thickness))
        .sum();
    let extension_node = budget.over_budget().map(|item| {
        let y = total_node.bottom();
        let height = (outflow_extent - total_node.height).max(cfg.min_node_height);
        let lines = captions.wrap(&item.name);
        let caption_y = y + height + cfg.label_gap + captions.block_height(&lines) / 2.0;
        Node {
            x: mid_x,
            y,
            width: nw,
            height,
            color: item.color.clone(),
            value: item.value,
            label: item.name.clone(),
            kind: NodeKind::OverBudgetExtension,
            caption: captions.caption(
                lines,
                item.value,
                Some(percent_of(item.value, total_income)),
                LabelAnchor::Middle,
                mid_x + nw / 2.0,
                caption_y,
            ),
        }
    });

    let dest_slots = stack_column(
        right_items.iter().map(|item| item.value),
        start_y,
        value_scale,
        cfg,
    );
    let destination_nodes: Vec<Node> = right_items
        .iter()
        .zip(dest_slots)
        .zip(dest_lines)
        .map(|((item, slot), lines)| Node {
            x: right_x,
            y: slot.y,
            width: nw,
            height: slot.height,
            color: item.color.clone(),
            value: item.value,
            label: item.name.clone(),
            kind: NodeKind::Destination(item.kind),
            caption: captions.caption(
                lines,
                item.value,
                Some(percent_of(item.value, total_income)),
                LabelAnchor::Start,
                right_x + nw + cfg.label_gap,
                slot.y + slot.height / 2.0,
            ),
        })
        .collect();

    let middle_extent = extension_node
        .as_ref()
        .map_or(total_node.bottom(), Node::bottom);
    let tallest = column_extent(&source_nodes)
        .max(middle_extent)
        .max(column_extent(&destination_nodes));
    let height = cfg.canvas_height.max(tallest + cfg.margin_bottom);

    let ribbons = generate_ribbons(&RibbonParams {
        sources: &source_nodes,
        total: &total_node,
        extension: extension_node.as_ref(),
        destinations: &destination_nodes,
        value_scale,
        min_thickness: cfg.min_ribbon_thickness,
        over_budget_threshold: cfg.over_budget_color_threshold,
    });

    let mut corners: Vec<(f64, f64)> = vec![(0.0, 0.0), (width, height)];
    for node in source_nodes
        .iter()
        .chain(std::iter::once(&total_node))
        .chain(extension_node.iter())
        .chain(destination_nodes.iter())
    {
        corners.push((node.x, node.y));
        corners.push((node.right(), node.bottom()));
        corners.extend(node.caption.corners());
    }
    let bounds = Bounds::from_points(corners).unwrap_or(Bounds {
        min_x: 0.0,
        min_y: 0.0,
        max_x: width,
        max_y: height,
    });

    tracing::debug!(
        width,
        height,
        value_scale,
        sources = source_nodes.len(),
        destinations = destination_nodes.len(),
        over_budget = extension_node.is_some(),
        ribbons = ribbons.len(),
        "budget diagram laid out"
    );

    Ok(BudgetDiagramLayout {
        width,
        height,
        value_scale,
        left_margin,
        right_margin,
        source_nodes,
        total_node,
        extension_node,
        destination_nodes,
        ribbons,
        bounds,
    })
}
