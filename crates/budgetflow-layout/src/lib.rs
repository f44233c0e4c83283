#![forbid(unsafe_code)]

//! Headless geometry for budget flow (Sankey) diagrams.
//!
//! Given a [`NormalizedBudget`], [`layout_normalized`] produces node rectangles, captions and
//! closed bezier ribbons in canvas pixels. Drawing them is left to the host. The
//! [`viewport`] module holds the pan/zoom state that hosts apply on top.

pub mod label;
pub mod model;
pub mod path;
pub mod ribbon;
pub mod sankey;
pub mod text;
pub mod viewport;

use crate::model::BudgetDiagramLayout;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use budgetflow_core::{BudgetSnapshot, LayoutConfig, NormalizedBudget, normalize_budget};
use std::sync::Arc;

pub use viewport::{GestureEvent, Viewport, ViewportController, ViewportState, ViewportTransition};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("budget has no positive income (total income: {total_income})")]
    EmptyIncome { total_income: f64 },
    #[error(transparent)]
    Core(budgetflow_core::Error),
}

impl From<budgetflow_core::Error> for Error {
    fn from(err: budgetflow_core::Error) -> Self {
        match err {
            budgetflow_core::Error::EmptyIncome { total_income } => Error::EmptyIncome { total_income },
            other => Error::Core(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub config: LayoutConfig,
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            config: LayoutConfig::default(),
            text_measurer: Arc::new(DeterministicTextMeasurer),
        }
    }
}

impl LayoutOptions {
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            config: config.sanitized(),
            ..Self::default()
        }
    }
}

pub fn layout_normalized(
    budget: &NormalizedBudget,
    options: &LayoutOptions,
) -> Result<BudgetDiagramLayout> {
    sankey::layout_budget_diagram(budget, &options.config, options.text_measurer.as_ref())
}

/// Normalizes and lays out `snapshot` in one pass.
pub fn layout_snapshot(
    snapshot: &BudgetSnapshot,
    options: &LayoutOptions,
) -> Result<BudgetDiagramLayout> {
    let normalized = normalize_budget(snapshot)?;
    layout_normalized(&normalized, options)
}
