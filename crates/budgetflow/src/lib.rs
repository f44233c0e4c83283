#![forbid(unsafe_code)]

//! `budgetflow` lays out personal-budget flow (Sankey) diagrams headlessly.
//!
//! Income sources feed a single total node, which fans out into expenses, savings and either the
//! remaining amount or an over-budget extension. The crate produces geometry only; hosts draw it
//! and drive the [`ViewportController`] from their own gesture recognizers.
//!
//! ```no_run
//! use budgetflow::{BudgetSnapshot, ScreenProfile};
//!
//! let snapshot = BudgetSnapshot::default()
//!     .with_income("Salary", 3200.0)
//!     .with_expense("Rent", 1400.0)
//!     .with_expense("Food", 600.0)
//!     .with_savings(500.0)
//!     .with_remaining(700.0);
//! let diagram = budgetflow::layout_budget(&snapshot, ScreenProfile::SavedBudget, None)?;
//! assert_eq!(diagram.destination_nodes.len(), 4);
//! # Ok::<(), budgetflow::HeadlessError>(())
//! ```

pub use budgetflow_core::*;

pub mod layout {
    pub use budgetflow_layout::label::{format_amount, percent_of};
    pub use budgetflow_layout::model::{
        BudgetDiagramLayout, Bounds, LabelAnchor, LabelLayout, Node, NodeKind, Ribbon,
        RibbonGradient, RibbonSide,
    };
    pub use budgetflow_layout::path::{BezierPathDescriptor, PathCommand};
    pub use budgetflow_layout::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle};
    pub use budgetflow_layout::viewport::{GesturePhase, ZoomDirection};
    pub use budgetflow_layout::{
        GestureEvent, LayoutOptions, Viewport, ViewportController, ViewportState,
        ViewportTransition, layout_normalized, layout_snapshot,
    };
}

pub use layout::{BudgetDiagramLayout, GestureEvent, ViewportController, ViewportState};

use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum HeadlessError {
    #[error(transparent)]
    Core(#[from] budgetflow_core::Error),
    #[error(transparent)]
    Layout(#[from] budgetflow_layout::Error),
}

impl HeadlessError {
    /// True when the snapshot had nothing to draw. Hosts show their placeholder in that case.
    pub fn is_empty_income(&self) -> bool {
        matches!(
            self,
            HeadlessError::Core(budgetflow_core::Error::EmptyIncome { .. })
                | HeadlessError::Layout(budgetflow_layout::Error::EmptyIncome { .. })
        )
    }
}

pub type Result<T> = std::result::Result<T, HeadlessError>;

/// Layout options for `profile`, with `overrides` deep-merged over the profile preset.
pub fn layout_options(
    profile: ScreenProfile,
    overrides: Option<&Value>,
) -> Result<layout::LayoutOptions> {
    let config = FlowConfig::for_profile(profile, overrides).layout()?;
    Ok(layout::LayoutOptions::with_config(config))
}

/// Fresh viewport for `profile`, at its initial scale with no offset.
pub fn viewport_controller(
    profile: ScreenProfile,
    overrides: Option<&Value>,
) -> Result<ViewportController> {
    let config = FlowConfig::for_profile(profile, overrides).viewport()?;
    Ok(ViewportController::new(config))
}

/// Normalizes `snapshot` and lays it out with the `profile` configuration.
pub fn layout_budget(
    snapshot: &BudgetSnapshot,
    profile: ScreenProfile,
    overrides: Option<&Value>,
) -> Result<BudgetDiagramLayout> {
    let options = layout_options(profile, overrides)?;
    let normalized = normalize_budget(snapshot)?;
    tracing::debug!(
        profile = profile.as_str(),
        sources = normalized.income_sources.len(),
        destinations = normalized.destinations.len(),
        total_income = normalized.total_income,
        "laying out budget"
    );
    Ok(layout::layout_normalized(&normalized, &options)?)
}

/// Bundles a screen profile's layout options and viewport for one diagram view.
///
/// Re-running [`BudgetFlowView::update`] on new data keeps the current pan/zoom.
pub struct BudgetFlowView {
    pub profile: ScreenProfile,
    pub layout: layout::LayoutOptions,
    pub viewport: ViewportController,
    diagram: Option<BudgetDiagramLayout>,
}

impl BudgetFlowView {
    pub fn new(profile: ScreenProfile, overrides: Option<&Value>) -> Result<Self> {
        let config = FlowConfig::for_profile(profile, overrides);
        Ok(Self {
            profile,
            layout: layout::LayoutOptions::with_config(config.layout()?),
            viewport: ViewportController::new(config.viewport()?),
            diagram: None,
        })
    }

    pub fn diagram(&self) -> Option<&BudgetDiagramLayout> {
        self.diagram.as_ref()
    }

    /// Lays out `snapshot`. On `EmptyIncome` the previous diagram is cleared and the error is
    /// returned so the host can show its placeholder.
    pub fn update(&mut self, snapshot: &BudgetSnapshot) -> Result<&BudgetDiagramLayout> {
        let diagram = match layout::layout_snapshot(snapshot, &self.layout) {
            Ok(d) => d,
            Err(err) => {
                self.diagram = None;
                return Err(err.into());
            }
        };
        Ok(self.diagram.insert(diagram))
    }
}
