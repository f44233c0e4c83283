//! Budget snapshot → ordered income sources and destination items.

use crate::models::{BudgetSnapshot, DerivedItem, IncomeSource, ItemKind};
use crate::palette;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const INCOME_LABEL: &str = "Income";
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";
pub const SAVINGS_LABEL: &str = "Savings";
pub const REMAINING_LABEL: &str = "Remaining";
pub const OVER_BUDGET_LABEL: &str = "Over Budget";

// Absorbs float noise when comparing allocated vs. income totals.
const BALANCE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedBudget {
    pub income_sources: Vec<IncomeSource>,
    /// Expenses (descending), then savings, then the single remaining/over-budget item.
    pub destinations: Vec<DerivedItem>,
    pub total_income: f64,
    pub total_allocated: f64,
}

impl NormalizedBudget {
    pub fn over_budget(&self) -> Option<&DerivedItem> {
        self.destinations
            .iter()
            .find(|item| item.kind == ItemKind::OverBudget)
    }

    pub fn over_budget_amount(&self) -> f64 {
        self.over_budget().map(|item| item.value).unwrap_or(0.0)
    }

    /// Destinations drawn in the right column (over-budget lives under the total node instead).
    pub fn right_column(&self) -> impl Iterator<Item = &DerivedItem> {
        self.destinations
            .iter()
            .filter(|item| item.kind != ItemKind::OverBudget)
    }
}

fn usable(value: f64, what: &str, name: &str) -> Option<f64> {
    if !value.is_finite() {
        tracing::warn!(what, name, "dropping non-finite budget value");
        return None;
    }
    (value > 0.0).then_some(value)
}

fn label_or(name: &str, fallback: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        fallback.to_string()
    } else {
        name.to_string()
    }
}

pub fn normalize_budget(snapshot: &BudgetSnapshot) -> Result<NormalizedBudget> {
    let incomes: Vec<IncomeSource> = snapshot
        .income_sources
        .iter()
        .filter_map(|src| {
            let value = usable(src.value, "income", &src.name)?;
            Some(IncomeSource {
                name: label_or(&src.name, INCOME_LABEL),
                value,
            })
        })
        .collect();

    let total_income: f64 = incomes.iter().map(|src| src.value).sum();
    if !(total_income > 0.0) {
        return Err(Error::EmptyIncome { total_income });
    }

    let income_sources = if incomes.len() > 1 {
        incomes
    } else {
        vec![IncomeSource::new(INCOME_LABEL, total_income)]
    };

    let mut expenses: IndexMap<String, f64> = IndexMap::new();
    for (name, &value) in &snapshot.expense_categories {
        let Some(value) = usable(value, "expense", name) else {
            continue;
        };
        *expenses
            .entry(label_or(name, UNCATEGORIZED_LABEL))
            .or_insert(0.0) += value;
    }
    let mut expenses: Vec<(String, f64)> = expenses.into_iter().collect();
    // `sort_by` is stable, so equal values keep snapshot order.
    expenses.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let savings = usable(snapshot.savings, "savings", SAVINGS_LABEL).unwrap_or(0.0);
    let total_expenses: f64 = expenses.iter().map(|(_, v)| *v).sum();
    let total_allocated = total_expenses + savings;

    let mut destinations: Vec<DerivedItem> = expenses
        .into_iter()
        .enumerate()
        .map(|(idx, (name, value))| DerivedItem {
            name,
            value,
            color: palette::category_color(idx),
            kind: ItemKind::Expense,
        })
        .collect();

    if savings > 0.0 {
        destinations.push(DerivedItem {
            name: SAVINGS_LABEL.to_string(),
            value: savings,
            color: palette::savings_color(),
            kind: ItemKind::Savings,
        });
    }

    if total_allocated - total_income > BALANCE_EPSILON {
        destinations.push(DerivedItem {
            name: OVER_BUDGET_LABEL.to_string(),
            value: total_allocated - total_income,
            color: palette::over_budget_color(),
            kind: ItemKind::OverBudget,
        });
    } else if let Some(remaining) = usable(snapshot.remaining, "remaining", REMAINING_LABEL) {
        destinations.push(DerivedItem {
            name: REMAINING_LABEL.to_string(),
            value: remaining,
            color: palette::remaining_color(),
            kind: ItemKind::Remaining,
        });
    }

    tracing::debug!(
        income_sources = income_sources.len(),
        destinations = destinations.len(),
        total_income,
        total_allocated,
        "normalized budget snapshot"
    );

    Ok(NormalizedBudget {
        income_sources,
        destinations,
        total_income,
        total_allocated,
    })
}
