use crate::palette::ColorToken;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IncomeSource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: f64,
}

impl IncomeSource {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Raw budget record as handed over by the planner or saved-budget storage.
///
/// Values are expected to be non-negative; anything else is dropped during normalization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetSnapshot {
    pub income_sources: Vec<IncomeSource>,
    /// Insertion order is kept so equal-valued categories sort stably.
    pub expense_categories: IndexMap<String, f64>,
    pub savings: f64,
    pub remaining: f64,
}

impl BudgetSnapshot {
    pub fn from_json_str(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_income(mut self, name: impl Into<String>, value: f64) -> Self {
        self.income_sources.push(IncomeSource::new(name, value));
        self
    }

    pub fn with_expense(mut self, name: impl Into<String>, value: f64) -> Self {
        self.expense_categories.insert(name.into(), value);
        self
    }

    pub fn with_savings(mut self, savings: f64) -> Self {
        self.savings = savings;
        self
    }

    pub fn with_remaining(mut self, remaining: f64) -> Self {
        self.remaining = remaining;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Expense,
    Savings,
    Remaining,
    OverBudget,
}

impl ItemKind {
    /// Balance items are pinned to the end of the destination list.
    pub fn is_balance(self) -> bool {
        matches!(self, ItemKind::Remaining | ItemKind::OverBudget)
    }
}

/// One destination of the budget flow, derived fresh for every layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedItem {
    pub name: String,
    pub value: f64,
    pub color: ColorToken,
    pub kind: ItemKind,
}
