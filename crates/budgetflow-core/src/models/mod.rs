pub mod budget;

pub use budget::{BudgetSnapshot, DerivedItem, IncomeSource, ItemKind};
