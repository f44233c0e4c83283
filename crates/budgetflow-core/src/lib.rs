#![forbid(unsafe_code)]

//! Budget snapshot model and pre-layout processing (headless).
//!
//! - [`models`]: the raw [`BudgetSnapshot`] and the per-pass [`DerivedItem`]s
//! - [`normalize`]: snapshot → ordered income sources and destinations
//! - [`wrap`]: two-line label wrapping
//! - [`config`]: layered JSON configuration with screen presets

pub mod config;
pub mod error;
pub mod geom;
pub mod models;
pub mod normalize;
pub mod palette;
pub mod wrap;

pub use config::{FlowConfig, LayoutConfig, ScreenProfile, ViewportConfig, ZoomStep};
pub use error::{Error, Result};
pub use models::{BudgetSnapshot, DerivedItem, IncomeSource, ItemKind};
pub use normalize::{NormalizedBudget, normalize_budget};
pub use palette::ColorToken;

#[cfg(test)]
mod tests;
