pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Total income is zero or negative; callers render a placeholder instead of a diagram.
    #[error("budget has no positive income (total income: {total_income})")]
    EmptyIncome { total_income: f64 },

    #[error("Invalid configuration ({section}): {message}")]
    Config { section: String, message: String },

    #[error("budget snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
