use rust_decimal::Decimal;

/// How far through a budget the month's spending has burned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Warning,
    Over,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Over => "over",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the budget burn-down view. `percentage` is clamped to [0, 100];
/// a zero limit with non-zero spending reads as 100% and `Over`.
#[derive(Debug, Clone)]
pub struct BudgetUtilization {
    pub category: String,
    pub spent: Decimal,
    pub limit: Decimal,
    pub percentage: Decimal,
    pub severity: Severity,
}
