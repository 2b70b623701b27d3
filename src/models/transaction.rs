use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnKind {
    Income,
    Expense,
}

impl TxnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for TxnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single ledger entry. `amount` is always positive; direction is carried
/// by `kind`, never by the amount's sign. Serde field names match the
/// persisted blob format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub desc: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TxnKind,
    pub category: String,
    pub date: NaiveDate,
    #[serde(rename = "isSavings", default)]
    pub is_savings: bool,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TxnKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TxnKind::Expense
    }
}

/// Caller-supplied fields for a new transaction; the ledger assigns the id
/// and applies save-to-wallet normalization.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub desc: String,
    pub amount: Decimal,
    pub kind: TxnKind,
    pub category: String,
    pub date: NaiveDate,
}
