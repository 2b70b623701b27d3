mod budget;
mod period;
mod transaction;

pub use budget::{BudgetUtilization, Severity};
pub use period::{PeriodKind, ReportPeriod};
pub use transaction::{Transaction, TransactionDraft, TxnKind};

pub(crate) use period::{month_end, month_start};
