use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::aggregate::{self, KindFilter, MonthBucket, Summary};
use crate::budget::BudgetBook;
use crate::ledger::Ledger;
use crate::models::{BudgetUtilization, PeriodKind, ReportPeriod, Transaction, TransactionDraft};
use crate::store::KvStore;

/// One signed-in user's working state: the store handle, the ledger, and the
/// budget book. This is the whole query and mutation surface the rendering
/// layer talks to; there is no other shared state.
pub(crate) struct Session {
    kv: KvStore,
    user: String,
    ledger: Ledger,
    budgets: BudgetBook,
}

impl Session {
    /// Start a session for an already-resolved user identity. The caller
    /// hands in the authenticated user; the session never re-checks auth.
    pub(crate) fn open(kv: KvStore, user: String) -> Result<Self> {
        let ledger = Ledger::load(&kv, &user)?;
        let budgets = BudgetBook::load(&kv, &user)?;
        Ok(Self {
            kv,
            user,
            ledger,
            budgets,
        })
    }

    pub(crate) fn user(&self) -> &str {
        &self.user
    }

    // ── Mutations ─────────────────────────────────────────────

    pub(crate) fn add_transaction(
        &mut self,
        draft: TransactionDraft,
        save_to_wallet: bool,
    ) -> Result<Transaction> {
        self.ledger.add(&self.kv, draft, save_to_wallet)
    }

    pub(crate) fn delete_transaction(&mut self, id: i64) -> Result<bool> {
        self.ledger.remove(&self.kv, id)
    }

    pub(crate) fn set_budget_limits(
        &mut self,
        updates: &BTreeMap<String, Decimal>,
    ) -> Result<()> {
        self.budgets.set_limits(&self.kv, updates)
    }

    // ── Queries ───────────────────────────────────────────────

    pub(crate) fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    pub(crate) fn summary(&self) -> Summary {
        aggregate::summary(self.ledger.transactions())
    }

    pub(crate) fn wallet(&self) -> Decimal {
        self.ledger.wallet()
    }

    pub(crate) fn savings_progress(&self) -> Decimal {
        let summary = self.summary();
        aggregate::savings_progress(summary.income_total, self.ledger.wallet())
    }

    pub(crate) fn filtered_transactions(
        &self,
        kind: KindFilter,
        search: &str,
    ) -> Vec<Transaction> {
        aggregate::filter(self.ledger.transactions(), kind, search)
    }

    pub(crate) fn category_totals(&self, period: &ReportPeriod) -> BTreeMap<String, Decimal> {
        aggregate::category_totals(self.ledger.transactions(), period)
    }

    /// Burn-down against this month's spending.
    pub(crate) fn budget_utilization(&self, today: NaiveDate) -> Vec<BudgetUtilization> {
        let this_month = ReportPeriod::resolve(PeriodKind::ThisMonth, today);
        let spent = self.category_totals(&this_month);
        self.budgets.utilization(&spent)
    }

    pub(crate) fn budget_limits(&self) -> &BTreeMap<String, Decimal> {
        self.budgets.limits()
    }

    pub(crate) fn monthly_series(&self, month_count: u32, today: NaiveDate) -> Vec<MonthBucket> {
        aggregate::monthly_series(self.ledger.transactions(), month_count, today)
    }

    pub(crate) fn report_summary(
        &self,
        kind: PeriodKind,
        today: NaiveDate,
    ) -> (ReportPeriod, Summary) {
        let period = ReportPeriod::resolve(kind, today);
        let summary = aggregate::report_summary(self.ledger.transactions(), &period);
        (period, summary)
    }
}
