//! Pure derivations over a ledger snapshot. Nothing here mutates or
//! persists; every view is recomputed in full from the transaction slice it
//! is handed.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{month_end, month_start, ReportPeriod, Transaction, TxnKind};

/// Fraction of total income the savings wallet is expected to reach.
const SAVINGS_GOAL_PERCENT: i64 = 30;

pub(crate) const DEFAULT_SERIES_MONTHS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) income_total: Decimal,
    pub(crate) expense_total: Decimal,
    pub(crate) balance: Decimal,
}

/// Income and expense totals over the whole slice. Savings transfers were
/// normalized to expenses at creation, so they count on the expense side.
pub(crate) fn summary(txns: &[Transaction]) -> Summary {
    let mut income_total = Decimal::ZERO;
    let mut expense_total = Decimal::ZERO;
    for t in txns {
        match t.kind {
            TxnKind::Income => income_total += t.amount,
            TxnKind::Expense => expense_total += t.amount,
        }
    }
    Summary {
        income_total,
        expense_total,
        balance: income_total - expense_total,
    }
}

/// Progress toward the fixed 30%-of-income savings goal, clamped to
/// [0, 100]. A zero goal reads as zero progress, never a division.
pub(crate) fn savings_progress(income_total: Decimal, wallet: Decimal) -> Decimal {
    let goal = income_total * Decimal::new(SAVINGS_GOAL_PERCENT, 2);
    if goal > Decimal::ZERO {
        (wallet / goal * Decimal::from(100)).min(Decimal::from(100))
    } else {
        Decimal::ZERO
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KindFilter {
    All,
    Income,
    Expense,
}

impl KindFilter {
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(Self::All),
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

/// Kind filter, then case-insensitive substring search over description or
/// category, then a stable date-descending sort (ties keep insertion order).
/// Savings transfers pass the expense filter regardless of literal kind.
pub(crate) fn filter(txns: &[Transaction], kind: KindFilter, search: &str) -> Vec<Transaction> {
    let term = search.trim().to_lowercase();

    let mut out: Vec<Transaction> = txns
        .iter()
        .filter(|t| {
            let kind_ok = match kind {
                KindFilter::All => true,
                KindFilter::Income => t.kind == TxnKind::Income,
                KindFilter::Expense => t.kind == TxnKind::Expense || t.is_savings,
            };
            let search_ok = term.is_empty()
                || t.desc.to_lowercase().contains(&term)
                || t.category.to_lowercase().contains(&term);
            kind_ok && search_ok
        })
        .cloned()
        .collect();

    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

/// Expense amounts grouped by category, restricted to the period.
pub(crate) fn category_totals(
    txns: &[Transaction],
    period: &ReportPeriod,
) -> BTreeMap<String, Decimal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in txns {
        if t.kind == TxnKind::Expense && period.contains(t.date) {
            *totals.entry(t.category.clone()).or_insert(Decimal::ZERO) += t.amount;
        }
    }
    totals
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthBucket {
    pub(crate) label: String,
    pub(crate) income: Decimal,
    pub(crate) expense: Decimal,
}

/// Income/expense totals for each of the last `month_count` calendar months
/// ending at the month of `today`, oldest first. Month membership is an
/// inclusive first-day/last-day comparison on plain dates, so there is no
/// time-of-day boundary to get wrong.
pub(crate) fn monthly_series(
    txns: &[Transaction],
    month_count: u32,
    today: NaiveDate,
) -> Vec<MonthBucket> {
    let mut series = Vec::with_capacity(month_count as usize);
    for i in (0..month_count).rev() {
        let (year, month) = months_back(today.year(), today.month(), i);
        let first = month_start(year, month);
        let last = month_end(year, month);

        let mut income = Decimal::ZERO;
        let mut expense = Decimal::ZERO;
        for t in txns {
            if t.date >= first && t.date <= last {
                match t.kind {
                    TxnKind::Income => income += t.amount,
                    TxnKind::Expense => expense += t.amount,
                }
            }
        }

        series.push(MonthBucket {
            label: first.format("%b %y").to_string(),
            income,
            expense,
        });
    }
    series
}

fn months_back(year: i32, month: u32, back: u32) -> (i32, u32) {
    let total = year * 12 + month as i32 - 1 - back as i32;
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}

/// Totals over an inclusive report window.
pub(crate) fn report_summary(txns: &[Transaction], period: &ReportPeriod) -> Summary {
    let in_period: Vec<Transaction> = txns
        .iter()
        .filter(|t| period.contains(t.date))
        .cloned()
        .collect();
    summary(&in_period)
}

#[cfg(test)]
mod tests;
