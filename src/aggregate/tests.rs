#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{PeriodKind, ReportPeriod, Transaction, TxnKind};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn txn(id: i64, desc: &str, amount: Decimal, kind: TxnKind, category: &str, d: &str) -> Transaction {
    Transaction {
        id,
        desc: desc.into(),
        amount,
        kind,
        category: category.into(),
        date: date(d),
        is_savings: false,
    }
}

fn savings_txn(id: i64, amount: Decimal, d: &str) -> Transaction {
    Transaction {
        id,
        desc: "Move (Saved to Wallet)".into(),
        amount,
        kind: TxnKind::Expense,
        category: "Savings".into(),
        date: date(d),
        is_savings: true,
    }
}

// ── summary ───────────────────────────────────────────────────

#[test]
fn test_summary_scenario() {
    let txns = vec![
        txn(1, "Salary", dec!(50000), TxnKind::Income, "Salary", "2024-03-01"),
        txn(2, "Groceries", dec!(2500), TxnKind::Expense, "Food", "2024-03-05"),
        txn(3, "Bus", dec!(350), TxnKind::Expense, "Transportation", "2024-03-06"),
    ];
    let s = summary(&txns);
    assert_eq!(s.income_total, dec!(50000));
    assert_eq!(s.expense_total, dec!(2850));
    assert_eq!(s.balance, dec!(47150));
}

#[test]
fn test_summary_counts_savings_as_expense() {
    let txns = vec![
        txn(1, "Pay", dec!(1000), TxnKind::Income, "Salary", "2024-03-01"),
        savings_txn(2, dec!(300), "2024-03-02"),
    ];
    let s = summary(&txns);
    assert_eq!(s.expense_total, dec!(300));
    assert_eq!(s.balance, dec!(700));
}

#[test]
fn test_summary_empty() {
    let s = summary(&[]);
    assert_eq!(s.income_total, Decimal::ZERO);
    assert_eq!(s.expense_total, Decimal::ZERO);
    assert_eq!(s.balance, Decimal::ZERO);
}

// ── savings_progress ──────────────────────────────────────────

#[test]
fn test_savings_progress_basic() {
    // Goal is 30% of income: 3000. Wallet 1500 -> 50%.
    assert_eq!(savings_progress(dec!(10000), dec!(1500)), dec!(50));
}

#[test]
fn test_savings_progress_clamps_at_100() {
    assert_eq!(savings_progress(dec!(1000), dec!(5000)), dec!(100));
}

#[test]
fn test_savings_progress_zero_goal_is_zero_not_nan() {
    assert_eq!(savings_progress(Decimal::ZERO, dec!(500)), Decimal::ZERO);
    assert_eq!(savings_progress(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
}

// ── filter ────────────────────────────────────────────────────

fn filter_fixture() -> Vec<Transaction> {
    vec![
        txn(1, "Salary", dec!(50000), TxnKind::Income, "Salary", "2024-03-01"),
        txn(2, "Grocery Shopping", dec!(2500), TxnKind::Expense, "Food", "2024-03-05"),
        savings_txn(3, dec!(500), "2024-03-05"),
        txn(4, "Freelance", dec!(8000), TxnKind::Income, "Freelance", "2024-03-10"),
    ]
}

#[test]
fn test_filter_all_passes_everything_sorted() {
    let out = filter(&filter_fixture(), KindFilter::All, "");
    assert_eq!(out.len(), 4);
    let ids: Vec<i64> = out.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![4, 2, 3, 1]); // date desc, ties by insertion order
}

#[test]
fn test_filter_by_kind() {
    let income = filter(&filter_fixture(), KindFilter::Income, "");
    assert!(income.iter().all(|t| t.kind == TxnKind::Income));
    assert_eq!(income.len(), 2);

    let expense = filter(&filter_fixture(), KindFilter::Expense, "");
    assert_eq!(expense.len(), 2);
}

#[test]
fn test_savings_pass_expense_filter() {
    let expense = filter(&filter_fixture(), KindFilter::Expense, "");
    assert!(expense.iter().any(|t| t.is_savings));
}

#[test]
fn test_search_matches_desc_or_category_case_insensitive() {
    let by_desc = filter(&filter_fixture(), KindFilter::All, "GROCERY");
    assert_eq!(by_desc.len(), 1);
    assert_eq!(by_desc[0].id, 2);

    let by_category = filter(&filter_fixture(), KindFilter::All, "free");
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].id, 4);
}

#[test]
fn test_search_applies_after_kind_filter() {
    // "Salary" matches only an income transaction
    let out = filter(&filter_fixture(), KindFilter::Expense, "salary");
    assert!(out.is_empty());
}

#[test]
fn test_blank_search_is_noop() {
    let all = filter(&filter_fixture(), KindFilter::All, "");
    let spaced = filter(&filter_fixture(), KindFilter::All, "   ");
    assert_eq!(all.len(), spaced.len());
}

#[test]
fn test_filter_is_idempotent() {
    let once = filter(&filter_fixture(), KindFilter::Expense, "o");
    let twice = filter(&once, KindFilter::Expense, "o");
    let ids_once: Vec<i64> = once.iter().map(|t| t.id).collect();
    let ids_twice: Vec<i64> = twice.iter().map(|t| t.id).collect();
    assert_eq!(ids_once, ids_twice);
}

#[test]
fn test_sort_is_stable_on_equal_dates() {
    let txns = vec![
        txn(10, "First", dec!(1), TxnKind::Expense, "Food", "2024-03-05"),
        txn(11, "Second", dec!(1), TxnKind::Expense, "Food", "2024-03-05"),
        txn(12, "Third", dec!(1), TxnKind::Expense, "Food", "2024-03-05"),
    ];
    let out = filter(&txns, KindFilter::All, "");
    let ids: Vec<i64> = out.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![10, 11, 12]);
}

// ── category_totals ───────────────────────────────────────────

#[test]
fn test_category_totals_scenario() {
    let txns = vec![
        txn(1, "Lunch", dec!(100), TxnKind::Expense, "Food", "2024-03-05"),
        txn(2, "Dinner", dec!(200), TxnKind::Expense, "Food", "2024-03-10"),
        txn(3, "Bus", dec!(50), TxnKind::Expense, "Transportation", "2024-03-12"),
        txn(4, "Salary", dec!(50000), TxnKind::Income, "Salary", "2024-03-01"),
    ];
    let period = ReportPeriod::resolve(PeriodKind::ThisMonth, date("2024-03-15"));
    let totals = category_totals(&txns, &period);

    assert_eq!(totals.get("Food"), Some(&dec!(300)));
    assert_eq!(totals.get("Transportation"), Some(&dec!(50)));
    // Income never contributes to spending
    assert!(!totals.contains_key("Salary"));
}

#[test]
fn test_category_totals_respects_period() {
    let txns = vec![
        txn(1, "Lunch", dec!(100), TxnKind::Expense, "Food", "2024-02-28"),
        txn(2, "Dinner", dec!(200), TxnKind::Expense, "Food", "2024-03-10"),
    ];
    let period = ReportPeriod::resolve(PeriodKind::ThisMonth, date("2024-03-15"));
    let totals = category_totals(&txns, &period);
    assert_eq!(totals.get("Food"), Some(&dec!(200)));
}

// ── monthly_series ────────────────────────────────────────────

#[test]
fn test_monthly_series_shape() {
    let series = monthly_series(&[], 6, date("2024-03-15"));
    assert_eq!(series.len(), 6);
    assert_eq!(series[0].label, "Oct 23"); // oldest first
    assert_eq!(series[5].label, "Mar 24");
    for bucket in &series {
        assert_eq!(bucket.income, Decimal::ZERO);
        assert_eq!(bucket.expense, Decimal::ZERO);
    }
}

#[test]
fn test_monthly_series_buckets_by_calendar_month() {
    let txns = vec![
        txn(1, "Pay Feb", dec!(1000), TxnKind::Income, "Salary", "2024-02-01"),
        txn(2, "Rent Feb", dec!(400), TxnKind::Expense, "Bills", "2024-02-29"),
        txn(3, "Pay Mar", dec!(1200), TxnKind::Income, "Salary", "2024-03-01"),
        txn(4, "Old", dec!(9999), TxnKind::Income, "Salary", "2023-12-31"),
    ];
    let series = monthly_series(&txns, 2, date("2024-03-15"));
    assert_eq!(series.len(), 2);

    assert_eq!(series[0].label, "Feb 24");
    assert_eq!(series[0].income, dec!(1000));
    assert_eq!(series[0].expense, dec!(400));

    assert_eq!(series[1].label, "Mar 24");
    assert_eq!(series[1].income, dec!(1200));
    assert_eq!(series[1].expense, Decimal::ZERO);
}

#[test]
fn test_monthly_series_includes_month_boundaries() {
    let txns = vec![
        txn(1, "First", dec!(10), TxnKind::Expense, "Food", "2024-03-01"),
        txn(2, "Last", dec!(20), TxnKind::Expense, "Food", "2024-03-31"),
    ];
    let series = monthly_series(&txns, 1, date("2024-03-15"));
    assert_eq!(series[0].expense, dec!(30));
}

#[test]
fn test_monthly_series_spans_year_boundary() {
    let series = monthly_series(&[], 3, date("2024-01-20"));
    let labels: Vec<&str> = series.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["Nov 23", "Dec 23", "Jan 24"]);
}

#[test]
fn test_months_back_arithmetic() {
    assert_eq!(months_back(2024, 3, 0), (2024, 3));
    assert_eq!(months_back(2024, 3, 2), (2024, 1));
    assert_eq!(months_back(2024, 3, 3), (2023, 12));
    assert_eq!(months_back(2024, 1, 13), (2022, 12));
}

// ── report_summary ────────────────────────────────────────────

#[test]
fn test_report_summary_restricts_to_period() {
    let txns = vec![
        txn(1, "Pay", dec!(1000), TxnKind::Income, "Salary", "2024-03-01"),
        txn(2, "Rent", dec!(400), TxnKind::Expense, "Bills", "2024-03-31"),
        txn(3, "Old pay", dec!(9000), TxnKind::Income, "Salary", "2024-02-15"),
    ];
    let period = ReportPeriod::resolve(PeriodKind::ThisMonth, date("2024-03-15"));
    let s = report_summary(&txns, &period);
    assert_eq!(s.income_total, dec!(1000));
    assert_eq!(s.expense_total, dec!(400));
    assert_eq!(s.balance, dec!(600));
}

#[test]
fn test_report_summary_all_time() {
    let txns = vec![
        txn(1, "Pay", dec!(1000), TxnKind::Income, "Salary", "1999-01-01"),
        txn(2, "Rent", dec!(400), TxnKind::Expense, "Bills", "2024-03-31"),
    ];
    let period = ReportPeriod::resolve(PeriodKind::All, date("2024-03-15"));
    let s = report_summary(&txns, &period);
    assert_eq!(s.balance, dec!(600));
}

// ── balance conservation ──────────────────────────────────────

#[test]
fn test_balance_equals_income_minus_expense_at_every_step() {
    let mut txns: Vec<Transaction> = Vec::new();
    let steps = [
        (dec!(5000), TxnKind::Income),
        (dec!(120), TxnKind::Expense),
        (dec!(80), TxnKind::Expense),
        (dec!(2500), TxnKind::Income),
        (dec!(990), TxnKind::Expense),
    ];
    for (i, (amount, kind)) in steps.iter().enumerate() {
        txns.push(txn(i as i64, "Step", *amount, *kind, "Other", "2024-03-10"));
        let s = summary(&txns);
        assert_eq!(s.balance, s.income_total - s.expense_total);
    }
}
