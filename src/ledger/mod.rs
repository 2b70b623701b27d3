use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Transaction, TransactionDraft, TxnKind};
use crate::store::{user_key, KvStore};

const TXNS_KEY: &str = "transactions";
const WALLET_KEY: &str = "savingsWallet";

pub(crate) const SAVINGS_CATEGORY: &str = "Savings";
pub(crate) const SAVED_TO_WALLET_SUFFIX: &str = " (Saved to Wallet)";

/// Rejections surfaced to the caller before any state change. Carried inside
/// `anyhow::Error`; callers that care can downcast.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ValidationError {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("amount must be a positive number")]
    NonPositiveAmount,
    #[error("insufficient balance to save {requested} to wallet (current balance {balance})")]
    InsufficientBalance {
        requested: Decimal,
        balance: Decimal,
    },
}

/// One user's transactions plus the savings-wallet scalar. Owns the in-memory
/// state for the session; every mutation validates, applies, then writes the
/// whole collection back through the store.
pub(crate) struct Ledger {
    user: String,
    txns: Vec<Transaction>,
    wallet: Decimal,
    last_id: i64,
}

impl Ledger {
    /// Load a user's ledger, seeding the fixed sample set on first use
    /// (an empty stored collection counts as first use).
    pub(crate) fn load(kv: &KvStore, user: &str) -> Result<Self> {
        let txns: Vec<Transaction> = kv
            .get_json(&user_key(TXNS_KEY, user))?
            .unwrap_or_default();
        let wallet: Decimal = kv
            .get_json(&user_key(WALLET_KEY, user))?
            .unwrap_or(Decimal::ZERO);

        let last_id = txns.iter().map(|t| t.id).max().unwrap_or(0);
        let mut ledger = Self {
            user: user.to_string(),
            txns,
            wallet,
            last_id,
        };

        if ledger.txns.is_empty() {
            let today = chrono::Local::now().date_naive();
            ledger.seed_sample_data(today);
            ledger.save(kv)?;
        }

        Ok(ledger)
    }

    #[cfg(test)]
    pub(crate) fn with_transactions(
        user: &str,
        txns: Vec<Transaction>,
        wallet: Decimal,
    ) -> Self {
        let last_id = txns.iter().map(|t| t.id).max().unwrap_or(0);
        Self {
            user: user.to_string(),
            txns,
            wallet,
            last_id,
        }
    }

    fn seed_sample_data(&mut self, today: NaiveDate) {
        let samples: [(&str, i64, TxnKind, &str, i64); 5] = [
            ("Salary", 50000, TxnKind::Income, "Salary", 4),
            ("Grocery Shopping", 2500, TxnKind::Expense, "Food", 3),
            ("Uber Ride", 350, TxnKind::Expense, "Transportation", 2),
            ("Netflix Subscription", 499, TxnKind::Expense, "Entertainment", 1),
            ("Freelance Project", 15000, TxnKind::Income, "Freelance", 0),
        ];

        for (desc, amount, kind, category, days_ago) in samples {
            let id = self.next_id();
            self.txns.push(Transaction {
                id,
                desc: desc.to_string(),
                amount: Decimal::from(amount),
                kind,
                category: category.to_string(),
                date: today - Duration::days(days_ago),
                is_savings: false,
            });
        }
    }

    /// Time-based id, forced monotonic so two adds in the same millisecond
    /// still get distinct ids.
    fn next_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let id = if now > self.last_id { now } else { self.last_id + 1 };
        self.last_id = id;
        id
    }

    /// Add a transaction. When `save_to_wallet` is set, the entry is
    /// normalized into a savings transfer (expense, category "Savings",
    /// suffixed description) and the wallet grows by its amount. The
    /// insufficient-balance check lives here so no caller can bypass it.
    pub(crate) fn add(
        &mut self,
        kv: &KvStore,
        draft: TransactionDraft,
        save_to_wallet: bool,
    ) -> Result<Transaction> {
        let desc = draft.desc.trim().to_string();
        if desc.is_empty() {
            return Err(ValidationError::EmptyDescription.into());
        }
        if draft.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount.into());
        }
        if save_to_wallet {
            let balance = self.balance();
            if balance < draft.amount {
                return Err(ValidationError::InsufficientBalance {
                    requested: draft.amount,
                    balance,
                }
                .into());
            }
        }

        let id = self.next_id();
        let txn = if save_to_wallet {
            self.wallet += draft.amount;
            Transaction {
                id,
                desc: format!("{desc}{SAVED_TO_WALLET_SUFFIX}"),
                amount: draft.amount,
                kind: TxnKind::Expense,
                category: SAVINGS_CATEGORY.to_string(),
                date: draft.date,
                is_savings: true,
            }
        } else {
            Transaction {
                id,
                desc,
                amount: draft.amount,
                kind: draft.kind,
                category: draft.category,
                date: draft.date,
                is_savings: false,
            }
        };

        self.txns.push(txn.clone());
        self.save(kv)?;
        Ok(txn)
    }

    /// Remove a transaction by id. Removing a savings transfer gives its
    /// amount back out of the wallet, floored at zero. An unknown id is an
    /// idempotent no-op; the return value says whether anything was removed.
    pub(crate) fn remove(&mut self, kv: &KvStore, id: i64) -> Result<bool> {
        let Some(pos) = self.txns.iter().position(|t| t.id == id) else {
            return Ok(false);
        };

        let txn = self.txns.remove(pos);
        if txn.is_savings {
            self.wallet = (self.wallet - txn.amount).max(Decimal::ZERO);
        }
        self.save(kv)?;
        Ok(true)
    }

    /// Unfiltered running balance: sum of income minus sum of expenses.
    pub(crate) fn balance(&self) -> Decimal {
        self.txns.iter().fold(Decimal::ZERO, |acc, t| match t.kind {
            TxnKind::Income => acc + t.amount,
            TxnKind::Expense => acc - t.amount,
        })
    }

    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.txns
    }

    pub(crate) fn wallet(&self) -> Decimal {
        self.wallet
    }

    fn save(&self, kv: &KvStore) -> Result<()> {
        kv.set_json(&user_key(TXNS_KEY, &self.user), &self.txns)?;
        kv.set_json(&user_key(WALLET_KEY, &self.user), &self.wallet)?;
        Ok(())
    }
}
