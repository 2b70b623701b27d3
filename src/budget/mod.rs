use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{BudgetUtilization, Severity};
use crate::store::{user_key, KvStore};

const LIMITS_KEY: &str = "budgetLimits";

const WARNING_THRESHOLD: u32 = 80;
const OVER_THRESHOLD: u32 = 100;

/// Per-category monthly limits for one user. A zero limit means "not
/// budgeted"; the two income categories default to zero.
pub(crate) struct BudgetBook {
    user: String,
    limits: BTreeMap<String, Decimal>,
}

pub(crate) fn default_limits() -> BTreeMap<String, Decimal> {
    let defaults: [(&str, i64); 10] = [
        ("Food", 15000),
        ("Shopping", 20000),
        ("Transportation", 5000),
        ("Bills", 10000),
        ("Entertainment", 8000),
        ("Healthcare", 5000),
        ("Salary", 0),
        ("Freelance", 0),
        ("Investment", 10000),
        ("Other", 5000),
    ];
    defaults
        .into_iter()
        .map(|(name, limit)| (name.to_string(), Decimal::from(limit)))
        .collect()
}

impl BudgetBook {
    pub(crate) fn load(kv: &KvStore, user: &str) -> Result<Self> {
        let limits = kv
            .get_json(&user_key(LIMITS_KEY, user))?
            .unwrap_or_else(default_limits);
        Ok(Self {
            user: user.to_string(),
            limits,
        })
    }

    pub(crate) fn limits(&self) -> &BTreeMap<String, Decimal> {
        &self.limits
    }

    /// Replace the listed categories' limits (negative input clamps to zero)
    /// and persist the full mapping.
    pub(crate) fn set_limits(
        &mut self,
        kv: &KvStore,
        updates: &BTreeMap<String, Decimal>,
    ) -> Result<()> {
        for (category, limit) in updates {
            self.limits
                .insert(category.clone(), (*limit).max(Decimal::ZERO));
        }
        kv.set_json(&user_key(LIMITS_KEY, &self.user), &self.limits)
    }

    /// Burn-down rows for every category that is budgeted or has spending.
    /// Rows come out sorted by category name.
    pub(crate) fn utilization(
        &self,
        spent_by_category: &BTreeMap<String, Decimal>,
    ) -> Vec<BudgetUtilization> {
        let mut categories: BTreeMap<&str, ()> = BTreeMap::new();
        for (cat, limit) in &self.limits {
            if *limit > Decimal::ZERO {
                categories.insert(cat.as_str(), ());
            }
        }
        for (cat, spent) in spent_by_category {
            if *spent > Decimal::ZERO {
                categories.insert(cat.as_str(), ());
            }
        }

        categories
            .into_keys()
            .map(|category| {
                let spent = spent_by_category
                    .get(category)
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                let limit = self.limits.get(category).copied().unwrap_or(Decimal::ZERO);
                let percentage = utilization_percentage(spent, limit);

                let severity = if percentage >= Decimal::from(OVER_THRESHOLD) {
                    Severity::Over
                } else if percentage > Decimal::from(WARNING_THRESHOLD) {
                    Severity::Warning
                } else {
                    Severity::Normal
                };

                BudgetUtilization {
                    category: category.to_string(),
                    spent,
                    limit,
                    percentage,
                    severity,
                }
            })
            .collect()
    }
}

/// `min(100, spent/limit*100)`; an unbudgeted category with spending reads
/// as fully over. Zero denominator never divides.
fn utilization_percentage(spent: Decimal, limit: Decimal) -> Decimal {
    let hundred = Decimal::from(100);
    if limit > Decimal::ZERO {
        (spent / limit * hundred).min(hundred)
    } else if spent > Decimal::ZERO {
        hundred
    } else {
        Decimal::ZERO
    }
}
