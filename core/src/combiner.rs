//! Candidate combiner and ranker.
//!
//! Joins the queried transactions against the three signal maps, applies
//! the admission predicate, resolves account records, assigns a risk
//! tier and orders the output. A transaction referencing an unknown
//! account fails the whole query — the account feed is a closed superset
//! of every referenced id, and a hole in it is exactly the kind of
//! record this engine exists to surface.

use crate::{
    candidate::{AccountSummary, Candidate, RiskLevel},
    config::EngineConfig,
    error::{EngineError, EngineResult},
    model::{Account, FeedSnapshot, Transaction},
    query::{QueryWindow, RiskQuery},
    types::AccountId,
};
use std::collections::HashMap;

/// Risk tiering, total over all signal combinations so a relaxed query
/// mode can reuse it on non-admitted transactions.
pub fn risk_level(metric_a: u32, metric_b: u32, receiver_anomalous: bool) -> RiskLevel {
    if metric_a > 0 && metric_b > 0 && receiver_anomalous {
        RiskLevel::High
    } else if metric_a > 0 || metric_b > 0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn combine(
    snapshot: &FeedSnapshot,
    window: &QueryWindow,
    config: &EngineConfig,
    query: &RiskQuery,
    metric_a: &HashMap<AccountId, u32>,
    metric_b: &HashMap<AccountId, u32>,
    inbound_sums: &HashMap<AccountId, f64>,
) -> EngineResult<Vec<Candidate>> {
    let accounts: HashMap<AccountId, &Account> =
        snapshot.accounts.iter().map(|a| (a.id, a)).collect();

    let mut candidates = Vec::new();
    for t in &snapshot.transactions {
        if !t.is_posted()
            || t.amount < config.large_amount_threshold
            || !window.contains(t.created_at)
        {
            continue;
        }

        let a = metric_a.get(&t.sender_account_id).copied().unwrap_or(0);
        let b = metric_b.get(&t.sender_account_id).copied().unwrap_or(0);
        let c = receiver_aggregate(t, window, inbound_sums);
        let anomalous = c <= query.max_metric_c;

        // Defaults (1, 1, 0) give the strict predicate; lowering the
        // minimums to 0 is the relaxed mode, where LOW tiers surface.
        if a < query.min_metric_a || b < query.min_metric_b || !anomalous {
            continue;
        }

        let sender = resolve(&accounts, t.sender_account_id, t)?;
        let receiver = resolve(&accounts, t.receiver_account_id, t)?;

        candidates.push(Candidate {
            transaction_id: t.id,
            transaction_time: t.created_at,
            amount: t.amount,
            description: t.description.clone(),
            sender,
            receiver,
            metric_a: a,
            metric_b: b,
            metric_c: c,
            risk_level: risk_level(a, b, anomalous),
        });
    }

    // Recency first, then size, then id for a stable total order.
    candidates.sort_by(|x, y| {
        y.transaction_time
            .cmp(&x.transaction_time)
            .then(y.amount.total_cmp(&x.amount))
            .then(x.transaction_id.cmp(&y.transaction_id))
    });

    Ok(candidates)
}

/// The receiver's horizon aggregate with the candidate itself excluded.
/// A naive sum always contains the candidate's own amount, which would
/// make the zero predicate unsatisfiable.
fn receiver_aggregate(
    t: &Transaction,
    window: &QueryWindow,
    inbound_sums: &HashMap<AccountId, f64>,
) -> f64 {
    let total = inbound_sums
        .get(&t.receiver_account_id)
        .copied()
        .unwrap_or(0.0);
    if window.in_horizon(t.created_at) {
        total - t.amount
    } else {
        total
    }
}

fn resolve<'a>(
    accounts: &HashMap<AccountId, &'a Account>,
    account_id: AccountId,
    t: &Transaction,
) -> EngineResult<AccountSummary> {
    accounts
        .get(&account_id)
        .map(|a| AccountSummary::from(*a))
        .ok_or(EngineError::MissingAccount {
            transaction_id: t.id,
            account_id,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiering_is_total() {
        assert_eq!(risk_level(1, 1, true), RiskLevel::High);
        assert_eq!(risk_level(1, 0, true), RiskLevel::Medium);
        assert_eq!(risk_level(0, 2, false), RiskLevel::Medium);
        assert_eq!(risk_level(1, 1, false), RiskLevel::Medium);
        assert_eq!(risk_level(0, 0, true), RiskLevel::Low);
        assert_eq!(risk_level(0, 0, false), RiskLevel::Low);
    }
}
