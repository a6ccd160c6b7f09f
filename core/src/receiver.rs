//! Signal C — receiver anomaly, aggregate-zero formulation.
//!
//! Per receiving account: the sum of every posted credit inside the
//! 30-day horizon. A receiver whose aggregate — after the combiner
//! excludes the candidate transaction itself — is at or below the query
//! ceiling has accumulated nothing else, the profile of a
//! newly-activated mule account.
//!
//! The per-account sum is computed once here; the per-candidate
//! self-exclusion happens in the combiner, where the candidate is known.

use crate::{index::WindowIndex, query::QueryWindow, types::AccountId};
use std::collections::HashMap;

pub fn evaluate(index: &WindowIndex, window: &QueryWindow) -> HashMap<AccountId, f64> {
    let mut metric = HashMap::new();

    for (&account_id, postings) in &index.inbound {
        let sum: f64 = postings
            .iter()
            .filter(|p| window.in_horizon(p.at))
            .map(|p| p.amount)
            .sum();
        metric.insert(account_id, sum);
    }

    metric
}
