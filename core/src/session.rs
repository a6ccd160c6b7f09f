//! Signal B — session-triggered drain.
//!
//! A large outflow shortly after the sender's login suggests the session
//! itself existed to move the money. Same two-pointer sweep as signal A,
//! over the login index: per account, count the large outflows with at
//! least one login `l` satisfying `l.at <= o.at <= l.at + window`.

use crate::{index::WindowIndex, types::AccountId};
use chrono::Duration;
use std::collections::HashMap;

pub fn evaluate(index: &WindowIndex, window: Duration) -> HashMap<AccountId, u32> {
    let mut metric = HashMap::new();

    for (&account_id, outflows) in &index.large_outflows {
        let Some(logins) = index.logins.get(&account_id) else {
            continue;
        };

        let mut lo = 0usize;
        let mut count = 0u32;
        for o in outflows {
            let earliest = o.at - window;
            while lo < logins.len() && logins[lo].at < earliest {
                lo += 1;
            }
            if lo < logins.len() && logins[lo].at <= o.at {
                count += 1;
            }
        }

        if count > 0 {
            metric.insert(account_id, count);
        }
    }

    metric
}
