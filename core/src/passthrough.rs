//! Signal A — round-trip / pass-through.
//!
//! An account that forwards a large inbound amount out again within the
//! pass-through window is acting as a conduit. Per account we count the
//! large outflows that have at least one large inflow `i` with
//! `i.at <= o.at <= i.at + window` (both bounds inclusive). Each outflow
//! counts at most once, however many inflows match.

use crate::{index::WindowIndex, types::AccountId};
use chrono::Duration;
use std::collections::HashMap;

pub fn evaluate(index: &WindowIndex, window: Duration) -> HashMap<AccountId, u32> {
    let mut metric = HashMap::new();

    for (&account_id, outflows) in &index.large_outflows {
        let Some(inflows) = index.large_inflows.get(&account_id) else {
            continue;
        };

        // Both lists are ascending, so the earliest admissible inflow
        // only moves forward as the outflow cursor advances.
        let mut lo = 0usize;
        let mut count = 0u32;
        for o in outflows {
            let earliest = o.at - window;
            while lo < inflows.len() && inflows[lo].at < earliest {
                lo += 1;
            }
            if lo < inflows.len() && inflows[lo].at <= o.at {
                count += 1;
            }
        }

        if count > 0 {
            metric.insert(account_id, count);
        }
    }

    metric
}
