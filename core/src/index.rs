//! Window indexer.
//!
//! One linear pass per feed plus a sort turns the flat snapshot into
//! per-account, ascending-time lists. The evaluators then run sliding
//! two-pointer sweeps over these lists instead of the nested-loop
//! date-range join the row shapes would otherwise invite, keeping the
//! whole query O(n log n).
//!
//! Pure function of its inputs; nothing here mutates the snapshot.

use crate::{
    config::EngineConfig,
    model::FeedSnapshot,
    query::QueryWindow,
    types::{AccountId, Timestamp, TransactionId},
};
use std::collections::HashMap;

/// A timestamped occurrence (inflow, outflow or login), carrying the
/// source record id for deterministic tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedEvent {
    pub at: Timestamp,
    pub id: i64,
}

/// One posted credit to a receiving account.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InboundPosting {
    pub at: Timestamp,
    pub transaction_id: TransactionId,
    pub amount: f64,
}

#[derive(Debug, Default)]
pub struct WindowIndex {
    /// Large posted debits per sender over the 30-day horizon. These
    /// are the outflows signals A and B score; the combiner applies the
    /// query-range bound separately, so an old pass-through still
    /// implicates the sender's in-range drains.
    pub large_outflows: HashMap<AccountId, Vec<TimedEvent>>,
    /// Large posted credits per receiver over the full fetch window
    /// (evidence may predate the queried range).
    pub large_inflows: HashMap<AccountId, Vec<TimedEvent>>,
    /// Logins per account over the full fetch window.
    pub logins: HashMap<AccountId, Vec<TimedEvent>>,
    /// Every posted credit per receiver over the full fetch window,
    /// any amount. Signal C clips this to the horizon.
    pub inbound: HashMap<AccountId, Vec<InboundPosting>>,
}

impl WindowIndex {
    pub fn build(snapshot: &FeedSnapshot, window: &QueryWindow, config: &EngineConfig) -> Self {
        let mut index = WindowIndex::default();

        for t in &snapshot.transactions {
            if !t.is_posted() {
                continue;
            }
            if t.created_at < window.fetch_start || t.created_at >= window.query_end {
                continue;
            }
            index
                .inbound
                .entry(t.receiver_account_id)
                .or_default()
                .push(InboundPosting {
                    at: t.created_at,
                    transaction_id: t.id,
                    amount: t.amount,
                });
            if t.amount >= config.large_amount_threshold {
                index
                    .large_inflows
                    .entry(t.receiver_account_id)
                    .or_default()
                    .push(TimedEvent {
                        at: t.created_at,
                        id: t.id,
                    });
                if window.in_horizon(t.created_at) {
                    index
                        .large_outflows
                        .entry(t.sender_account_id)
                        .or_default()
                        .push(TimedEvent {
                            at: t.created_at,
                            id: t.id,
                        });
                }
            }
        }

        for l in &snapshot.logins {
            if l.login_at < window.fetch_start || l.login_at >= window.query_end {
                continue;
            }
            index.logins.entry(l.account_id).or_default().push(TimedEvent {
                at: l.login_at,
                id: l.id,
            });
        }

        for list in index.large_outflows.values_mut() {
            list.sort_by_key(|e| (e.at, e.id));
        }
        for list in index.large_inflows.values_mut() {
            list.sort_by_key(|e| (e.at, e.id));
        }
        for list in index.logins.values_mut() {
            list.sort_by_key(|e| (e.at, e.id));
        }
        for list in index.inbound.values_mut() {
            list.sort_by_key(|p| (p.at, p.transaction_id));
        }

        index
    }
}
