//! Feed boundary.
//!
//! The engine consumes three read-only feeds through `FeedSource` and
//! never assumes what backs them — SQLite, a remote service, or an
//! in-memory fixture all look the same from here. Fetch failures are
//! wrapped as `FeedUnavailable` and propagated without retry; retries
//! belong to the collaborator that owns the storage.

use crate::{
    error::{EngineError, EngineResult},
    model::{Account, FeedSnapshot, Login, Transaction},
    types::Timestamp,
};

pub trait FeedSource {
    /// Accounts are a closed superset of every id referenced by the
    /// other feeds; they are fetched whole.
    fn fetch_accounts(&self) -> anyhow::Result<Vec<Account>>;

    /// Logins with `login_at` in `[start, end)`.
    fn fetch_logins(&self, start: Timestamp, end: Timestamp) -> anyhow::Result<Vec<Login>>;

    /// Transactions with `created_at` in `[start, end)`.
    fn fetch_transactions(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> anyhow::Result<Vec<Transaction>>;
}

/// Materialise all three feeds for one query window.
pub fn fetch_snapshot(
    source: &dyn FeedSource,
    start: Timestamp,
    end: Timestamp,
) -> EngineResult<FeedSnapshot> {
    let accounts = source
        .fetch_accounts()
        .map_err(|source| EngineError::FeedUnavailable { feed: "accounts", source })?;
    let logins = source
        .fetch_logins(start, end)
        .map_err(|source| EngineError::FeedUnavailable { feed: "logins", source })?;
    let transactions = source
        .fetch_transactions(start, end)
        .map_err(|source| EngineError::FeedUnavailable { feed: "transactions", source })?;
    Ok(FeedSnapshot {
        accounts,
        logins,
        transactions,
    })
}

/// In-memory feed source, used by tests and fixture-driven runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryFeed {
    pub accounts: Vec<Account>,
    pub logins: Vec<Login>,
    pub transactions: Vec<Transaction>,
}

impl MemoryFeed {
    pub fn new(
        accounts: Vec<Account>,
        logins: Vec<Login>,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            accounts,
            logins,
            transactions,
        }
    }

    /// Load a full snapshot from a JSON document with `accounts`,
    /// `logins` and `transactions` arrays.
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let snapshot: FeedSnapshot = serde_json::from_str(json)?;
        Ok(Self::new(
            snapshot.accounts,
            snapshot.logins,
            snapshot.transactions,
        ))
    }
}

impl FeedSource for MemoryFeed {
    fn fetch_accounts(&self) -> anyhow::Result<Vec<Account>> {
        Ok(self.accounts.clone())
    }

    fn fetch_logins(&self, start: Timestamp, end: Timestamp) -> anyhow::Result<Vec<Login>> {
        Ok(self
            .logins
            .iter()
            .filter(|l| start <= l.login_at && l.login_at < end)
            .cloned()
            .collect())
    }

    fn fetch_transactions(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> anyhow::Result<Vec<Transaction>> {
        Ok(self
            .transactions
            .iter()
            .filter(|t| start <= t.created_at && t.created_at < end)
            .cloned()
            .collect())
    }
}
