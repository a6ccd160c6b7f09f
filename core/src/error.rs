use crate::types::{AccountId, TransactionId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid query: {reason}")]
    InvalidQuery { reason: String },

    /// A transaction references an account the account feed does not know.
    /// Never downgraded to a skip — a missing account is itself a signal.
    #[error("Transaction {transaction_id} references unknown account {account_id}")]
    MissingAccount {
        transaction_id: TransactionId,
        account_id: AccountId,
    },

    #[error("Invalid feed record: {reason}")]
    InvalidRecord { reason: String },

    #[error("Feed '{feed}' unavailable: {source}")]
    FeedUnavailable {
        feed: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
