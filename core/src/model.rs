//! Feed record types.
//!
//! RULE: records are validated once, at the feed boundary, and trusted
//! everywhere downstream. The engine never mutates a feed record.

use crate::{
    error::{EngineError, EngineResult},
    types::{AccountId, LoginId, Timestamp, TransactionId},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Personal,
    Business,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub account_type: AccountType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Login {
    pub id: LoginId,
    pub account_id: AccountId,
    pub login_at: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Posted,
    Pending,
    Reversed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Posted => "posted",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Reversed => "reversed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "posted" => Some(TransactionStatus::Posted),
            "pending" => Some(TransactionStatus::Pending),
            "reversed" => Some(TransactionStatus::Reversed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub sender_account_id: AccountId,
    pub receiver_account_id: AccountId,
    pub amount: f64,
    pub created_at: Timestamp,
    pub status: TransactionStatus,
    #[serde(default)]
    pub description: Option<String>,
}

impl Transaction {
    pub fn is_posted(&self) -> bool {
        self.status == TransactionStatus::Posted
    }
}

/// The materialised, read-only input to one query evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedSnapshot {
    pub accounts: Vec<Account>,
    pub logins: Vec<Login>,
    pub transactions: Vec<Transaction>,
}

impl FeedSnapshot {
    /// Boundary validation. Upstream enforces sender != receiver; if one
    /// slips through we keep it (sender and receiver metrics are resolved
    /// independently), but malformed amounts and duplicate ids are
    /// rejected outright.
    pub fn validate(&self) -> EngineResult<()> {
        let mut seen = HashSet::with_capacity(self.transactions.len());
        for t in &self.transactions {
            if !t.amount.is_finite() || t.amount < 0.0 {
                return Err(EngineError::InvalidRecord {
                    reason: format!("transaction {} has invalid amount {}", t.id, t.amount),
                });
            }
            if !seen.insert(t.id) {
                return Err(EngineError::InvalidRecord {
                    reason: format!("duplicate transaction id {}", t.id),
                });
            }
        }
        Ok(())
    }
}
