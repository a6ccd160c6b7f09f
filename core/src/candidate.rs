//! Output types — one immutable, ordered result per query.

use crate::{
    model::{Account, AccountType},
    query::TimeRange,
    types::{AccountId, Timestamp, TransactionId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "LOW")]
    Low,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "HIGH",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::Low => "LOW",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    pub account_id: AccountId,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub account_type: AccountType,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id,
            name: account.name.clone(),
            phone: account.phone.clone(),
            email: account.email.clone(),
            account_type: account.account_type,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub transaction_id: TransactionId,
    pub transaction_time: Timestamp,
    pub amount: f64,
    pub description: Option<String>,
    /// The account money was drained from.
    pub sender: AccountSummary,
    /// The account that received it.
    pub receiver: AccountSummary,
    pub metric_a: u32,
    pub metric_b: u32,
    pub metric_c: f64,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskQueryResult {
    pub time_range: TimeRange,
    pub query_start: Timestamp,
    pub query_end: Timestamp,
    pub total_count: usize,
    pub candidates: Vec<Candidate>,
}
