//! Shared primitive types used across the entire engine.

use chrono::{DateTime, Utc};

/// A stable account identifier, assigned by the upstream ledger.
pub type AccountId = i64;

/// A stable transaction identifier.
pub type TransactionId = i64;

/// A stable login-event identifier.
pub type LoginId = i64;

/// All engine timestamps are UTC.
pub type Timestamp = DateTime<Utc>;
