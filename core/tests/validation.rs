//! Error taxonomy: invalid queries, data-integrity holes and feed
//! failures are reported, never swallowed, and never partial.

use chrono::{DateTime, Duration, TimeZone, Utc};
use riskwatch_core::{
    Account, AccountType, EngineConfig, EngineError, FeedSource, FixedClock, Login, MemoryFeed,
    RiskEngine, RiskQuery, TimeRange, Transaction, TransactionStatus,
};
use std::cell::Cell;
use std::rc::Rc;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn account(id: i64) -> Account {
    Account {
        id,
        name: format!("User_{id:04}"),
        phone: None,
        email: None,
        account_type: AccountType::Personal,
    }
}

fn posted(id: i64, sender: i64, receiver: i64, amount: f64, at: DateTime<Utc>) -> Transaction {
    Transaction {
        id,
        sender_account_id: sender,
        receiver_account_id: receiver,
        amount,
        created_at: at,
        status: TransactionStatus::Posted,
        description: None,
    }
}

/// Fails every fetch, and records whether it was ever asked.
struct FailingFeed {
    touched: Rc<Cell<bool>>,
}

impl FeedSource for FailingFeed {
    fn fetch_accounts(&self) -> anyhow::Result<Vec<Account>> {
        self.touched.set(true);
        anyhow::bail!("account store offline")
    }
    fn fetch_logins(&self, _: DateTime<Utc>, _: DateTime<Utc>) -> anyhow::Result<Vec<Login>> {
        self.touched.set(true);
        anyhow::bail!("login store offline")
    }
    fn fetch_transactions(
        &self,
        _: DateTime<Utc>,
        _: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Transaction>> {
        self.touched.set(true);
        anyhow::bail!("transaction store offline")
    }
}

#[test]
fn unknown_time_range_token_is_rejected() {
    assert!(matches!(
        TimeRange::parse("90d"),
        Err(EngineError::InvalidQuery { .. })
    ));
}

#[test]
fn invalid_query_is_rejected_before_any_fetch() {
    let touched = Rc::new(Cell::new(false));
    let engine = RiskEngine::new(
        EngineConfig::default(),
        Box::new(FailingFeed {
            touched: Rc::clone(&touched),
        }),
        Box::new(FixedClock(now())),
    );
    let query = RiskQuery {
        max_metric_c: f64::NAN,
        ..RiskQuery::default()
    };
    assert!(matches!(
        engine.run(&query),
        Err(EngineError::InvalidQuery { .. })
    ));
    assert!(!touched.get(), "feed was fetched before query validation");
}

#[test]
fn feed_failure_propagates_unchanged() {
    let engine = RiskEngine::new(
        EngineConfig::default(),
        Box::new(FailingFeed {
            touched: Rc::new(Cell::new(false)),
        }),
        Box::new(FixedClock(now())),
    );
    match engine.run(&RiskQuery::default()) {
        Err(EngineError::FeedUnavailable { feed, .. }) => assert_eq!(feed, "accounts"),
        other => panic!("expected FeedUnavailable, got {other:?}"),
    }
}

#[test]
fn admitted_candidate_with_unknown_account_fails_the_whole_query() {
    let t0 = now() - Duration::hours(1);
    // Full chain, but the mule (account 2) is absent from the feed.
    let feed = MemoryFeed::new(
        vec![account(1), account(3)],
        vec![Login {
            id: 1,
            account_id: 1,
            login_at: t0 - Duration::minutes(1),
        }],
        vec![
            posted(10, 3, 1, 60_000.0, t0 - Duration::seconds(30)),
            posted(11, 1, 2, 60_000.0, t0),
        ],
    );
    let engine = RiskEngine::new(
        EngineConfig::default(),
        Box::new(feed),
        Box::new(FixedClock(now())),
    );
    match engine.run(&RiskQuery::default()) {
        Err(EngineError::MissingAccount {
            transaction_id,
            account_id,
        }) => {
            assert_eq!(transaction_id, 11);
            assert_eq!(account_id, 2);
        }
        other => panic!("expected MissingAccount, got {other:?}"),
    }
}

#[test]
fn unknown_account_on_a_non_candidate_does_not_fail() {
    // A lone small transaction to a missing account is never admitted,
    // so resolution never touches it.
    let feed = MemoryFeed::new(
        vec![account(1)],
        vec![],
        vec![posted(10, 1, 77, 100.0, now() - Duration::hours(1))],
    );
    let engine = RiskEngine::new(
        EngineConfig::default(),
        Box::new(feed),
        Box::new(FixedClock(now())),
    );
    assert!(engine.run(&RiskQuery::default()).unwrap().candidates.is_empty());
}

#[test]
fn negative_amount_is_an_invalid_record() {
    let feed = MemoryFeed::new(
        vec![account(1), account(2)],
        vec![],
        vec![posted(10, 1, 2, -5.0, now() - Duration::hours(1))],
    );
    let engine = RiskEngine::new(
        EngineConfig::default(),
        Box::new(feed),
        Box::new(FixedClock(now())),
    );
    assert!(matches!(
        engine.run(&RiskQuery::default()),
        Err(EngineError::InvalidRecord { .. })
    ));
}

#[test]
fn duplicate_transaction_ids_are_an_invalid_record() {
    let at = now() - Duration::hours(1);
    let feed = MemoryFeed::new(
        vec![account(1), account(2)],
        vec![],
        vec![posted(10, 1, 2, 100.0, at), posted(10, 2, 1, 200.0, at)],
    );
    let engine = RiskEngine::new(
        EngineConfig::default(),
        Box::new(feed),
        Box::new(FixedClock(now())),
    );
    assert!(matches!(
        engine.run(&RiskQuery::default()),
        Err(EngineError::InvalidRecord { .. })
    ));
}
