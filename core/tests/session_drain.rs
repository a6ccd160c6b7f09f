//! Signal B: session-triggered drain counting.

use chrono::{DateTime, Duration, TimeZone, Utc};
use riskwatch_core::{
    index::WindowIndex, query::QueryWindow, session, EngineConfig, FeedSnapshot, FixedClock,
    Login, RiskQuery, TimeRange, Transaction, TransactionStatus,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
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

fn login(id: i64, account_id: i64, at: DateTime<Utc>) -> Login {
    Login {
        id,
        account_id,
        login_at: at,
    }
}

fn evaluate(logins: Vec<Login>, transactions: Vec<Transaction>) -> std::collections::HashMap<i64, u32> {
    let config = EngineConfig::default();
    let window = QueryWindow::resolve(
        &RiskQuery::with_range(TimeRange::H24),
        &FixedClock(now()),
        &config,
    );
    let snapshot = FeedSnapshot {
        accounts: vec![],
        logins,
        transactions,
    };
    let index = WindowIndex::build(&snapshot, &window, &config);
    session::evaluate(&index, config.drain_window)
}

#[test]
fn login_at_exact_five_minute_boundary_matches() {
    let out_at = now() - Duration::hours(1);
    let metric = evaluate(
        vec![login(1, 1, out_at - Duration::minutes(5))],
        vec![posted(1, 1, 8, 60_000.0, out_at)],
    );
    assert_eq!(metric.get(&1), Some(&1));
}

#[test]
fn login_one_second_past_the_boundary_does_not_match() {
    let out_at = now() - Duration::hours(1);
    let metric = evaluate(
        vec![login(1, 1, out_at - Duration::minutes(5) - Duration::seconds(1))],
        vec![posted(1, 1, 8, 60_000.0, out_at)],
    );
    assert_eq!(metric.get(&1), None);
}

#[test]
fn login_after_the_outflow_does_not_match() {
    let out_at = now() - Duration::hours(1);
    let metric = evaluate(
        vec![login(1, 1, out_at + Duration::seconds(1))],
        vec![posted(1, 1, 8, 60_000.0, out_at)],
    );
    assert_eq!(metric.get(&1), None);
}

#[test]
fn another_accounts_login_is_not_evidence() {
    let out_at = now() - Duration::hours(1);
    let metric = evaluate(
        vec![login(1, 2, out_at - Duration::minutes(1))],
        vec![posted(1, 1, 8, 60_000.0, out_at)],
    );
    assert_eq!(metric.get(&1), None);
}

#[test]
fn no_logins_in_horizon_yields_zero_for_every_account() {
    let out_at = now() - Duration::hours(1);
    let metric = evaluate(
        vec![],
        vec![
            posted(1, 1, 8, 60_000.0, out_at),
            posted(2, 2, 8, 70_000.0, out_at),
        ],
    );
    assert!(metric.is_empty());
}

#[test]
fn drain_before_the_query_range_but_in_horizon_is_scored() {
    let out_at = now() - Duration::days(5);
    let metric = evaluate(
        vec![login(1, 1, out_at - Duration::minutes(1))],
        vec![posted(1, 1, 8, 60_000.0, out_at)],
    );
    assert_eq!(metric.get(&1), Some(&1));
}

#[test]
fn drain_beyond_the_horizon_is_not_scored() {
    let out_at = now() - Duration::days(30) - Duration::seconds(1);
    let metric = evaluate(
        vec![login(1, 1, out_at - Duration::minutes(1))],
        vec![posted(1, 1, 8, 60_000.0, out_at)],
    );
    assert_eq!(metric.get(&1), None);
}

#[test]
fn two_drains_after_one_login_both_count() {
    let at = now() - Duration::hours(1);
    let metric = evaluate(
        vec![login(1, 1, at)],
        vec![
            posted(1, 1, 8, 60_000.0, at + Duration::minutes(1)),
            posted(2, 1, 9, 70_000.0, at + Duration::minutes(4)),
        ],
    );
    assert_eq!(metric.get(&1), Some(&2));
}
