//! Deterministic demo-data seeder.
//!
//! Fills the SQLite feed store with a random population (seeded PCG, so
//! the same seed always produces the same feeds) plus a handful of
//! planted pass-through chains inside the last hour, so a default 24h
//! query has something to find.

use anyhow::Result;
use chrono::{Duration, Utc};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use riskwatch_core::{Account, AccountType, Login, SqliteFeed, Transaction, TransactionStatus};

const LARGE_MIN: i64 = 50_000;
const LARGE_MAX: i64 = 200_000;
const PLANTED_CHAINS: usize = 3;

pub struct SeedSpec {
    pub seed: u64,
    pub accounts: usize,
    pub logins: usize,
    pub transactions: usize,
}

pub fn seed_demo_data(
    store: &SqliteFeed,
    spec: &SeedSpec,
    now: chrono::DateTime<Utc>,
) -> Result<()> {
    let mut rng = Pcg64Mcg::seed_from_u64(spec.seed);
    let population = spec.accounts as i64;

    for id in 1..=population {
        store.insert_account(&random_account(id, &mut rng))?;
    }
    // Dedicated accounts for the planted chains: three per chain
    // (funder, victim, mule). The mules receive nothing else, so their
    // horizon aggregate stays at zero.
    for id in population + 1..=population + (PLANTED_CHAINS as i64) * 3 {
        store.insert_account(&random_account(id, &mut rng))?;
    }

    for id in 1..=spec.logins as i64 {
        store.insert_login(&Login {
            id,
            account_id: rng.gen_range(1..=population),
            login_at: now - Duration::seconds(rng.gen_range(0..30 * 86_400)),
        })?;
    }

    for id in 1..=spec.transactions as i64 {
        let sender = rng.gen_range(1..=population);
        let mut receiver = rng.gen_range(1..=population);
        while receiver == sender {
            receiver = rng.gen_range(1..=population);
        }
        let amount = if rng.gen_bool(0.10) {
            rng.gen_range(LARGE_MIN..=LARGE_MAX) as f64
        } else {
            rng.gen_range(100..LARGE_MIN) as f64
        };
        let status = match rng.gen_range(0..100) {
            0..=94 => TransactionStatus::Posted,
            95..=97 => TransactionStatus::Pending,
            _ => TransactionStatus::Reversed,
        };
        store.insert_transaction(&Transaction {
            id,
            sender_account_id: sender,
            receiver_account_id: receiver,
            amount,
            created_at: now - Duration::seconds(rng.gen_range(0..30 * 86_400)),
            status,
            description: None,
        })?;
    }

    plant_chains(store, spec, now)?;
    Ok(())
}

/// Each chain: funder pays the victim, the victim logs in, then drains
/// the same amount to a fresh mule 90 seconds after the inflow — inside
/// both the 2-minute pass-through and 5-minute drain windows.
fn plant_chains(store: &SqliteFeed, spec: &SeedSpec, now: chrono::DateTime<Utc>) -> Result<()> {
    let population = spec.accounts as i64;
    for k in 0..PLANTED_CHAINS as i64 {
        let funder = population + k * 3 + 1;
        let victim = population + k * 3 + 2;
        let mule = population + k * 3 + 3;
        let t0 = now - Duration::minutes(30 + k * 10);
        let amount = (60_000 + k * 1_000) as f64;
        let tx_base = spec.transactions as i64 + k * 2;

        store.insert_transaction(&Transaction {
            id: tx_base + 1,
            sender_account_id: funder,
            receiver_account_id: victim,
            amount,
            created_at: t0,
            status: TransactionStatus::Posted,
            description: Some("planted inflow".to_string()),
        })?;
        store.insert_login(&Login {
            id: spec.logins as i64 + k + 1,
            account_id: victim,
            login_at: t0 + Duration::seconds(60),
        })?;
        store.insert_transaction(&Transaction {
            id: tx_base + 2,
            sender_account_id: victim,
            receiver_account_id: mule,
            amount,
            created_at: t0 + Duration::seconds(90),
            status: TransactionStatus::Posted,
            description: Some("planted drain".to_string()),
        })?;
    }
    Ok(())
}

fn random_account(id: i64, rng: &mut Pcg64Mcg) -> Account {
    Account {
        id,
        name: format!("User_{id:04}"),
        phone: rng
            .gen_bool(0.8)
            .then(|| format!("+1555{:07}", rng.gen_range(0..10_000_000))),
        email: rng.gen_bool(0.7).then(|| format!("user{id:04}@example.com")),
        account_type: if rng.gen_bool(0.10) {
            AccountType::Business
        } else {
            AccountType::Personal
        },
    }
}
