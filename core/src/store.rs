//! SQLite-backed feed source — the concrete collaborator behind the
//! `FeedSource` trait for the CLI and for integration tests.
//!
//! RULE: only this module talks SQL. The engine sees the trait.

use crate::{
    error::EngineResult,
    feed::FeedSource,
    model::{Account, AccountType, Login, Transaction, TransactionStatus},
    types::Timestamp,
};
use anyhow::Context;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

pub struct SqliteFeed {
    conn: Connection,
}

impl SqliteFeed {
    pub fn open(path: &str) -> EngineResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL only matters for real files; :memory: ignores it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// In-memory database, used in tests and `--db :memory:` runs.
    pub fn in_memory() -> EngineResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply the feed schema.
    pub fn migrate(&self) -> EngineResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_feeds.sql"))?;
        Ok(())
    }

    pub fn insert_account(&self, account: &Account) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO accounts (id, name, phone, email, account_type)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                account.id,
                account.name,
                account.phone,
                account.email,
                account_type_str(account.account_type),
            ],
        )?;
        Ok(())
    }

    pub fn insert_login(&self, login: &Login) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO logins (id, account_id, login_at) VALUES (?1, ?2, ?3)",
            params![login.id, login.account_id, login.login_at.to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn insert_transaction(&self, t: &Transaction) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO transactions
                 (id, sender_account_id, receiver_account_id, amount, created_at, status, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                t.id,
                t.sender_account_id,
                t.receiver_account_id,
                t.amount,
                t.created_at.to_rfc3339(),
                t.status.as_str(),
                t.description,
            ],
        )?;
        Ok(())
    }

    pub fn transaction_count(&self) -> EngineResult<i64> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(n)
    }
}

fn account_type_str(t: AccountType) -> &'static str {
    match t {
        AccountType::Personal => "personal",
        AccountType::Business => "business",
    }
}

fn parse_account_type(s: &str) -> anyhow::Result<AccountType> {
    match s {
        "personal" => Ok(AccountType::Personal),
        "business" => Ok(AccountType::Business),
        other => anyhow::bail!("unknown account_type '{other}'"),
    }
}

fn parse_timestamp(s: &str) -> anyhow::Result<Timestamp> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("bad timestamp '{s}'"))
}

impl FeedSource for SqliteFeed {
    fn fetch_accounts(&self) -> anyhow::Result<Vec<Account>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, phone, email, account_type FROM accounts ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;
        let mut accounts = Vec::new();
        for row in rows {
            let (id, name, phone, email, account_type) = row?;
            accounts.push(Account {
                id,
                name,
                phone,
                email,
                account_type: parse_account_type(&account_type)?,
            });
        }
        Ok(accounts)
    }

    fn fetch_logins(&self, start: Timestamp, end: Timestamp) -> anyhow::Result<Vec<Login>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, account_id, login_at FROM logins
             WHERE login_at >= ?1 AND login_at < ?2
             ORDER BY id",
        )?;
        let rows = stmt.query_map(params![start.to_rfc3339(), end.to_rfc3339()], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;
        let mut logins = Vec::new();
        for row in rows {
            let (id, account_id, login_at) = row?;
            logins.push(Login {
                id,
                account_id,
                login_at: parse_timestamp(&login_at)?,
            });
        }
        Ok(logins)
    }

    fn fetch_transactions(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> anyhow::Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, sender_account_id, receiver_account_id, amount, created_at, status, description
             FROM transactions
             WHERE created_at >= ?1 AND created_at < ?2
             ORDER BY id",
        )?;
        let rows = stmt.query_map(params![start.to_rfc3339(), end.to_rfc3339()], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, Option<String>>(6)?,
            ))
        })?;
        let mut transactions = Vec::new();
        for row in rows {
            let (id, sender, receiver, amount, created_at, status, description) = row?;
            let status = TransactionStatus::parse(&status)
                .ok_or_else(|| anyhow::anyhow!("unknown transaction status '{status}'"))?;
            transactions.push(Transaction {
                id,
                sender_account_id: sender,
                receiver_account_id: receiver,
                amount,
                created_at: parse_timestamp(&created_at)?,
                status,
                description,
            });
        }
        Ok(transactions)
    }
}
