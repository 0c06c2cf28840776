// SPDX-License-Identifier: Apache-2.0

use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, Connection};

use crate::{StoreError, StoreErrorCode};

pub const EMAIL_MAX_LEN: usize = 254;

const NEWSLETTER_SCHEMA_VERSION: i64 = 1;

/// File-backed newsletter subscription table.
///
/// One connection guarded by a mutex; every operation is a single short
/// statement. Callers on async paths should hop through `spawn_blocking`.
pub struct NewsletterStore {
    conn: Mutex<Connection>,
}

impl NewsletterStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(sqlite_error)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            CREATE TABLE IF NOT EXISTS subscriptions (
              email TEXT PRIMARY KEY,
              created_at TEXT NOT NULL
            ) WITHOUT ROWID;
            ",
        )
        .map_err(sqlite_error)?;
        conn.execute_batch(&format!("PRAGMA user_version={NEWSLETTER_SCHEMA_VERSION};"))
            .map_err(sqlite_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Inserts the address if it is new. Returns whether a row was inserted;
    /// re-subscribing an existing address is a no-op, not an error.
    pub fn subscribe(&self, email: &str) -> Result<bool, StoreError> {
        let email = normalize_email(email)?;
        let conn = self.lock()?;
        let changed = conn
            .execute(
                "INSERT INTO subscriptions (email, created_at) VALUES (?1, ?2)
                 ON CONFLICT(email) DO NOTHING",
                params![email, unix_seconds().to_string()],
            )
            .map_err(sqlite_error)?;
        Ok(changed > 0)
    }

    /// Returns whether a row was removed.
    pub fn unsubscribe(&self, email: &str) -> Result<bool, StoreError> {
        let email = normalize_email(email)?;
        let conn = self.lock()?;
        let changed = conn
            .execute("DELETE FROM subscriptions WHERE email = ?1", params![email])
            .map_err(sqlite_error)?;
        Ok(changed > 0)
    }

    pub fn count(&self) -> Result<u64, StoreError> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM subscriptions", [], |row| row.get(0))
            .map_err(sqlite_error)?;
        Ok(count as u64)
    }

    /// All subscribed addresses in lexicographic order.
    pub fn export(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT email FROM subscriptions ORDER BY email")
            .map_err(sqlite_error)?;
        let emails = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(sqlite_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(sqlite_error)?;
        Ok(emails)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::new(StoreErrorCode::Internal, e.to_string()))
    }
}

/// Trims and lowercases the address, then checks the minimal shape the
/// subscription table accepts: one `@`, non-empty local part, dotted domain.
pub fn normalize_email(raw: &str) -> Result<String, StoreError> {
    let email = raw.trim().to_ascii_lowercase();
    if email.is_empty() {
        return Err(StoreError::new(
            StoreErrorCode::Validation,
            "email must not be empty",
        ));
    }
    if email.len() > EMAIL_MAX_LEN {
        return Err(StoreError::new(
            StoreErrorCode::Validation,
            format!("email exceeds {EMAIL_MAX_LEN} bytes"),
        ));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(StoreError::new(
            StoreErrorCode::Validation,
            "email must not contain whitespace",
        ));
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(StoreError::new(
            StoreErrorCode::Validation,
            "email must contain an @",
        ));
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(StoreError::new(
            StoreErrorCode::Validation,
            "email must have exactly one @ between a local part and a domain",
        ));
    }
    if !domain.contains('.') {
        return Err(StoreError::new(
            StoreErrorCode::Validation,
            "email domain must contain a dot",
        ));
    }
    Ok(email)
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

fn sqlite_error(e: rusqlite::Error) -> StoreError {
    StoreError::new(StoreErrorCode::Internal, e.to_string())
}
