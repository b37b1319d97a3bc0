//! User directory: email identity → stable user id, plus per-user budget
//! settings and the persisted budget-alert latch.

use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::expense::{MAX_AMOUNT, UserId};
use crate::models::user::User;
use chrono::Local;
use regex::Regex;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)+$").expect("valid email regex")
});

/// Trim, lower-case and syntactically check an email (`local@domain.tld`).
pub fn normalize_email(email: &str) -> AppResult<String> {
    let e = email.trim().to_lowercase();
    if EMAIL_RE.is_match(&e) {
        Ok(e)
    } else {
        Err(AppError::InvalidEmail(email.trim().to_string()))
    }
}

pub struct UserDirectory {
    pool: DbPool,
}

impl UserDirectory {
    /// Open (and migrate if needed) the application database.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    /// Underlying connection, used for audit logging.
    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    /// Look up or create the user for `email`.
    ///
    /// The UNIQUE constraint on `users.email` decides the race between
    /// concurrent first-time calls: every caller inserts-or-ignores, then
    /// re-reads the winning row.
    pub fn resolve(&mut self, email: &str) -> AppResult<UserId> {
        let email = normalize_email(email)?;

        self.pool.conn.execute(
            "INSERT INTO users (email, created_at) VALUES (?1, ?2)
             ON CONFLICT(email) DO NOTHING",
            params![email, Local::now().to_rfc3339()],
        )?;

        let id: UserId = self.pool.conn.query_row(
            "SELECT id FROM users WHERE email = ?1",
            [&email],
            |row| row.get(0),
        )?;

        Ok(id)
    }

    pub fn get(&self, user_id: UserId) -> AppResult<User> {
        self.pool
            .conn
            .query_row(
                "SELECT id, email, budget, alert_sent, created_at FROM users WHERE id = ?1",
                [user_id],
                map_user,
            )
            .optional()?
            .ok_or(AppError::UserNotFound(user_id))
    }

    pub fn get_budget(&self, user_id: UserId) -> AppResult<Option<Decimal>> {
        Ok(self.get(user_id)?.budget)
    }

    /// Store a new budget (`None` clears it) and re-arm the alert latch in
    /// the same statement.
    pub fn set_budget(&mut self, user_id: UserId, budget: Option<Decimal>) -> AppResult<()> {
        if let Some(b) = budget
            && b <= Decimal::ZERO
        {
            return Err(AppError::InvalidAmount(format!(
                "{} (budget must be greater than zero)",
                b
            )));
        }
        if let Some(b) = budget
            && b > MAX_AMOUNT
        {
            return Err(AppError::InvalidAmount(format!(
                "{} (budget must not exceed {})",
                b, MAX_AMOUNT
            )));
        }

        let changed = self.pool.conn.execute(
            "UPDATE users SET budget = ?1, alert_sent = 0 WHERE id = ?2",
            params![budget.map(|b| b.normalize().to_string()), user_id],
        )?;

        if changed == 0 {
            return Err(AppError::UserNotFound(user_id));
        }
        Ok(())
    }

    pub fn is_alert_sent(&self, user_id: UserId) -> AppResult<bool> {
        Ok(self.get(user_id)?.alert_sent)
    }

    pub fn mark_alert_sent(&mut self, user_id: UserId) -> AppResult<()> {
        let changed = self
            .pool
            .conn
            .execute("UPDATE users SET alert_sent = 1 WHERE id = ?1", [user_id])?;

        if changed == 0 {
            return Err(AppError::UserNotFound(user_id));
        }
        Ok(())
    }

    /// Atomically flip the latch from armed to fired.
    ///
    /// Returns `true` only for the caller whose UPDATE performed the
    /// transition; a concurrent evaluation sees `false` and must not dispatch.
    pub fn fire_if_armed(&mut self, user_id: UserId) -> AppResult<bool> {
        let changed = self.pool.conn.execute(
            "UPDATE users SET alert_sent = 1 WHERE id = ?1 AND alert_sent = 0",
            [user_id],
        )?;
        Ok(changed == 1)
    }
}

fn map_user(row: &Row) -> rusqlite::Result<User> {
    let budget_str: Option<String> = row.get("budget")?;
    let budget = match budget_str {
        Some(s) => Some(Decimal::from_str(&s).map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidAmount(s.clone())),
            )
        })?),
        None => None,
    };

    Ok(User {
        id: row.get("id")?,
        email: row.get("email")?,
        budget,
        alert_sent: row.get::<_, i32>("alert_sent")? == 1,
        created_at: row.get("created_at")?,
    })
}
