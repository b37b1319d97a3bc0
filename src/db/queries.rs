use crate::errors::{AppError, AppResult};
use crate::models::expense::{ExpenseId, ExpenseInput, ExpenseRecord, UserId};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use rust_decimal::Decimal;
use std::str::FromStr;

const SELECT_EXPENSE: &str = "SELECT id, user_id, date, category, amount, note FROM expenses";

pub fn map_row(row: &Row) -> Result<ExpenseRecord> {
    let date_str: String = row.get("date")?;
    let amount_str: String = row.get("amount")?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let amount = Decimal::from_str(&amount_str).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidAmount(amount_str.clone())),
        )
    })?;

    Ok(ExpenseRecord {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        date,
        category: row.get("category")?,
        amount,
        note: row.get("note")?,
    })
}

/// All expenses owned by `user_id` (NULL-safe: `None` selects the
/// single-user rows), in insertion order.
pub fn load_expenses(conn: &Connection, user_id: Option<UserId>) -> AppResult<Vec<ExpenseRecord>> {
    let mut stmt = conn.prepare_cached(&format!(
        "{SELECT_EXPENSE} WHERE user_id IS ?1 ORDER BY id ASC"
    ))?;

    let rows = stmt.query_map([user_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_expense(conn: &Connection, id: ExpenseId) -> AppResult<Option<ExpenseRecord>> {
    let mut stmt = conn.prepare_cached(&format!("{SELECT_EXPENSE} WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn insert_expense(
    conn: &Connection,
    user_id: Option<UserId>,
    input: &ExpenseInput,
) -> AppResult<ExpenseId> {
    conn.execute(
        "INSERT INTO expenses (user_id, date, category, amount, note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user_id,
            input.date.format("%Y-%m-%d").to_string(),
            input.category,
            input.amount.normalize().to_string(),
            input.note,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Replace every mutable field of an expense. Returns the number of rows
/// touched (0 when the id does not exist).
pub fn update_expense(conn: &Connection, id: ExpenseId, input: &ExpenseInput) -> AppResult<usize> {
    let changed = conn.execute(
        "UPDATE expenses
         SET date = ?1, category = ?2, amount = ?3, note = ?4
         WHERE id = ?5",
        params![
            input.date.format("%Y-%m-%d").to_string(),
            input.category,
            input.amount.normalize().to_string(),
            input.note,
            id,
        ],
    )?;
    Ok(changed)
}

pub fn delete_expense(conn: &Connection, id: ExpenseId) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM expenses WHERE id = ?1", [id])?)
}

pub fn delete_expenses_of(conn: &Connection, user_id: Option<UserId>) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM expenses WHERE user_id IS ?1", [user_id])?)
}
