use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension};
use std::fs;

/// Figures shown by `db --info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbStats {
    pub users: i64,
    pub expenses: i64,
    pub log_entries: i64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl DbStats {
    /// Expenses per day over the covered date span (at least one day).
    pub fn average_per_day(&self) -> Option<f64> {
        let (first, last) = (self.first_date?, self.last_date?);
        let days = ((last - first).num_days() + 1).max(1);
        Some(self.expenses as f64 / days as f64)
    }
}

pub fn collect(conn: &Connection) -> AppResult<DbStats> {
    let count = |table: &str| -> AppResult<i64> {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?)
    };

    let bounds: Option<(Option<String>, Option<String>)> = conn
        .query_row("SELECT MIN(date), MAX(date) FROM expenses", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .optional()?;

    let parse = |s: Option<String>| s.and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok());
    let (first, last) = bounds.unwrap_or((None, None));

    Ok(DbStats {
        users: count("users")?,
        expenses: count("expenses")?,
        log_entries: count("log")?,
        first_date: parse(first),
        last_date: parse(last),
    })
}

pub fn print_db_info(conn: &Connection, db_path: &str) -> AppResult<()> {
    let stats = collect(conn)?;

    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);
    println!("{}• Users:{} {}{}{}", CYAN, RESET, GREEN, stats.users, RESET);
    println!(
        "{}• Total expenses:{} {}{}{}",
        CYAN, RESET, GREEN, stats.expenses, RESET
    );
    println!("{}• Log entries:{} {}", CYAN, RESET, stats.log_entries);

    let show = |d: Option<NaiveDate>| {
        d.map(|d| d.to_string())
            .unwrap_or_else(|| format!("{GREY}--{RESET}"))
    };

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", show(stats.first_date));
    println!("    to:   {}", show(stats.last_date));

    if let Some(avg) = stats.average_per_day() {
        println!("{}• Average expenses/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}
