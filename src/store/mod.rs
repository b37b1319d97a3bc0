//! Record store: durable persistence for expense rows, behind one interface
//! whatever the backing (SQLite table or flat CSV file).

mod flat_file;
mod sqlite;

pub use flat_file::CsvStore;
pub use sqlite::SqliteStore;

use crate::config::{Config, StorageBackend};
use crate::errors::AppResult;
use crate::models::expense::{ExpenseId, ExpenseInput, ExpenseRecord, UserId};
use crate::models::import_row::ImportRow;
use crate::models::import_row::ImportSummary;
use std::collections::HashSet;

pub trait RecordStore {
    /// Validate and persist a new expense, returning its id.
    fn create(&mut self, user_id: Option<UserId>, input: ExpenseInput) -> AppResult<ExpenseId>;

    /// All expenses of a user, in store iteration order.
    fn list(&self, user_id: Option<UserId>) -> AppResult<Vec<ExpenseRecord>>;

    /// Fetch a single expense by id.
    fn get(&self, id: ExpenseId) -> AppResult<Option<ExpenseRecord>>;

    /// Replace every mutable field of an existing expense.
    fn update(&mut self, id: ExpenseId, input: ExpenseInput) -> AppResult<()>;

    fn delete(&mut self, id: ExpenseId) -> AppResult<()>;

    /// Append the valid rows, count the invalid ones, then drop exact
    /// duplicates of the user's ledger.
    fn import_merge(&mut self, user_id: Option<UserId>, rows: &[ImportRow])
    -> AppResult<ImportSummary>;

    /// Remove every expense of a user. Returns how many rows were removed.
    fn reset(&mut self, user_id: Option<UserId>) -> AppResult<usize>;

    /// Short description of the backing file, for messages and backups.
    fn location(&self) -> String;
}

/// Open the store selected by the configuration.
pub fn open_store(cfg: &Config) -> AppResult<Box<dyn RecordStore>> {
    match cfg.backend {
        StorageBackend::Sqlite => Ok(Box::new(SqliteStore::open(&cfg.database, &cfg.categories)?)),
        StorageBackend::Csv => Ok(Box::new(CsvStore::new(
            cfg.ledger_path(),
            &cfg.categories,
        ))),
    }
}

/// Ids of the rows to drop so that each (date, category, amount, note)
/// tuple appears once; the oldest row (lowest id) is kept.
pub(crate) fn duplicate_ids(records: &[ExpenseRecord]) -> Vec<ExpenseId> {
    let mut sorted: Vec<&ExpenseRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.id);

    let mut seen = HashSet::new();
    sorted
        .into_iter()
        .filter(|r| !seen.insert(r.content_key()))
        .map(|r| r.id)
        .collect()
}

/// Validate raw import rows one by one.
pub(crate) fn validate_rows(rows: &[ImportRow], allowed: &[String]) -> (Vec<ExpenseInput>, usize) {
    let mut valid = Vec::with_capacity(rows.len());
    let mut rejected = 0;

    for row in rows {
        match row.to_input(allowed) {
            Ok(input) => valid.push(input),
            Err(_) => rejected += 1,
        }
    }

    (valid, rejected)
}
