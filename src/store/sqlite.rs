use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_expense, delete_expenses_of, insert_expense, load_expense, load_expenses, update_expense,
};
use crate::errors::{AppError, AppResult};
use crate::models::expense::{ExpenseId, ExpenseInput, ExpenseRecord, UserId};
use crate::models::import_row::{ImportRow, ImportSummary};
use crate::store::{RecordStore, duplicate_ids, validate_rows};

/// Record store backed by the `expenses` table of the application database.
pub struct SqliteStore {
    pool: DbPool,
    path: String,
    categories: Vec<String>,
}

impl SqliteStore {
    pub fn open(path: &str, categories: &[String]) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self {
            pool,
            path: path.to_string(),
            categories: categories.to_vec(),
        })
    }
}

impl RecordStore for SqliteStore {
    fn create(&mut self, user_id: Option<UserId>, input: ExpenseInput) -> AppResult<ExpenseId> {
        let input = input.validated(&self.categories)?;
        insert_expense(&self.pool.conn, user_id, &input)
    }

    fn list(&self, user_id: Option<UserId>) -> AppResult<Vec<ExpenseRecord>> {
        load_expenses(&self.pool.conn, user_id)
    }

    fn get(&self, id: ExpenseId) -> AppResult<Option<ExpenseRecord>> {
        load_expense(&self.pool.conn, id)
    }

    fn update(&mut self, id: ExpenseId, input: ExpenseInput) -> AppResult<()> {
        let input = input.validated(&self.categories)?;
        match update_expense(&self.pool.conn, id, &input)? {
            0 => Err(AppError::NotFound(id)),
            _ => Ok(()),
        }
    }

    fn delete(&mut self, id: ExpenseId) -> AppResult<()> {
        match delete_expense(&self.pool.conn, id)? {
            0 => Err(AppError::NotFound(id)),
            _ => Ok(()),
        }
    }

    fn import_merge(
        &mut self,
        user_id: Option<UserId>,
        rows: &[ImportRow],
    ) -> AppResult<ImportSummary> {
        let (valid, rejected) = validate_rows(rows, &self.categories);

        // Append + de-duplicate as one unit: a failure leaves the ledger untouched.
        let tx = self.pool.conn.transaction()?;

        for input in &valid {
            insert_expense(&tx, user_id, input)?;
        }

        let current = load_expenses(&tx, user_id)?;
        let dupes = duplicate_ids(&current);
        for id in &dupes {
            delete_expense(&tx, *id)?;
        }

        tx.commit()?;

        Ok(ImportSummary {
            imported: valid.len(),
            rejected,
            duplicates_removed: dupes.len(),
        })
    }

    fn reset(&mut self, user_id: Option<UserId>) -> AppResult<usize> {
        delete_expenses_of(&self.pool.conn, user_id)
    }

    fn location(&self) -> String {
        self.path.clone()
    }
}
