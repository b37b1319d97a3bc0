use crate::errors::{AppError, AppResult};
use crate::models::expense::{ExpenseId, ExpenseInput, ExpenseRecord, UserId};
use crate::models::import_row::{ImportRow, ImportSummary};
use crate::store::{RecordStore, duplicate_ids, validate_rows};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::NamedTempFile;

/// On-disk row of the flat ledger file.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    id: ExpenseId,
    user_id: Option<UserId>,
    date: String,
    category: String,
    amount: String,
    note: String,
}

impl From<&ExpenseRecord> for CsvRow {
    fn from(r: &ExpenseRecord) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            date: r.date_str(),
            category: r.category.clone(),
            amount: r.amount.normalize().to_string(),
            note: r.note.clone(),
        }
    }
}

impl TryFrom<CsvRow> for ExpenseRecord {
    type Error = AppError;

    fn try_from(row: CsvRow) -> AppResult<Self> {
        let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
            .map_err(|_| AppError::InvalidDate(row.date.clone()))?;
        let amount =
            Decimal::from_str(&row.amount).map_err(|_| AppError::InvalidAmount(row.amount.clone()))?;

        Ok(ExpenseRecord {
            id: row.id,
            user_id: row.user_id,
            date,
            category: row.category,
            amount,
            note: row.note,
        })
    }
}

/// Record store backed by a single CSV file
/// (`id,user_id,date,category,amount,note`).
///
/// Every mutation rewrites the file through a uniquely named sibling temp
/// file and a rename, so readers never see a half-written ledger.
/// Concurrent writers are last-write-wins. Issued ids are tracked in a
/// `<file>.seq` sidecar and never reused.
pub struct CsvStore {
    path: PathBuf,
    categories: Vec<String>,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>, categories: &[String]) -> Self {
        Self {
            path: path.into(),
            categories: categories.to_vec(),
        }
    }

    /// Whole file. A missing file is an empty ledger (fresh install).
    fn read_all(&self) -> AppResult<Vec<ExpenseRecord>> {
        let mut rdr = match csv::Reader::from_path(&self.path) {
            Ok(r) => r,
            Err(e) => {
                if let csv::ErrorKind::Io(io_err) = e.kind()
                    && io_err.kind() == io::ErrorKind::NotFound
                {
                    return Ok(Vec::new());
                }
                return Err(e.into());
            }
        };

        let mut out = Vec::new();
        for row in rdr.deserialize::<CsvRow>() {
            out.push(ExpenseRecord::try_from(row?)?);
        }
        Ok(out)
    }

    fn write_all(&self, records: &[ExpenseRecord]) -> AppResult<()> {
        self.replace_file(&self.path, |out| {
            let mut wtr = csv::Writer::from_writer(out);
            if records.is_empty() {
                wtr.write_record(["id", "user_id", "date", "category", "amount", "note"])?;
            }
            for r in records {
                wtr.serialize(CsvRow::from(r))?;
            }
            wtr.flush()?;
            Ok(())
        })
    }

    /// Write `target` through a uniquely named temp file in the same
    /// directory, then rename it into place.
    fn replace_file<F>(&self, target: &Path, write: F) -> AppResult<()>
    where
        F: FnOnce(&mut NamedTempFile) -> AppResult<()>,
    {
        let dir = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        write(&mut tmp)?;
        tmp.as_file().sync_all()?;
        tmp.persist(target).map_err(|e| e.error)?;
        Ok(())
    }

    /// Sidecar holding the highest id ever issued, so ids of deleted rows
    /// are never handed out again.
    fn seq_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "ledger.csv".into());
        name.push(".seq");
        self.path.with_file_name(name)
    }

    fn last_issued(&self) -> AppResult<ExpenseId> {
        match fs::read_to_string(self.seq_path()) {
            Ok(s) => Ok(s.trim().parse().unwrap_or(0)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    /// Reserve `count` fresh ids and return the first one.
    fn issue_ids(&self, records: &[ExpenseRecord], count: usize) -> AppResult<ExpenseId> {
        let high = records
            .iter()
            .map(|r| r.id)
            .max()
            .unwrap_or(0)
            .max(self.last_issued()?);
        let first = high + 1;
        let last = high + count as ExpenseId;

        self.replace_file(&self.seq_path(), |out| {
            writeln!(out, "{}", last)?;
            Ok(())
        })?;
        Ok(first)
    }
}

impl RecordStore for CsvStore {
    fn create(&mut self, user_id: Option<UserId>, input: ExpenseInput) -> AppResult<ExpenseId> {
        let input = input.validated(&self.categories)?;
        let mut records = self.read_all()?;

        let id = self.issue_ids(&records, 1)?;
        records.push(input.into_record(id, user_id));

        self.write_all(&records)?;
        Ok(id)
    }

    fn list(&self, user_id: Option<UserId>) -> AppResult<Vec<ExpenseRecord>> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .collect())
    }

    fn get(&self, id: ExpenseId) -> AppResult<Option<ExpenseRecord>> {
        Ok(self.read_all()?.into_iter().find(|r| r.id == id))
    }

    fn update(&mut self, id: ExpenseId, input: ExpenseInput) -> AppResult<()> {
        let input = input.validated(&self.categories)?;
        let mut records = self.read_all()?;

        let slot = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(AppError::NotFound(id))?;

        let owner = slot.user_id;
        *slot = input.into_record(id, owner);

        self.write_all(&records)
    }

    fn delete(&mut self, id: ExpenseId) -> AppResult<()> {
        let mut records = self.read_all()?;
        let before = records.len();
        records.retain(|r| r.id != id);

        if records.len() == before {
            return Err(AppError::NotFound(id));
        }
        self.write_all(&records)
    }

    fn import_merge(
        &mut self,
        user_id: Option<UserId>,
        rows: &[ImportRow],
    ) -> AppResult<ImportSummary> {
        let (valid, rejected) = validate_rows(rows, &self.categories);
        let mut records = self.read_all()?;

        let imported = valid.len();
        let mut id = if imported == 0 {
            0
        } else {
            self.issue_ids(&records, imported)?
        };
        for input in valid {
            records.push(input.into_record(id, user_id));
            id += 1;
        }

        let owned: Vec<ExpenseRecord> = records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        let dupes = duplicate_ids(&owned);
        records.retain(|r| !dupes.contains(&r.id));

        self.write_all(&records)?;

        Ok(ImportSummary {
            imported,
            rejected,
            duplicates_removed: dupes.len(),
        })
    }

    fn reset(&mut self, user_id: Option<UserId>) -> AppResult<usize> {
        let mut records = self.read_all()?;
        let before = records.len();
        records.retain(|r| r.user_id != user_id);

        let removed = before - records.len();
        self.write_all(&records)?;
        Ok(removed)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
