use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

/// Label used when an expense is recorded without a category.
pub const DEFAULT_CATEGORY: &str = "Misc";

/// Largest accepted amount (one trillion) for expenses and budgets. Keeps
/// ledger-wide sums far from `Decimal` overflow.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

pub type ExpenseId = i64;
pub type UserId = i64;

/// One persisted ledger row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRecord {
    pub id: ExpenseId,             // ⇔ expenses.id
    pub user_id: Option<UserId>,   // ⇔ expenses.user_id (NULL in single-user mode)
    pub date: NaiveDate,           // ⇔ expenses.date (TEXT "YYYY-MM-DD")
    pub category: String,          // ⇔ expenses.category
    pub amount: Decimal,           // ⇔ expenses.amount (TEXT, normalized)
    pub note: String,              // ⇔ expenses.note (TEXT, default '')
}

impl ExpenseRecord {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// First day of the record's calendar month.
    pub fn month(&self) -> NaiveDate {
        self.date.with_day(1).unwrap_or(self.date)
    }

    /// Identity of the row for de-duplication: everything except id and owner.
    pub fn content_key(&self) -> (NaiveDate, &str, Decimal, &str) {
        (
            self.date,
            self.category.as_str(),
            self.amount.normalize(),
            self.note.trim(),
        )
    }
}

/// Mutable fields of an expense, as supplied by add/edit/import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseInput {
    pub date: NaiveDate,
    pub category: String,
    pub amount: Decimal,
    pub note: String,
}

impl ExpenseInput {
    pub fn new(date: NaiveDate, category: &str, amount: Decimal, note: &str) -> Self {
        Self {
            date,
            category: category.to_string(),
            amount,
            note: note.to_string(),
        }
    }

    /// Normalize and validate a row for create/update.
    ///
    /// - blank category → `Misc`
    /// - amount must be strictly positive and at most [`MAX_AMOUNT`]
    /// - with a non-empty `allowed` list the category must be one of them
    pub fn validated(self, allowed: &[String]) -> AppResult<Self> {
        if self.amount <= Decimal::ZERO {
            return Err(AppError::InvalidAmount(format!(
                "{} (amount must be greater than zero)",
                self.amount
            )));
        }
        self.with_category_checked(allowed)
    }

    /// Same as [`validated`](Self::validated) but accepts zero amounts.
    /// Imported rows only need to be non-negative.
    pub(crate) fn validated_for_import(self, allowed: &[String]) -> AppResult<Self> {
        if self.amount < Decimal::ZERO {
            return Err(AppError::InvalidAmount(format!(
                "{} (amount must not be negative)",
                self.amount
            )));
        }
        self.with_category_checked(allowed)
    }

    fn with_category_checked(mut self, allowed: &[String]) -> AppResult<Self> {
        if self.amount > MAX_AMOUNT {
            return Err(AppError::InvalidAmount(format!(
                "{} (amount must not exceed {})",
                self.amount, MAX_AMOUNT
            )));
        }

        let trimmed = self.category.trim();
        self.category = if trimmed.is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            trimmed.to_string()
        };
        self.note = self.note.trim().to_string();
        self.amount = self.amount.normalize();

        if !allowed.is_empty()
            && self.category != DEFAULT_CATEGORY
            && !allowed.iter().any(|c| c == &self.category)
        {
            return Err(AppError::InvalidCategory(format!(
                "'{}' is not one of: {}",
                self.category,
                allowed.join(", ")
            )));
        }

        Ok(self)
    }

    pub fn into_record(self, id: ExpenseId, user_id: Option<UserId>) -> ExpenseRecord {
        ExpenseRecord {
            id,
            user_id,
            date: self.date,
            category: self.category,
            amount: self.amount,
            note: self.note,
        }
    }
}

impl From<&ExpenseRecord> for ExpenseInput {
    fn from(r: &ExpenseRecord) -> Self {
        Self {
            date: r.date,
            category: r.category.clone(),
            amount: r.amount,
            note: r.note.clone(),
        }
    }
}
