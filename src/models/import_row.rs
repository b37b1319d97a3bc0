use crate::errors::{AppError, AppResult};
use crate::models::expense::ExpenseInput;
use crate::utils::date::parse_flexible_date;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Raw row of an imported table (`date,category,amount,note`).
///
/// Every field is optional at this stage: a row missing a required field is
/// rejected on its own instead of aborting the whole import. Unknown columns
/// (`id`, `month`, ...) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportRow {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl ImportRow {
    pub fn new(date: &str, category: &str, amount: &str, note: &str) -> Self {
        Self {
            date: Some(date.to_string()),
            category: Some(category.to_string()),
            amount: Some(amount.to_string()),
            note: Some(note.to_string()),
        }
    }

    /// Parse the raw strings into an [`ExpenseInput`].
    pub fn to_input(&self, allowed: &[String]) -> AppResult<ExpenseInput> {
        let date_raw = required(&self.date, "date")?;
        let date = parse_flexible_date(date_raw)
            .ok_or_else(|| AppError::InvalidDate(date_raw.to_string()))?;

        let category = required(&self.category, "category")?;

        let amount_raw = required(&self.amount, "amount")?;
        let amount = Decimal::from_str(amount_raw)
            .map_err(|_| AppError::InvalidAmount(amount_raw.to_string()))?;

        let note = self.note.as_deref().unwrap_or("");

        ExpenseInput::new(date, category, amount, note).validated_for_import(allowed)
    }
}

fn required<'a>(field: &'a Option<String>, name: &str) -> AppResult<&'a str> {
    match field.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::InvalidRow(format!("missing required field '{name}'"))),
    }
}

/// Outcome of an import/merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub rejected: usize,
    pub duplicates_removed: usize,
}
