// src/export/model.rs

use crate::models::expense::ExpenseRecord;
use serde::Serialize;

/// Flat row written by every export format.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ExpenseExport {
    pub date: String,
    pub category: String,
    pub amount: String,
    pub note: String,
    /// First day of the expense's month, only with `--month`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
}

impl ExpenseExport {
    pub fn from_record(r: &ExpenseRecord, with_month: bool) -> Self {
        Self {
            date: r.date_str(),
            category: r.category.clone(),
            amount: r.amount.normalize().to_string(),
            note: r.note.clone(),
            month: with_month.then(|| r.month().format("%Y-%m-%d").to_string()),
        }
    }
}

pub(crate) fn get_headers(with_month: bool) -> Vec<&'static str> {
    let mut h = vec!["date", "category", "amount", "note"];
    if with_month {
        h.push("month");
    }
    h
}

pub(crate) fn expense_to_row(e: &ExpenseExport) -> Vec<String> {
    let mut row = vec![
        e.date.clone(),
        e.category.clone(),
        e.amount.clone(),
        e.note.clone(),
    ];
    if let Some(m) = &e.month {
        row.push(m.clone());
    }
    row
}
