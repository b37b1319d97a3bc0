// src/export/logic.rs

use crate::core::ledger::Ledger;
use crate::core::query::select;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::ExpenseExport;
use crate::export::xlsx::export_xlsx;
use crate::models::category::CategoryFilter;
use crate::ui::messages::warning;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the current user's expenses.
    ///
    /// - `file`: absolute output path
    /// - `range`: `None`, `"all"` or `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, or a
    ///   `start:end` pair of the same shape
    /// - `with_month`: add a `month` column (`YYYY-MM-01`)
    ///
    /// Returns the number of exported rows; nothing is written when the
    /// selection is empty.
    pub fn export(
        ledger: &Ledger,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        category: &CategoryFilter,
        with_month: bool,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let mut rows = select(&ledger.records(), range, category)?;
        rows.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

        if rows.is_empty() {
            warning("No expenses found for the selected range/category.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        let exported: Vec<ExpenseExport> = rows
            .iter()
            .map(|r| ExpenseExport::from_record(r, with_month))
            .collect();

        match format {
            ExportFormat::Csv => export_csv(&exported, with_month, path)?,
            ExportFormat::Json => export_json(&exported, path)?,
            ExportFormat::Xlsx => export_xlsx(&exported, with_month, path)?,
        }

        ledger.audit(
            "export",
            &format!("{} rows as {} to {}", exported.len(), format.as_str(), path.display()),
        );

        Ok(exported.len())
    }
}
