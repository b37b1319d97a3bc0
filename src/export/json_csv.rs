// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{expense_to_row, get_headers};
use crate::export::{ExpenseExport, notify_export_success};
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// JSON array, pretty-printed.
pub(crate) fn export_json(rows: &[ExpenseExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(rows)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;
    file.write_all(b"\n")?;

    notify_export_success("JSON", rows.len(), path);
    Ok(())
}

/// CSV with a header row. The layout is the one `import` reads back.
pub(crate) fn export_csv(rows: &[ExpenseExport], with_month: bool, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(get_headers(with_month))?;

    for item in rows {
        wtr.write_record(expense_to_row(item))?;
    }

    wtr.flush()?;

    notify_export_success("CSV", rows.len(), path);
    Ok(())
}
