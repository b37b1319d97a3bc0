// src/export/excel_date.rs

use chrono::NaiveDate;

/// Number format applied to date cells.
pub(crate) const DATE_FORMAT: &str = "yyyy-mm-dd";

/// Excel serial number of a calendar date (1900 date system).
pub(crate) fn date_to_excel_serial(date: NaiveDate) -> Option<f64> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    Some((date - epoch).num_days() as f64)
}

/// Serial for a `YYYY-MM-DD` string, if it is one.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<f64> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(date_to_excel_serial)
}

