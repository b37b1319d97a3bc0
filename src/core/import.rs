use crate::core::budget::report_alert;
use crate::core::ledger::Ledger;
use crate::errors::AppResult;
use crate::models::import_row::{ImportRow, ImportSummary};
use crate::ui::messages::{info, success, warning};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;

pub struct ImportLogic;

impl ImportLogic {
    /// Merge a CSV table into the current user's ledger.
    pub fn apply(ledger: &mut Ledger, file: &Path) -> AppResult<ImportSummary> {
        info(format!("Importing from {}", file.display()));

        let reader = std::fs::File::open(file)?;
        let (rows, unreadable) = read_rows(reader)?;

        let mut summary = ledger.store.import_merge(ledger.session.user_id, &rows)?;
        summary.rejected += unreadable;

        success(format!(
            "Imported {} rows ({} rejected, {} duplicates removed).",
            summary.imported, summary.rejected, summary.duplicates_removed
        ));
        if summary.rejected > 0 {
            warning("Rejected rows need a valid date, a category and a non-negative amount.");
        }

        ledger.audit(
            "import",
            &format!(
                "{}: imported={} rejected={} duplicates_removed={}",
                file.display(),
                summary.imported,
                summary.rejected,
                summary.duplicates_removed
            ),
        );

        let outcome = ledger.check_budget()?;
        report_alert(ledger, &outcome);

        Ok(summary)
    }
}

/// Parse a `date,category,amount,note` table. Header names are matched
/// case-insensitively; rows the CSV layer cannot decode are counted
/// instead of aborting the import.
pub fn read_rows<R: Read>(input: R) -> AppResult<(Vec<ImportRow>, usize)> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let headers: StringRecord = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_ascii_lowercase())
        .collect();
    rdr.set_headers(headers.clone());

    let mut rows = Vec::new();
    let mut unreadable = 0;

    for record in rdr.records() {
        match record.and_then(|r| r.deserialize::<ImportRow>(Some(&headers))) {
            Ok(row) => rows.push(row),
            Err(_) => unreadable += 1,
        }
    }

    Ok((rows, unreadable))
}
