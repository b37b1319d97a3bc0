//! Ledger query engine: filters and aggregates over an in-memory record set.
//!
//! Nothing here touches storage or the clock. Time-relative queries take
//! `today` as an argument so results are reproducible.

use crate::models::category::CategoryFilter;
use crate::models::expense::ExpenseRecord;
use crate::models::summary::LedgerSummary;
use crate::errors::AppResult;
use crate::utils::date::{first_of_month, last_of_month, parse_range};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// Records dated within `[start, end]` (both inclusive).
pub fn filter_by_date_range(
    records: &[ExpenseRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<ExpenseRecord> {
    records
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .cloned()
        .collect()
}

pub fn filter_by_category(records: &[ExpenseRecord], filter: &CategoryFilter) -> Vec<ExpenseRecord> {
    records
        .iter()
        .filter(|r| filter.matches(&r.category))
        .cloned()
        .collect()
}

/// Sum of amounts. Saturates at `Decimal::MAX` instead of panicking, which
/// only matters for rows that bypassed validation (hand-edited files).
pub fn aggregate_total(records: &[ExpenseRecord]) -> Decimal {
    records
        .iter()
        .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.amount))
}

/// Mean amount; `None` for an empty set.
pub fn aggregate_mean(records: &[ExpenseRecord]) -> Option<Decimal> {
    if records.is_empty() {
        return None;
    }
    let mean = aggregate_total(records) / Decimal::from(records.len());
    Some(mean.normalize())
}

/// Largest amount; `None` for an empty set.
pub fn aggregate_max(records: &[ExpenseRecord]) -> Option<Decimal> {
    records.iter().map(|r| r.amount).max()
}

pub fn group_by_category(records: &[ExpenseRecord]) -> HashMap<String, Decimal> {
    let mut out: HashMap<String, Decimal> = HashMap::new();
    for r in records {
        let slot = out.entry(r.category.clone()).or_default();
        *slot = slot.saturating_add(r.amount);
    }
    out
}

/// Category totals, largest first (ties broken by name).
pub fn ranked_categories(records: &[ExpenseRecord]) -> Vec<(String, Decimal)> {
    let mut v: Vec<(String, Decimal)> = group_by_category(records).into_iter().collect();
    v.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    v
}

/// One `(first day of month, total)` entry per month present, oldest first.
pub fn group_by_month(records: &[ExpenseRecord]) -> Vec<(NaiveDate, Decimal)> {
    let mut months: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for r in records {
        let slot = months.entry(first_of_month(r.date)).or_default();
        *slot = slot.saturating_add(r.amount);
    }
    months.into_iter().collect()
}

/// Spending in the calendar month containing `today`.
pub fn current_month_total(records: &[ExpenseRecord], today: NaiveDate) -> Decimal {
    aggregate_total(&filter_by_date_range(
        records,
        first_of_month(today),
        last_of_month(today),
    ))
}

/// Newest first; same-day rows keep insertion order (by id).
pub fn sort_by_date_desc(records: &mut [ExpenseRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
}

/// Period expression (`None`, `"all"` or anything `parse_range` accepts)
/// and category filter combined, keeping store order.
pub fn select(
    records: &[ExpenseRecord],
    period: Option<&str>,
    category: &CategoryFilter,
) -> AppResult<Vec<ExpenseRecord>> {
    let in_period = match period.map(str::trim) {
        None | Some("") => records.to_vec(),
        Some(p) if p.eq_ignore_ascii_case("all") => records.to_vec(),
        Some(p) => {
            let (start, end) = parse_range(p)?;
            filter_by_date_range(records, start, end)
        }
    };

    Ok(filter_by_category(&in_period, category))
}

/// Everything `summary` shows. `month_total` always covers the month of
/// `today`, whatever subset `records` is.
pub fn summarize(records: &[ExpenseRecord], today: NaiveDate) -> LedgerSummary {
    LedgerSummary {
        count: records.len(),
        total: aggregate_total(records),
        month_total: current_month_total(records, today),
        mean: aggregate_mean(records),
        max: aggregate_max(records),
        by_category: ranked_categories(records),
        by_month: group_by_month(records),
        first_date: records.iter().map(|r| r.date).min(),
        last_date: records.iter().map(|r| r.date).max(),
    }
}
