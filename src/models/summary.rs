use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Aggregates shown by `rledger summary`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerSummary {
    pub count: usize,
    pub total: Decimal,
    pub month_total: Decimal,
    pub mean: Option<Decimal>,
    pub max: Option<Decimal>,
    pub by_category: Vec<(String, Decimal)>,
    pub by_month: Vec<(NaiveDate, Decimal)>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}
