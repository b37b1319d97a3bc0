pub mod add;
pub mod backup;
pub mod budget;
pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod reset;
pub mod summary;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::ledger::Ledger;
use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_date;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// `--today` if given, else the local date.
pub(crate) fn today_of(cli: &Cli) -> AppResult<NaiveDate> {
    match &cli.today {
        Some(s) => parse_date_arg(s),
        None => Ok(crate::utils::date::today()),
    }
}

/// Open the ledger for the user and date given on the command line.
pub(crate) fn open_ledger(cli: &Cli, cfg: &Config) -> AppResult<Ledger> {
    Ledger::open(cfg, cli.user.as_deref(), today_of(cli)?)
}

pub(crate) fn parse_date_arg(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

pub(crate) fn parse_amount_arg(s: &str) -> AppResult<Decimal> {
    Decimal::from_str(s.trim()).map_err(|_| AppError::InvalidAmount(s.to_string()))
}
