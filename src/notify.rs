//! Budget alert dispatchers.
//!
//! The core only decides *whether* to send; delivery belongs to whatever
//! implements [`Notifier`]. Two dispatchers ship with the CLI: an outbox
//! file consumed by an external mailer, and a plain terminal warning.

use crate::config::Config;
use crate::ui::messages::warning;
use chrono::Local;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Delivery failure reported by a dispatcher. Never fatal for the caller.
#[derive(Error, Debug)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

impl From<io::Error> for TransportError {
    fn from(e: io::Error) -> Self {
        TransportError(e.to_string())
    }
}

pub trait Notifier {
    fn send(&self, recipient: &str, total: Decimal, budget: Decimal) -> Result<(), TransportError>;
}

/// Alert record written to the outbox, one JSON object per line.
#[derive(Debug, Serialize)]
pub struct AlertMessage<'a> {
    pub recipient: &'a str,
    pub subject: String,
    pub total: String,
    pub budget: String,
    pub created_at: String,
}

impl<'a> AlertMessage<'a> {
    pub fn new(recipient: &'a str, total: Decimal, budget: Decimal) -> Self {
        Self {
            recipient,
            subject: "Budget exceeded".to_string(),
            total: total.normalize().to_string(),
            budget: budget.normalize().to_string(),
            created_at: Local::now().to_rfc3339(),
        }
    }
}

/// Appends alerts to a JSON-lines file.
pub struct OutboxNotifier {
    pub path: PathBuf,
}

impl Notifier for OutboxNotifier {
    fn send(&self, recipient: &str, total: Decimal, budget: Decimal) -> Result<(), TransportError> {
        let msg = AlertMessage::new(recipient, total, budget);
        let line = serde_json::to_string(&msg).map_err(|e| TransportError(e.to_string()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

/// Prints the alert on the terminal.
pub struct ConsoleNotifier {
    pub currency_symbol: String,
}

impl Notifier for ConsoleNotifier {
    fn send(&self, recipient: &str, total: Decimal, budget: Decimal) -> Result<(), TransportError> {
        warning(format!(
            "Budget alert for {}: spent {} this month, budget is {}.",
            recipient,
            crate::utils::format_amount(total, &self.currency_symbol),
            crate::utils::format_amount(budget, &self.currency_symbol),
        ));
        Ok(())
    }
}

/// Dispatcher selected by the configuration.
pub fn notifier_from_config(cfg: &Config) -> Box<dyn Notifier> {
    match cfg.outbox_path() {
        Some(path) => Box::new(OutboxNotifier { path }),
        None => Box::new(ConsoleNotifier {
            currency_symbol: cfg.currency_symbol.clone(),
        }),
    }
}
