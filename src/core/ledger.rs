use crate::config::Config;
use crate::core::alert::{AlertOutcome, BudgetAlert};
use crate::core::session::Session;
use crate::db::log::ttlog_quiet;
use crate::db::users::UserDirectory;
use crate::errors::AppResult;
use crate::models::expense::ExpenseRecord;
use crate::notify::{Notifier, notifier_from_config};
use crate::store::{RecordStore, open_store};
use crate::ui::messages::warning;
use crate::utils::format_amount;
use chrono::NaiveDate;

/// Everything a command needs: the record store, the user directory,
/// the alert dispatcher and the session.
pub struct Ledger {
    pub store: Box<dyn RecordStore>,
    pub users: UserDirectory,
    pub notifier: Box<dyn Notifier>,
    pub session: Session,
    pub currency: String,
}

impl Ledger {
    /// Open store and directory from the configuration and resolve the
    /// acting user (`--user`, then `default_user`, else anonymous).
    pub fn open(cfg: &Config, email: Option<&str>, today: NaiveDate) -> AppResult<Self> {
        let mut users = UserDirectory::open(&cfg.database)?;
        let email = email.or(cfg.default_user.as_deref());
        let session = Session::open(&mut users, email, today)?;
        let store = open_store(cfg)?;

        Ok(Self {
            store,
            users,
            notifier: notifier_from_config(cfg),
            session,
            currency: cfg.currency_symbol.clone(),
        })
    }

    pub fn with_parts(
        store: Box<dyn RecordStore>,
        users: UserDirectory,
        notifier: Box<dyn Notifier>,
        session: Session,
    ) -> Self {
        Self {
            store,
            users,
            notifier,
            session,
            currency: "₹".to_string(),
        }
    }

    pub fn fmt(&self, amount: rust_decimal::Decimal) -> String {
        format_amount(amount, &self.currency)
    }

    /// The current user's ledger. A store that cannot be read yields an
    /// empty ledger (treated like a fresh install) with a warning.
    pub fn records(&self) -> Vec<ExpenseRecord> {
        match self.store.list(self.session.user_id) {
            Ok(r) => r,
            Err(e) => {
                warning(format!(
                    "Could not read {} ({}); showing an empty ledger.",
                    self.store.location(),
                    e
                ));
                Vec::new()
            }
        }
    }

    /// Run the budget alert for the current user on fresh rows.
    pub fn check_budget(&mut self) -> AppResult<AlertOutcome> {
        let records = self.records();
        BudgetAlert::evaluate(
            &mut self.users,
            self.notifier.as_ref(),
            &self.session,
            &records,
        )
    }

    /// Append a line to the audit log (non-blocking).
    pub fn audit(&self, operation: &str, message: &str) {
        ttlog_quiet(self.users.conn(), operation, &self.session.label(), message);
    }
}
