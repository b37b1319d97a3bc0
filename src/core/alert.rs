//! Budget alert state machine.
//!
//! `Armed` → `Fired` when the month total reaches the budget and the
//! dispatcher is called; `Fired` → `Armed` only through a budget change.
//! Falling back under budget does not re-arm.

use crate::core::query::current_month_total;
use crate::db::log::ttlog_quiet;
use crate::db::users::UserDirectory;
use crate::errors::AppResult;
use crate::models::expense::ExpenseRecord;
use crate::notify::Notifier;
use crate::core::session::Session;
use crate::ui::messages::warning;
use rust_decimal::Decimal;

/// Result of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertOutcome {
    /// Anonymous session or no budget set: nothing evaluated.
    NoBudget,
    UnderBudget { total: Decimal, budget: Decimal },
    /// This evaluation fired the latch and the dispatcher accepted the alert.
    Dispatched { total: Decimal, budget: Decimal },
    /// This evaluation fired the latch but delivery failed. Not retried.
    DispatchFailed {
        total: Decimal,
        budget: Decimal,
        reason: String,
    },
    /// Over budget, but the alert for this episode was already sent.
    AlreadyFired { total: Decimal, budget: Decimal },
}

impl AlertOutcome {
    pub fn dispatched(&self) -> bool {
        matches!(self, AlertOutcome::Dispatched { .. })
    }
}

pub struct BudgetAlert;

impl BudgetAlert {
    /// Evaluate the user's month-to-date total against their budget.
    ///
    /// The latch is flipped with a single conditional UPDATE before the
    /// dispatcher is called, so concurrent evaluations dispatch at most once.
    /// Dispatcher failures are swallowed: the latch stays `Fired`.
    pub fn evaluate(
        users: &mut UserDirectory,
        notifier: &dyn Notifier,
        session: &Session,
        records: &[ExpenseRecord],
    ) -> AppResult<AlertOutcome> {
        let Ok((user_id, email)) = session.require_user() else {
            return Ok(AlertOutcome::NoBudget);
        };

        let Some(budget) = users.get_budget(user_id)? else {
            return Ok(AlertOutcome::NoBudget);
        };

        let total = current_month_total(records, session.today);

        if total < budget {
            return Ok(AlertOutcome::UnderBudget { total, budget });
        }

        if !users.fire_if_armed(user_id)? {
            return Ok(AlertOutcome::AlreadyFired { total, budget });
        }

        match notifier.send(email, total, budget) {
            Ok(()) => {
                ttlog_quiet(
                    users.conn(),
                    "alert",
                    email,
                    &format!("Budget alert sent: total {} >= budget {}", total, budget),
                );
                Ok(AlertOutcome::Dispatched { total, budget })
            }
            Err(e) => {
                warning(format!("Budget alert could not be delivered: {}", e));
                ttlog_quiet(
                    users.conn(),
                    "alert",
                    email,
                    &format!("Budget alert NOT delivered ({}): total {} >= budget {}", e, total, budget),
                );
                Ok(AlertOutcome::DispatchFailed {
                    total,
                    budget,
                    reason: e.to_string(),
                })
            }
        }
    }
}
