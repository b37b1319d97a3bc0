use crate::core::alert::AlertOutcome;
use crate::core::ledger::Ledger;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use rust_decimal::Decimal;

/// High-level business logic for the `budget` command.
pub struct BudgetLogic;

impl BudgetLogic {
    /// Set (or clear with `None`) the monthly budget. Always re-arms the
    /// alert, then evaluates it against the current month.
    pub fn set(ledger: &mut Ledger, budget: Option<Decimal>) -> AppResult<AlertOutcome> {
        let (user_id, _) = ledger.session.require_user()?;
        ledger.users.set_budget(user_id, budget)?;

        match budget {
            Some(b) => {
                success(format!("Monthly budget set to {}.", ledger.fmt(b)));
                ledger.audit("budget", &format!("Budget set to {}", b));
            }
            None => {
                success("Monthly budget cleared.");
                ledger.audit("budget", "Budget cleared");
            }
        }

        let outcome = ledger.check_budget()?;
        report_alert(ledger, &outcome);
        Ok(outcome)
    }

    /// Print budget, month-to-date spending and latch state.
    pub fn show(ledger: &Ledger) -> AppResult<()> {
        let (user_id, email) = ledger.session.require_user()?;
        let user = ledger.users.get(user_id)?;

        let Some(budget) = user.budget else {
            info(format!("No monthly budget set for {}.", email));
            return Ok(());
        };

        let total = crate::core::query::current_month_total(&ledger.records(), ledger.session.today);
        let color = crate::utils::colors::color_for_budget_usage(total, budget);
        let reset = crate::utils::colors::RESET;

        println!("Budget for {}: {}", email, ledger.fmt(budget));
        println!(
            "Spent this month: {}{}{} ({})",
            color,
            ledger.fmt(total),
            reset,
            crate::utils::formatting::percent(total, budget)
        );
        println!("Alert state: {:?}", user.alert_state());
        Ok(())
    }
}

/// User-facing line for an alert evaluation. Quiet when nothing happened.
pub fn report_alert(ledger: &Ledger, outcome: &AlertOutcome) {
    match outcome {
        AlertOutcome::Dispatched { total, budget } => warning(format!(
            "Budget exceeded: {} spent this month (budget {}). Alert sent to {}.",
            ledger.fmt(*total),
            ledger.fmt(*budget),
            ledger.session.label()
        )),
        AlertOutcome::AlreadyFired { total, budget } => info(format!(
            "Over budget: {} spent this month (budget {}). Alert already sent.",
            ledger.fmt(*total),
            ledger.fmt(*budget)
        )),
        AlertOutcome::DispatchFailed { .. }
        | AlertOutcome::UnderBudget { .. }
        | AlertOutcome::NoBudget => {}
    }
}
