use crate::core::budget::report_alert;
use crate::core::ledger::Ledger;
use crate::errors::AppResult;
use crate::models::expense::{ExpenseId, ExpenseInput};
use crate::ui::messages::success;

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    pub fn apply(ledger: &mut Ledger, input: ExpenseInput) -> AppResult<ExpenseId> {
        let id = ledger.store.create(ledger.session.user_id, input)?;

        // Re-read so the message shows the stored (normalized) values.
        if let Some(rec) = ledger.store.get(id)? {
            success(format!(
                "Added #{}: {} {} on {}.",
                id,
                rec.category,
                ledger.fmt(rec.amount),
                rec.date_str()
            ));
            ledger.audit(
                "add",
                &format!("#{} {} {} {}", id, rec.date_str(), rec.category, rec.amount),
            );
        }

        let outcome = ledger.check_budget()?;
        report_alert(ledger, &outcome);

        Ok(id)
    }
}
