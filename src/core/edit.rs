use crate::core::budget::report_alert;
use crate::core::ledger::Ledger;
use crate::errors::{AppError, AppResult};
use crate::models::expense::{ExpenseId, ExpenseInput};
use crate::ui::messages::success;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Fields given on the command line; `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct EditFields {
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    pub note: Option<String>,
}

/// High-level business logic for the `edit` command.
pub struct EditLogic;

impl EditLogic {
    /// Overlay `fields` on the stored record and replace it as a whole.
    pub fn apply(ledger: &mut Ledger, id: ExpenseId, fields: EditFields) -> AppResult<()> {
        let current = ledger
            .store
            .get(id)?
            .filter(|r| r.user_id == ledger.session.user_id)
            .ok_or(AppError::NotFound(id))?;

        let mut input = ExpenseInput::from(&current);
        if let Some(d) = fields.date {
            input.date = d;
        }
        if let Some(c) = fields.category {
            input.category = c;
        }
        if let Some(a) = fields.amount {
            input.amount = a;
        }
        if let Some(n) = fields.note {
            input.note = n;
        }

        ledger.store.update(id, input)?;

        success(format!("Expense #{} updated.", id));
        ledger.audit("edit", &format!("#{} updated", id));

        let outcome = ledger.check_budget()?;
        report_alert(ledger, &outcome);
        Ok(())
    }
}
