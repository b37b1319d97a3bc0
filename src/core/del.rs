use crate::core::ledger::Ledger;
use crate::errors::{AppError, AppResult};
use crate::models::expense::ExpenseId;
use crate::ui::messages::info;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Remove one expense of the current user. The budget latch is left as
    /// it is even if the month total drops back under budget.
    pub fn apply(ledger: &mut Ledger, id: ExpenseId) -> AppResult<()> {
        let owned = ledger
            .store
            .get(id)?
            .is_some_and(|r| r.user_id == ledger.session.user_id);

        if !owned {
            return Err(AppError::NotFound(id));
        }

        ledger.store.delete(id)?;

        info(format!("Deleted expense #{}", id));
        ledger.audit("del", &format!("#{} deleted", id));
        Ok(())
    }
}
