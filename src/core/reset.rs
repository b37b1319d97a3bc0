use crate::core::ledger::Ledger;
use crate::errors::AppResult;
use crate::ui::messages::warning;

pub struct ResetLogic;

impl ResetLogic {
    /// Delete every expense of the current user.
    pub fn apply(ledger: &mut Ledger) -> AppResult<usize> {
        let removed = ledger.store.reset(ledger.session.user_id)?;

        warning(format!(
            "Ledger reset: {} expenses removed for {}.",
            removed,
            ledger.session.label()
        ));
        ledger.audit("reset", &format!("{} expenses removed", removed));
        Ok(removed)
    }
}
